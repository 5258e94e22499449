use serde::Deserialize;
use validator::Validate;

use crate::domain::types::Money;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Form data for registering a partial payment on an order.
pub struct PaymentForm {
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
}

impl TryFrom<PaymentForm> for Money {
    type Error = FormError;

    fn try_from(form: PaymentForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let amount = Money::from_major(form.amount)?;
        // Amounts below half a cent round to zero.
        if !amount.is_positive() {
            return Err(FormError::InvalidAmount);
        }
        Ok(amount)
    }
}
