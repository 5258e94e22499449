//! Order entry form and its price quote.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::order::{NewOrder, NewOrderItem};
use crate::domain::product::Product;
use crate::domain::types::{ClientId, Money, ProductId, Quantity};
use crate::forms::{FormError, optional_text};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemForm {
    #[validate(length(min = 1))]
    pub product_id: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    #[serde(default)]
    pub wholesale: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for placing an order.
pub struct OrderForm {
    #[validate(length(min = 1))]
    pub client_id: String,
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItemForm>,
    #[serde(default)]
    pub notes: String,
}

/// One priced line of an order being entered.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuoteLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: Quantity,
    pub wholesale: bool,
    pub unit_price: Money,
    pub subtotal: Money,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OrderQuote {
    pub lines: Vec<QuoteLine>,
    pub total: Money,
}

impl OrderForm {
    /// Prices every line against the catalogue.
    ///
    /// Wholesale lines use the product's wholesale price when it is set and
    /// positive, the retail price otherwise.
    pub fn quote(&self, products: &[Product]) -> Result<OrderQuote, FormError> {
        let catalogue: HashMap<&str, &Product> =
            products.iter().map(|p| (p.id.as_str(), p)).collect();

        let lines = self
            .items
            .iter()
            .map(|item| -> Result<QuoteLine, FormError> {
                let product = catalogue
                    .get(item.product_id.trim())
                    .ok_or_else(|| FormError::UnknownProduct(item.product_id.clone()))?;
                let quantity = Quantity::new(item.quantity)?;
                let unit_price = product.unit_price(item.wholesale);
                let subtotal = unit_price.times(quantity)?;
                Ok(QuoteLine {
                    product_id: product.id.clone(),
                    product_name: product.name.to_string(),
                    quantity,
                    wholesale: item.wholesale,
                    unit_price,
                    subtotal,
                })
            })
            .collect::<Result<Vec<_>, FormError>>()?;

        let total = Money::try_sum(lines.iter().map(|l| l.subtotal))?;
        Ok(OrderQuote { lines, total })
    }
}

impl TryFrom<OrderForm> for NewOrder {
    type Error = FormError;

    fn try_from(form: OrderForm) -> Result<Self, Self::Error> {
        if form.items.is_empty() {
            return Err(FormError::NoItems);
        }
        form.validate()?;

        let items = form
            .items
            .iter()
            .map(|item| -> Result<NewOrderItem, FormError> {
                Ok(NewOrderItem {
                    product_id: ProductId::new(item.product_id.as_str())?,
                    quantity: Quantity::new(item.quantity)?,
                    wholesale: item.wholesale,
                })
            })
            .collect::<Result<Vec<_>, FormError>>()?;

        Ok(Self {
            client_id: ClientId::new(form.client_id)?,
            items,
            notes: optional_text(&form.notes),
        })
    }
}
