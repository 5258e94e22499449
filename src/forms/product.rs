use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{Money, ProductName};
use crate::forms::{FormError, optional_text};

#[derive(Debug, Default, Deserialize, Validate)]
/// Form data for creating or editing a product.
pub struct ProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub wholesale_price: Option<f64>,
    #[serde(default)]
    pub image: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.to_string(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_major(),
            wholesale_price: product.wholesale_price.map(Money::to_major),
            image: product.image.clone().unwrap_or_default(),
        }
    }
}

impl TryFrom<ProductForm> for NewProduct {
    type Error = FormError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: ProductName::new(form.name).map_err(|_| FormError::InvalidName)?,
            description: optional_text(&form.description),
            price: Money::non_negative(form.price)?,
            wholesale_price: form.wholesale_price.map(Money::non_negative).transpose()?,
            image: optional_text(&form.image),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_prices() {
        let form = ProductForm {
            name: "Detergente".into(),
            price: 35.9,
            wholesale_price: Some(30.0),
            ..Default::default()
        };

        let product = NewProduct::try_from(form).unwrap();

        assert_eq!(product.price, Money::from_cents(3590));
        assert_eq!(product.wholesale_price, Some(Money::from_cents(3000)));
        assert_eq!(product.description, None);
    }

    #[test]
    fn negative_prices_fail_validation() {
        let form = ProductForm {
            name: "Detergente".into(),
            price: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            NewProduct::try_from(form),
            Err(FormError::Validation(_))
        ));

        let form = ProductForm {
            name: "Detergente".into(),
            price: 1.0,
            wholesale_price: Some(-2.0),
            ..Default::default()
        };
        assert!(NewProduct::try_from(form).is_err());
    }

    #[test]
    fn zero_price_is_allowed() {
        let form = ProductForm {
            name: "Muestra".into(),
            price: 0.0,
            ..Default::default()
        };
        assert_eq!(NewProduct::try_from(form).unwrap().price, Money::ZERO);
    }
}
