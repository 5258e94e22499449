use serde::{Deserialize, Serialize};

use crate::domain::types::{Money, ProductId, ProductName};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: Option<String>,
    pub price: Money,
    pub wholesale_price: Option<Money>,
    pub image: Option<String>,
}

impl Product {
    /// Price charged per unit.
    ///
    /// The wholesale price only applies when requested and set to a positive
    /// amount; otherwise the retail price is used.
    pub fn unit_price(&self, wholesale: bool) -> Money {
        match self.wholesale_price {
            Some(price) if wholesale && price.is_positive() => price,
            _ => self.price,
        }
    }
}

/// Data required to create or update a product.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: Option<String>,
    pub price: Money,
    pub wholesale_price: Option<Money>,
    pub image: Option<String>,
}
