use serde::{Deserialize, Serialize};

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::{Money, ProductId, ProductName, TypeConstraintError};
use crate::models::HasWireId;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Product document as returned by `/productos`.
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub precio: f64,
    #[serde(default)]
    pub precio_mayoreo: Option<f64>,
    #[serde(default)]
    pub imagen: Option<String>,
}

/// Product fields embedded in populated order items.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProductSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub nombre: Option<String>,
}

impl HasWireId for ProductSummary {
    fn wire_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
/// Body sent to create or update a product.
pub struct ProductPayload<'a> {
    pub nombre: &'a str,
    pub descripcion: &'a str,
    pub precio: f64,
    pub precio_mayoreo: Option<f64>,
    pub imagen: &'a str,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(product.id)?,
            name: ProductName::new(product.nombre)?,
            description: product.descripcion.filter(|s| !s.trim().is_empty()),
            price: Money::non_negative(product.precio)?,
            wholesale_price: product
                .precio_mayoreo
                .map(Money::non_negative)
                .transpose()?,
            image: product.imagen.filter(|s| !s.trim().is_empty()),
        })
    }
}

impl<'a> From<&'a DomainNewProduct> for ProductPayload<'a> {
    fn from(product: &'a DomainNewProduct) -> Self {
        Self {
            nombre: product.name.as_str(),
            descripcion: product.description.as_deref().unwrap_or_default(),
            precio: product.price.to_major(),
            precio_mayoreo: product.wholesale_price.map(Money::to_major),
            imagen: product.image.as_deref().unwrap_or_default(),
        }
    }
}
