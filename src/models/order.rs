use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::order::{
    NewOrder as DomainNewOrder, Order as DomainOrder, OrderClient, OrderItem as DomainOrderItem,
    OrderStatus, Payment as DomainPayment,
};
use crate::domain::types::{
    ClientId, Money, OrderId, ProductId, Quantity, TypeConstraintError,
};
use crate::models::EntityRef;
use crate::models::client::ClientSummary;
use crate::models::product::ProductSummary;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Order document as returned by `/pedidos`.
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub cliente: Option<EntityRef<ClientSummary>>,
    #[serde(default)]
    pub nombre_cliente: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub estado: String,
    pub total: f64,
    #[serde(default)]
    pub abonos: Vec<Payment>,
    #[serde(default)]
    pub notas: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub fecha_creacion: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub producto: EntityRef<ProductSummary>,
    pub cantidad: u32,
    #[serde(default)]
    pub es_mayoreo: bool,
    pub precio_unitario: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub monto: f64,
    #[serde(default)]
    pub fecha: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload<'a> {
    pub producto: &'a str,
    pub cantidad: u32,
    pub es_mayoreo: bool,
}

#[derive(Debug, Clone, Serialize)]
/// Body sent to `POST /pedidos`. Prices are computed by the backend.
pub struct OrderPayload<'a> {
    pub cliente: &'a str,
    pub items: Vec<OrderItemPayload<'a>>,
    pub notas: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusPayload {
    pub estado: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentPayload {
    pub monto: f64,
}

impl TryFrom<OrderItem> for DomainOrderItem {
    type Error = TypeConstraintError;

    fn try_from(item: OrderItem) -> Result<Self, Self::Error> {
        Ok(Self {
            product_id: ProductId::new(item.producto.id())?,
            product_name: item.producto.populated().and_then(|p| p.nombre.clone()),
            quantity: Quantity::new(item.cantidad)?,
            wholesale: item.es_mayoreo,
            unit_price: Money::from_major(item.precio_unitario)?,
            subtotal: Money::from_major(item.subtotal)?,
        })
    }
}

impl TryFrom<Payment> for DomainPayment {
    type Error = TypeConstraintError;

    fn try_from(payment: Payment) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: Money::from_major(payment.monto)?,
            date: payment.fecha,
        })
    }
}

impl TryFrom<Order> for DomainOrder {
    type Error = TypeConstraintError;

    fn try_from(order: Order) -> Result<Self, Self::Error> {
        let client = match order.cliente {
            Some(reference) => {
                let summary = reference.populated().cloned();
                Some(OrderClient {
                    id: ClientId::new(reference.id())?,
                    name: summary.as_ref().and_then(|c| c.nombre.clone()),
                    email: summary.as_ref().and_then(|c| c.email.clone()),
                    phone: summary.as_ref().and_then(|c| c.telefono.clone()),
                    address: summary.and_then(|c| c.direccion),
                })
            }
            None => None,
        };

        Ok(Self {
            id: OrderId::new(order.id)?,
            client,
            client_name: order.nombre_cliente.filter(|s| !s.trim().is_empty()),
            items: order
                .items
                .into_iter()
                .map(DomainOrderItem::try_from)
                .collect::<Result<_, _>>()?,
            status: OrderStatus::from_wire(&order.estado)?,
            total: Money::from_major(order.total)?,
            payments: order
                .abonos
                .into_iter()
                .map(DomainPayment::try_from)
                .collect::<Result<_, _>>()?,
            notes: order.notas.filter(|s| !s.trim().is_empty()),
            created_at: order.fecha_creacion,
        })
    }
}

impl<'a> From<&'a DomainNewOrder> for OrderPayload<'a> {
    fn from(order: &'a DomainNewOrder) -> Self {
        Self {
            cliente: order.client_id.as_str(),
            items: order
                .items
                .iter()
                .map(|item| OrderItemPayload {
                    producto: item.product_id.as_str(),
                    cantidad: item.quantity.get(),
                    es_mayoreo: item.wholesale,
                })
                .collect(),
            notas: order.notes.as_deref().unwrap_or_default(),
        }
    }
}

impl From<OrderStatus> for StatusPayload {
    fn from(status: OrderStatus) -> Self {
        Self {
            estado: status.as_wire(),
        }
    }
}

impl From<Money> for PaymentPayload {
    fn from(amount: Money) -> Self {
        Self {
            monto: amount.to_major(),
        }
    }
}
