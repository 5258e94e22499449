use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, Money, OrderId, ProductId, Quantity, TypeConstraintError};

/// Order lifecycle. Only pending orders can be completed or cancelled.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Name used by the API.
    pub const fn as_wire(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pendiente",
            OrderStatus::Completed => "completado",
            OrderStatus::Cancelled => "cancelado",
        }
    }

    pub fn from_wire(value: &str) -> Result<Self, TypeConstraintError> {
        match value.trim().to_lowercase().as_str() {
            "pendiente" => Ok(OrderStatus::Pending),
            "completado" => Ok(OrderStatus::Completed),
            "cancelado" => Ok(OrderStatus::Cancelled),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown order status `{other}`"
            ))),
        }
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self == OrderStatus::Pending && next != OrderStatus::Pending
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pendiente"),
            OrderStatus::Completed => write!(f, "Completado"),
            OrderStatus::Cancelled => write!(f, "Cancelado"),
        }
    }
}

/// Minimal client details embedded in an order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OrderClient {
    pub id: ClientId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: Option<String>,
    pub quantity: Quantity,
    pub wholesale: bool,
    pub unit_price: Money,
    pub subtotal: Money,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub amount: Money,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub client: Option<OrderClient>,
    /// Denormalized client name kept by the backend.
    pub client_name: Option<String>,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total: Money,
    pub payments: Vec<Payment>,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Sum of the registered payments, clamped at the `i64` range.
    pub fn total_paid(&self) -> Money {
        self.payments
            .iter()
            .fold(Money::ZERO, |acc, p| acc.saturating_add(p.amount))
    }

    /// Outstanding amount; negative when the client overpaid.
    pub fn balance(&self) -> Money {
        self.total.saturating_sub(self.total_paid())
    }

    /// Best available name for display.
    pub fn display_client_name(&self) -> &str {
        self.client_name
            .as_deref()
            .or_else(|| self.client.as_ref().and_then(|c| c.name.as_deref()))
            .unwrap_or("Cliente no disponible")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub wholesale: bool,
}

/// Data required to place an order. Prices are fixed by the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct NewOrder {
    pub client_id: ClientId,
    pub items: Vec<NewOrderItem>,
    pub notes: Option<String>,
}

/// Printable document the backend renders for an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderDocument {
    Invoice,
    WorkOrder,
}

impl OrderDocument {
    /// Path segment under `/pedidos/{id}/`, also used as file name prefix.
    pub const fn slug(self) -> &'static str {
        match self {
            OrderDocument::Invoice => "factura",
            OrderDocument::WorkOrder => "orden-trabajo",
        }
    }

    /// File name offered when saving the document.
    pub fn file_name(self, id: &OrderId) -> String {
        format!("{}-{}.pdf", self.slug(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(total: i64, payments: &[i64]) -> Order {
        Order {
            id: OrderId::new("o1").unwrap(),
            client: None,
            client_name: None,
            items: Vec::new(),
            status: OrderStatus::Pending,
            total: Money::from_cents(total),
            payments: payments
                .iter()
                .map(|&cents| Payment {
                    amount: Money::from_cents(cents),
                    date: None,
                })
                .collect(),
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn balance_subtracts_payments() {
        let o = order(10_000, &[2_500, 1_000]);
        assert_eq!(o.total_paid(), Money::from_cents(3_500));
        assert_eq!(o.balance(), Money::from_cents(6_500));
    }

    #[test]
    fn balance_clamps_instead_of_wrapping() {
        let o = order(i64::MIN + 1, &[i64::MAX, i64::MAX]);
        assert_eq!(o.total_paid(), Money::from_cents(i64::MAX));
        assert_eq!(o.balance(), Money::from_cents(i64::MIN));
    }

    #[test]
    fn only_pending_orders_change_status() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Completed));
    }

    #[test]
    fn display_name_prefers_denormalized_name() {
        let mut o = order(0, &[]);
        assert_eq!(o.display_client_name(), "Cliente no disponible");
        o.client = Some(OrderClient {
            id: ClientId::new("c1").unwrap(),
            name: Some("Abarrotes Luz".into()),
            email: None,
            phone: None,
            address: None,
        });
        assert_eq!(o.display_client_name(), "Abarrotes Luz");
        o.client_name = Some("Luz".into());
        assert_eq!(o.display_client_name(), "Luz");
    }
}
