use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::order::{Order, OrderStatus};
use crate::domain::product::Product;

/// Number of orders in each status, over the unfiltered list.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: usize,
    pub pending: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn from_orders(orders: &[Order]) -> Self {
        orders.iter().fold(
            Self {
                all: orders.len(),
                ..Self::default()
            },
            |mut counts, order| {
                match order.status {
                    OrderStatus::Pending => counts.pending += 1,
                    OrderStatus::Completed => counts.completed += 1,
                    OrderStatus::Cancelled => counts.cancelled += 1,
                }
                counts
            },
        )
    }
}

/// Data required to render the orders list.
#[derive(Clone, Debug, Serialize)]
pub struct OrdersPageData {
    pub orders: Vec<Order>,
    pub filter: Option<OrderStatus>,
    pub counts: StatusCounts,
}

/// Choices offered when entering a new order.
#[derive(Clone, Debug, Serialize)]
pub struct OrderFormData {
    /// Only active clients can receive orders.
    pub clients: Vec<Client>,
    pub products: Vec<Product>,
}
