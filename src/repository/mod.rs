//! Access to the route backend.
//!
//! Services depend on the narrow Reader/Writer traits below; [`ApiRepository`]
//! implements all of them over the REST API.

use crate::domain::client::{Client, NewClient};
use crate::domain::order::{NewOrder, Order, OrderDocument, OrderStatus};
use crate::domain::product::{NewProduct, Product};
use crate::domain::route::{Route, RouteStop};
use crate::domain::types::{ClientId, LoginEmail, Money, OrderId, ProductId};
use crate::repository::errors::RepositoryResult;

pub mod api;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use api::ApiRepository;

pub trait AuthGateway {
    /// Exchanges credentials for a bearer token.
    fn login(&self, email: &LoginEmail, password: &str) -> RepositoryResult<String>;
    /// Asks the backend whether `token` is still accepted.
    fn verify_token(&self, token: &str) -> RepositoryResult<()>;
}

pub trait ClientReader {
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, client: &NewClient) -> RepositoryResult<Client>;
    fn update_client(&self, id: &ClientId, client: &NewClient) -> RepositoryResult<Client>;
    fn delete_client(&self, id: &ClientId) -> RepositoryResult<()>;
}

pub trait ProductReader {
    fn list_products(&self) -> RepositoryResult<Vec<Product>>;
}

pub trait ProductWriter {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, id: &ProductId, product: &NewProduct) -> RepositoryResult<Product>;
    fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
}

pub trait OrderReader {
    fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
}

pub trait OrderWriter {
    fn create_order(&self, order: &NewOrder) -> RepositoryResult<Order>;
    fn update_order_status(&self, id: &OrderId, status: OrderStatus) -> RepositoryResult<Order>;
    fn register_payment(&self, id: &OrderId, amount: Money) -> RepositoryResult<Order>;
}

pub trait DocumentReader {
    /// Raw PDF bytes rendered by the backend.
    fn fetch_order_document(&self, id: &OrderId, kind: OrderDocument)
    -> RepositoryResult<Vec<u8>>;
}

pub trait RouteReader {
    /// `None` when the backend holds no route for today.
    fn today_route(&self) -> RepositoryResult<Option<Route>>;
    fn tomorrow_route(&self) -> RepositoryResult<Option<Route>>;
    /// Every persisted route, used to find each client's last visit.
    fn route_history(&self) -> RepositoryResult<Vec<Route>>;
}

pub trait RouteWriter {
    /// Replaces today's stops, visit flags included.
    fn replace_today_stops(&self, stops: &[RouteStop]) -> RepositoryResult<Route>;
    fn mark_visited(&self, client_id: &ClientId) -> RepositoryResult<Route>;
}
