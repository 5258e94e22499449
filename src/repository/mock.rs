//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::{Client, NewClient};
use crate::domain::order::{NewOrder, Order, OrderDocument, OrderStatus};
use crate::domain::product::{NewProduct, Product};
use crate::domain::route::{Route, RouteStop};
use crate::domain::types::{ClientId, LoginEmail, Money, OrderId, ProductId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AuthGateway, ClientReader, ClientWriter, DocumentReader, OrderReader, OrderWriter,
    ProductReader, ProductWriter, RouteReader, RouteWriter,
};

mock! {
    pub Repository {}

    impl AuthGateway for Repository {
        fn login(&self, email: &LoginEmail, password: &str) -> RepositoryResult<String>;
        fn verify_token(&self, token: &str) -> RepositoryResult<()>;
    }

    impl ClientReader for Repository {
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, client: &NewClient) -> RepositoryResult<Client>;
        fn update_client(&self, id: &ClientId, client: &NewClient) -> RepositoryResult<Client>;
        fn delete_client(&self, id: &ClientId) -> RepositoryResult<()>;
    }

    impl ProductReader for Repository {
        fn list_products(&self) -> RepositoryResult<Vec<Product>>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, id: &ProductId, product: &NewProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
    }

    impl OrderReader for Repository {
        fn list_orders(&self) -> RepositoryResult<Vec<Order>>;
    }

    impl OrderWriter for Repository {
        fn create_order(&self, order: &NewOrder) -> RepositoryResult<Order>;
        fn update_order_status(&self, id: &OrderId, status: OrderStatus) -> RepositoryResult<Order>;
        fn register_payment(&self, id: &OrderId, amount: Money) -> RepositoryResult<Order>;
    }

    impl DocumentReader for Repository {
        fn fetch_order_document(
            &self,
            id: &OrderId,
            kind: OrderDocument,
        ) -> RepositoryResult<Vec<u8>>;
    }

    impl RouteReader for Repository {
        fn today_route(&self) -> RepositoryResult<Option<Route>>;
        fn tomorrow_route(&self) -> RepositoryResult<Option<Route>>;
        fn route_history(&self) -> RepositoryResult<Vec<Route>>;
    }

    impl RouteWriter for Repository {
        fn replace_today_stops(&self, stops: &[RouteStop]) -> RepositoryResult<Route>;
        fn mark_visited(&self, client_id: &ClientId) -> RepositoryResult<Route>;
    }
}
