//! REST implementation of the repository traits.

use std::time::Duration;

use reqwest::Method;
use reqwest::{StatusCode, Url};
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::domain::client::{Client, NewClient};
use crate::domain::order::{NewOrder, Order, OrderDocument, OrderStatus};
use crate::domain::product::{NewProduct, Product};
use crate::domain::route::{Route, RouteStop};
use crate::domain::types::{
    ClientId, LoginEmail, Money, OrderId, ProductId, TypeConstraintError,
};
use crate::models;
use crate::models::ApiErrorBody;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::client::ClientPayload;
use crate::models::order::{OrderPayload, PaymentPayload, StatusPayload};
use crate::models::product::ProductPayload;
use crate::models::route::{RouteUpdatePayload, VisitPayload};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AuthGateway, ClientReader, ClientWriter, DocumentReader, OrderReader, OrderWriter,
    ProductReader, ProductWriter, RouteReader, RouteWriter,
};

/// Repository backed by the route backend's REST API.
#[derive(Clone, Debug)]
pub struct ApiRepository {
    http: HttpClient,
    base_url: Url,
    token: Option<String>,
}

impl ApiRepository {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RepositoryResult<Self> {
        let raw = base_url.into();
        let base_url = Url::parse(raw.trim())
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| RepositoryError::Unexpected(format!("invalid API url: {raw}")))?;
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Authenticates every subsequent request with `token`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Appends `segments` to the API base, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        log::debug!("{method} {}", url.path());
        let request = self.http.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn send(&self, request: RequestBuilder) -> RepositoryResult<Response> {
        let response = request.send()?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response))
        }
    }

    fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> RepositoryResult<T> {
        self.send(request)?
            .json::<T>()
            .map_err(|e| RepositoryError::DecodeError(e.to_string()))
    }

    fn fetch_domain<W, D>(&self, request: RequestBuilder) -> RepositoryResult<D>
    where
        W: DeserializeOwned,
        D: TryFrom<W, Error = TypeConstraintError>,
    {
        Ok(D::try_from(self.fetch::<W>(request)?)?)
    }

    /// Lists a collection, skipping records that fail validation.
    fn fetch_all<W, D>(&self, segments: &[&str]) -> RepositoryResult<Vec<D>>
    where
        W: DeserializeOwned,
        D: TryFrom<W, Error = TypeConstraintError>,
    {
        let records = self.fetch::<Vec<W>>(self.request(Method::GET, segments))?;
        let total = records.len();
        let valid: Vec<D> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, wire)| match D::try_from(wire) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping invalid record {index} of /{}: {e}", segments.join("/"));
                    None
                }
            })
            .collect();
        if valid.len() < total {
            log::warn!(
                "Kept {} of {total} records from /{}",
                valid.len(),
                segments.join("/")
            );
        }
        Ok(valid)
    }

    fn optional_route(&self, segments: &[&str]) -> RepositoryResult<Option<Route>> {
        match self.fetch::<Option<models::route::Route>>(self.request(Method::GET, segments)) {
            Ok(Some(route)) => Ok(Some(Route::try_from(route)?)),
            Ok(None) | Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Maps a non-success response, surfacing the `{error}` body when present.
fn error_from_response(response: Response) -> RepositoryError {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return RepositoryError::Unauthorized,
        StatusCode::NOT_FOUND => return RepositoryError::NotFound,
        _ => {}
    }

    let body = response.text().unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|b| b.error)
        .ok()
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());

    RepositoryError::Api {
        status: status.as_u16(),
        message,
    }
}

impl AuthGateway for ApiRepository {
    fn login(&self, email: &LoginEmail, password: &str) -> RepositoryResult<String> {
        let body = LoginRequest {
            email: email.as_str(),
            password,
        };
        let response = self.send(
            self.http
                .post(self.url(&["auth", "login"]))
                .json(&body),
        );
        // Bad credentials come back as 401.
        let response = match response {
            Err(RepositoryError::Unauthorized) => {
                return Err(RepositoryError::Api {
                    status: StatusCode::UNAUTHORIZED.as_u16(),
                    message: "Credenciales inválidas".to_string(),
                });
            }
            other => other?,
        };
        let LoginResponse { token } = response
            .json::<LoginResponse>()
            .map_err(|e| RepositoryError::DecodeError(e.to_string()))?;
        Ok(token)
    }

    fn verify_token(&self, token: &str) -> RepositoryResult<()> {
        log::debug!("GET /auth/verificar");
        self.send(
            self.http
                .get(self.url(&["auth", "verificar"]))
                .bearer_auth(token),
        )?;
        Ok(())
    }
}

impl ClientReader for ApiRepository {
    fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        self.fetch_all::<models::client::Client, _>(&["clientes"])
    }
}

impl ClientWriter for ApiRepository {
    fn create_client(&self, client: &NewClient) -> RepositoryResult<Client> {
        self.fetch_domain::<models::client::Client, _>(
            self.request(Method::POST, &["clientes"])
                .json(&ClientPayload::from(client)),
        )
    }

    fn update_client(&self, id: &ClientId, client: &NewClient) -> RepositoryResult<Client> {
        self.fetch_domain::<models::client::Client, _>(
            self.request(Method::PUT, &["clientes", id.as_str()])
                .json(&ClientPayload::from(client)),
        )
    }

    fn delete_client(&self, id: &ClientId) -> RepositoryResult<()> {
        self.send(self.request(Method::DELETE, &["clientes", id.as_str()]))?;
        Ok(())
    }
}

impl ProductReader for ApiRepository {
    fn list_products(&self) -> RepositoryResult<Vec<Product>> {
        self.fetch_all::<models::product::Product, _>(&["productos"])
    }
}

impl ProductWriter for ApiRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        self.fetch_domain::<models::product::Product, _>(
            self.request(Method::POST, &["productos"])
                .json(&ProductPayload::from(product)),
        )
    }

    fn update_product(&self, id: &ProductId, product: &NewProduct) -> RepositoryResult<Product> {
        self.fetch_domain::<models::product::Product, _>(
            self.request(Method::PUT, &["productos", id.as_str()])
                .json(&ProductPayload::from(product)),
        )
    }

    fn delete_product(&self, id: &ProductId) -> RepositoryResult<()> {
        self.send(self.request(Method::DELETE, &["productos", id.as_str()]))?;
        Ok(())
    }
}

impl OrderReader for ApiRepository {
    fn list_orders(&self) -> RepositoryResult<Vec<Order>> {
        self.fetch_all::<models::order::Order, _>(&["pedidos"])
    }
}

impl OrderWriter for ApiRepository {
    fn create_order(&self, order: &NewOrder) -> RepositoryResult<Order> {
        self.fetch_domain::<models::order::Order, _>(
            self.request(Method::POST, &["pedidos"])
                .json(&OrderPayload::from(order)),
        )
    }

    fn update_order_status(&self, id: &OrderId, status: OrderStatus) -> RepositoryResult<Order> {
        self.fetch_domain::<models::order::Order, _>(
            self.request(Method::PUT, &["pedidos", id.as_str(), "estado"])
                .json(&StatusPayload::from(status)),
        )
    }

    fn register_payment(&self, id: &OrderId, amount: Money) -> RepositoryResult<Order> {
        self.fetch_domain::<models::order::Order, _>(
            self.request(Method::POST, &["pedidos", id.as_str(), "abono"])
                .json(&PaymentPayload::from(amount)),
        )
    }
}

impl DocumentReader for ApiRepository {
    fn fetch_order_document(
        &self,
        id: &OrderId,
        kind: OrderDocument,
    ) -> RepositoryResult<Vec<u8>> {
        let response = self.send(
            self.request(Method::GET, &["pedidos", id.as_str(), kind.slug()]),
        )?;
        Ok(response.bytes()?.to_vec())
    }
}

impl RouteReader for ApiRepository {
    fn today_route(&self) -> RepositoryResult<Option<Route>> {
        self.optional_route(&["ruta", "hoy"])
    }

    fn tomorrow_route(&self) -> RepositoryResult<Option<Route>> {
        self.optional_route(&["ruta", "manana"])
    }

    fn route_history(&self) -> RepositoryResult<Vec<Route>> {
        self.fetch_all::<models::route::Route, _>(&["ruta", "todas"])
    }
}

impl RouteWriter for ApiRepository {
    fn replace_today_stops(&self, stops: &[RouteStop]) -> RepositoryResult<Route> {
        self.fetch_domain::<models::route::Route, _>(
            self.request(Method::PUT, &["ruta", "hoy"])
                .json(&RouteUpdatePayload::from(stops)),
        )
    }

    fn mark_visited(&self, client_id: &ClientId) -> RepositoryResult<Route> {
        self.fetch_domain::<models::route::Route, _>(
            self.request(Method::POST, &["ruta", "hoy", "visitado"])
                .json(&VisitPayload::from(client_id)),
        )
    }
}
