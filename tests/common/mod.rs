#![allow(dead_code)]

use std::time::Duration;

use jsonwebtoken::{EncodingKey, Header, encode};
use rutero::domain::auth::SessionClaims;
use rutero::repository::ApiRepository;
use wiremock::MockServer;

/// Signs a session token the way the backend would.
pub fn token_for(id: &str, exp: i64) -> String {
    let claims = SessionClaims {
        id: id.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .expect("token encodes")
}

/// Base URL of the mocked API.
pub fn api_url(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

/// Repository pointed at `api_url`, authenticated with `token`.
///
/// The blocking client must be built and dropped outside the async runtime,
/// so call this from inside [`blocking`].
pub fn repository(api_url: &str, token: Option<&str>) -> ApiRepository {
    let repo = ApiRepository::new(api_url, Duration::from_secs(5))
        .expect("http client builds");
    match token {
        Some(token) => repo.with_token(token),
        None => repo,
    }
}

/// Runs blocking repository code off the async test runtime.
pub async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}
