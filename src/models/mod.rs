//! Serde shapes of the REST API payloads and the runtime configuration.
//!
//! Wire models mirror the JSON exchanged with the backend (Spanish field
//! names, decimal amounts, references that may arrive populated) and convert
//! into domain entities through `TryFrom`, which is where value-object
//! validation happens.

use serde::Deserialize;

pub mod auth;
pub mod client;
pub mod config;
pub mod order;
pub mod product;
pub mod route;

/// Reference to another record that the backend may send either as a bare
/// id or as the populated document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EntityRef<T> {
    Id(String),
    Populated(T),
}

/// Fields shared by every populated reference.
pub trait HasWireId {
    fn wire_id(&self) -> &str;
}

impl<T: HasWireId> EntityRef<T> {
    pub fn id(&self) -> &str {
        match self {
            EntityRef::Id(id) => id,
            EntityRef::Populated(doc) => doc.wire_id(),
        }
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            EntityRef::Id(_) => None,
            EntityRef::Populated(doc) => Some(doc),
        }
    }
}

/// Body of an error response, e.g. `{"error": "Credenciales inválidas"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(alias = "message", alias = "mensaje")]
    pub error: String,
}
