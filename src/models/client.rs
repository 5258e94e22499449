use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::client::{Client as DomainClient, ClientStatus, NewClient as DomainNewClient};
use crate::domain::types::{ClientId, ClientName, TypeConstraintError, VisitDay};
use crate::models::HasWireId;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Client document as returned by `/clientes`.
pub struct Client {
    #[serde(rename = "_id")]
    pub id: String,
    pub nombre: String,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub dias_de_visita: Vec<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub ultima_visita: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Client fields embedded in populated references.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClientSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
}

impl HasWireId for ClientSummary {
    fn wire_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
/// Body sent to create or update a client.
pub struct ClientPayload<'a> {
    pub nombre: &'a str,
    pub telefono: &'a str,
    pub direccion: &'a str,
    pub dias_de_visita: Vec<&'static str>,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        let mut visit_days = client
            .dias_de_visita
            .iter()
            .map(|d| d.parse::<VisitDay>())
            .collect::<Result<Vec<_>, _>>()?;
        visit_days.sort_unstable();
        visit_days.dedup();

        Ok(Self {
            id: ClientId::new(client.id)?,
            name: ClientName::new(client.nombre)?,
            phone: blank_to_none(client.telefono),
            address: blank_to_none(client.direccion),
            visit_days,
            status: ClientStatus::from_wire(client.estado.as_deref()),
            last_visit: client.ultima_visita,
            created_at: client.created_at,
            updated_at: client.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewClient> for ClientPayload<'a> {
    fn from(client: &'a DomainNewClient) -> Self {
        Self {
            nombre: client.name.as_str(),
            telefono: client.phone.as_deref().unwrap_or_default(),
            direccion: client.address.as_deref().unwrap_or_default(),
            dias_de_visita: client.visit_days.iter().map(|d| d.as_str()).collect(),
        }
    }
}
