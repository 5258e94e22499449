use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ClientName, VisitDay};

/// Whether the client currently accepts orders.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ClientStatus {
    Active,
    Inactive,
    /// The record carries no status at all.
    #[default]
    Unknown,
}

impl ClientStatus {
    pub fn from_wire(value: Option<&str>) -> Self {
        match value.map(|s| s.trim().to_lowercase()) {
            Some(s) if s == "activo" => ClientStatus::Active,
            Some(s) if s == "inactivo" => ClientStatus::Inactive,
            _ => ClientStatus::Unknown,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Weekdays on which the client expects a visit, without duplicates.
    pub visit_days: Vec<VisitDay>,
    pub status: ClientStatus,
    /// Last visit recorded by the backend, if it tracks one.
    pub last_visit: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Client {
    pub fn visits_on(&self, day: VisitDay) -> bool {
        self.visit_days.contains(&day)
    }

    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }
}

/// Data required to create or update a client.
#[derive(Clone, Debug, PartialEq)]
pub struct NewClient {
    pub name: ClientName,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub visit_days: Vec<VisitDay>,
}

impl NewClient {
    #[must_use]
    pub fn new(
        name: ClientName,
        phone: Option<String>,
        address: Option<String>,
        visit_days: impl IntoIterator<Item = VisitDay>,
    ) -> Self {
        let mut days: Vec<VisitDay> = visit_days.into_iter().collect();
        days.sort_unstable();
        days.dedup();
        Self {
            name,
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            visit_days: days,
        }
    }
}
