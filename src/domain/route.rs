use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, RouteId};

/// A client scheduled on a route together with its visit status.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RouteStop {
    pub client_id: ClientId,
    /// Name embedded by the backend when it populates the client reference.
    pub client_name: Option<String>,
    pub visited: bool,
}

impl RouteStop {
    pub fn pending(client_id: ClientId) -> Self {
        Self {
            client_id,
            client_name: None,
            visited: false,
        }
    }
}

/// The set of clients to visit on a given day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Route {
    pub id: Option<RouteId>,
    pub date: DateTime<Utc>,
    pub stops: Vec<RouteStop>,
}

impl Route {
    pub fn contains(&self, client_id: &ClientId) -> bool {
        self.stop(client_id).is_some()
    }

    pub fn stop(&self, client_id: &ClientId) -> Option<&RouteStop> {
        self.stops.iter().find(|s| &s.client_id == client_id)
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.stops.iter().filter(|s| s.visited).count()
    }
}
