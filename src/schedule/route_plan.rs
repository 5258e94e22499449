//! Editing and comparing route stop lists.
//!
//! The backend replaces a route's stops wholesale, so edits are expressed as
//! "the stop list after the change" rather than as incremental commands.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::domain::client::Client;
use crate::domain::route::{Route, RouteStop};
use crate::domain::types::{ClientId, VisitDay};

const UNKNOWN_CLIENT: &str = "Cliente desconocido";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutePlanError {
    #[error("client {0} is already on the route")]
    AlreadyOnRoute(ClientId),
    #[error("client {0} is not on the route")]
    NotOnRoute(ClientId),
}

/// A route stop joined with the client's display name.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ResolvedStop {
    pub client_id: ClientId,
    pub name: Option<String>,
    pub visited: bool,
}

impl ResolvedStop {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_CLIENT)
    }
}

/// Route stops in order, each named from the populated reference or, failing
/// that, from the client list.
pub fn resolve_stops(route: &Route, clients: &[Client]) -> Vec<ResolvedStop> {
    let names: HashMap<&ClientId, &str> = clients
        .iter()
        .map(|c| (&c.id, c.name.as_str()))
        .collect();

    route
        .stops
        .iter()
        .map(|stop| ResolvedStop {
            client_id: stop.client_id.clone(),
            name: stop
                .client_name
                .clone()
                .or_else(|| names.get(&stop.client_id).map(|n| n.to_string())),
            visited: stop.visited,
        })
        .collect()
}

/// Clients that can still be added to the route.
pub fn available_clients<'a>(clients: &'a [Client], route: &Route) -> Vec<&'a Client> {
    clients.iter().filter(|c| !route.contains(&c.id)).collect()
}

/// Stop list after appending `client_id` as not yet visited.
pub fn with_client(route: &Route, client_id: ClientId) -> Result<Vec<RouteStop>, RoutePlanError> {
    if route.contains(&client_id) {
        return Err(RoutePlanError::AlreadyOnRoute(client_id));
    }
    let mut stops = route.stops.clone();
    stops.push(RouteStop::pending(client_id));
    Ok(stops)
}

/// Stop list after removing `client_id`. Other stops keep their visit status.
pub fn without_client(
    route: &Route,
    client_id: &ClientId,
) -> Result<Vec<RouteStop>, RoutePlanError> {
    if !route.contains(client_id) {
        return Err(RoutePlanError::NotOnRoute(client_id.clone()));
    }
    Ok(route
        .stops
        .iter()
        .filter(|s| &s.client_id != client_id)
        .cloned()
        .collect())
}

/// Differences between a persisted route and the weekday schedule.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct RouteDiff {
    /// Clients scheduled for the day who are not on the route.
    pub missing: Vec<ResolvedStop>,
    /// Stops whose client is not scheduled for the day (or is unknown).
    pub unscheduled: Vec<ResolvedStop>,
}

impl RouteDiff {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unscheduled.is_empty()
    }
}

pub fn diff_against_schedule(route: &Route, clients: &[Client], day: VisitDay) -> RouteDiff {
    let by_id: HashMap<&ClientId, &Client> = clients.iter().map(|c| (&c.id, c)).collect();

    let missing = clients
        .iter()
        .filter(|c| c.visits_on(day) && !route.contains(&c.id))
        .map(|c| ResolvedStop {
            client_id: c.id.clone(),
            name: Some(c.name.to_string()),
            visited: false,
        })
        .collect();

    let unscheduled = resolve_stops(route, clients)
        .into_iter()
        .filter(|stop| {
            by_id
                .get(&stop.client_id)
                .is_none_or(|client| !client.visits_on(day))
        })
        .collect();

    RouteDiff {
        missing,
        unscheduled,
    }
}
