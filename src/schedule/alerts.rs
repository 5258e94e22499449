//! Detection of clients that have gone too long without a visit.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::route::Route;
use crate::domain::types::ClientId;
use crate::schedule::calendar::Calendar;

/// Business days (Sundays excluded) after which a client is flagged.
pub const DEFAULT_ALERT_THRESHOLD: u32 = 10;

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct StaleClient {
    pub client_id: ClientId,
    pub name: String,
    /// `None` when the client has never been visited.
    pub days_without_visit: Option<u32>,
}

/// Latest local date on which each client was marked visited.
pub fn last_visits(routes: &[Route], calendar: &Calendar) -> HashMap<ClientId, NaiveDate> {
    let mut latest: HashMap<ClientId, NaiveDate> = HashMap::new();
    for route in routes {
        let date = calendar.local_date(&route.date);
        for stop in route.stops.iter().filter(|s| s.visited) {
            latest
                .entry(stop.client_id.clone())
                .and_modify(|d| *d = (*d).max(date))
                .or_insert(date);
        }
    }
    latest
}

/// Clients never visited in `history`, or last visited at least `threshold`
/// business days ago. Output follows the order of `clients`.
pub fn stale_clients(
    clients: &[Client],
    history: &[Route],
    calendar: &Calendar,
    threshold: u32,
) -> Vec<StaleClient> {
    let latest = last_visits(history, calendar);
    clients
        .iter()
        .filter_map(|client| match latest.get(&client.id) {
            None => Some(stale(client, None)),
            Some(date) => {
                let days = calendar.days_since(*date);
                (days >= threshold).then(|| stale(client, Some(days)))
            }
        })
        .collect()
}

/// Fallback used when route history is unavailable.
///
/// The last visit is today's route date when the client is marked visited on
/// it, otherwise the client's own `last_visit`, otherwise its `updated_at`.
/// Clients with none of those are not reported.
///
/// Unlike [`stale_clients`], a client exactly `threshold` days out is not
/// reported.
pub fn stale_clients_from_records(
    clients: &[Client],
    today_route: Option<&Route>,
    calendar: &Calendar,
    threshold: u32,
) -> Vec<StaleClient> {
    clients
        .iter()
        .filter_map(|client| {
            let visited_today = today_route.and_then(|route| {
                route
                    .stop(&client.id)
                    .filter(|stop| stop.visited)
                    .map(|_| route.date)
            });
            let last = visited_today
                .or(client.last_visit)
                .or(client.updated_at)?;
            let days = calendar.days_since_timestamp(&last);
            (days > threshold).then(|| stale(client, Some(days)))
        })
        .collect()
}

fn stale(client: &Client, days: Option<u32>) -> StaleClient {
    StaleClient {
        client_id: client.id.clone(),
        name: client.name.to_string(),
        days_without_visit: days,
    }
}
