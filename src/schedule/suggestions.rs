//! Derives visit suggestions from each client's weekday schedule.

use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::route::Route;
use crate::domain::types::VisitDay;
use crate::schedule::calendar::Calendar;
use crate::schedule::route_plan::{ResolvedStop, resolve_stops};

/// Clients whose schedule includes `day`, in input order.
pub fn clients_scheduled_on(clients: &[Client], day: VisitDay) -> Vec<&Client> {
    clients.iter().filter(|c| c.visits_on(day)).collect()
}

/// What to show for tomorrow.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub enum TomorrowPlan {
    /// The backend already holds stops for tomorrow.
    Persisted(Vec<ResolvedStop>),
    /// Nothing persisted yet; clients scheduled for tomorrow's weekday.
    Suggested {
        day: VisitDay,
        clients: Vec<ResolvedStop>,
    },
}

impl TomorrowPlan {
    pub fn stops(&self) -> &[ResolvedStop] {
        match self {
            TomorrowPlan::Persisted(stops) => stops,
            TomorrowPlan::Suggested { clients, .. } => clients,
        }
    }

    pub fn is_suggestion(&self) -> bool {
        matches!(self, TomorrowPlan::Suggested { .. })
    }
}

/// Uses the persisted tomorrow route when it has stops and falls back to the
/// weekday schedule otherwise.
pub fn tomorrow_plan(
    tomorrow_route: Option<&Route>,
    clients: &[Client],
    calendar: &Calendar,
) -> TomorrowPlan {
    match tomorrow_route {
        Some(route) if !route.is_empty() => TomorrowPlan::Persisted(resolve_stops(route, clients)),
        _ => {
            let day = calendar.tomorrow_weekday();
            let clients = clients_scheduled_on(clients, day)
                .into_iter()
                .map(|c| ResolvedStop {
                    client_id: c.id.clone(),
                    name: Some(c.name.to_string()),
                    visited: false,
                })
                .collect();
            TomorrowPlan::Suggested { day, clients }
        }
    }
}
