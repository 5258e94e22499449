use serde::Serialize;

use crate::domain::client::Client;
use crate::domain::types::VisitDay;
use crate::schedule::{ResolvedStop, RouteDiff, StaleClient, TomorrowPlan};

/// Where the staleness alerts were computed from.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum AlertSource {
    /// Full route history.
    History,
    /// Client records and today's route; history could not be loaded.
    Records,
}

/// Data required to render the daily dashboard.
#[derive(Clone, Debug, Serialize)]
pub struct DashboardData {
    pub today: VisitDay,
    /// Today's stops in route order, with names resolved.
    pub today_stops: Vec<ResolvedStop>,
    pub visited_count: usize,
    /// Clients that can still be added to today's route.
    pub available_clients: Vec<Client>,
    /// Today's route compared with the weekday schedule.
    pub schedule_diff: RouteDiff,
    pub tomorrow: TomorrowPlan,
    pub alerts: Vec<StaleClient>,
    pub alert_source: AlertSource,
    pub alert_threshold_days: u32,
}
