//! Visit scheduling: business-day arithmetic, weekday suggestions, route
//! merge/diff and staleness alerts.

pub mod alerts;
pub mod calendar;
pub mod route_plan;
pub mod suggestions;

pub use alerts::{DEFAULT_ALERT_THRESHOLD, StaleClient, stale_clients, stale_clients_from_records};
pub use calendar::{Calendar, count_days_excluding_sundays};
pub use route_plan::{ResolvedStop, RouteDiff, RoutePlanError};
pub use suggestions::{TomorrowPlan, tomorrow_plan};
