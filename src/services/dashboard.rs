//! Daily route dashboard and today's route edits.

use chrono::NaiveTime;

use crate::domain::client::Client;
use crate::domain::route::Route;
use crate::domain::types::ClientId;
use crate::dto::dashboard::{AlertSource, DashboardData};
use crate::repository::{ClientReader, RouteReader, RouteWriter};
use crate::schedule::route_plan::{
    available_clients, diff_against_schedule, resolve_stops, with_client, without_client,
};
use crate::schedule::{
    Calendar, RoutePlanError, stale_clients, stale_clients_from_records, tomorrow_plan,
};
use crate::services::{ServiceError, ServiceResult};

fn empty_route_for(calendar: &Calendar) -> Route {
    Route {
        id: None,
        date: calendar.today().and_time(NaiveTime::MIN).and_utc(),
        stops: Vec::new(),
    }
}

/// Loads everything shown on the dashboard.
///
/// Staleness alerts use the full route history; if it cannot be loaded they
/// fall back to client records and today's route.
pub fn load_dashboard<R>(
    repo: &R,
    calendar: &Calendar,
    alert_threshold_days: u32,
) -> ServiceResult<DashboardData>
where
    R: ClientReader + RouteReader + ?Sized,
{
    let clients = repo.list_clients().map_err(|err| {
        log::error!("Failed to list clients: {err}");
        ServiceError::from(err)
    })?;
    let today_route = repo.today_route().map_err(|err| {
        log::error!("Failed to load today's route: {err}");
        ServiceError::from(err)
    })?;
    let tomorrow_route = repo.tomorrow_route().map_err(|err| {
        log::error!("Failed to load tomorrow's route: {err}");
        ServiceError::from(err)
    })?;

    let today = today_route.unwrap_or_else(|| empty_route_for(calendar));

    let (alerts, alert_source) = match repo.route_history() {
        Ok(mut history) => {
            let already_listed = today.id.is_some() && history.iter().any(|r| r.id == today.id);
            if !already_listed {
                history.push(today.clone());
            }
            (
                stale_clients(&clients, &history, calendar, alert_threshold_days),
                AlertSource::History,
            )
        }
        Err(err) => {
            log::warn!("Route history unavailable, using client records: {err}");
            (
                stale_clients_from_records(&clients, Some(&today), calendar, alert_threshold_days),
                AlertSource::Records,
            )
        }
    };

    Ok(DashboardData {
        today: calendar.today_weekday(),
        today_stops: resolve_stops(&today, &clients),
        visited_count: today.visited_count(),
        available_clients: available_clients(&clients, &today)
            .into_iter()
            .cloned()
            .collect(),
        schedule_diff: diff_against_schedule(&today, &clients, calendar.today_weekday()),
        tomorrow: tomorrow_plan(tomorrow_route.as_ref(), &clients, calendar),
        alerts,
        alert_source,
        alert_threshold_days,
    })
}

fn find_client<'a>(clients: &'a [Client], id: &ClientId) -> ServiceResult<&'a Client> {
    clients
        .iter()
        .find(|c| &c.id == id)
        .ok_or(ServiceError::NotFound)
}

/// Appends a client to today's route as not yet visited.
pub fn add_to_today_route<R>(repo: &R, calendar: &Calendar, client_id: &str) -> ServiceResult<Route>
where
    R: ClientReader + RouteReader + RouteWriter + ?Sized,
{
    let client_id = ClientId::new(client_id)?;
    let clients = repo.list_clients().map_err(ServiceError::from)?;
    find_client(&clients, &client_id)?;

    let today = repo
        .today_route()
        .map_err(ServiceError::from)?
        .unwrap_or_else(|| empty_route_for(calendar));
    let stops = with_client(&today, client_id)?;

    repo.replace_today_stops(&stops).map_err(|err| {
        log::error!("Failed to update today's route: {err}");
        ServiceError::from(err)
    })
}

/// Removes a client from today's route, keeping the other stops' visit flags.
pub fn remove_from_today_route<R>(repo: &R, client_id: &str) -> ServiceResult<Route>
where
    R: RouteReader + RouteWriter + ?Sized,
{
    let client_id = ClientId::new(client_id)?;
    let today = repo
        .today_route()
        .map_err(ServiceError::from)?
        .ok_or_else(|| RoutePlanError::NotOnRoute(client_id.clone()))?;
    let stops = without_client(&today, &client_id)?;

    repo.replace_today_stops(&stops).map_err(|err| {
        log::error!("Failed to update today's route: {err}");
        ServiceError::from(err)
    })
}

/// Marks a client on today's route as visited.
pub fn mark_visited<R>(repo: &R, client_id: &str) -> ServiceResult<Route>
where
    R: RouteReader + RouteWriter + ?Sized,
{
    let client_id = ClientId::new(client_id)?;
    let on_route = repo
        .today_route()
        .map_err(ServiceError::from)?
        .is_some_and(|route| route.contains(&client_id));
    if !on_route {
        return Err(RoutePlanError::NotOnRoute(client_id).into());
    }

    repo.mark_visited(&client_id).map_err(|err| {
        log::error!("Failed to mark client {client_id} as visited: {err}");
        ServiceError::from(err)
    })
}
