use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::route::{Route as DomainRoute, RouteStop as DomainRouteStop};
use crate::domain::types::{ClientId, RouteId, TypeConstraintError};
use crate::models::EntityRef;
use crate::models::client::ClientSummary;

#[derive(Debug, Clone, Deserialize)]
/// Route document as returned by `/ruta/*`.
pub struct Route {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub fecha: DateTime<Utc>,
    #[serde(default)]
    pub clientes: Vec<RouteStop>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteStop {
    /// `null` when the referenced client was deleted.
    #[serde(default)]
    pub cliente: Option<EntityRef<ClientSummary>>,
    #[serde(default)]
    pub visitado: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteStopPayload<'a> {
    pub cliente: &'a str,
    pub visitado: bool,
}

#[derive(Debug, Clone, Serialize)]
/// Body sent to `PUT /ruta/hoy`; replaces every stop.
pub struct RouteUpdatePayload<'a> {
    pub clientes: Vec<RouteStopPayload<'a>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitPayload<'a> {
    pub cliente_id: &'a str,
}

impl TryFrom<Route> for DomainRoute {
    type Error = TypeConstraintError;

    fn try_from(route: Route) -> Result<Self, Self::Error> {
        let mut stops: Vec<DomainRouteStop> = Vec::with_capacity(route.clientes.len());
        // Stops pointing at deleted clients carry no id and are dropped.
        for stop in route.clientes {
            let Some(reference) = stop.cliente else {
                continue;
            };
            let client_id = ClientId::new(reference.id())?;
            if stops.iter().any(|s| s.client_id == client_id) {
                continue;
            }
            stops.push(DomainRouteStop {
                client_id,
                client_name: reference.populated().and_then(|c| c.nombre.clone()),
                visited: stop.visitado,
            });
        }

        Ok(Self {
            id: route.id.map(RouteId::new).transpose()?,
            date: route.fecha,
            stops,
        })
    }
}

impl<'a> From<&'a [DomainRouteStop]> for RouteUpdatePayload<'a> {
    fn from(stops: &'a [DomainRouteStop]) -> Self {
        Self {
            clientes: stops
                .iter()
                .map(|s| RouteStopPayload {
                    cliente: s.client_id.as_str(),
                    visitado: s.visited,
                })
                .collect(),
        }
    }
}

impl<'a> From<&'a ClientId> for VisitPayload<'a> {
    fn from(id: &'a ClientId) -> Self {
        Self {
            cliente_id: id.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn mixes_populated_and_bare_stops() {
        let wire: Route = serde_json::from_value(json!({
            "_id": "r1",
            "fecha": "2024-05-10T06:00:00.000Z",
            "clientes": [
                {"cliente": {"_id": "c1", "nombre": "Lupita"}, "visitado": true},
                {"cliente": "c2", "visitado": false},
                {"cliente": null, "visitado": false},
                {"cliente": "c2", "visitado": true}
            ]
        }))
        .unwrap();

        let route = DomainRoute::try_from(wire).unwrap();

        assert_eq!(route.id.as_ref().map(RouteId::as_str), Some("r1"));
        assert_eq!(route.stops.len(), 2);
        assert_eq!(route.stops[0].client_name.as_deref(), Some("Lupita"));
        assert!(route.stops[0].visited);
        assert_eq!(route.stops[1].client_id.as_str(), "c2");
        assert!(!route.stops[1].visited);
    }

    #[test]
    fn update_payload_keeps_visit_flags() {
        let stops = vec![
            DomainRouteStop {
                client_id: ClientId::new("c1").unwrap(),
                client_name: Some("Lupita".into()),
                visited: true,
            },
            DomainRouteStop::pending(ClientId::new("c2").unwrap()),
        ];
        let value = serde_json::to_value(RouteUpdatePayload::from(stops.as_slice())).unwrap();
        assert_eq!(
            value,
            json!({"clientes": [
                {"cliente": "c1", "visitado": true},
                {"cliente": "c2", "visitado": false}
            ]})
        );
    }

    #[test]
    fn visit_payload_is_camel_case() {
        let id = ClientId::new("c1").unwrap();
        assert_eq!(
            serde_json::to_value(VisitPayload::from(&id)).unwrap(),
            json!({"clienteId": "c1"})
        );
    }
}
