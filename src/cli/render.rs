//! Plain-text views printed by the command line.

use std::fmt::Write;

use chrono::DateTime;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::client::{Client, ClientStatus};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::product::Product;
use crate::dto::dashboard::{AlertSource, DashboardData};
use crate::dto::orders::OrdersPageData;
use crate::forms::order::OrderQuote;
use crate::schedule::{ResolvedStop, TomorrowPlan};

fn check(visited: bool) -> &'static str {
    if visited { "[x]" } else { "[ ]" }
}

fn stop_lines(out: &mut String, stops: &[ResolvedStop]) {
    for stop in stops {
        let _ = writeln!(
            out,
            "  {} {} ({})",
            check(stop.visited),
            stop.display_name(),
            stop.client_id
        );
    }
}

pub fn user(user: &AuthenticatedUser) -> String {
    match DateTime::from_timestamp(user.expires_at, 0) {
        Some(expiry) => format!(
            "{} (sesión válida hasta {})",
            user.id,
            expiry.format("%Y-%m-%d %H:%M UTC")
        ),
        None => user.id.clone(),
    }
}

pub fn dashboard(data: &DashboardData) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Ruta de hoy ({}): {}/{} visitados",
        data.today,
        data.visited_count,
        data.today_stops.len()
    );
    if data.today_stops.is_empty() {
        let _ = writeln!(out, "  Sin clientes en la ruta");
    }
    stop_lines(&mut out, &data.today_stops);

    if !data.schedule_diff.is_empty() {
        let _ = writeln!(out, "\nDiferencias con la agenda del {}:", data.today);
        for stop in &data.schedule_diff.missing {
            let _ = writeln!(out, "  + {} ({})", stop.display_name(), stop.client_id);
        }
        for stop in &data.schedule_diff.unscheduled {
            let _ = writeln!(out, "  - {} ({})", stop.display_name(), stop.client_id);
        }
    }

    match &data.tomorrow {
        TomorrowPlan::Persisted(stops) => {
            let _ = writeln!(out, "\nRuta de mañana:");
            stop_lines(&mut out, stops);
        }
        TomorrowPlan::Suggested { day, clients } => {
            let _ = writeln!(out, "\nSugerencia para mañana ({day}):");
            if clients.is_empty() {
                let _ = writeln!(out, "  Ningún cliente agendado");
            }
            for stop in clients {
                let _ = writeln!(out, "  - {} ({})", stop.display_name(), stop.client_id);
            }
        }
    }

    let _ = writeln!(
        out,
        "\nClientes sin visita en {}+ días{}:",
        data.alert_threshold_days,
        match data.alert_source {
            AlertSource::History => "",
            AlertSource::Records => " (según registros de clientes)",
        }
    );
    if data.alerts.is_empty() {
        let _ = writeln!(out, "  Ninguno");
    }
    for alert in &data.alerts {
        let days = alert
            .days_without_visit
            .map_or_else(|| "nunca visitado".to_string(), |d| format!("{d} días"));
        let _ = writeln!(out, "  ! {} ({}): {days}", alert.name, alert.client_id);
    }

    if !data.available_clients.is_empty() {
        let _ = writeln!(out, "\nDisponibles para agregar hoy: {}", data.available_clients.len());
    }

    out
}

fn status_label(status: ClientStatus) -> &'static str {
    match status {
        ClientStatus::Active => "activo",
        ClientStatus::Inactive => "inactivo",
        ClientStatus::Unknown => "-",
    }
}

pub fn clients(clients: &[Client]) -> String {
    let mut out = String::new();
    for client in clients {
        let days: Vec<_> = client.visit_days.iter().map(|d| d.as_str()).collect();
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            client.id,
            client.name,
            status_label(client.status),
            client.phone.as_deref().unwrap_or("-"),
            if days.is_empty() { "-".to_string() } else { days.join(",") }
        );
    }
    let _ = writeln!(out, "{} clientes", clients.len());
    out
}

pub fn products(products: &[Product]) -> String {
    let mut out = String::new();
    for product in products {
        let wholesale = product
            .wholesale_price
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        let _ = writeln!(
            out,
            "{}\t{}\t{}\tmayoreo {}",
            product.id, product.name, product.price, wholesale
        );
    }
    let _ = writeln!(out, "{} productos", products.len());
    out
}

pub fn orders(page: &OrdersPageData) -> String {
    let mut out = String::new();
    let counts = page.counts;
    let _ = writeln!(
        out,
        "Todos {} | Pendiente {} | Completado {} | Cancelado {}",
        counts.all, counts.pending, counts.completed, counts.cancelled
    );
    for order in &page.orders {
        let date = order
            .created_at
            .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());
        let _ = writeln!(
            out,
            "{}\t{date}\t{}\t{}\t{}",
            order.id,
            order.display_client_name(),
            order.status,
            order.total
        );
    }
    if page.orders.is_empty() {
        let _ = writeln!(out, "Sin pedidos");
    }
    out
}

pub fn order_detail(order: &Order) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Pedido {} ({})", order.id, order.status);
    let _ = writeln!(out, "Cliente: {}", order.display_client_name());
    if let Some(client) = &order.client {
        if let Some(phone) = &client.phone {
            let _ = writeln!(out, "Teléfono: {phone}");
        }
        if let Some(address) = &client.address {
            let _ = writeln!(out, "Dirección: {address}");
        }
    }
    for item in &order.items {
        let _ = writeln!(
            out,
            "  {} x {}{} @ {} = {}",
            item.quantity.get(),
            item.product_name.as_deref().unwrap_or(item.product_id.as_str()),
            if item.wholesale { " (mayoreo)" } else { "" },
            item.unit_price,
            item.subtotal
        );
    }
    let _ = writeln!(out, "Total: {}", order.total);
    if !order.payments.is_empty() {
        let _ = writeln!(out, "Abonado: {}", order.total_paid());
    }
    if order.status == OrderStatus::Pending {
        let _ = writeln!(out, "Saldo: {}", order.balance());
    }
    if let Some(notes) = &order.notes {
        let _ = writeln!(out, "Notas: {notes}");
    }
    out
}

pub fn quote(quote: &OrderQuote) -> String {
    let mut out = String::new();
    for line in &quote.lines {
        let _ = writeln!(
            out,
            "  {} x {}{} @ {} = {}",
            line.quantity.get(),
            line.product_name,
            if line.wholesale { " (mayoreo)" } else { "" },
            line.unit_price,
            line.subtotal
        );
    }
    let _ = writeln!(out, "Total: {}", quote.total);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderItem, Payment};
    use crate::domain::types::{ClientId, ClientName, Money, OrderId, ProductId, Quantity, VisitDay};
    use crate::dto::orders::StatusCounts;
    use crate::schedule::{RouteDiff, StaleClient};

    fn stop(id: &str, name: Option<&str>, visited: bool) -> ResolvedStop {
        ResolvedStop {
            client_id: ClientId::new(id).unwrap(),
            name: name.map(str::to_string),
            visited,
        }
    }

    fn dashboard_data() -> DashboardData {
        DashboardData {
            today: VisitDay::Friday,
            today_stops: vec![stop("a", Some("Abarrotes"), true), stop("z", None, false)],
            visited_count: 1,
            available_clients: Vec::new(),
            schedule_diff: RouteDiff {
                missing: vec![stop("b", Some("Bodega"), false)],
                unscheduled: Vec::new(),
            },
            tomorrow: TomorrowPlan::Suggested {
                day: VisitDay::Saturday,
                clients: vec![stop("b", Some("Bodega"), false)],
            },
            alerts: vec![StaleClient {
                client_id: ClientId::new("c").unwrap(),
                name: "Carnicería".into(),
                days_without_visit: None,
            }],
            alert_source: AlertSource::Records,
            alert_threshold_days: 10,
        }
    }

    #[test]
    fn dashboard_lists_every_section() {
        let text = dashboard(&dashboard_data());

        assert!(text.contains("Ruta de hoy (viernes): 1/2 visitados"));
        assert!(text.contains("[x] Abarrotes (a)"));
        assert!(text.contains("[ ] Cliente desconocido (z)"));
        assert!(text.contains("+ Bodega (b)"));
        assert!(text.contains("Sugerencia para mañana (sábado)"));
        assert!(text.contains("según registros"));
        assert!(text.contains("Carnicería (c): nunca visitado"));
    }

    #[test]
    fn client_rows_show_days() {
        let rows = clients(&[Client {
            id: ClientId::new("1").unwrap(),
            name: ClientName::new("Tienda").unwrap(),
            phone: None,
            address: None,
            visit_days: vec![VisitDay::Monday, VisitDay::Thursday],
            status: ClientStatus::Active,
            last_visit: None,
            created_at: None,
            updated_at: None,
        }]);
        assert!(rows.starts_with("1\tTienda\tactivo\t-\tlunes,jueves\n"));
        assert!(rows.ends_with("1 clientes\n"));
    }

    #[test]
    fn order_detail_shows_balance_for_pending() {
        let order = Order {
            id: OrderId::new("o1").unwrap(),
            client: None,
            client_name: Some("Lupita".into()),
            items: vec![OrderItem {
                product_id: ProductId::new("p1").unwrap(),
                product_name: Some("Jabón".into()),
                quantity: Quantity::new(2).unwrap(),
                wholesale: true,
                unit_price: Money::from_cents(500),
                subtotal: Money::from_cents(1000),
            }],
            status: OrderStatus::Pending,
            total: Money::from_cents(1000),
            payments: vec![Payment {
                amount: Money::from_cents(400),
                date: None,
            }],
            notes: None,
            created_at: None,
        };

        let text = order_detail(&order);

        assert!(text.contains("2 x Jabón (mayoreo) @ $5.00 = $10.00"));
        assert!(text.contains("Abonado: $4.00"));
        assert!(text.contains("Saldo: $6.00"));
    }

    #[test]
    fn empty_order_list_says_so() {
        let text = orders(&OrdersPageData {
            orders: Vec::new(),
            filter: None,
            counts: StatusCounts::default(),
        });
        assert!(text.contains("Sin pedidos"));
    }
}
