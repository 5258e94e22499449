use rutero::domain::client::ClientStatus;
use rutero::domain::order::OrderDocument;
use rutero::domain::route::RouteStop;
use rutero::domain::types::{ClientId, LoginEmail, Money, OrderId, VisitDay};
use rutero::repository::errors::RepositoryError;
use rutero::repository::{
    ApiRepository, AuthGateway, ClientReader, ClientWriter, DocumentReader, OrderWriter,
    RouteReader, RouteWriter,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

#[tokio::test(flavor = "multi_thread")]
async fn test_list_clients_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clientes"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "c1", "nombre": "Tienda", "diasDeVisita": ["lunes", "Sabado"], "estado": "activo"},
            {"_id": "c2", "nombre": "Bodega"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    let clients = common::blocking(move || {
        common::repository(&url, Some("tok")).list_clients()
    })
    .await
    .unwrap();

    assert_eq!(clients.len(), 2);
    assert_eq!(
        clients[0].visit_days,
        vec![VisitDay::Monday, VisitDay::Saturday]
    );
    assert_eq!(clients[0].status, ClientStatus::Active);
    assert_eq!(clients[1].status, ClientStatus::Unknown);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_clients_do_not_hide_the_rest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/clientes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "c1", "nombre": "Tienda", "diasDeVisita": ["lunes"]},
            {"_id": "c2", "nombre": "   "},
            {"_id": "c3", "nombre": "Feria", "diasDeVisita": ["feriado"]},
            {"_id": "c4", "nombre": "Bodega"}
        ])))
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    let clients = common::blocking(move || {
        common::repository(&url, Some("tok")).list_clients()
    })
    .await
    .unwrap();

    let ids: Vec<_> = clients.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c1", "c4"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ids_are_encoded_as_path_segments() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/clientes/a%2Fb%3Fc%23d"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    common::blocking(move || {
        common::repository(&url, Some("tok"))
            .delete_client(&ClientId::new("a/b?c#d").unwrap())
    })
    .await
    .unwrap();
}

#[test]
fn test_base_url_must_be_absolute() {
    assert!(matches!(
        ApiRepository::new("localhost/api", std::time::Duration::from_secs(1)),
        Err(RepositoryError::Unexpected(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_routes_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ruta/hoy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/ruta/manana"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Sin ruta"})))
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    let (today, tomorrow) = common::blocking(move || {
        let repo = common::repository(&url, Some("tok"));
        (repo.today_route(), repo.tomorrow_route())
    })
    .await;

    assert!(today.unwrap().is_none());
    assert!(tomorrow.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_route_history_skips_deleted_clients() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ruta/todas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "_id": "r1",
            "fecha": "2024-05-10T06:00:00Z",
            "clientes": [
                {"cliente": {"_id": "a", "nombre": "Abarrotes"}, "visitado": true},
                {"cliente": null, "visitado": false},
                {"cliente": "a", "visitado": false},
                {"cliente": "b"}
            ]
        }])))
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    let history = common::blocking(move || common::repository(&url, Some("tok")).route_history())
        .await
        .unwrap();

    let stops = &history[0].stops;
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].client_name.as_deref(), Some("Abarrotes"));
    assert!(stops[0].visited);
    assert_eq!(stops[1].client_id.as_str(), "b");
    assert!(!stops[1].visited);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_replace_today_stops_sends_full_list() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/ruta/hoy"))
        .and(body_json(json!({
            "clientes": [
                {"cliente": "a", "visitado": true},
                {"cliente": "b", "visitado": false}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "r1",
            "fecha": "2024-05-10T06:00:00Z",
            "clientes": [
                {"cliente": "a", "visitado": true},
                {"cliente": "b", "visitado": false}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    let route = common::blocking(move || {
        let stops = vec![
            RouteStop {
                client_id: ClientId::new("a").unwrap(),
                client_name: Some("Abarrotes".into()),
                visited: true,
            },
            RouteStop::pending(ClientId::new("b").unwrap()),
        ];
        common::repository(&url, Some("tok")).replace_today_stops(&stops)
    })
    .await
    .unwrap();

    assert_eq!(route.visited_count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_mark_visited_posts_client_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/ruta/hoy/visitado"))
        .and(body_json(json!({"clienteId": "a"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "r1",
            "fecha": "2024-05-10T06:00:00Z",
            "clientes": [{"cliente": "a", "visitado": true}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    let route = common::blocking(move || {
        common::repository(&url, Some("tok")).mark_visited(&ClientId::new("a").unwrap())
    })
    .await
    .unwrap();

    assert!(route.stops[0].visited);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_payment_is_sent_as_decimal_amount() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pedidos/o1/abono"))
        .and(body_json(json!({"monto": 250.5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "o1",
            "nombreCliente": "Lupita",
            "estado": "pendiente",
            "total": 500,
            "abonos": [{"monto": 250.5}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    let order = common::blocking(move || {
        common::repository(&url, Some("tok"))
            .register_payment(&OrderId::new("o1").unwrap(), Money::from_cents(25050))
    })
    .await
    .unwrap();

    assert_eq!(order.balance(), Money::from_cents(24950));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_api_error_body_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/pedidos/o1/estado"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "Pedido ya cancelado"})),
        )
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    let result = common::blocking(move || {
        common::repository(&url, Some("tok")).update_order_status(
            &OrderId::new("o1").unwrap(),
            rutero::domain::order::OrderStatus::Completed,
        )
    })
    .await;

    match result {
        Err(RepositoryError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Pedido ya cancelado");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_token_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/verificar"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    let result = common::blocking(move || common::repository(&url, None).verify_token("stale")).await;

    assert!(matches!(result, Err(RepositoryError::Unauthorized)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_maps_bad_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "ana@example.com", "password": "nope"})))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    let result = common::blocking(move || {
        common::repository(&url, None)
            .login(&LoginEmail::new("ana@example.com").unwrap(), "nope")
    })
    .await;

    match result {
        Err(RepositoryError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Credenciales inválidas");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_documents_are_returned_as_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/pedidos/o7/orden-trabajo"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .set_body_bytes(b"%PDF-1.7 work order".to_vec()),
        )
        .mount(&server)
        .await;

    let url = common::api_url(&server);
    let bytes = common::blocking(move || {
        common::repository(&url, Some("tok"))
            .fetch_order_document(&OrderId::new("o7").unwrap(), OrderDocument::WorkOrder)
    })
    .await
    .unwrap();

    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_unreachable_backend_is_connection_error() {
    let repo = common::repository("http://127.0.0.1:9/api", Some("tok"));
    assert!(matches!(
        repo.list_clients(),
        Err(RepositoryError::ConnectionError(_))
    ));
}
