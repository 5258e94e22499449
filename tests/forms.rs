use rutero::domain::client::NewClient;
use rutero::domain::order::NewOrder;
use rutero::domain::product::Product;
use rutero::domain::types::{Money, ProductId, ProductName, VisitDay};
use rutero::forms::FormError;
use rutero::forms::client::ClientForm;
use rutero::forms::import::ClientImportForm;
use rutero::forms::order::{OrderForm, OrderItemForm};

fn catalogue() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("jabon").unwrap(),
            name: ProductName::new("Jabón").unwrap(),
            description: None,
            price: Money::from_cents(1250),
            wholesale_price: Some(Money::from_cents(1000)),
            image: None,
        },
        Product {
            id: ProductId::new("cloro").unwrap(),
            name: ProductName::new("Cloro").unwrap(),
            description: None,
            price: Money::from_cents(3000),
            wholesale_price: Some(Money::ZERO),
            image: None,
        },
    ]
}

fn item(product_id: &str, quantity: u32, wholesale: bool) -> OrderItemForm {
    OrderItemForm {
        product_id: product_id.into(),
        quantity,
        wholesale,
    }
}

#[test]
fn test_quote_then_submit_order() {
    let form = OrderForm {
        client_id: "c1".into(),
        items: vec![item("jabon", 4, true), item("jabon", 1, false), item("cloro", 2, true)],
        notes: "  entregar temprano ".into(),
    };

    let quote = form.quote(&catalogue()).unwrap();
    let subtotals: Vec<_> = quote.lines.iter().map(|l| l.subtotal.cents()).collect();
    // A zero wholesale price falls back to retail.
    assert_eq!(subtotals, vec![4000, 1250, 6000]);
    assert_eq!(quote.total, Money::from_cents(11250));

    let order = NewOrder::try_from(form).unwrap();
    assert_eq!(order.items.len(), 3);
    assert_eq!(order.notes.as_deref(), Some("entregar temprano"));
}

#[test]
fn test_order_rejects_unknown_product_and_zero_quantity() {
    let unknown = OrderForm {
        client_id: "c1".into(),
        items: vec![item("jabón", 1, false)],
        notes: String::new(),
    };
    assert!(matches!(
        unknown.quote(&catalogue()),
        Err(FormError::UnknownProduct(id)) if id == "jabón"
    ));

    let zero = OrderForm {
        client_id: "c1".into(),
        items: vec![item("jabon", 0, false)],
        notes: String::new(),
    };
    assert!(NewOrder::try_from(zero).is_err());

    let empty = OrderForm {
        client_id: "c1".into(),
        ..Default::default()
    };
    assert!(matches!(NewOrder::try_from(empty), Err(FormError::NoItems)));
}

#[test]
fn test_client_form_and_import_agree() {
    let from_form = NewClient::try_from(ClientForm {
        name: "Abarrotes Lupita".into(),
        phone: "555 123".into(),
        address: String::new(),
        visit_days: vec!["lunes".into(), "Jueves".into()],
    })
    .unwrap();

    let csv = "nombre,telefono,direccion,dias\nAbarrotes Lupita,555 123,,lunes;jueves\n";
    let imported = ClientImportForm::new(csv.as_bytes()).parse().unwrap();

    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].name, from_form.name);
    assert_eq!(imported[0].visit_days, vec![VisitDay::Monday, VisitDay::Thursday]);
    assert_eq!(from_form.visit_days, imported[0].visit_days);
    assert_eq!(from_form.address, None);
}

#[test]
fn test_import_reports_row_of_bad_weekday() {
    let csv = "nombre,dias\nUno,lunes\nDos,feriado\n";
    match ClientImportForm::new(csv.as_bytes()).parse() {
        Err(FormError::InvalidRow { row, .. }) => assert_eq!(row, 3),
        other => panic!("unexpected result {other:?}"),
    }
}
