//! End-to-end session: refresh from a mocked feed, fill a cart, check out.

use rust_decimal::Decimal;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vitrine_cli::Storefront;
use vitrine_core::StoreConfig;
use vitrine_feed::RefreshOutcome;
use vitrine_order::{message_from_uri, parse_order_lines, OrderFormData};

const FEED: &str = "id,name,type,description,price,image,available
x-pastel,Pastel de Palmito,pastel,,\"R$ 1,50\",,SIM
x-suco,Suco de Laranja 1L,bebida,,\"R$ 9,00\",,SIM
x-esgotado,Pastel de Camarão,pastel,,\"R$ 2,00\",,NAO
";

fn config_for(server: &MockServer) -> StoreConfig {
    StoreConfig {
        feed_url: format!("{}/pub?output=csv", server.uri()),
        max_retries: 0,
        retry_backoff_base_secs: 0,
        request_timeout_secs: 5,
        ..StoreConfig::default()
    }
}

fn contact() -> OrderFormData {
    OrderFormData {
        name: "João".to_owned(),
        street: "Av. Brasil".to_owned(),
        number: "500".to_owned(),
        neighborhood: "Zona 7".to_owned(),
        phone: "44 99999-0000".to_owned(),
    }
}

#[tokio::test]
async fn refreshed_catalog_feeds_cart_and_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pub"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED))
        .mount(&server)
        .await;

    let mut store = Storefront::from_config(&config_for(&server)).unwrap();
    assert_eq!(store.refresh().await, RefreshOutcome::Updated { count: 3 });
    assert_eq!(store.catalog().len(), 3);

    store.add_to_cart("x-pastel", 10).unwrap();
    store.add_to_cart("x-suco", 1).unwrap();
    assert!(store.add_to_cart("x-esgotado", 1).is_err());
    assert!(store.add_to_cart("p-frango", 1).is_err());

    let totals = store.totals();
    assert_eq!(totals.subtotal, Decimal::new(2400, 2));
    assert_eq!(totals.total, Decimal::new(2900, 2));
    assert!(totals.minimum_met);

    let request = store.checkout(&contact()).unwrap();
    assert!(request.target_uri.starts_with("https://wa.me/5544997394844?text="));

    let decoded = message_from_uri(&request.target_uri).unwrap();
    assert_eq!(decoded, request.message);
    assert!(decoded.contains("📞 Telefone: (44) 99999-0000"));

    let lines = parse_order_lines(&decoded);
    assert_eq!(lines.len(), store.cart().line_count());
    for (line, item) in lines.iter().zip(store.cart().items()) {
        assert_eq!(line.quantity, item.quantity);
        assert_eq!(line.line_total, item.line_total());
    }
}

#[tokio::test]
async fn feed_outage_keeps_bundled_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pub"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut store = Storefront::from_config(&config_for(&server)).unwrap();
    let outcome = store.refresh().await;
    assert!(matches!(outcome, RefreshOutcome::KeptPrevious { .. }));
    assert_eq!(store.catalog().len(), 5);
    assert!(store.add_to_cart("p-frango", 30).is_ok());
}
