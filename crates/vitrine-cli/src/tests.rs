use rust_decimal::Decimal;
use vitrine_core::ProductType;

use super::*;

#[test]
fn parses_catalog_command() {
    let cli = Cli::try_parse_from(["vitrine-cli", "catalog"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Catalog {
            offline: false,
            json: false
        }
    ));
}

#[test]
fn parses_catalog_offline_json() {
    let cli = Cli::try_parse_from(["vitrine-cli", "catalog", "--offline", "--json"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Catalog {
            offline: true,
            json: true
        }
    ));
}

#[test]
fn no_command_is_an_error() {
    assert!(Cli::try_parse_from(["vitrine-cli"]).is_err());
}

#[test]
fn parses_order_command_with_items() {
    let cli = Cli::try_parse_from([
        "vitrine-cli",
        "order",
        "--item",
        "p-frango:20",
        "--item",
        "d-guarana",
        "--name",
        "Maria",
        "--street",
        "Rua A",
        "--number",
        "10",
        "--neighborhood",
        "Centro",
        "--phone",
        "44997394844",
        "--offline",
    ])
    .unwrap();

    let Commands::Order {
        items,
        phone,
        offline,
        ..
    } = cli.command
    else {
        panic!("expected order command");
    };
    assert_eq!(
        items,
        vec![
            ItemSpec {
                product_id: "p-frango".to_owned(),
                quantity: 20
            },
            ItemSpec {
                product_id: "d-guarana".to_owned(),
                quantity: 1
            },
        ]
    );
    assert_eq!(phone, "44997394844");
    assert!(offline);
}

#[test]
fn order_requires_an_item() {
    let result = Cli::try_parse_from([
        "vitrine-cli",
        "order",
        "--name",
        "Maria",
        "--street",
        "Rua A",
        "--number",
        "10",
        "--neighborhood",
        "Centro",
        "--phone",
        "44997394844",
    ]);
    assert!(result.is_err());
}

#[test]
fn item_spec_rejects_bad_input() {
    assert!("p-frango:abc".parse::<ItemSpec>().is_err());
    assert!("p-frango:0".parse::<ItemSpec>().is_err());
    assert!(":3".parse::<ItemSpec>().is_err());
    assert!("".parse::<ItemSpec>().is_err());
}

#[test]
fn catalog_line_marks_unavailable_products() {
    let product = Product {
        id: "p-frango".to_owned(),
        name: "Mini Pastel de Frango".to_owned(),
        product_type: ProductType::Pastry,
        description: None,
        image: String::new(),
        unit_price: Decimal::new(85, 2),
        min_quantity: 1,
        available: false,
    };
    let line = catalog_line(&product);
    assert!(line.starts_with("p-frango"));
    assert!(line.contains("Mini Pastel"));
    assert!(line.contains("R$ 0,85"));
    assert!(line.ends_with("Mini Pastel de Frango [esgotado]"));
}
