//! Catalog served when the published feed cannot be read.
//!
//! The bundled list is compiled in; a YAML file can replace it at startup
//! via `VITRINE_FALLBACK_CATALOG`.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::products::{Product, ProductType, MAX_UNIT_PRICE};
use crate::ConfigError;

#[derive(Debug, Deserialize)]
struct FallbackFile {
    products: Vec<Product>,
}

/// The catalog shipped with the storefront.
#[must_use]
pub fn bundled_catalog() -> Vec<Product> {
    let pastry_price = Decimal::new(85, 2);
    let drink_price = Decimal::new(800, 2);

    let entry = |id: &str,
                 name: &str,
                 product_type: ProductType,
                 description: &str,
                 image: &str,
                 unit_price: Decimal| Product {
        id: id.to_owned(),
        name: name.to_owned(),
        product_type,
        description: Some(description.to_owned()),
        image: image.to_owned(),
        unit_price,
        min_quantity: 1,
        available: true,
    };

    vec![
        entry(
            "p-frango",
            "Mini Pastel de Frango",
            ProductType::Pastry,
            "Delicioso recheio de frango temperado.",
            "https://images.unsplash.com/photo-1626082927389-6cd097cdc6ec?auto=format&fit=crop&w=800&q=80",
            pastry_price,
        ),
        entry(
            "p-carne",
            "Mini Pastel de Carne",
            ProductType::Pastry,
            "Carne moída selecionada e bem temperada.",
            "https://i0.wp.com/anamariabraga.globo.com/wp-content/uploads/2019/04/pastel-de-carne.jpg?fit=1510%2C647&ssl=1",
            pastry_price,
        ),
        entry(
            "p-queijo",
            "Mini Pastel de Queijo",
            ProductType::Pastry,
            "Muito queijo derretido.",
            "https://images.unsplash.com/photo-1613564834361-9436948817d1?auto=format&fit=crop&w=800&q=80",
            pastry_price,
        ),
        entry(
            "p-salsicha",
            "Enroladinho de Salsicha",
            ProductType::Roll,
            "Clássico enroladinho de salsicha.",
            "https://images.unsplash.com/photo-1579888944880-d98341245702?auto=format&fit=crop&w=800&q=80",
            pastry_price,
        ),
        entry(
            "d-guarana",
            "Guaraná 2 Litros",
            ProductType::Beverage,
            "Refrigerante bem gelado para acompanhar.",
            "https://images.unsplash.com/photo-1624517452488-04869289c4ca?auto=format&fit=crop&w=800&q=80",
            drink_price,
        ),
    ]
}

/// Load a fallback catalog from a YAML file with a top-level `products` list.
///
/// Entries are held to the same invariants as normalized feed rows, but a bad
/// entry fails the whole file: this is operator-authored config, not feed data.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or parsed, or if an entry
/// has an empty id/name, a negative or out-of-range price, or a zero minimum
/// quantity.
pub fn load_fallback_catalog(path: &Path) -> Result<Vec<Product>, ConfigError> {
    let display = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FallbackIo {
        path: display.clone(),
        source,
    })?;
    parse_fallback_catalog(&contents, &display)
}

fn parse_fallback_catalog(contents: &str, path: &str) -> Result<Vec<Product>, ConfigError> {
    let file: FallbackFile =
        serde_yaml::from_str(contents).map_err(|source| ConfigError::FallbackParse {
            path: path.to_owned(),
            source,
        })?;

    for (index, product) in file.products.iter().enumerate() {
        let reason = if product.id.trim().is_empty() {
            Some("id is empty")
        } else if product.name.trim().is_empty() {
            Some("name is empty")
        } else if product.unit_price.is_sign_negative() {
            Some("unit_price is negative")
        } else if product.unit_price > MAX_UNIT_PRICE {
            Some("unit_price is above the maximum")
        } else if product.min_quantity == 0 {
            Some("min_quantity must be at least 1")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(ConfigError::InvalidFallbackEntry {
                index,
                reason: reason.to_owned(),
            });
        }
    }

    Ok(file.products)
}
