use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vitrine_core::{Product, StoreConfig};
use vitrine_feed::RefreshOutcome;
use vitrine_order::{format_brl, OrderFormData};

use vitrine_cli::Storefront;

#[derive(Debug, Parser)]
#[command(name = "vitrine-cli")]
#[command(about = "Storefront catalog and order tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the current catalog
    Catalog {
        /// Skip the feed and print the fallback catalog
        #[arg(long)]
        offline: bool,
        /// Print products as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build a cart and print the order message and link
    Order {
        /// Product to add, as `id` or `id:quantity` (repeatable)
        #[arg(long = "item", required = true)]
        items: Vec<ItemSpec>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        street: String,
        #[arg(long)]
        number: String,
        #[arg(long)]
        neighborhood: String,
        #[arg(long)]
        phone: String,
        /// Skip the feed and order from the fallback catalog
        #[arg(long)]
        offline: bool,
    },
}

/// A `--item id[:qty]` argument. Quantity defaults to 1.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemSpec {
    product_id: String,
    quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = match s.split_once(':') {
            Some((id, qty)) => {
                let quantity = qty
                    .trim()
                    .parse::<u32>()
                    .map_err(|e| format!("invalid quantity '{qty}': {e}"))?;
                (id, quantity)
            }
            None => (s, 1),
        };
        let id = id.trim();
        if id.is_empty() {
            return Err("product id must not be empty".to_owned());
        }
        if quantity == 0 {
            return Err("quantity must be at least 1".to_owned());
        }
        Ok(Self {
            product_id: id.to_owned(),
            quantity,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = vitrine_core::load_store_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Catalog { offline, json } => run_catalog(&config, offline, json).await,
        Commands::Order {
            items,
            name,
            street,
            number,
            neighborhood,
            phone,
            offline,
        } => {
            let form = OrderFormData {
                name,
                street,
                number,
                neighborhood,
                phone,
            };
            run_order(&config, &items, &form, offline).await
        }
    }
}

async fn load_storefront(config: &StoreConfig, offline: bool) -> anyhow::Result<Storefront> {
    let store = Storefront::from_config(config)?;
    if offline {
        tracing::info!("offline: serving fallback catalog");
        return Ok(store);
    }
    match store.refresh().await {
        RefreshOutcome::Updated { count } => tracing::debug!(count, "catalog loaded from feed"),
        RefreshOutcome::KeptPrevious { reason } => {
            tracing::warn!(%reason, "feed unavailable, serving fallback catalog");
        }
        RefreshOutcome::Stale => {}
    }
    Ok(store)
}

async fn run_catalog(config: &StoreConfig, offline: bool, json: bool) -> anyhow::Result<()> {
    let store = load_storefront(config, offline).await?;
    let catalog = store.catalog();

    if json {
        println!("{}", serde_json::to_string_pretty(&*catalog)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("Nenhum produto disponível no momento.");
        return Ok(());
    }
    for product in catalog.iter() {
        println!("{}", catalog_line(product));
    }
    Ok(())
}

fn catalog_line(product: &Product) -> String {
    let status = if product.available {
        ""
    } else {
        " [esgotado]"
    };
    format!(
        "{:<14} {:<12} {:>10}  {}{status}",
        product.id,
        product.product_type.label(),
        format_brl(product.unit_price),
        product.name
    )
}

async fn run_order(
    config: &StoreConfig,
    items: &[ItemSpec],
    form: &OrderFormData,
    offline: bool,
) -> anyhow::Result<()> {
    let mut store = load_storefront(config, offline).await?;
    for item in items {
        store.add_to_cart(&item.product_id, item.quantity)?;
    }

    let totals = store.totals();
    println!("Itens: {}", totals.item_count);
    println!("Subtotal: {}", format_brl(totals.subtotal));
    println!("Taxa de Entrega: {}", format_brl(totals.delivery_fee));
    println!("Total: {}", format_brl(totals.total));

    if let Some(blocked) = totals.checkout_status().blocked_message() {
        anyhow::bail!("{blocked}");
    }

    let request = store.checkout(form).map_err(|e| match e {
        vitrine_order::CheckoutError::InvalidForm(errors) => {
            let fields: Vec<String> = errors
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect();
            anyhow::anyhow!("invalid checkout form: {}", fields.join("; "))
        }
        other => other.into(),
    })?;

    println!();
    println!("{}", request.message);
    println!();
    println!("{}", request.target_uri);
    Ok(())
}

#[cfg(test)]
mod tests;
