//! # Checkout Simulator
//!
//! Runs one checkout against the in-memory adapters and prints the outcome
//! as JSON.
//!
//! ## Usage
//! ```bash
//! # Check out demo cart 1 with ./checkout.toml if present, else the
//! # platform default config
//! cargo run -p cartwright-checkout --bin checkout-sim
//!
//! # Pick another demo cart
//! cargo run -p cartwright-checkout --bin checkout-sim -- --cart 6
//!
//! # Use a specific config file and decline every payment
//! CARTWRIGHT_PAYMENT_APPROVE=false \
//!     cargo run -p cartwright-checkout --bin checkout-sim -- --config ./checkout.toml
//! ```
//!
//! ## Demo Carts
//! | Cart | Tier   | Unit price | Qty | Unit weight | Total   |
//! |------|--------|------------|-----|-------------|---------|
//! | 1    | gold   | 150        | 1   | 3 kg        | 150.00  |
//! | 2    | silver | 100        | 2   | 4 kg        | 208.00  |
//! | 3    | bronze | 50         | 3   | 12 kg       | 294.00  |
//! | 4    | silver | 50         | 3   | 20 kg       | 360.00  |
//! | 5    | bronze | 200        | 3   | 5 kg        | 600.00  |
//! | 6    | gold   | 300        | 4   | 2 kg        | 960.00  |
//!
//! When `[inventory]` lists no levels, every demo product starts with
//! `DEMO_STOCK` units.

use std::env;
use std::path::{Path, PathBuf};

use cartwright_checkout::adapters::{CartStore, CustomerDirectory, InventoryStock, PaymentGateway};
use cartwright_checkout::{CheckoutConfig, CheckoutService};
use cartwright_core::{Cart, CartId, Customer, CustomerTier, LineItem, Money, Product};
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const DEMO_STOCK: u64 = 10;

/// Config file looked up in the working directory before the platform default.
const LOCAL_CONFIG: &str = "checkout.toml";

/// (cart/customer id, tier, unit price, quantity, unit weight)
const DEMO_CARTS: &[(CartId, CustomerTier, i64, u64, f64)] = &[
    (1, CustomerTier::Gold, 150, 1, 3.0),
    (2, CustomerTier::Silver, 100, 2, 4.0),
    (3, CustomerTier::Bronze, 50, 3, 12.0),
    (4, CustomerTier::Silver, 50, 3, 20.0),
    (5, CustomerTier::Bronze, 200, 3, 5.0),
    (6, CustomerTier::Gold, 300, 4, 2.0),
];

/// Demo product ids are the cart id offset by this base.
const PRODUCT_ID_BASE: u64 = 100;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut cart_id: CartId = 1;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--cart" => {
                if i + 1 < args.len() {
                    cart_id = args[i + 1].parse()?;
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Cartwright Checkout Simulator");
                println!();
                println!("Usage: checkout-sim [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: ./checkout.toml, then platform config dir)");
                println!("      --cart <ID>      Demo cart to check out, 1-6 (default: 1)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config_path = CheckoutConfig::resolve_path(config_path, Path::new(LOCAL_CONFIG));

    // Load errors are returned from main; the subscriber needs the loaded filter.
    let config = CheckoutConfig::load(config_path.clone())?;
    init_tracing(&config.logging.filter);

    match &config_path {
        Some(path) if path.exists() => info!(?path, "Checkout config loaded"),
        _ => info!("No checkout config file found, using defaults"),
    }
    debug!(
        approve = config.payment.approve,
        max_authorization = %config.payment.max_authorization,
        filter = %config.logging.filter,
        "Effective checkout config"
    );

    let customers = CustomerDirectory::new();
    let carts = CartStore::new();
    let stock = InventoryStock::from_settings(&config.inventory);
    let seed_stock = config.inventory.levels.is_empty();

    for &(id, tier, price, quantity, weight) in DEMO_CARTS {
        let customer = Customer::new(id, format!("Demo customer {}", id), tier);
        let product = Product::new(
            PRODUCT_ID_BASE + id,
            format!("Demo product {}", id),
            Money::from_units(price),
            weight,
        );
        if seed_stock {
            stock.set_level(product.id, DEMO_STOCK);
        }

        customers.insert(customer.clone());
        carts.insert(Cart::new(
            id,
            customer,
            vec![LineItem::new(product, quantity)],
            Utc::now().date_naive(),
        ))?;
    }
    info!(carts = carts.len(), "Demo data seeded");

    // Each demo cart belongs to the customer with the same id.
    let customer_id = cart_id;
    let service = CheckoutService::new(
        customers,
        carts,
        stock,
        PaymentGateway::new(config.payment.clone()),
    );

    let report = match service.finalize_checkout(cart_id, customer_id) {
        Ok(outcome) => json!({
            "success": outcome.success,
            "transaction_id": outcome.transaction_id,
            "message": outcome.message,
            "total": outcome.total.rounded(config.display.scale),
        }),
        Err(err) => json!({
            "success": false,
            "failed_at": err.failed_at(),
            "compensated": err.was_compensated(),
            "message": err.to_string(),
        }),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
