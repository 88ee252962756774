//! # cartwright-checkout: Checkout Orchestration
//!
//! Turns a (cart, customer) pair into either a charged, stock-committed
//! order or a clean failure, cancelling the payment when stock deduction
//! fails after a successful authorization.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      cartwright-checkout                                │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐  │
//! │  │                  CheckoutService (orchestrator)                   │  │
//! │  │   resolve → check stock → price → authorize → deduct / cancel     │  │
//! │  └───────────────────────────────┬───────────────────────────────────┘  │
//! │                                  │ ports                                │
//! │       ┌──────────────┬───────────┴───┬──────────────┐                   │
//! │       ▼              ▼               ▼              ▼                   │
//! │  CustomerLookup  CartLookup      StockPort     PaymentPort              │
//! │       │              │               │              │                   │
//! │  ┌────┴──────────────┴───────────────┴──────────────┴────┐              │
//! │  │  adapters (in-memory)       fakes (scripted, tests)   │              │
//! │  └───────────────────────────────────────────────────────┘              │
//! │                                                                         │
//! │  config: checkout.toml + CARTWRIGHT_* environment overrides             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use cartwright_checkout::adapters::{CartStore, CustomerDirectory};
//! use cartwright_checkout::fakes::{FakePayment, FakeStock};
//! use cartwright_checkout::CheckoutService;
//! use cartwright_core::{Cart, Customer, CustomerTier, LineItem, Money, Product};
//! use chrono::NaiveDate;
//!
//! let customer = Customer::new(1, "Ana", CustomerTier::Gold);
//! let customers = CustomerDirectory::new();
//! customers.insert(customer.clone());
//!
//! let carts = CartStore::new();
//! let boots = Product::new(7, "Boots", Money::from_units(150), 3.0);
//! let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
//! carts.insert(Cart::new(1, customer, vec![LineItem::new(boots, 1)], day)).unwrap();
//!
//! let payments = Arc::new(FakePayment::approving(10));
//! let service = CheckoutService::new(customers, carts, FakeStock::new(), Arc::clone(&payments));
//!
//! let outcome = service.finalize_checkout(1, 1).unwrap();
//! assert_eq!(outcome.transaction_id, 10);
//! assert_eq!(outcome.total.rounded(2).to_string(), "150.00");
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod fakes;
pub mod orchestrator;
pub mod ports;
pub mod stage;

pub use adapters::{CartStore, CustomerDirectory, InventoryStock, PaymentGateway};
pub use config::CheckoutConfig;
pub use error::{CheckoutError, CheckoutResult, ConfigError, ConfigResult, LookupError};
pub use orchestrator::CheckoutService;
pub use ports::{CartLookup, CustomerLookup, PaymentPort, StockPort};
pub use stage::CheckoutStage;
