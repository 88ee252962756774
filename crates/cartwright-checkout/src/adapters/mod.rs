//! # In-Memory Adapters
//!
//! Process-local implementations of the checkout ports, used by the
//! `checkout-sim` binary and by tests that want real state changes rather
//! than scripted answers.
//!
//! | Adapter             | Port             | State                          |
//! |---------------------|------------------|--------------------------------|
//! | `CustomerDirectory` | `CustomerLookup` | customers by id                |
//! | `CartStore`         | `CartLookup`     | validated carts by id          |
//! | `InventoryStock`    | `StockPort`      | stock level per product        |
//! | `PaymentGateway`    | `PaymentPort`    | transaction ledger             |

pub mod directory;
pub mod inventory;
pub mod payment;

pub use directory::{CartStore, CustomerDirectory};
pub use inventory::InventoryStock;
pub use payment::{PaymentGateway, TransactionRecord, TransactionStatus};
