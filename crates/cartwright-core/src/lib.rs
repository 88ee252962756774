//! # cartwright-core: Pure Business Logic for Cartwright
//!
//! This crate holds the checkout pricing rules and the domain types they
//! operate on. Everything here is a pure function of its input.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cartwright Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              cartwright-checkout (orchestrator)                 │   │
//! │  │   customer ──► cart ──► stock ──► price ──► pay ──► deduct      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ compute_total(&cart)                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ cartwright-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │   Cart    │  │   Money   │  │ discounts │  │   rules   │  │   │
//! │  │   │ Customer  │  │ (decimal) │  │ shipping  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO SHARED STATE • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Cart, LineItem, Product, Customer, port results)
//! - [`money`] - Money type backed by exact decimals (no floating point!)
//! - [`pricing`] - Discount tiers, shipping brackets, tier adjustments
//! - [`error`] - Domain error types
//! - [`validation`] - Cart validation for producers of carts
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use cartwright_core::{pricing, Cart, Customer, CustomerTier, LineItem, Money, Product};
//!
//! let customer = Customer::new(1, "Ana", CustomerTier::Silver);
//! let product = Product::new(7, "Kettle", Money::from_units(100), 4.0);
//! let cart = Cart::new(
//!     1,
//!     customer,
//!     vec![LineItem::new(product, 2)],
//!     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
//! );
//!
//! // 200.00 of items, 8kg → 16.00 shipping, halved for SILVER
//! assert_eq!(pricing::compute_total(&cart).rounded(2).to_string(), "208.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use pricing::{compute_total, price_cart, PriceBreakdown};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts from reaching the payment gateway.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
pub const MAX_ITEM_QUANTITY: u64 = 999;

/// Maximum unit weight of a product, in kilograms.
pub const MAX_ITEM_WEIGHT: f64 = 10_000.0;

/// Message carried by a successful checkout outcome.
pub const CHECKOUT_SUCCESS_MESSAGE: &str = "Purchase completed successfully.";
