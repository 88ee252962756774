//! # Error Types
//!
//! Domain-specific error types for cartwright-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cartwright-core errors (this file)                                    │
//! │  ├── CoreError        - Parsing and domain rule failures               │
//! │  └── ValidationError  - Cart input validation failures                 │
//! │                                                                         │
//! │  cartwright-checkout errors (separate crate)                           │
//! │  ├── LookupError      - Customer/cart resolution failures              │
//! │  ├── CheckoutError    - Orchestration failures                         │
//! │  └── ConfigError      - checkout.toml problems                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing calculator itself never fails: malformed carts are rejected
//! by [`crate::validation`] before they reach it.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A monetary amount could not be parsed.
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// A customer tier label is not one of the known tiers.
    #[error("Unknown customer tier: '{0}'. Valid options: bronze, silver, gold")]
    UnknownTier(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Cart validation errors.
///
/// Raised by producers of carts (stores, importers) before a cart is ever
/// handed to the checkout flow.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A cart has no line items.
    #[error("cart {cart_id} has no items")]
    EmptyCart { cart_id: u64 },

    /// Cart has exceeded maximum allowed items.
    #[error("cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: u64, max: u64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value must be a finite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
