//! # Checkout Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────────┐  ┌───────────────────┐   │
//! │  │     Lookup      │  │      Checkout       │  │   Configuration   │   │
//! │  │ (collaborators) │  │   (orchestrator)    │  │  (checkout.toml)  │   │
//! │  │                 │  │                     │  │                   │   │
//! │  │ CustomerNotFound│  │ Lookup (unchanged)  │  │ InvalidConfig     │   │
//! │  │ CartNotFound    │  │ OutOfStock          │  │ Io / Parse        │   │
//! │  │ CartOwnership…  │  │ PaymentDeclined     │  │ Serialize         │   │
//! │  │                 │  │ StockDeductionFailed│  │ NoConfigPath      │   │
//! │  └─────────────────┘  └─────────────────────┘  └───────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every checkout failure is fatal to the attempt. Only
//! `StockDeductionFailed` is preceded by a compensating payment cancel.

use std::collections::BTreeSet;

use cartwright_core::{CartId, CustomerId, Money, ProductId, TransactionId};
use thiserror::Error;

use crate::stage::CheckoutStage;

// =============================================================================
// Lookup Errors
// =============================================================================

/// Errors raised by the customer and cart lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Cart not found: {0}")]
    CartNotFound(CartId),

    #[error("Cart {cart_id} does not belong to customer {customer_id}")]
    CartOwnershipMismatch {
        cart_id: CartId,
        customer_id: CustomerId,
    },
}

// =============================================================================
// Checkout Errors
// =============================================================================

/// Result type alias for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Why a checkout attempt did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Customer or cart resolution failed; the collaborator's error as-is.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Stock reported items it cannot supply. Nothing was charged.
    #[error("Items out of stock: {unavailable:?}")]
    OutOfStock { unavailable: BTreeSet<ProductId> },

    /// The payment system refused the charge. Nothing was committed.
    #[error("Payment not authorized for customer {customer_id} (amount {amount})")]
    PaymentDeclined { customer_id: CustomerId, amount: Money },

    /// Stock deduction failed after payment; the payment was cancelled.
    #[error("Stock deduction failed; transaction {transaction_id} was cancelled")]
    StockDeductionFailed { transaction_id: TransactionId },
}

impl CheckoutError {
    /// The last stage the attempt reached before failing.
    pub fn failed_at(&self) -> CheckoutStage {
        match self {
            CheckoutError::Lookup(LookupError::CustomerNotFound(_)) => CheckoutStage::Start,
            CheckoutError::Lookup(_) => CheckoutStage::CustomerResolved,
            CheckoutError::OutOfStock { .. } => CheckoutStage::CartResolved,
            CheckoutError::PaymentDeclined { .. } => CheckoutStage::Priced,
            CheckoutError::StockDeductionFailed { .. } => CheckoutStage::PaymentCancelled,
        }
    }

    /// True when a compensating action ran before the error was returned.
    pub fn was_compensated(&self) -> bool {
        matches!(self, CheckoutError::StockDeductionFailed { .. })
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors loading, validating or saving `checkout.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid checkout configuration: {0}")]
    InvalidConfig(String),

    #[error("No config path available")]
    NoConfigPath,

    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_errors_pass_through_unchanged() {
        let lookup = LookupError::CartOwnershipMismatch {
            cart_id: 4,
            customer_id: 2,
        };
        let err: CheckoutError = lookup.clone().into();

        assert_eq!(err.to_string(), lookup.to_string());
        assert_eq!(err, CheckoutError::Lookup(lookup));
    }

    #[test]
    fn test_error_messages() {
        let err = CheckoutError::OutOfStock {
            unavailable: BTreeSet::from([3, 1]),
        };
        assert_eq!(err.to_string(), "Items out of stock: {1, 3}");

        let err = CheckoutError::StockDeductionFailed { transaction_id: 10 };
        assert_eq!(
            err.to_string(),
            "Stock deduction failed; transaction 10 was cancelled"
        );
    }

    #[test]
    fn test_failed_at() {
        assert_eq!(
            CheckoutError::from(LookupError::CustomerNotFound(1)).failed_at(),
            CheckoutStage::Start
        );
        assert_eq!(
            CheckoutError::from(LookupError::CartNotFound(1)).failed_at(),
            CheckoutStage::CustomerResolved
        );
        assert_eq!(
            CheckoutError::PaymentDeclined {
                customer_id: 1,
                amount: Money::from_units(5)
            }
            .failed_at(),
            CheckoutStage::Priced
        );
        assert!(CheckoutError::StockDeductionFailed { transaction_id: 1 }.was_compensated());
    }
}
