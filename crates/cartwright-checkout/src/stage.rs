//! # Checkout Stages
//!
//! The per-invocation state machine of a checkout.
//!
//! ```text
//! START ─► CUSTOMER_RESOLVED ─► CART_RESOLVED ─► AVAILABILITY_CHECKED ─► PRICED
//!   │             │                   │                   │                │
//!   ▼             ▼                   ▼                   ▼                ▼
//! FAILED        FAILED              FAILED              FAILED       PAYMENT_AUTHORIZED
//!                                                                          │
//!                                         deduction fails ┌────────────────┤
//!                                                         ▼                ▼
//!                                              PAYMENT_CANCELLED     STOCK_DEDUCTED
//!                                                         │                │
//!                                                         ▼                ▼
//!                                                       FAILED            DONE
//! ```
//!
//! Stages are never stored; they label log lines and tell callers how far
//! a failed attempt got.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in the checkout state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutStage {
    Start,
    CustomerResolved,
    CartResolved,
    AvailabilityChecked,
    Priced,
    PaymentAuthorized,
    StockDeducted,
    Done,
    PaymentCancelled,
    Failed,
}

impl CheckoutStage {
    /// True for stages a checkout cannot leave.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutStage::Done | CheckoutStage::Failed)
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CheckoutStage::Start => "START",
            CheckoutStage::CustomerResolved => "CUSTOMER_RESOLVED",
            CheckoutStage::CartResolved => "CART_RESOLVED",
            CheckoutStage::AvailabilityChecked => "AVAILABILITY_CHECKED",
            CheckoutStage::Priced => "PRICED",
            CheckoutStage::PaymentAuthorized => "PAYMENT_AUTHORIZED",
            CheckoutStage::StockDeducted => "STOCK_DEDUCTED",
            CheckoutStage::Done => "DONE",
            CheckoutStage::PaymentCancelled => "PAYMENT_CANCELLED",
            CheckoutStage::Failed => "FAILED",
        };
        f.write_str(label)
    }
}
