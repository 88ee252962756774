//! # Checkout Orchestrator
//!
//! Drives one checkout attempt for a (cart, customer) pair to a terminal
//! outcome, with at most one compensating action.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    finalize_checkout(cart_id, customer_id)              │
//! │                                                                         │
//! │  1. customers.find_by_id ─────────────── Err ──► Lookup (unchanged)     │
//! │  2. carts.find_by_id_and_customer ────── Err ──► Lookup (unchanged)     │
//! │  3. product ids + quantities (item order)                               │
//! │  4. stock.check_availability ─── !available ──► OutOfStock              │
//! │  5. pricing::compute_total                                              │
//! │  6. payments.authorize ───────── declined ────► PaymentDeclined         │
//! │  7. stock.deduct ─────────────── failed ──┐                             │
//! │                                           ▼                             │
//! │                          payments.cancel(customer, txn)  (once)         │
//! │                                           │                             │
//! │                                           ▼                             │
//! │                                  StockDeductionFailed                   │
//! │  8. Ok(CheckoutOutcome)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No step is retried and no step starts before its predecessor returns.
//! The service keeps no state between invocations.

use cartwright_core::{pricing, CartId, CheckoutOutcome, CustomerId};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::error::{CheckoutError, CheckoutResult};
use crate::ports::{CartLookup, CustomerLookup, PaymentPort, StockPort};
use crate::stage::CheckoutStage;

/// Checkout orchestrator over its four collaborators.
///
/// ## Usage
/// ```rust,ignore
/// let service = CheckoutService::new(customers, carts, stock, payments);
/// let outcome = service.finalize_checkout(cart_id, customer_id)?;
/// println!("charged {} in transaction {}", outcome.total, outcome.transaction_id);
/// ```
#[derive(Debug, Clone)]
pub struct CheckoutService<C, K, S, P> {
    customers: C,
    carts: K,
    stock: S,
    payments: P,
}

impl<C, K, S, P> CheckoutService<C, K, S, P>
where
    C: CustomerLookup,
    K: CartLookup,
    S: StockPort,
    P: PaymentPort,
{
    /// Creates a new CheckoutService.
    pub fn new(customers: C, carts: K, stock: S, payments: P) -> Self {
        CheckoutService {
            customers,
            carts,
            stock,
            payments,
        }
    }

    /// Runs one checkout attempt.
    ///
    /// ## Errors
    /// - [`CheckoutError::Lookup`] when the customer or cart cannot be resolved
    /// - [`CheckoutError::OutOfStock`] before any payment call
    /// - [`CheckoutError::PaymentDeclined`] before any stock deduction
    /// - [`CheckoutError::StockDeductionFailed`] after the payment was cancelled
    pub fn finalize_checkout(
        &self,
        cart_id: CartId,
        customer_id: CustomerId,
    ) -> CheckoutResult<CheckoutOutcome> {
        let attempt_id = Uuid::new_v4();
        let span = info_span!("checkout", %attempt_id, cart_id, customer_id);
        let _guard = span.enter();

        let result = self.run(cart_id, customer_id);

        match &result {
            Ok(outcome) => info!(
                stage = %CheckoutStage::Done,
                transaction_id = outcome.transaction_id,
                total = %outcome.total,
                "Checkout completed"
            ),
            Err(err) => warn!(
                stage = %CheckoutStage::Failed,
                error = %err,
                failed_at = %err.failed_at(),
                compensated = err.was_compensated(),
                "Checkout failed"
            ),
        }

        result
    }

    fn run(&self, cart_id: CartId, customer_id: CustomerId) -> CheckoutResult<CheckoutOutcome> {
        let customer = self.customers.find_by_id(customer_id)?;
        debug!(stage = %CheckoutStage::CustomerResolved, tier = %customer.tier);

        let cart = self.carts.find_by_id_and_customer(cart_id, &customer)?;
        debug!(stage = %CheckoutStage::CartResolved, items = cart.item_count());

        let product_ids = cart.product_ids();
        let quantities = cart.quantities();

        let availability = self.stock.check_availability(&product_ids, &quantities);
        if !availability.available {
            return Err(CheckoutError::OutOfStock {
                unavailable: availability.unavailable,
            });
        }
        debug!(stage = %CheckoutStage::AvailabilityChecked);

        let total = pricing::compute_total(&cart);
        debug!(stage = %CheckoutStage::Priced, total = %total);

        let authorization = self.payments.authorize(customer.id, total);
        let transaction_id = match authorization.approved_transaction() {
            Some(id) => id,
            None => {
                if authorization.authorized {
                    warn!("Payment approved without a transaction id; treating as declined");
                }
                return Err(CheckoutError::PaymentDeclined {
                    customer_id: customer.id,
                    amount: total,
                });
            }
        };
        debug!(stage = %CheckoutStage::PaymentAuthorized, transaction_id);

        let deduction = self.stock.deduct(&product_ids, &quantities);
        if !deduction.success {
            warn!(transaction_id, "Stock deduction failed, cancelling payment");
            self.payments.cancel(customer.id, transaction_id);
            debug!(stage = %CheckoutStage::PaymentCancelled, transaction_id);
            return Err(CheckoutError::StockDeductionFailed { transaction_id });
        }
        debug!(stage = %CheckoutStage::StockDeducted);

        Ok(CheckoutOutcome::completed(transaction_id, total))
    }

    /// Returns the stock adapter.
    pub fn stock(&self) -> &S {
        &self.stock
    }

    /// Returns the payment adapter.
    pub fn payments(&self) -> &P {
        &self.payments
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
