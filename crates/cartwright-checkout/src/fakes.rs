//! # Scripted Fakes
//!
//! Stock and payment doubles that answer from a script and record every
//! call, so tests can assert on what the orchestrator did and in what
//! order.
//!
//! ```rust,ignore
//! let stock = Arc::new(FakeStock::new().failing_deduction());
//! let payments = Arc::new(FakePayment::approving(10));
//! // ... run a checkout ...
//! assert_eq!(payments.cancel_calls(), vec![(customer_id, 10)]);
//! ```

use std::sync::{Mutex, PoisonError};

use cartwright_core::{
    Availability, CustomerId, Money, PaymentAuthorization, ProductId, StockDeduction,
    TransactionId,
};

use crate::ports::{PaymentPort, StockPort};

// =============================================================================
// Stock
// =============================================================================

/// One recorded call on [`FakeStock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockCall {
    CheckAvailability {
        product_ids: Vec<ProductId>,
        quantities: Vec<u64>,
    },
    Deduct {
        product_ids: Vec<ProductId>,
        quantities: Vec<u64>,
    },
}

/// Stock double. Everything is in stock and deductions succeed unless
/// scripted otherwise.
#[derive(Debug)]
pub struct FakeStock {
    availability: Availability,
    deduction: StockDeduction,
    calls: Mutex<Vec<StockCall>>,
}

impl FakeStock {
    pub fn new() -> Self {
        FakeStock {
            availability: Availability::in_stock(),
            deduction: StockDeduction::succeeded(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Reports the given products as unavailable.
    pub fn with_unavailable(mut self, products: impl IntoIterator<Item = ProductId>) -> Self {
        self.availability = Availability::from_unavailable(products);
        self
    }

    /// Makes every deduction fail.
    pub fn failing_deduction(mut self) -> Self {
        self.deduction = StockDeduction::failed();
        self
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<StockCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn deduct_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, StockCall::Deduct { .. }))
            .count()
    }

    fn record(&self, call: StockCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl Default for FakeStock {
    fn default() -> Self {
        Self::new()
    }
}

impl StockPort for FakeStock {
    fn check_availability(&self, product_ids: &[ProductId], quantities: &[u64]) -> Availability {
        self.record(StockCall::CheckAvailability {
            product_ids: product_ids.to_vec(),
            quantities: quantities.to_vec(),
        });
        self.availability.clone()
    }

    fn deduct(&self, product_ids: &[ProductId], quantities: &[u64]) -> StockDeduction {
        self.record(StockCall::Deduct {
            product_ids: product_ids.to_vec(),
            quantities: quantities.to_vec(),
        });
        self.deduction
    }
}

// =============================================================================
// Payment
// =============================================================================

/// One recorded call on [`FakePayment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentCall {
    Authorize {
        customer_id: CustomerId,
        amount: Money,
    },
    Cancel {
        customer_id: CustomerId,
        transaction_id: TransactionId,
    },
}

/// Payment double returning one scripted authorization for every request.
#[derive(Debug)]
pub struct FakePayment {
    authorization: PaymentAuthorization,
    calls: Mutex<Vec<PaymentCall>>,
}

impl FakePayment {
    pub fn new(authorization: PaymentAuthorization) -> Self {
        FakePayment {
            authorization,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Approves every request with the same transaction id.
    pub fn approving(transaction_id: TransactionId) -> Self {
        Self::new(PaymentAuthorization::approved(transaction_id))
    }

    pub fn declining() -> Self {
        Self::new(PaymentAuthorization::declined())
    }

    /// Claims approval but omits the transaction id.
    pub fn approving_without_transaction() -> Self {
        Self::new(PaymentAuthorization {
            authorized: true,
            transaction_id: None,
        })
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<PaymentCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded cancel calls as `(customer_id, transaction_id)` pairs.
    pub fn cancel_calls(&self) -> Vec<(CustomerId, TransactionId)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                PaymentCall::Cancel {
                    customer_id,
                    transaction_id,
                } => Some((customer_id, transaction_id)),
                PaymentCall::Authorize { .. } => None,
            })
            .collect()
    }

    fn record(&self, call: PaymentCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }
}

impl PaymentPort for FakePayment {
    fn authorize(&self, customer_id: CustomerId, amount: Money) -> PaymentAuthorization {
        self.record(PaymentCall::Authorize {
            customer_id,
            amount,
        });
        self.authorization
    }

    fn cancel(&self, customer_id: CustomerId, transaction_id: TransactionId) {
        self.record(PaymentCall::Cancel {
            customer_id,
            transaction_id,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_stock_records_in_order() {
        let stock = FakeStock::new().with_unavailable([5]);

        let availability = stock.check_availability(&[5, 6], &[1, 2]);
        let deduction = stock.deduct(&[6], &[2]);

        assert!(!availability.available);
        assert!(deduction.success);
        assert_eq!(stock.calls().len(), 2);
        assert_eq!(stock.deduct_count(), 1);
    }

    #[test]
    fn test_fake_payment_records_cancel() {
        let payments = FakePayment::approving(3);

        assert_eq!(payments.authorize(1, Money::from_units(9)).approved_transaction(), Some(3));
        payments.cancel(1, 3);

        assert_eq!(payments.cancel_calls(), vec![(1, 3)]);
        assert_eq!(payments.calls().len(), 2);
    }
}
