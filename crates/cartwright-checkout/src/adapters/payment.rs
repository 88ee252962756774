//! In-memory payment gateway with a transaction ledger.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use cartwright_core::{CustomerId, Money, PaymentAuthorization, TransactionId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PaymentSettings;
use crate::ports::PaymentPort;

/// Lifecycle of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Authorized,
    Cancelled,
}

/// One authorized charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub transaction_id: TransactionId,
    pub customer_id: CustomerId,
    pub amount: Money,
    pub status: TransactionStatus,
}

#[derive(Debug)]
struct Ledger {
    /// `None` once `TransactionId::MAX` has been issued.
    next_id: Option<TransactionId>,
    entries: BTreeMap<TransactionId, TransactionRecord>,
}

/// Payment system simulated in process.
///
/// Approves a charge when approvals are enabled and the amount does not
/// exceed `max_authorization`. Transaction ids count up from
/// `first_transaction_id`. Once the id space is used up every further
/// request is declined.
#[derive(Debug)]
pub struct PaymentGateway {
    settings: PaymentSettings,
    ledger: Mutex<Ledger>,
}

impl PaymentGateway {
    pub fn new(settings: PaymentSettings) -> Self {
        let ledger = Ledger {
            next_id: Some(settings.first_transaction_id),
            entries: BTreeMap::new(),
        };
        PaymentGateway {
            settings,
            ledger: Mutex::new(ledger),
        }
    }

    /// Looks up one ledger entry.
    pub fn transaction(&self, transaction_id: TransactionId) -> Option<TransactionRecord> {
        self.lock().entries.get(&transaction_id).cloned()
    }

    /// All ledger entries ordered by transaction id.
    pub fn transactions(&self) -> Vec<TransactionRecord> {
        self.lock().entries.values().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PaymentGateway {
    fn default() -> Self {
        Self::new(PaymentSettings::default())
    }
}

impl PaymentPort for PaymentGateway {
    fn authorize(&self, customer_id: CustomerId, amount: Money) -> PaymentAuthorization {
        if !self.settings.approve {
            debug!(customer_id, %amount, "Payment declined: approvals disabled");
            return PaymentAuthorization::declined();
        }
        if amount > self.settings.max_authorization {
            debug!(
                customer_id,
                %amount,
                limit = %self.settings.max_authorization,
                "Payment declined: above authorization limit"
            );
            return PaymentAuthorization::declined();
        }

        let mut ledger = self.lock();
        let Some(transaction_id) = ledger.next_id else {
            warn!(customer_id, %amount, "Payment declined: transaction ids exhausted");
            return PaymentAuthorization::declined();
        };
        ledger.next_id = transaction_id.checked_add(1);
        ledger.entries.insert(
            transaction_id,
            TransactionRecord {
                transaction_id,
                customer_id,
                amount,
                status: TransactionStatus::Authorized,
            },
        );

        info!(customer_id, transaction_id, %amount, "Payment authorized");
        PaymentAuthorization::approved(transaction_id)
    }

    fn cancel(&self, customer_id: CustomerId, transaction_id: TransactionId) {
        let mut ledger = self.lock();
        match ledger.entries.get_mut(&transaction_id) {
            Some(record) if record.customer_id != customer_id => warn!(
                transaction_id,
                customer_id,
                owner = record.customer_id,
                "Cancel ignored: transaction belongs to another customer"
            ),
            Some(record) if record.status == TransactionStatus::Cancelled => {
                warn!(transaction_id, "Cancel ignored: transaction already cancelled")
            }
            Some(record) => {
                record.status = TransactionStatus::Cancelled;
                info!(customer_id, transaction_id, "Payment cancelled");
            }
            None => warn!(transaction_id, "Cancel ignored: unknown transaction"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> PaymentGateway {
        PaymentGateway::new(PaymentSettings {
            approve: true,
            max_authorization: Money::from_units(1_000),
            first_transaction_id: 10,
        })
    }

    #[test]
    fn test_sequential_transaction_ids() {
        let gateway = gateway();

        assert_eq!(gateway.authorize(1, Money::from_units(5)), PaymentAuthorization::approved(10));
        assert_eq!(gateway.authorize(2, Money::from_units(5)), PaymentAuthorization::approved(11));
        assert_eq!(gateway.transactions().len(), 2);
    }

    #[test]
    fn test_declines_once_transaction_ids_run_out() {
        let gateway = PaymentGateway::new(PaymentSettings {
            first_transaction_id: TransactionId::MAX,
            ..PaymentSettings::default()
        });

        assert_eq!(
            gateway.authorize(1, Money::from_units(5)),
            PaymentAuthorization::approved(TransactionId::MAX)
        );
        assert_eq!(gateway.authorize(1, Money::from_units(5)), PaymentAuthorization::declined());
        assert_eq!(gateway.transactions().len(), 1);
    }

    #[test]
    fn test_limit_is_inclusive() {
        let gateway = gateway();

        assert!(gateway.authorize(1, Money::from_units(1_000)).authorized);
        assert_eq!(
            gateway.authorize(1, Money::parse("1000.01").unwrap()),
            PaymentAuthorization::declined()
        );
    }

    #[test]
    fn test_disabled_gateway_declines_everything() {
        let gateway = PaymentGateway::new(PaymentSettings {
            approve: false,
            ..PaymentSettings::default()
        });

        assert_eq!(gateway.authorize(1, Money::from_units(1)), PaymentAuthorization::declined());
        assert!(gateway.transactions().is_empty());
    }

    #[test]
    fn test_cancel_marks_transaction() {
        let gateway = gateway();
        let txn = gateway.authorize(7, Money::from_units(300)).transaction_id.unwrap();

        gateway.cancel(7, txn);

        let record = gateway.transaction(txn).unwrap();
        assert_eq!(record.status, TransactionStatus::Cancelled);
        assert_eq!(record.amount, Money::from_units(300));
    }

    #[test]
    fn test_invalid_cancels_change_nothing() {
        let gateway = gateway();
        let txn = gateway.authorize(7, Money::from_units(300)).transaction_id.unwrap();

        gateway.cancel(8, txn);
        gateway.cancel(7, 999);
        assert_eq!(gateway.transaction(txn).unwrap().status, TransactionStatus::Authorized);

        gateway.cancel(7, txn);
        gateway.cancel(7, txn);
        assert_eq!(gateway.transaction(txn).unwrap().status, TransactionStatus::Cancelled);
    }
}
