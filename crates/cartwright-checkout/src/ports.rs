//! # Ports
//!
//! The narrow interfaces through which checkout reaches the outside world.
//!
//! ## Port Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CheckoutService                                 │
//! │                                                                         │
//! │   CustomerLookup      CartLookup        StockPort        PaymentPort    │
//! │   find_by_id          find_by_id_       check_avail…     authorize      │
//! │                       and_customer      deduct           cancel         │
//! │        │                   │               │                 │          │
//! └────────┼───────────────────┼───────────────┼─────────────────┼──────────┘
//!          ▼                   ▼               ▼                 ▼
//!   CustomerDirectory      CartStore     InventoryStock    PaymentGateway
//!   (adapters::directory)              (adapters::…)      (adapters::…)
//!                     FakeStock / FakePayment in tests
//! ```
//!
//! Every call is synchronous from the orchestrator's point of view.
//! `product_ids` and `quantities` are parallel slices of equal length,
//! paired by position.

use std::sync::Arc;

use cartwright_core::{
    Availability, Cart, CartId, Customer, CustomerId, Money, PaymentAuthorization, ProductId,
    StockDeduction, TransactionId,
};

use crate::error::LookupError;

/// Resolves customers by id.
pub trait CustomerLookup {
    fn find_by_id(&self, id: CustomerId) -> Result<Customer, LookupError>;
}

/// Resolves a cart that must belong to the given customer.
pub trait CartLookup {
    fn find_by_id_and_customer(&self, id: CartId, customer: &Customer)
        -> Result<Cart, LookupError>;
}

/// The stock system.
pub trait StockPort {
    /// Reports which of the requested products cannot be supplied.
    fn check_availability(&self, product_ids: &[ProductId], quantities: &[u64]) -> Availability;

    /// Removes the quantities from stock.
    fn deduct(&self, product_ids: &[ProductId], quantities: &[u64]) -> StockDeduction;
}

/// The payment system.
pub trait PaymentPort {
    fn authorize(&self, customer_id: CustomerId, amount: Money) -> PaymentAuthorization;

    /// Fire-and-forget: the orchestrator never looks at the outcome.
    fn cancel(&self, customer_id: CustomerId, transaction_id: TransactionId);
}

// =============================================================================
// Shared handles
// =============================================================================
// Tests and wiring code keep an `Arc` to an adapter while the service owns
// another clone, so the ports forward through `Arc<T>` and `&T`.

macro_rules! forward_ports {
    ($($wrapper:ty),*) => {$(
        impl<T: CustomerLookup + ?Sized> CustomerLookup for $wrapper {
            fn find_by_id(&self, id: CustomerId) -> Result<Customer, LookupError> {
                (**self).find_by_id(id)
            }
        }

        impl<T: CartLookup + ?Sized> CartLookup for $wrapper {
            fn find_by_id_and_customer(
                &self,
                id: CartId,
                customer: &Customer,
            ) -> Result<Cart, LookupError> {
                (**self).find_by_id_and_customer(id, customer)
            }
        }

        impl<T: StockPort + ?Sized> StockPort for $wrapper {
            fn check_availability(&self, product_ids: &[ProductId], quantities: &[u64]) -> Availability {
                (**self).check_availability(product_ids, quantities)
            }

            fn deduct(&self, product_ids: &[ProductId], quantities: &[u64]) -> StockDeduction {
                (**self).deduct(product_ids, quantities)
            }
        }

        impl<T: PaymentPort + ?Sized> PaymentPort for $wrapper {
            fn authorize(&self, customer_id: CustomerId, amount: Money) -> PaymentAuthorization {
                (**self).authorize(customer_id, amount)
            }

            fn cancel(&self, customer_id: CustomerId, transaction_id: TransactionId) {
                (**self).cancel(customer_id, transaction_id)
            }
        }
    )*};
}

forward_ports!(Arc<T>, &T);
