//! In-memory customer and cart lookups.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use cartwright_core::validation::{validate_cart, ValidationResult};
use cartwright_core::{Cart, CartId, Customer, CustomerId};
use tracing::debug;

use crate::error::LookupError;
use crate::ports::{CartLookup, CustomerLookup};

// =============================================================================
// Customers
// =============================================================================

/// Customers keyed by id.
#[derive(Debug, Default)]
pub struct CustomerDirectory {
    customers: RwLock<HashMap<CustomerId, Customer>>,
}

impl CustomerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a customer.
    pub fn insert(&self, customer: Customer) {
        self.customers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(customer.id, customer);
    }

    pub fn len(&self) -> usize {
        self.customers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CustomerLookup for CustomerDirectory {
    fn find_by_id(&self, id: CustomerId) -> Result<Customer, LookupError> {
        self.customers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or(LookupError::CustomerNotFound(id))
    }
}

// =============================================================================
// Carts
// =============================================================================

/// Carts keyed by id. Only carts that pass validation are stored.
#[derive(Debug, Default)]
pub struct CartStore {
    carts: RwLock<HashMap<CartId, Cart>>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores a cart, replacing any cart with the same id.
    pub fn insert(&self, cart: Cart) -> ValidationResult<()> {
        validate_cart(&cart)?;
        debug!(cart_id = cart.id, items = cart.item_count(), "Cart registered");
        self.carts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(cart.id, cart);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.carts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CartLookup for CartStore {
    fn find_by_id_and_customer(&self, id: CartId, customer: &Customer) -> Result<Cart, LookupError> {
        let carts = self.carts.read().unwrap_or_else(PoisonError::into_inner);
        let cart = carts.get(&id).ok_or(LookupError::CartNotFound(id))?;

        if cart.customer.id != customer.id {
            return Err(LookupError::CartOwnershipMismatch {
                cart_id: id,
                customer_id: customer.id,
            });
        }

        Ok(cart.clone())
    }
}
