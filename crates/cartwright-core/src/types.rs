//! # Domain Types
//!
//! Core domain types used throughout Cartwright.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Cart       │   │    LineItem     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product        │──►│  id             │       │
//! │  │  customer       │   │  quantity (≥1)  │   │  price (Money)  │       │
//! │  │  items (order)  │   └─────────────────┘   │  weight (kg)    │       │
//! │  │  created_on     │                         └─────────────────┘       │
//! │  └────────┬────────┘                                                   │
//! │           ▼                                                             │
//! │  ┌─────────────────┐   ┌─────────────────────────────────────────┐     │
//! │  │    Customer     │   │        Port results (single use)        │     │
//! │  │  ─────────────  │   │  Availability / PaymentAuthorization /  │     │
//! │  │  id, name, tier │   │  StockDeduction / CheckoutOutcome       │     │
//! │  └─────────────────┘   └─────────────────────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// Identifiers
// =============================================================================

/// Product identifier.
pub type ProductId = u64;

/// Customer identifier.
pub type CustomerId = u64;

/// Cart identifier.
pub type CartId = u64;

/// Opaque payment transaction identifier issued by the payment system.
pub type TransactionId = u64;

// =============================================================================
// Product
// =============================================================================

/// A product that can be placed in a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price (exact decimal, never negative).
    pub price: Money,

    /// Unit weight in kilograms. Weight is not money, so plain `f64`.
    pub weight: f64,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: Money, weight: f64) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            weight,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A product and how many units of it the customer wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: Product,
    pub quantity: u64,
}

impl LineItem {
    pub fn new(product: Product, quantity: u64) -> Self {
        LineItem { product, quantity }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }

    /// Unit weight × quantity.
    #[inline]
    pub fn line_weight(&self) -> f64 {
        self.product.weight * self.quantity as f64
    }
}

// =============================================================================
// Customer Tier
// =============================================================================

/// Loyalty tier of a customer. Only shipping is affected by the tier.
///
/// ```text
/// BRONZE  → shipping unchanged
/// SILVER  → shipping halved
/// GOLD    → shipping free
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerTier {
    #[default]
    #[serde(alias = "standard")]
    Bronze,

    #[serde(alias = "prata")]
    Silver,

    #[serde(alias = "ouro")]
    Gold,
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerTier::Bronze => write!(f, "bronze"),
            CustomerTier::Silver => write!(f, "silver"),
            CustomerTier::Gold => write!(f, "gold"),
        }
    }
}

impl FromStr for CustomerTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bronze" | "standard" => Ok(CustomerTier::Bronze),
            "silver" | "prata" => Ok(CustomerTier::Silver),
            "gold" | "ouro" => Ok(CustomerTier::Gold),
            other => Err(CoreError::UnknownTier(other.to_string())),
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer. The tier is read-only input to pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub tier: CustomerTier,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, tier: CustomerTier) -> Self {
        Customer {
            id,
            name: name.into(),
            tier,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A customer's cart at checkout time.
///
/// ## Invariants
/// - At least one item (checked by [`crate::validation::validate_cart`] when
///   the cart is produced, not at checkout)
/// - Item order is preserved all the way to the stock system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    pub created_on: NaiveDate,
}

impl Cart {
    pub fn new(id: CartId, customer: Customer, items: Vec<LineItem>, created_on: NaiveDate) -> Self {
        Cart {
            id,
            customer,
            items,
            created_on,
        }
    }

    /// Product ids in item order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.items.iter().map(|i| i.product.id).collect()
    }

    /// Quantities in item order, positionally paired with [`Cart::product_ids`].
    pub fn quantities(&self) -> Vec<u64> {
        self.items.iter().map(|i| i.quantity).collect()
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Stock Results
// =============================================================================

/// Answer of the stock system to an availability query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Availability {
    pub available: bool,
    pub unavailable: BTreeSet<ProductId>,
}

impl Availability {
    /// Every requested product is in stock.
    pub fn in_stock() -> Self {
        Availability {
            available: true,
            unavailable: BTreeSet::new(),
        }
    }

    /// Builds the answer from the products that cannot be supplied.
    /// `available` is true exactly when the set is empty.
    pub fn from_unavailable(unavailable: impl IntoIterator<Item = ProductId>) -> Self {
        let unavailable: BTreeSet<ProductId> = unavailable.into_iter().collect();
        Availability {
            available: unavailable.is_empty(),
            unavailable,
        }
    }
}

/// Answer of the stock system to a deduction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDeduction {
    pub success: bool,
}

impl StockDeduction {
    pub const fn succeeded() -> Self {
        StockDeduction { success: true }
    }

    pub const fn failed() -> Self {
        StockDeduction { success: false }
    }
}

// =============================================================================
// Payment Result
// =============================================================================

/// Answer of the payment system to an authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAuthorization {
    pub authorized: bool,

    /// Present only when `authorized` is true.
    pub transaction_id: Option<TransactionId>,
}

impl PaymentAuthorization {
    pub const fn approved(transaction_id: TransactionId) -> Self {
        PaymentAuthorization {
            authorized: true,
            transaction_id: Some(transaction_id),
        }
    }

    pub const fn declined() -> Self {
        PaymentAuthorization {
            authorized: false,
            transaction_id: None,
        }
    }

    /// The transaction to settle or cancel, if the payment went through.
    ///
    /// An authorization flagged as approved but missing its transaction id
    /// cannot be cancelled later, so it is treated as not approved.
    pub fn approved_transaction(&self) -> Option<TransactionId> {
        if self.authorized {
            self.transaction_id
        } else {
            None
        }
    }
}

// =============================================================================
// Checkout Outcome
// =============================================================================

/// Terminal output of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutOutcome {
    pub success: bool,
    pub transaction_id: TransactionId,
    pub message: String,

    /// Amount authorized, unrounded.
    pub total: Money,
}

impl CheckoutOutcome {
    pub fn completed(transaction_id: TransactionId, total: Money) -> Self {
        CheckoutOutcome {
            success: true,
            transaction_id,
            message: crate::CHECKOUT_SUCCESS_MESSAGE.to_string(),
            total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cart() -> Cart {
        let customer = Customer::new(9, "Bia", CustomerTier::Gold);
        Cart::new(
            1,
            customer,
            vec![
                LineItem::new(Product::new(30, "Lamp", Money::from_units(40), 1.5), 2),
                LineItem::new(Product::new(10, "Desk", Money::from_units(300), 20.0), 1),
            ],
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        )
    }

    #[test]
    fn test_ids_and_quantities_keep_item_order() {
        let cart = sample_cart();
        assert_eq!(cart.product_ids(), vec![30, 10]);
        assert_eq!(cart.quantities(), vec![2, 1]);
        assert_eq!(cart.item_count(), 2);
        assert!(!cart.is_empty());
    }

    #[test]
    fn test_line_totals() {
        let cart = sample_cart();
        assert_eq!(cart.items[0].line_total(), Money::from_units(80));
        assert!((cart.items[0].line_weight() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tier_parsing() {
        assert_eq!("gold".parse::<CustomerTier>().unwrap(), CustomerTier::Gold);
        assert_eq!("OURO".parse::<CustomerTier>().unwrap(), CustomerTier::Gold);
        assert_eq!("prata".parse::<CustomerTier>().unwrap(), CustomerTier::Silver);
        assert_eq!("standard".parse::<CustomerTier>().unwrap(), CustomerTier::Bronze);
        assert!("platinum".parse::<CustomerTier>().is_err());
        assert_eq!(CustomerTier::default(), CustomerTier::Bronze);
    }

    #[test]
    fn test_tier_serde_aliases() {
        let tier: CustomerTier = serde_json::from_str("\"ouro\"").unwrap();
        assert_eq!(tier, CustomerTier::Gold);
        assert_eq!(serde_json::to_string(&CustomerTier::Silver).unwrap(), "\"silver\"");
    }

    #[test]
    fn test_availability_flag_follows_unavailable_set() {
        assert!(Availability::in_stock().available);
        assert!(Availability::from_unavailable(Vec::new()).available);

        let missing = Availability::from_unavailable([4, 2, 4]);
        assert!(!missing.available);
        assert_eq!(missing.unavailable.into_iter().collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_approved_transaction() {
        assert_eq!(PaymentAuthorization::approved(10).approved_transaction(), Some(10));
        assert_eq!(PaymentAuthorization::declined().approved_transaction(), None);

        let malformed = PaymentAuthorization {
            authorized: true,
            transaction_id: None,
        };
        assert_eq!(malformed.approved_transaction(), None);
    }

    #[test]
    fn test_completed_outcome() {
        let outcome = CheckoutOutcome::completed(10, Money::from_units(150));
        assert!(outcome.success);
        assert_eq!(outcome.message, crate::CHECKOUT_SUCCESS_MESSAGE);
    }
}
