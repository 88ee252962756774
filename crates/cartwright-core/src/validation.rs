//! # Validation Module
//!
//! Input validation for whoever produces carts.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Cart producer (store, importer)                              │
//! │  └── THIS MODULE: validate_cart before the cart is registered          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Checkout orchestrator                                        │
//! │  └── Trusts its input; no re-validation                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing calculator                                           │
//! │  └── Pure math, no error conditions                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartwright_core::validation::{validate_quantity, validate_weight};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_quantity(0).is_err());
//! assert!(validate_weight(f64::NAN).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Cart;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY, MAX_ITEM_WEIGHT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a line item quantity (1 to [`MAX_ITEM_QUANTITY`]).
pub fn validate_quantity(quantity: u64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free samples).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit weight in kilograms (0 to [`MAX_ITEM_WEIGHT`]).
pub fn validate_weight(weight: f64) -> ValidationResult<()> {
    if !weight.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "weight".to_string(),
        });
    }

    if weight < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "weight".to_string(),
        });
    }

    if weight > MAX_ITEM_WEIGHT {
        return Err(ValidationError::OutOfRange {
            field: "weight".to_string(),
            min: 0,
            max: MAX_ITEM_WEIGHT as u64,
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validator
// =============================================================================

/// Validates a whole cart.
///
/// ## Rules
/// - At least one item, at most [`MAX_CART_ITEMS`]
/// - Every quantity, price and weight passes its field validator
pub fn validate_cart(cart: &Cart) -> ValidationResult<()> {
    if cart.is_empty() {
        return Err(ValidationError::EmptyCart { cart_id: cart.id });
    }

    if cart.item_count() > MAX_CART_ITEMS {
        return Err(ValidationError::CartTooLarge {
            max: MAX_CART_ITEMS,
        });
    }

    for item in &cart.items {
        validate_quantity(item.quantity)?;
        validate_price(item.product.price)?;
        validate_weight(item.product.weight)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Customer, CustomerTier, LineItem, Product};
    use chrono::NaiveDate;

    fn cart_with(items: Vec<LineItem>) -> Cart {
        Cart::new(
            5,
            Customer::new(1, "Duda", CustomerTier::Bronze),
            items,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        )
    }

    fn item(price: &str, weight: f64, quantity: u64) -> LineItem {
        LineItem::new(
            Product::new(1, "Widget", Money::parse(price).unwrap(), weight),
            quantity,
        )
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_units(-1)).is_err());
    }

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(0.0).is_ok());
        assert!(validate_weight(12.5).is_ok());
        assert!(validate_weight(-0.1).is_err());
        assert!(validate_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_weight_upper_bound() {
        assert!(validate_weight(MAX_ITEM_WEIGHT).is_ok());
        assert_eq!(
            validate_weight(MAX_ITEM_WEIGHT + 0.5),
            Err(ValidationError::OutOfRange {
                field: "weight".to_string(),
                min: 0,
                max: 10_000,
            })
        );

        // Weights near the decimal range limit never reach pricing.
        assert!(validate_cart(&cart_with(vec![item("10", 2e28, 1)])).is_err());
        assert!(validate_cart(&cart_with(vec![item("10", 1e29, 1)])).is_err());
    }

    #[test]
    fn test_validate_cart() {
        assert!(validate_cart(&cart_with(vec![item("10", 1.0, 2)])).is_ok());

        assert_eq!(
            validate_cart(&cart_with(vec![])),
            Err(ValidationError::EmptyCart { cart_id: 5 })
        );

        let too_many = (0..=MAX_CART_ITEMS).map(|_| item("1", 0.1, 1)).collect();
        assert_eq!(
            validate_cart(&cart_with(too_many)),
            Err(ValidationError::CartTooLarge {
                max: MAX_CART_ITEMS
            })
        );

        assert!(validate_cart(&cart_with(vec![item("10", 1.0, 0)])).is_err());
        assert!(validate_cart(&cart_with(vec![item("-10", 1.0, 1)])).is_err());
        assert!(validate_cart(&cart_with(vec![item("10", -1.0, 1)])).is_err());
    }
}
