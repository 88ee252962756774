//! # Pricing Module
//!
//! Computes the final charge for a cart: discounted items plus weight-based
//! shipping adjusted by customer tier.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     How a Cart Becomes a Total                          │
//! │                                                                         │
//! │  items ──► Σ price × qty ──► discount tier ──► discounted items ──┐     │
//! │               (subtotal)     (strict >)                           │     │
//! │                                                                   ▼     │
//! │  items ──► Σ weight × qty ──► weight bracket ──► tier ──► shipping ─► + │
//! │               (kg, f64)       (inclusive ≤)    adjust               =   │
//! │                                                                 total   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rule Tables
//! | item subtotal      | discount |   | total weight     | base fee |
//! |--------------------|----------|---|------------------|----------|
//! | > 1000             | 20%      |   | ≤ 5              | 0        |
//! | > 500              | 10%      |   | ≤ 10             | W × 2    |
//! | otherwise          | 0%       |   | ≤ 50             | W × 4    |
//! |                    |          |   | otherwise        | W × 7    |
//!
//! Both tables are evaluated top to bottom; the first matching row wins.
//! Nothing is rounded here. Callers round for display with
//! [`Money::rounded`].

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Cart, CustomerTier};

// =============================================================================
// Discount Tiers
// =============================================================================

/// One row of the item discount table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountTier {
    /// The subtotal must be strictly greater than this.
    pub above: Decimal,
    pub rate: Decimal,
}

/// Item discount table, highest threshold first.
pub fn discount_tiers() -> [DiscountTier; 2] {
    [
        DiscountTier {
            above: Decimal::from(1000),
            rate: Decimal::new(20, 2),
        },
        DiscountTier {
            above: Decimal::from(500),
            rate: Decimal::new(10, 2),
        },
    ]
}

/// Discount rate for an item subtotal.
///
/// ## Example
/// ```rust
/// use cartwright_core::money::Money;
/// use cartwright_core::pricing::discount_rate;
/// use rust_decimal::Decimal;
///
/// assert_eq!(discount_rate(Money::from_units(500)), Decimal::ZERO);
/// assert_eq!(discount_rate(Money::from_units(501)), Decimal::new(10, 2));
/// ```
pub fn discount_rate(subtotal: Money) -> Decimal {
    discount_tiers()
        .iter()
        .find(|tier| subtotal.amount() > tier.above)
        .map(|tier| tier.rate)
        .unwrap_or(Decimal::ZERO)
}

// =============================================================================
// Weight Brackets
// =============================================================================

/// One row of the shipping table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightBracket {
    /// Inclusive upper bound in kg; `None` matches any weight.
    pub up_to: Option<f64>,
    pub per_kg: Decimal,
}

impl WeightBracket {
    fn matches(&self, weight: f64) -> bool {
        self.up_to.map_or(true, |limit| weight <= limit)
    }
}

/// Shipping table, lightest bracket first.
pub fn weight_brackets() -> [WeightBracket; 4] {
    [
        WeightBracket {
            up_to: Some(5.0),
            per_kg: Decimal::ZERO,
        },
        WeightBracket {
            up_to: Some(10.0),
            per_kg: Decimal::from(2),
        },
        WeightBracket {
            up_to: Some(50.0),
            per_kg: Decimal::from(4),
        },
        WeightBracket {
            up_to: None,
            per_kg: Decimal::from(7),
        },
    ]
}

/// Shipping fee before any tier adjustment.
///
/// ## Example
/// ```rust
/// use cartwright_core::money::Money;
/// use cartwright_core::pricing::base_shipping;
///
/// assert_eq!(base_shipping(5.0), Money::zero());
/// assert_eq!(base_shipping(8.0), Money::from_units(16));
/// ```
pub fn base_shipping(weight: f64) -> Money {
    let per_kg = weight_brackets()
        .iter()
        .find(|bracket| bracket.matches(weight))
        .map(|bracket| bracket.per_kg)
        .unwrap_or(Decimal::ZERO);

    if per_kg.is_zero() {
        return Money::zero();
    }

    // Fees past the decimal range clamp to Decimal::MAX. NaN ships for free.
    let kg = match Decimal::from_f64(weight) {
        Some(kg) => kg,
        None if weight > 0.0 => return Money::from_decimal(Decimal::MAX),
        None => Decimal::ZERO,
    };
    Money::from_decimal(kg.checked_mul(per_kg).unwrap_or(Decimal::MAX))
}

// =============================================================================
// Tier Adjustment
// =============================================================================

impl CustomerTier {
    /// Applies the tier's shipping benefit to a bracket fee.
    pub fn adjust_shipping(self, fee: Money) -> Money {
        match self {
            CustomerTier::Gold => Money::zero(),
            CustomerTier::Silver => fee.scale_by(Decimal::new(5, 1)),
            CustomerTier::Bronze => fee,
        }
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Every intermediate value of a cart's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub discount_rate: Decimal,
    pub discount: Money,
    pub discounted_items: Money,
    pub total_weight: f64,
    pub base_shipping: Money,
    pub shipping: Money,
    pub total: Money,
}

/// Prices a cart and keeps the intermediate values.
pub fn price_cart(cart: &Cart) -> PriceBreakdown {
    let subtotal: Money = cart.items.iter().map(|item| item.line_total()).sum();
    let rate = discount_rate(subtotal);
    let discount = subtotal.scale_by(rate);
    let discounted_items = subtotal - discount;

    let total_weight: f64 = cart.items.iter().map(|item| item.line_weight()).sum();
    let base = base_shipping(total_weight);
    let shipping = cart.customer.tier.adjust_shipping(base);

    PriceBreakdown {
        subtotal,
        discount_rate: rate,
        discount,
        discounted_items,
        total_weight,
        base_shipping: base,
        shipping,
        total: discounted_items.saturating_add(shipping),
    }
}

/// Final charge for a cart: discounted items plus adjusted shipping.
pub fn compute_total(cart: &Cart) -> Money {
    price_cart(cart).total
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Customer, LineItem, Product};
    use chrono::NaiveDate;

    fn cart_of(tier: CustomerTier, price: &str, weight: f64, quantity: u64) -> Cart {
        let customer = Customer::new(1, "Test Customer", tier);
        let product = Product::new(1, "Test Product", Money::parse(price).unwrap(), weight);
        Cart::new(
            1,
            customer,
            vec![LineItem::new(product, quantity)],
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    fn money(text: &str) -> Money {
        Money::parse(text).unwrap()
    }

    // -------------------------------------------------------------------------
    // Discount tiers
    // -------------------------------------------------------------------------

    #[test]
    fn test_discount_boundaries() {
        assert_eq!(discount_rate(money("0")), Decimal::ZERO);
        assert_eq!(discount_rate(money("500")), Decimal::ZERO);
        assert_eq!(discount_rate(money("500.01")), Decimal::new(10, 2));
        assert_eq!(discount_rate(money("1000")), Decimal::new(10, 2));
        assert_eq!(discount_rate(money("1000.01")), Decimal::new(20, 2));
        assert_eq!(discount_rate(money("25000")), Decimal::new(20, 2));
    }

    // -------------------------------------------------------------------------
    // Weight brackets
    // -------------------------------------------------------------------------

    #[test]
    fn test_weight_bracket_boundaries() {
        assert_eq!(base_shipping(0.0), Money::zero());
        assert_eq!(base_shipping(5.0), Money::zero());
        assert_eq!(base_shipping(5.5), money("11"));
        assert_eq!(base_shipping(10.0), money("20"));
        assert_eq!(base_shipping(10.5), money("42"));
        assert_eq!(base_shipping(50.0), money("200"));
        assert_eq!(base_shipping(50.5), money("353.5"));
    }

    #[test]
    fn test_non_finite_weight_does_not_panic() {
        assert_eq!(base_shipping(f64::NAN), Money::zero());
        assert_eq!(base_shipping(f64::INFINITY), Money::from_decimal(Decimal::MAX));
    }

    #[test]
    fn test_weight_past_decimal_range_saturates() {
        let max = Money::from_decimal(Decimal::MAX);

        // 7 × 2e28 overflows the multiplication.
        let near_limit = price_cart(&cart_of(CustomerTier::Bronze, "10", 2e28, 1));
        assert_eq!(near_limit.base_shipping, max);
        assert_eq!(near_limit.total, max);

        // 1e29 has no decimal form at all; it must not ship for free.
        let beyond = price_cart(&cart_of(CustomerTier::Bronze, "10", 1e29, 1));
        assert_eq!(beyond.base_shipping, max);
        assert_eq!(beyond.total, max);
    }

    // -------------------------------------------------------------------------
    // Tier adjustment
    // -------------------------------------------------------------------------

    #[test]
    fn test_tier_adjustment() {
        let fee = money("420");
        assert_eq!(CustomerTier::Gold.adjust_shipping(fee), Money::zero());
        assert_eq!(CustomerTier::Silver.adjust_shipping(fee), money("210"));
        assert_eq!(CustomerTier::Bronze.adjust_shipping(fee), fee);
    }

    #[test]
    fn test_gold_ships_free_in_every_bracket() {
        for weight in [1.0, 8.0, 36.0, 120.0] {
            let cart = cart_of(CustomerTier::Gold, "10", weight, 1);
            assert_eq!(price_cart(&cart).shipping, Money::zero(), "weight {weight}");
        }
    }

    // -------------------------------------------------------------------------
    // Whole-cart scenarios
    // -------------------------------------------------------------------------

    #[test]
    fn test_gold_light_cart_no_discount() {
        // 150.00, 3kg, free shipping anyway
        let cart = cart_of(CustomerTier::Gold, "150", 3.0, 1);
        assert_eq!(compute_total(&cart).rounded(2).to_string(), "150.00");
    }

    #[test]
    fn test_silver_half_shipping_between_5_and_10kg() {
        // 200.00 items, 8kg → 16.00, halved → 8.00
        let cart = cart_of(CustomerTier::Silver, "100", 4.0, 2);
        let breakdown = price_cart(&cart);
        assert_eq!(breakdown.subtotal, money("200"));
        assert_eq!(breakdown.base_shipping, money("16"));
        assert_eq!(breakdown.shipping, money("8"));
        assert_eq!(breakdown.total.rounded(2).to_string(), "208.00");
    }

    #[test]
    fn test_silver_subtotal_exactly_1000_stays_in_ten_percent_tier() {
        // 1000.00 is not > 1000, so the 20% row is skipped; it is > 500.
        let cart = cart_of(CustomerTier::Silver, "250", 5.0, 4);
        let breakdown = price_cart(&cart);
        assert_eq!(breakdown.subtotal, money("1000"));
        assert_eq!(breakdown.discount_rate, Decimal::new(10, 2));
        assert_eq!(breakdown.discounted_items, money("900"));
        assert_eq!(breakdown.total_weight, 20.0);
        assert_eq!(breakdown.base_shipping, money("80"));
        assert_eq!(breakdown.shipping, money("40"));
        assert_eq!(breakdown.total.rounded(2).to_string(), "940.00");
    }

    #[test]
    fn test_bronze_full_shipping_between_10_and_50kg() {
        // 150.00 items, 36kg → 144.00
        let cart = cart_of(CustomerTier::Bronze, "50", 12.0, 3);
        assert_eq!(compute_total(&cart), money("294"));
    }

    #[test]
    fn test_silver_above_50kg() {
        // 150.00 items, 60kg → 420.00, halved → 210.00
        let cart = cart_of(CustomerTier::Silver, "50", 20.0, 3);
        assert_eq!(compute_total(&cart), money("360"));
    }

    #[test]
    fn test_bronze_ten_percent_item_discount() {
        // 600.00 → 540.00, 15kg → 60.00
        let cart = cart_of(CustomerTier::Bronze, "200", 5.0, 3);
        let breakdown = price_cart(&cart);
        assert_eq!(breakdown.discount_rate, Decimal::new(10, 2));
        assert_eq!(breakdown.discounted_items, money("540"));
        assert_eq!(breakdown.total, money("600"));
    }

    #[test]
    fn test_gold_twenty_percent_item_discount() {
        // 1200.00 → 960.00, 8kg would be 16.00 but GOLD ships free
        let cart = cart_of(CustomerTier::Gold, "300", 2.0, 4);
        assert_eq!(compute_total(&cart).rounded(1).to_string(), "960.0");
    }

    #[test]
    fn test_mixed_cart_sums_every_line() {
        let customer = Customer::new(2, "Caio", CustomerTier::Bronze);
        let cart = Cart::new(
            7,
            customer,
            vec![
                LineItem::new(Product::new(1, "Mug", money("19.90"), 0.4), 3),
                LineItem::new(Product::new(2, "Tea", money("7.35"), 0.25), 10),
            ],
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );

        let breakdown = price_cart(&cart);
        // 59.70 + 73.50
        assert_eq!(breakdown.subtotal, money("133.20"));
        assert_eq!(breakdown.discount, Money::zero());
        // 1.2kg + 2.5kg stays in the free bracket
        assert_eq!(breakdown.shipping, Money::zero());
        assert_eq!(breakdown.total, money("133.20"));
    }

    #[test]
    fn test_compute_total_is_deterministic() {
        let cart = cart_of(CustomerTier::Silver, "333.33", 7.3, 2);
        let before = cart.clone();
        let first = compute_total(&cart);
        let second = compute_total(&cart);
        assert_eq!(first, second);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_breakdown_serializes_money_as_strings() {
        let cart = cart_of(CustomerTier::Bronze, "10", 1.0, 1);
        let json = serde_json::to_value(price_cart(&cart)).unwrap();
        assert_eq!(json["total"], "10");
    }
}
