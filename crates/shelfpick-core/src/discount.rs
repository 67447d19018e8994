//! Discount values attached to a product row or, as an override, to a single
//! variant.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Fixed amount off the variant price.
    Flat,
    /// Percentage off the variant price.
    Percentage,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountType::Flat => write!(f, "flat"),
            DiscountType::Percentage => write!(f, "percentage"),
        }
    }
}

/// A possibly half-filled discount.
///
/// The editor lets the merchant type a value before choosing a type (and the
/// other way around), so both halves are optional. A discount only changes a
/// price once both are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    #[serde(default)]
    pub value: Option<Decimal>,
    #[serde(default)]
    pub kind: Option<DiscountType>,
}

/// One half of a [`Discount`], as written by a single edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "to", rename_all = "snake_case")]
pub enum DiscountField {
    Value(Option<Decimal>),
    Kind(Option<DiscountType>),
}

impl Discount {
    #[must_use]
    pub fn new(value: Decimal, kind: DiscountType) -> Self {
        Self {
            value: Some(value),
            kind: Some(kind),
        }
    }

    /// Returns `true` when neither half has been filled in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.kind.is_none()
    }

    /// Writes one half of the discount, leaving the other untouched.
    pub fn set(&mut self, field: DiscountField) {
        match field {
            DiscountField::Value(value) => self.value = value,
            DiscountField::Kind(kind) => self.kind = kind,
        }
    }

    /// Returns `price` with this discount applied, or `None` when the
    /// arithmetic overflows `Decimal`.
    ///
    /// Incomplete discounts leave the price unchanged. Flat amounts never take
    /// the price below zero and percentages are clamped to `0..=100`; negative
    /// values count as zero. The result is rounded to cents.
    #[must_use]
    pub fn apply(&self, price: Decimal) -> Option<Decimal> {
        let (Some(value), Some(kind)) = (self.value, self.kind) else {
            return Some(price);
        };
        let value = value.max(Decimal::ZERO);
        let discounted = match kind {
            DiscountType::Flat => price.checked_sub(value)?,
            DiscountType::Percentage => {
                let pct = value.min(Decimal::ONE_HUNDRED);
                let off = price.checked_mul(pct)?.checked_div(Decimal::ONE_HUNDRED)?;
                price.checked_sub(off)?
            }
        };
        Some(discounted.max(Decimal::ZERO).round_dp(2))
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).expect("valid decimal literal")
    }

    #[test]
    fn incomplete_discount_leaves_price_unchanged() {
        let only_value = Discount {
            value: Some(dec("5")),
            kind: None,
        };
        let only_kind = Discount {
            value: None,
            kind: Some(DiscountType::Flat),
        };
        assert_eq!(only_value.apply(dec("12.99")), Some(dec("12.99")));
        assert_eq!(only_kind.apply(dec("12.99")), Some(dec("12.99")));
        assert_eq!(Discount::default().apply(dec("12.99")), Some(dec("12.99")));
    }

    #[test]
    fn flat_discount_subtracts_and_floors_at_zero() {
        let d = Discount::new(dec("2.50"), DiscountType::Flat);
        assert_eq!(d.apply(dec("12.99")), Some(dec("10.49")));

        let huge = Discount::new(dec("100"), DiscountType::Flat);
        assert_eq!(huge.apply(dec("12.99")), Some(Decimal::ZERO));
    }

    #[test]
    fn percentage_discount_rounds_to_cents() {
        let d = Discount::new(dec("15"), DiscountType::Percentage);
        // 12.99 * 0.85 = 11.0415
        assert_eq!(d.apply(dec("12.99")), Some(dec("11.04")));
    }

    #[test]
    fn percentage_above_hundred_is_clamped() {
        let d = Discount::new(dec("150"), DiscountType::Percentage);
        assert_eq!(d.apply(dec("40.00")), Some(Decimal::ZERO));
    }

    #[test]
    fn negative_value_counts_as_zero() {
        let d = Discount::new(dec("-5"), DiscountType::Flat);
        assert_eq!(d.apply(dec("10.00")), Some(dec("10.00")));
    }

    #[test]
    fn overflowing_arithmetic_yields_none() {
        let half = Discount::new(dec("50"), DiscountType::Percentage);
        assert_eq!(half.apply(Decimal::MAX), None);

        let one_off = Discount::new(Decimal::ONE, DiscountType::Flat);
        assert_eq!(one_off.apply(Decimal::MIN), None);
        // Zero percent still multiplies, and zero never overflows.
        let none_off = Discount::new(Decimal::ZERO, DiscountType::Percentage);
        assert_eq!(none_off.apply(Decimal::MAX), Some(Decimal::MAX));
    }

    #[test]
    fn set_writes_only_one_half() {
        let mut d = Discount::new(dec("10"), DiscountType::Flat);
        d.set(DiscountField::Kind(Some(DiscountType::Percentage)));
        assert_eq!(d.value, Some(dec("10")));
        assert_eq!(d.kind, Some(DiscountType::Percentage));

        d.set(DiscountField::Value(None));
        assert!(d.value.is_none());
        assert!(!d.is_empty());
    }

    #[test]
    fn discount_type_serializes_lowercase() {
        let json = serde_json::to_string(&DiscountType::Percentage).unwrap();
        assert_eq!(json, "\"percentage\"");
        let parsed: DiscountType = serde_json::from_str("\"flat\"").unwrap();
        assert_eq!(parsed, DiscountType::Flat);
    }

    #[test]
    fn discount_field_uses_tagged_representation() {
        let field: DiscountField =
            serde_json::from_str(r#"{"field":"kind","to":"flat"}"#).unwrap();
        assert_eq!(field, DiscountField::Kind(Some(DiscountType::Flat)));

        let cleared: DiscountField = serde_json::from_str(r#"{"field":"value","to":null}"#).unwrap();
        assert_eq!(cleared, DiscountField::Value(None));
    }
}
