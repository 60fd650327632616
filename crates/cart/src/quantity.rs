//! Line item quantities.
//!
//! Every constructor clamps: anything below one (zero, negative, NaN,
//! non-numeric text) becomes one, and values beyond `u32::MAX` saturate.

use serde::{Deserialize, Serialize};

use storefront_core::ValueObject;

/// A positive unit count (always `>= 1`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u32", from = "u32")]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn clamp_i64(requested: i64) -> Self {
        Self(requested.clamp(1, i64::from(u32::MAX)) as u32)
    }

    /// `max(1, floor(requested))`; NaN is treated as 1.
    pub fn clamp_f64(requested: f64) -> Self {
        if requested.is_nan() || requested < 1.0 {
            return Self::ONE;
        }
        let floored = requested.floor();
        if floored >= f64::from(u32::MAX) {
            return Self(u32::MAX);
        }
        Self(floored as u32)
    }

    /// Parse text the way a numeric form field is read: leading whitespace is
    /// skipped, an optional sign and the leading digits are taken, and the
    /// rest is ignored (`"2.7"` is 2). No digits at all yields 1.
    pub fn parse_lenient(input: &str) -> Self {
        let s = input.trim_start();
        let (negative, digits) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let digits = &digits[..end];
        if digits.is_empty() || negative {
            return Self::ONE;
        }

        // Overlong digit runs saturate.
        let value = digits.parse::<u64>().unwrap_or(u64::MAX);
        Self(value.clamp(1, u64::from(u32::MAX)) as u32)
    }

    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl ValueObject for Quantity {}

impl From<u32> for Quantity {
    fn from(value: u32) -> Self {
        Self(value.max(1))
    }
}

impl From<Quantity> for u32 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_requests_clamp_to_one() {
        assert_eq!(Quantity::clamp_i64(0).get(), 1);
        assert_eq!(Quantity::clamp_i64(-5).get(), 1);
        assert_eq!(Quantity::clamp_i64(3).get(), 3);
        assert_eq!(Quantity::clamp_i64(i64::MAX).get(), u32::MAX);
    }

    #[test]
    fn fractional_requests_floor_then_clamp() {
        assert_eq!(Quantity::clamp_f64(2.9).get(), 2);
        assert_eq!(Quantity::clamp_f64(0.5).get(), 1);
        assert_eq!(Quantity::clamp_f64(-1.5).get(), 1);
        assert_eq!(Quantity::clamp_f64(f64::NAN).get(), 1);
        assert_eq!(Quantity::clamp_f64(f64::INFINITY).get(), u32::MAX);
    }

    #[test]
    fn text_input_is_read_leniently() {
        assert_eq!(Quantity::parse_lenient("4").get(), 4);
        assert_eq!(Quantity::parse_lenient("  12abc").get(), 12);
        assert_eq!(Quantity::parse_lenient("2.7").get(), 2);
        assert_eq!(Quantity::parse_lenient("+3").get(), 3);
        assert_eq!(Quantity::parse_lenient("").get(), 1);
        assert_eq!(Quantity::parse_lenient("abc").get(), 1);
        assert_eq!(Quantity::parse_lenient("-7").get(), 1);
        assert_eq!(Quantity::parse_lenient("0").get(), 1);
        assert_eq!(Quantity::parse_lenient("99999999999999999999999").get(), u32::MAX);
    }

    #[test]
    fn deserialize_clamps_zero() {
        let q: Quantity = serde_json::from_str("0").unwrap();
        assert_eq!(q, Quantity::ONE);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: no input ever produces a zero quantity.
            #[test]
            fn quantity_is_always_positive(i in any::<i64>(), f in any::<f64>(), s in ".{0,12}") {
                prop_assert!(Quantity::clamp_i64(i).get() >= 1);
                prop_assert!(Quantity::clamp_f64(f).get() >= 1);
                prop_assert!(Quantity::parse_lenient(&s).get() >= 1);
            }
        }
    }
}
