//! Monetary amounts in the store's single fixed currency.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Number of minor units (centavos, cents) in one major unit.
pub const MINOR_PER_MAJOR: u64 = 100;

/// A non-negative amount, stored in the smallest currency unit (e.g. centavos).
///
/// Arithmetic saturates instead of wrapping; a catalog would need prices in the
/// quadrillions before that matters.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    pub const fn from_major(major: u64) -> Self {
        Self(major.saturating_mul(MINOR_PER_MAJOR))
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Whole major units (truncated).
    pub const fn major_part(self) -> u64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Remaining minor units after `major_part` (0..100).
    pub const fn minor_part(self) -> u64 {
        self.0 % MINOR_PER_MAJOR
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    /// Multiply by a unit count (line item quantity).
    pub const fn times(self, units: u32) -> Money {
        Money(self.0.saturating_mul(units as u64))
    }
}

impl ValueObject for Money {}

impl core::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        self.saturating_add(rhs)
    }
}

impl core::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Money::saturating_add)
    }
}

/// Plain two-decimal rendering without symbol or grouping (e.g. `1096.00`).
impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.major_part(), self.minor_part())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_and_minor_parts() {
        let m = Money::from_minor(109_650);
        assert_eq!(m.major_part(), 1096);
        assert_eq!(m.minor_part(), 50);
        assert_eq!(m.to_string(), "1096.50");
    }

    #[test]
    fn times_and_sum() {
        let lines = [Money::from_major(349).times(2), Money::from_major(299).times(1)];
        let subtotal: Money = lines.into_iter().sum();
        assert_eq!(subtotal, Money::from_major(997));
    }

    #[test]
    fn arithmetic_saturates() {
        let max = Money::from_minor(u64::MAX);
        assert_eq!(max + Money::from_minor(1), max);
        assert_eq!(max.times(3), max);
    }
}
