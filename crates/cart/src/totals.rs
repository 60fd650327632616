//! Derived cart totals.

use serde::{Deserialize, Serialize};

use storefront_core::{Money, ValueObject};

use crate::cart::CartLineItem;

/// Default flat shipping fee, in major units.
pub const DEFAULT_FLAT_SHIPPING_MAJOR: u64 = 99;

/// Shipping charge rule: a flat fee whenever the cart holds anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingPolicy {
    flat_fee: Money,
}

impl ShippingPolicy {
    pub fn flat(fee: Money) -> Self {
        Self { flat_fee: fee }
    }

    pub fn flat_fee(&self) -> Money {
        self.flat_fee
    }

    pub fn fee_for(&self, cart_is_empty: bool) -> Money {
        if cart_is_empty {
            Money::ZERO
        } else {
            self.flat_fee
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::flat(Money::from_major(DEFAULT_FLAT_SHIPPING_MAJOR))
    }
}

/// Subtotal, shipping and total for a cart at one point in time.
///
/// Never stored on the cart; build one with [`Totals::compute`] (or
/// `Cart::totals`) whenever it is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl Totals {
    pub fn compute<'a, I>(items: I, shipping: &ShippingPolicy) -> Self
    where
        I: IntoIterator<Item = &'a CartLineItem>,
    {
        let mut subtotal = Money::ZERO;
        let mut any = false;
        for item in items {
            subtotal = subtotal + item.line_total();
            any = true;
        }

        let shipping = shipping.fee_for(!any);
        Self {
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }

    /// Shown as "Gratis" in the cart panel.
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

impl ValueObject for Totals {}
