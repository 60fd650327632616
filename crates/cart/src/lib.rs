//! Shopping cart domain module.
//!
//! The cart is an aggregate driven by commands and events; [`CartStore`] wraps
//! it with the session's shipping policy and currency, derives totals on every
//! read and notifies subscribers of each applied event.

pub mod cart;
pub mod checkout;
pub mod quantity;
pub mod store;
pub mod totals;

pub use cart::{
    AddItem, Cart, CartClosed, CartCommand, CartEvent, CartLineItem, CartOpened, CartVisibility,
    CloseCart, ItemAdded, ItemRemoved, OpenCart, QuantityChanged, RemoveItem, SetQuantity,
};
pub use checkout::{CheckoutLine, CheckoutPayload};
pub use quantity::Quantity;
pub use store::CartStore;
pub use totals::{ShippingPolicy, Totals};
