//! Storefront session: the single shared store the presentation layer talks to.
//!
//! A session owns the catalog, the current search query and the cart store.
//! Views read derived state from it (visible products, totals) and subscribe
//! to cart events; nothing is broadcast globally.

pub mod config;
pub mod error;
pub mod session;

pub use config::StoreConfig;
pub use error::{ConfigError, SessionError};
pub use session::{FormattedTotals, StorefrontSession};
