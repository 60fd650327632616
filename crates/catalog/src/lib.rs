//! Catalog domain module.
//!
//! Products are loaded once at startup and never mutated. Filtering derives a
//! visible subset from a free-text query without touching any other state.

pub mod catalog;
pub mod filter;
pub mod product;

pub use catalog::{Catalog, demo_catalog};
pub use filter::{SearchQuery, filter};
pub use product::{Product, ProductDraft};
