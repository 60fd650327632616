//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two values with the same attributes are
/// equal. `Money`, `Quantity` and `SearchQuery` are value objects; `Product` and
/// `CartLineItem` are entities keyed by `ProductId`.
///
/// Value objects are immutable. To "modify" one, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
