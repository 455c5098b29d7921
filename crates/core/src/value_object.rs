//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are compared by their attribute values.
/// Query snapshots, prices and attribute filters are all value objects: two
/// snapshots built from the same selection are interchangeable.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Money {
///     amount_minor: u64,
///     currency: String,
/// }
///
/// impl ValueObject for Money {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
