//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Rate parameters and computed totals are value objects: two totals with the
/// same figures are the same totals, and "changing" one means computing a new one.
///
/// ```ignore
/// let a = compute_totals(&items, &rates);
/// let b = compute_totals(&items, &rates);
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
