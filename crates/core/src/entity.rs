//! Entity trait: identity + continuity across edits.

/// Entity marker + minimal interface.
///
/// Line items, customers and bill records are entities: an edited item keeps
/// its id, so lists can replace it in place.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
