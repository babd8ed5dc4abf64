//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Parts are updated in place by identity, so lookups in the store go
/// through `id()` rather than structural equality.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
