//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Implementors compare and hash by `id()` alone; the remaining attributes
/// may change without the entity becoming a different one.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
