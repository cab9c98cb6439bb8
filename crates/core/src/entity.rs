//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Identity is assigned by storage, so an entity that has never been persisted
/// has no identifier yet and is considered *new*.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if one has been assigned.
    fn id(&self) -> Option<Self::Id>;

    /// Whether this entity has not been persisted yet.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}
