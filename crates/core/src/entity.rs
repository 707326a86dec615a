//! Entity trait: identity + the runtime kind an entity was constructed as.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Name of the concrete kind (not the base kind it extends).
    fn kind_name(&self) -> &'static str;
}
