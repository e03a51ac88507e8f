use hecs::Entity;

/// Component added to indicate that an entity has a parent.
/// The entity's [`super::LocalTransform`] is then relative to the parent's global transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parent(pub Entity);
