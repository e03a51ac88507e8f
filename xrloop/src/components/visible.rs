/// The Visible component determines whether a given entity is drawn.
///
/// Entities whose content is still loading are spawned without it; the asset system inserts it
/// once the content is ready.
///
/// Basic usage:
/// ```ignore
/// world.insert_one(entity, Visible {})
/// world.remove_one::<Visible>(entity)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visible {}
