/// Marker for content that only makes sense while a session is running, eg. a hit test reticle.
///
/// When the session ends, every entity with this marker is despawned along with its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionOnly {}
