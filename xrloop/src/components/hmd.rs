/// A marker component used to indicate the viewer, or Head Mounted Display, in the scene graph.
///
/// The manager spawns exactly one of these and sets its [`super::LocalTransform`] to the camera's
/// pose before every frame callback. Inside a session the camera follows the viewer's tracked pose,
/// so querying for the HMD's [`super::GlobalTransform`] gives you where the viewer's head is.
/// Audio listeners, spectators and reticles all care about that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HMD {}
