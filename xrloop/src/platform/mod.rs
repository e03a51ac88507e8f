use glam::{Affine3A, Quat, Vec3};

use crate::session::{FeatureSet, SessionDescriptor, SessionMode};

mod pending;
pub use pending::{pending, Pending, Resolver};

/// The platform's capability API, ie. whatever answers "can I have an AR session?".
///
/// The lifecycle manager holds an `Option<Rc<dyn XrPlatform>>`: `None` means the host has no XR
/// API at all, which is treated exactly like "not supported".
pub trait XrPlatform {
    /// Ask whether `mode` is supported. A rejected query is treated as `false`.
    fn is_session_supported(&self, mode: SessionMode) -> Pending<bool>;

    /// Ask for a session described by `descriptor`.
    fn request_session(&self, descriptor: &SessionDescriptor) -> Pending<Box<dyn PlatformSession>>;
}

/// A session the platform has granted.
pub trait PlatformSession {
    /// The session's mode
    fn mode(&self) -> SessionMode;

    /// Every feature the platform actually enabled, required or optional
    fn enabled_features(&self) -> &FeatureSet;

    /// The next queued session event, if any
    fn poll_event(&mut self) -> Option<SessionEvent>;

    /// Wait for the next frame. `None` means the platform does not want this frame rendered.
    fn wait_frame(&mut self) -> Option<XrFrame>;

    /// End the session. Calling this on an ended session does nothing.
    fn end(&mut self);
}

/// Events a [`PlatformSession`] raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEvent {
    /// The session has started presenting
    Started,
    /// The session has ended, for whatever reason
    Ended,
}

/// The viewer's pose in the session's reference space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerPose {
    /// Position, in metres
    pub position: Vec3,
    /// Orientation
    pub orientation: Quat,
}

impl ViewerPose {
    /// Convenience function to convert the pose into an [`Affine3A`]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.orientation, self.position)
    }
}

impl Default for ViewerPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

/// Where a ray cast from the viewer met a real-world surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestResult {
    /// Position of the intersection
    pub position: Vec3,
    /// Orientation of the surface at the intersection, +Y along the surface normal
    pub orientation: Quat,
}

impl HitTestResult {
    /// Convenience function to convert the result into an [`Affine3A`]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_rotation_translation(self.orientation, self.position)
    }
}

/// Per-frame data handed out by [`PlatformSession::wait_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XrFrame {
    /// The viewer's pose, if tracking is available
    pub viewer_pose: Option<ViewerPose>,
    /// The current hit test result, if `hit-test` is enabled and something was hit
    pub hit_test: Option<HitTestResult>,
}
