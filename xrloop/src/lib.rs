#![deny(missing_docs)]

//! G'day! `xrloop` is the session lifecycle and frame loop that sits underneath a handful of small
//! immersive scenes: an AR cube, a solar system, positional audio, a 360° photo, stereo video and a
//! spectator view.
//!
//! Every one of those scenes does the same dance: grab a drawing surface, build a scene graph and a
//! camera, ask the platform whether AR or VR is available, offer the user a button to enter the
//! session, run a callback once per frame and tear everything down again when the scene goes away.
//! `xrloop` does that dance once, so a scene is just a [`Scene`] implementation.
//!
//! # Getting started
//! Build an [`XrSessionManager`] with [`XrSessionManager::builder`], or hand your [`Scene`] to
//! [`scene::mount`], then call [`XrSessionManager::update`] once per display refresh.
//!
//! The platform, the drawing surface and the UI are all traits ([`platform::XrPlatform`],
//! [`surface::RenderSurface`], [`ui_shell::UiShell`]) so they can be swapped for the in-process
//! [`simulator`] in tests.

pub use glam;
pub use hecs;

pub use camera::Camera;
pub use clock::{Clock, SystemClock};
pub use frame::{Frame, TickData};
pub use scene::{mount, MountedScene, Scene, SetupContext};
pub use session::{
    check_support, LifecycleEvent, LifecycleState, SessionDescriptor, SessionMode,
    XrSessionManager, XrSessionManagerBuilder,
};
pub use xrloop_error::{PlatformError, SessionError};

/// Asynchronous asset loading
pub mod assets;
mod camera;
mod clock;
/// Components are the data stored in the scene graph
pub mod components;
mod frame;
/// The platform capability and session APIs the lifecycle manager talks to
pub mod platform;
/// Mounting a [`Scene`] onto a lifecycle manager
pub mod scene;
/// The session lifecycle manager and the types it negotiates with
pub mod session;
/// In-process stand-ins for every external collaborator
pub mod simulator;
/// The drawing surface a manager presents to
pub mod surface;
/// Systems are functions called each frame to update the scene graph
pub mod systems;
/// The host UI that offers entry into a session
pub mod ui_shell;
mod xrloop_error;

/// xrloop result type
pub type XrLoopResult<T> = std::result::Result<T, SessionError>;

/// Vertical field of view used by a default camera, in degrees
pub const DEFAULT_FOV_Y_DEGREES: f32 = 70.0;

/// Near clipping plane used by a default camera
pub const DEFAULT_NEAR: f32 = 0.01;

/// Far clipping plane used by a default camera
pub const DEFAULT_FAR: f32 = 20.0;

/// Display refresh rate assumed when none is configured
pub const DEFAULT_REFRESH_RATE: f32 = 72.0;
