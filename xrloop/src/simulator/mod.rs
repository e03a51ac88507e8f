//! Everything the lifecycle manager talks to, simulated in-process.
//!
//! Each simulated collaborator is a cheap handle around shared state: clone it, hand one clone to
//! the manager and keep the other to drive or inspect it. Promise resolution is either immediate
//! or left to the test, which is what makes "the user unmounted while the query was in flight"
//! reproducible.
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::{
    platform::HitTestResult,
    session::{features, FeatureSet, SessionMode},
};

mod assets;
mod clock;
mod platform;
mod shell;
mod surface;

pub use assets::SimulatedAssets;
pub use clock::ManualClock;
pub use platform::{SimulatedPlatform, SimulatedSession};
pub use shell::{RecordingShell, ShellLog};
pub use surface::{SimulatedSurface, SurfaceLog};

/// How a [`SimulatedPlatform`] behaves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Modes the platform says yes to
    pub supported_modes: Vec<SessionMode>,
    /// Features the platform can enable
    pub supported_features: FeatureSet,
    /// If set, every session request is denied with this reason
    pub deny_reason: Option<String>,
    /// Reject capability queries instead of answering them
    pub fail_capability_query: bool,
    /// Refuse requests with unsupported required features. When `false` the session is granted
    /// without them, like a platform that ignores what it doesn't understand.
    pub enforce_required_features: bool,
    /// Where the viewer is, in the session's reference space
    pub viewer_position: Vec3,
    /// Height of the floor in the session's reference space
    pub floor_height: f32,
    /// How far in front of the viewer the hit test finds the floor. `None` means it never hits.
    pub hit_test_distance: Option<f32>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            supported_modes: vec![SessionMode::ImmersiveAr, SessionMode::ImmersiveVr],
            supported_features: [
                features::HIT_TEST,
                features::DOM_OVERLAY,
                features::LOCAL,
                features::LOCAL_FLOOR,
                features::BOUNDED_FLOOR,
                features::HAND_TRACKING,
                features::LAYERS,
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            deny_reason: None,
            fail_capability_query: false,
            enforce_required_features: true,
            viewer_position: Vec3::ZERO,
            floor_height: -1.6,
            hit_test_distance: Some(1.0),
        }
    }
}

impl SimulatorConfig {
    /// The hit test result a new session reports
    pub fn hit_test(&self) -> Option<HitTestResult> {
        self.hit_test_distance.map(|distance| HitTestResult {
            position: Vec3::new(
                self.viewer_position.x,
                self.floor_height,
                self.viewer_position.z - distance,
            ),
            orientation: Quat::IDENTITY,
        })
    }
}
