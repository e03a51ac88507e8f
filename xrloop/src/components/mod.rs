#![allow(missing_docs)]
pub mod global_transform;
pub mod hmd;
pub mod info;
pub mod light;
pub mod local_transform;
pub mod material;
pub mod mesh;
pub mod orbit;
pub mod parent;
pub mod session_only;
pub mod sound_emitter;
pub mod spin;
pub mod video;
pub mod visible;

pub use global_transform::GlobalTransform;
pub use hmd::HMD;
pub use info::Info;
pub use light::{Light, LightKind};
pub use local_transform::LocalTransform;
pub use material::{Color, Material, Shading};
pub use mesh::{Geometry, Mesh};
pub use orbit::Orbit;
pub use parent::Parent;
pub use session_only::SessionOnly;
pub use sound_emitter::{SoundEmitter, SoundState};
pub use spin::Spin;
pub use video::VideoPlayback;
pub use visible::Visible;
