#![allow(missing_docs)]
pub mod assets;
pub mod audio;
pub mod hmd;
pub mod orbit;
pub mod session_only;
pub mod spin;
pub mod update_global_transform;
pub mod update_global_transform_with_parent;
pub mod video;

pub use assets::asset_system;
pub use audio::{audio_system, stop_all_sounds};
pub use hmd::{add_hmd, update_hmd_system};
pub use orbit::orbit_system;
pub use session_only::despawn_session_only_system;
pub use spin::spin_system;
pub use update_global_transform::update_global_transform_system;
pub use update_global_transform_with_parent::update_global_transform_with_parent_system;
pub use video::{release_all_videos, video_system};
