pub mod hit_test;
pub mod immersive_ar;
pub mod photo_360;
pub mod positional_audio;
pub mod solar_system;
pub mod spectator_mode;
pub mod stereo_video;

pub use hit_test::{HitTest, Reticle};
pub use immersive_ar::ImmersiveAr;
pub use photo_360::Photo360;
pub use positional_audio::PositionalAudio;
pub use solar_system::SolarSystem;
pub use spectator_mode::{SpectatorMode, SpectatorView};
pub use stereo_video::StereoVideo;

use xrloop::{
    components::{
        Color, GlobalTransform, Info, Light, LocalTransform, Material, Mesh, Visible,
    },
    glam::Vec3,
    hecs::{Entity, World},
    Camera,
};

/// 0.01 radians per frame at 60 fps
pub(crate) const ROTATION_SPEED: f32 = 0.6;

/// The green the cubes are painted
pub(crate) const CUBE_COLOR: Color = Color(0x44aa88);

/// Add the hemisphere light most of the samples are lit by
pub(crate) fn add_hemisphere_light(world: &mut World) -> Entity {
    world.spawn((
        Info::new("Light"),
        Light::hemisphere(Color::WHITE, Color(0xbbbbff), 1.0),
        LocalTransform::from_translation([0.5, 1.0, 0.25].into()),
        GlobalTransform::default(),
    ))
}

/// Add a visible mesh
pub(crate) fn spawn_mesh(
    world: &mut World,
    name: &str,
    mesh: Mesh,
    material: Material,
    translation: Vec3,
) -> Entity {
    world.spawn((
        Info::new(name),
        mesh,
        material,
        LocalTransform::from_translation(translation),
        GlobalTransform::default(),
        Visible {},
    ))
}

/// Change the camera's lens and position
pub(crate) fn configure_camera(
    camera: &mut Camera,
    fov_y_degrees: f32,
    near: f32,
    far: f32,
    position: Vec3,
) {
    camera.fov_y_degrees = fov_y_degrees;
    camera.near = near;
    camera.far = far;
    camera.position = position;
    camera.update_projection_matrix();
}
