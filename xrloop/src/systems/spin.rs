use glam::{EulerRot, Quat};
use hecs::World;

use crate::{
    components::{LocalTransform, Spin},
    Frame,
};

/// Spin system
/// Rotates every entity with a [`Spin`] by however far it should have turned since the last frame
pub fn spin_system(world: &mut World, frame: &Frame) {
    let delta = frame.delta_secs();
    for (_, (spin, local_transform)) in world.query_mut::<(&Spin, &mut LocalTransform)>() {
        let step = spin.radians_per_second * delta;
        let rotation = Quat::from_euler(EulerRot::XYZ, step.x, step.y, step.z);
        local_transform.rotation = (local_transform.rotation * rotation).normalize();
    }
}
