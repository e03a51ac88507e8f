use hecs::World;

use crate::{
    components::{LocalTransform, Orbit},
    Frame,
};

/// Orbit system
/// Places every entity with an [`Orbit`] where it should be at this frame's elapsed time
pub fn orbit_system(world: &mut World, frame: &Frame) {
    let elapsed = frame.elapsed_secs();
    for (_, (orbit, local_transform)) in world.query_mut::<(&Orbit, &mut LocalTransform)>() {
        local_transform.translation = orbit.position_at(elapsed);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_relative_eq;
    use glam::Vec3;

    use super::*;

    #[test]
    pub fn test_orbit_system() {
        let mut world = World::new();
        let orbit = Orbit {
            radius: 0.5,
            period: 8.0,
            phase: 0.0,
        };
        let moon = world.spawn((orbit, LocalTransform::default()));

        let frame = Frame {
            index: 0,
            elapsed: Duration::from_secs(4),
            delta: Duration::from_secs(4),
            immersive: false,
            viewer_pose: None,
            hit_test: None,
        };
        orbit_system(&mut world, &frame);

        let local_transform = world.get::<&LocalTransform>(moon).unwrap();
        assert_relative_eq!(
            local_transform.translation,
            Vec3::new(-0.5, 0.0, 0.0),
            epsilon = 0.0001
        );
    }
}
