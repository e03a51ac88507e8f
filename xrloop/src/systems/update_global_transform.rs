use hecs::World;

use crate::components::{GlobalTransform, LocalTransform};

/// Update global transform system
/// Walks through each LocalTransform and applies it to the GlobalTransform used by the renderer
pub fn update_global_transform_system(world: &mut World) {
    for (_, (local_transform, global_transform)) in
        world.query_mut::<(&LocalTransform, &mut GlobalTransform)>()
    {
        *global_transform = (*local_transform).into();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{Affine3A, Quat, Vec3};

    use super::*;

    #[test]
    pub fn test_update_global_transform_system() {
        let mut world = World::new();
        let entity = world.spawn((LocalTransform::default(), GlobalTransform::default()));

        {
            let global_transform = world.get::<&GlobalTransform>(entity).unwrap();
            assert_eq!(global_transform.0, Affine3A::IDENTITY);
        }

        let test_translation = Vec3::new(5.0, 1.0, 2.0);
        let test_rotation = Quat::from_euler(glam::EulerRot::XYZ, 0.3, 0.3, 0.3);

        {
            let mut local_transform = world.get::<&mut LocalTransform>(entity).unwrap();
            local_transform.translation = test_translation;
            local_transform.rotation = test_rotation;
            local_transform.scale = test_translation;
        }

        update_global_transform_system(&mut world);

        let expected_matrix = Affine3A::from_scale_rotation_translation(
            test_translation,
            test_rotation,
            test_translation,
        );

        let global_transform = world.get::<&GlobalTransform>(entity).unwrap();
        assert_relative_eq!(global_transform.0, expected_matrix);
    }
}
