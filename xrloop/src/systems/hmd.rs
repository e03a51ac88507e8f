use hecs::{Entity, World};

use crate::{
    components::{GlobalTransform, LocalTransform, HMD},
    Camera,
};

/// Spawn the entity that tracks the viewer
pub fn add_hmd(world: &mut World) -> Entity {
    world.spawn((HMD {}, LocalTransform::default(), GlobalTransform::default()))
}

/// HMD system
/// Moves the [`HMD`] entity to wherever the camera is
pub fn update_hmd_system(world: &mut World, camera: &Camera) {
    for (_, (_, local_transform)) in world.query_mut::<(&HMD, &mut LocalTransform)>() {
        local_transform.translation = camera.position;
        local_transform.rotation = camera.rotation;
    }
}
