use hecs::{CommandBuffer, Entity, World};

use crate::components::{Parent, SessionOnly};

/// Despawn every [`SessionOnly`] entity and everything parented to it.
/// Returns how many entities were despawned.
pub fn despawn_session_only_system(world: &mut World) -> usize {
    let mut command_buffer = CommandBuffer::new();
    let mut despawned = Vec::new();
    for (entity, _) in world.query::<&SessionOnly>().iter() {
        despawned.push(entity);
        despawn_children(world, entity, &mut despawned);
    }

    despawned.sort();
    despawned.dedup();
    for entity in &despawned {
        command_buffer.despawn(*entity);
    }
    command_buffer.run_on(world);
    despawned.len()
}

fn despawn_children(world: &World, parent: Entity, despawned: &mut Vec<Entity>) {
    for (child, p) in world.query::<&Parent>().iter() {
        if p.0 == parent && !despawned.contains(&child) {
            despawned.push(child);
            despawn_children(world, child, despawned);
        }
    }
}
