use glam::Affine3A;
use hecs::World;
use log::warn;

use crate::components::{GlobalTransform, LocalTransform, Parent};

/// Hierarchies deeper than this are assumed to contain a cycle.
const MAX_DEPTH: usize = 64;

/// Update global transform with parent transform system
/// Walks through each entity that has a Parent and builds a hierarchy
/// Then transforms each entity based on the hierarchy
///
/// Must run after [`super::update_global_transform_system`], which fills in the roots.
pub fn update_global_transform_with_parent_system(world: &mut World) {
    // Views allow dynamic borrow checking and storage look-up to be done once rather than
    // per-entity as in `World::get`.
    let mut parents = world.query::<&Parent>();
    let parents = parents.view();

    let mut locals = world.query::<&LocalTransform>();
    let locals = locals.view();

    // View of entities that don't have parents, i.e. roots of the transform hierarchy
    let mut roots = world.query::<&GlobalTransform>().without::<&Parent>();
    let roots = roots.view();

    // This query can coexist with the `roots` view without illegal aliasing of `GlobalTransform`
    // references because the inclusion of `&Parent` in the query, and its exclusion from the view,
    // guarantees that they will never overlap.
    for (entity, (parent, local_transform, absolute)) in world
        .query::<(&Parent, &LocalTransform, &mut GlobalTransform)>()
        .iter()
    {
        // Walk the hierarchy from this entity to the root, accumulating the entity's absolute
        // transform. Bottom-up avoids tracking child lists.
        let mut relative = local_transform.to_affine();
        let mut ancestor = parent.0;
        let mut depth = 0;
        while let Some(next) = parents.get(ancestor) {
            if depth == MAX_DEPTH {
                warn!("[XRLOOP_TRANSFORM] {entity:?} has a parent cycle, skipping");
                break;
            }
            if let Some(ancestor_local) = locals.get(ancestor) {
                relative = ancestor_local.to_affine() * relative;
            }
            ancestor = next.0;
            depth += 1;
        }

        let root = roots
            .get(ancestor)
            .map(|root| root.0)
            .unwrap_or(Affine3A::IDENTITY);
        absolute.0 = root * relative;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{Affine3A, Quat, Vec3};

    use crate::systems::update_global_transform_system;

    use super::*;

    fn spawn(world: &mut World, translation: [f32; 3], parent: Option<hecs::Entity>) -> hecs::Entity {
        let local_transform = LocalTransform::from_translation(translation.into());
        let entity = world.spawn((local_transform, GlobalTransform::default()));
        if let Some(parent) = parent {
            world.insert_one(entity, Parent(parent)).unwrap();
        }
        entity
    }

    #[test]
    pub fn test_transform_system() {
        let mut world = World::new();
        let parent = spawn(&mut world, [1.0, 1.0, 100.0], None);
        let child = spawn(&mut world, [1.0, 1.0, 100.0], Some(parent));
        let grandchild = spawn(&mut world, [1.0, 1.0, 100.0], Some(child));

        tick(&mut world);

        {
            let global_transform = world.get::<&GlobalTransform>(grandchild).unwrap();
            let expected_matrix = Affine3A::from_translation([3.0, 3.0, 300.0].into());
            assert_relative_eq!(global_transform.0, expected_matrix);
        }

        {
            let global_transform = world.get::<&GlobalTransform>(child).unwrap();
            let expected_matrix = Affine3A::from_translation([2.0, 2.0, 200.0].into());
            assert_relative_eq!(global_transform.0, expected_matrix);
        }
    }

    #[test]
    pub fn test_child_follows_parent_rotation() {
        let mut world = World::new();
        let sun = spawn(&mut world, [0.0, 0.0, -1.0], None);
        let planet = spawn(&mut world, [1.0, 0.0, 0.0], Some(sun));

        world.get::<&mut LocalTransform>(sun).unwrap().rotation =
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        tick(&mut world);

        let global_transform = world.get::<&GlobalTransform>(planet).unwrap();
        assert_relative_eq!(
            global_transform.translation(),
            Vec3::new(0.0, 0.0, -2.0),
            epsilon = 0.0001
        );
    }

    #[test]
    pub fn test_parent_cycles_terminate() {
        let mut world = World::new();
        let a = spawn(&mut world, [1.0, 0.0, 0.0], None);
        let b = spawn(&mut world, [1.0, 0.0, 0.0], Some(a));
        world.insert_one(a, Parent(b)).unwrap();

        tick(&mut world);
    }

    #[test]
    pub fn test_entities_without_transforms() {
        let mut world = World::new();
        world.spawn((0,));
        tick(&mut world);
    }

    fn tick(world: &mut World) {
        update_global_transform_system(world);
        update_global_transform_with_parent_system(world);
    }
}
