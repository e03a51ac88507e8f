use anyhow::Result;
use xrloop::{
    components::{
        Color, Geometry, GlobalTransform, Info, LocalTransform, Material, Mesh, Orbit, Parent,
        Spin,
    },
    hecs::{Entity, World},
    systems::{orbit_system, spin_system},
    Frame, Scene, SessionDescriptor, SetupContext,
};

use super::{add_hemisphere_light, spawn_mesh, ROTATION_SPEED};

const EARTH_RADIUS: f32 = 0.2;
const MOON_RADIUS: f32 = 0.05;
const MOON_ORBIT_RADIUS: f32 = 0.4;
const MOON_ORBIT_PERIOD: f32 = 10.0;

/// The earth hanging a metre in front of the viewer, with the moon going round it
#[derive(Debug, Default)]
pub struct SolarSystem {
    earth: Option<Entity>,
    moon: Option<Entity>,
}

impl SolarSystem {
    /// The earth, once set up
    pub fn earth(&self) -> Option<Entity> {
        self.earth
    }

    /// The moon, once set up
    pub fn moon(&self) -> Option<Entity> {
        self.moon
    }
}

impl Scene for SolarSystem {
    fn descriptor(&self) -> SessionDescriptor {
        SessionDescriptor::immersive_ar()
    }

    fn setup(&mut self, context: &mut SetupContext<'_>) -> Result<()> {
        let world = &mut *context.world;
        add_hemisphere_light(world);

        // The earth spins and the moon orbits, so they hang off a common centre that does neither.
        let centre = world.spawn((
            Info::new("Earth system"),
            LocalTransform::from_translation([0.0, 0.0, -1.0].into()),
            GlobalTransform::default(),
        ));

        let earth = spawn_mesh(
            world,
            "Earth",
            Mesh::new(Geometry::sphere(EARTH_RADIUS)),
            Material::phong(Color(0x2233ff)).with_emissive(Color(0x112244), 0.2),
            Default::default(),
        );
        world.insert(earth, (Parent(centre), Spin::about_y(ROTATION_SPEED)))?;

        let orbit = Orbit {
            radius: MOON_ORBIT_RADIUS,
            period: MOON_ORBIT_PERIOD,
            phase: 0.0,
        };
        let moon = spawn_mesh(
            world,
            "Moon",
            Mesh::new(Geometry::sphere(MOON_RADIUS)),
            Material::phong(Color(0x888888)),
            orbit.position_at(0.0),
        );
        world.insert(moon, (Parent(centre), orbit))?;

        self.earth = Some(earth);
        self.moon = Some(moon);
        Ok(())
    }

    fn frame(&mut self, frame: &Frame, world: &mut World) {
        spin_system(world, frame);
        orbit_system(world, frame);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_relative_eq;
    use xrloop::glam::{Quat, Vec3};

    use super::*;
    use crate::scenes::test_support::mount_simulated;

    #[test]
    pub fn test_moon_orbits_earth() {
        let mut simulated = mount_simulated(SolarSystem::default());
        simulated.enter();

        let mut moon_positions = Vec::new();
        for _ in 0..4 {
            simulated.tick(Duration::from_millis(1250));

            let scene = simulated.mounted.scene();
            let world = &simulated.mounted.manager().world;
            let earth = world
                .get::<&GlobalTransform>(scene.earth().unwrap())
                .unwrap()
                .translation();
            let moon = world
                .get::<&GlobalTransform>(scene.moon().unwrap())
                .unwrap()
                .translation();

            assert_relative_eq!(earth, Vec3::new(0.0, 0.0, -1.0), epsilon = 0.0001);
            assert_relative_eq!(earth.distance(moon), MOON_ORBIT_RADIUS, epsilon = 0.0001);
            moon_positions.push(moon);
        }

        assert!(moon_positions.windows(2).all(|pair| pair[0] != pair[1]));
        let scene = simulated.mounted.scene();
        let world = &simulated.mounted.manager().world;
        let rotation = world
            .get::<&LocalTransform>(scene.earth().unwrap())
            .unwrap()
            .rotation;
        assert_ne!(rotation, Quat::IDENTITY);
        assert_eq!(simulated.surface.snapshot().visible_meshes, 2);
    }
}
