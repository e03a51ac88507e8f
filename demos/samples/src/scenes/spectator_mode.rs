use anyhow::Result;
use xrloop::{
    components::{Geometry, GlobalTransform, Info, Material, Mesh, Spin},
    glam::Vec3,
    hecs::{Entity, World},
    surface::Extent,
    systems::spin_system,
    Camera, Frame, Scene, SessionDescriptor, SetupContext,
};

use super::{add_hemisphere_light, spawn_mesh, CUBE_COLOR, ROTATION_SPEED};

/// How far the spectator swings either side of the cube
const SWING: f32 = 3.0;

/// A second camera that watches the scene from the side while someone is in the session.
///
/// The host's rendering library owns the second viewport: each time the surface presents, it looks
/// up every `SpectatorView` in the world and draws the scene from `camera` into a viewport of
/// `extent`. Despawning the entity releases the viewport, which [`SpectatorMode`] does on teardown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectatorView {
    /// Where the spectator watches from
    pub camera: Camera,
    /// Size of the spectator's viewport
    pub extent: Extent,
}

impl Default for SpectatorView {
    fn default() -> Self {
        let extent = Extent::new(320, 180);
        let mut camera = Camera::new(70.0, extent.aspect(), 0.01, 20.0);
        camera.position = Vec3::new(0.0, 2.0, 3.0);
        camera.look_at(Vec3::ZERO);
        Self { camera, extent }
    }
}

/// A spinning cube, watched by a spectator camera that swings from side to side
#[derive(Debug, Default)]
pub struct SpectatorMode {
    cube: Option<Entity>,
    spectator: Option<Entity>,
}

impl SpectatorMode {
    /// The cube, once set up
    pub fn cube(&self) -> Option<Entity> {
        self.cube
    }

    /// The entity holding the [`SpectatorView`], once set up
    pub fn spectator(&self) -> Option<Entity> {
        self.spectator
    }
}

impl Scene for SpectatorMode {
    fn descriptor(&self) -> SessionDescriptor {
        SessionDescriptor::immersive_vr()
    }

    fn setup(&mut self, context: &mut SetupContext<'_>) -> Result<()> {
        context.camera.position = [0.0, 0.0, 1.0].into();
        let world = &mut *context.world;
        add_hemisphere_light(world);

        let cube = spawn_mesh(
            world,
            "Cube",
            Mesh::new(Geometry::cube(0.2)),
            Material::phong(CUBE_COLOR),
            Vec3::ZERO,
        );
        world.insert_one(
            cube,
            Spin {
                radians_per_second: Vec3::new(ROTATION_SPEED, ROTATION_SPEED, 0.0),
            },
        )?;

        let spectator = world.spawn((Info::new("Spectator"), SpectatorView::default()));

        self.cube = Some(cube);
        self.spectator = Some(spectator);
        Ok(())
    }

    fn frame(&mut self, frame: &Frame, world: &mut World) {
        spin_system(world, frame);

        let target = self
            .cube
            .and_then(|cube| world.get::<&GlobalTransform>(cube).ok())
            .map(|global_transform| global_transform.translation())
            .unwrap_or(Vec3::ZERO);

        for (_, view) in world.query_mut::<&mut SpectatorView>() {
            view.camera.position.x = frame.elapsed_secs().sin() * SWING;
            view.camera.look_at(target);
        }
    }

    fn teardown(&mut self, world: &mut World) {
        if let Some(spectator) = self.spectator.take() {
            let _ = world.despawn(spectator);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{f32::consts::FRAC_PI_2, time::Duration};

    use approx::assert_relative_eq;

    use super::*;
    use crate::scenes::test_support::{mount_simulated, Simulated};

    fn spectator_view<S: Scene + 'static>(simulated: &Simulated<S>, entity: Entity) -> SpectatorView {
        *simulated
            .mounted
            .manager()
            .world
            .get::<&SpectatorView>(entity)
            .unwrap()
    }

    #[test]
    pub fn test_default_view() {
        let view = SpectatorView::default();
        assert_relative_eq!(view.camera.aspect, 16.0 / 9.0);
        assert_relative_eq!(
            view.camera.forward(),
            Vec3::new(0.0, -2.0, -3.0).normalize(),
            epsilon = 0.0001
        );
    }

    #[test]
    pub fn test_spectator_swings_round_the_cube() {
        let mut simulated = mount_simulated(SpectatorMode::default());
        let spectator = simulated.mounted.scene().spectator().unwrap();

        simulated.enter();
        simulated.clock.set(Duration::from_secs_f32(FRAC_PI_2));
        simulated.tick(Duration::ZERO);

        let view = spectator_view(&simulated, spectator);
        assert_relative_eq!(
            view.camera.position,
            Vec3::new(3.0, 2.0, 3.0),
            epsilon = 0.0001
        );
        assert_relative_eq!(
            view.camera.forward(),
            (-view.camera.position).normalize(),
            epsilon = 0.0001
        );

        // The viewer's camera is untouched.
        assert_relative_eq!(simulated.mounted.manager().camera.position, Vec3::ZERO);
    }

    #[test]
    pub fn test_spectator_released_on_unmount() {
        let mut simulated = mount_simulated(SpectatorMode::default());
        let spectator = simulated.mounted.scene().spectator().unwrap();
        simulated.tick(Duration::from_millis(16));

        simulated.mounted.unmount();
        let world = &simulated.mounted.manager().world;
        assert!(!world.contains(spectator));
        assert_eq!(world.query::<&SpectatorView>().iter().count(), 0);
        assert_eq!(simulated.mounted.scene().spectator(), None);
    }
}
