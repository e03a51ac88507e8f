use std::f32::consts::FRAC_PI_2;

use anyhow::Result;
use log::debug;
use xrloop::{
    components::{
        Color, Geometry, GlobalTransform, Info, LocalTransform, Material, Mesh, SessionOnly,
        Visible,
    },
    glam::Affine3A,
    hecs::{Entity, World},
    platform::HitTestResult,
    session::features,
    Frame, Scene, SessionDescriptor, SetupContext,
};

use super::add_hemisphere_light;

/// Marks the ring that shows where the hit test found a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reticle {}

/// Shows a reticle wherever the viewer's gaze meets a real-world surface
#[derive(Debug, Default)]
pub struct HitTest {
    reticle: Option<Entity>,
}

impl HitTest {
    /// The reticle, if one has been placed this session
    pub fn reticle(&self) -> Option<Entity> {
        self.reticle
    }

    fn place_reticle(&mut self, world: &mut World, hit: &HitTestResult) {
        // The ring lies in the XY plane; the hit's up axis is its Y.
        let transform = hit.to_affine() * Affine3A::from_rotation_x(-FRAC_PI_2);

        // Anything from the previous session was despawned when it ended.
        if let Some(reticle) = self.reticle.filter(|reticle| world.contains(*reticle)) {
            if let Ok(mut local_transform) = world.get::<&mut LocalTransform>(reticle) {
                local_transform.update_rotation_translation_from_affine(&transform);
            }
            let _ = world.insert_one(reticle, Visible {});
            return;
        }

        let mut local_transform = LocalTransform::default();
        local_transform.update_rotation_translation_from_affine(&transform);
        let reticle = world.spawn((
            Info::new("Reticle"),
            Reticle {},
            Mesh::new(Geometry::Ring {
                inner_radius: 0.15,
                outer_radius: 0.2,
                segments: 32,
            }),
            Material::phong(Color::WHITE),
            local_transform,
            GlobalTransform::default(),
            SessionOnly {},
            Visible {},
        ));
        debug!("[XRLOOP_SAMPLES] Placed reticle {reticle:?}");
        self.reticle = Some(reticle);
    }

    fn hide_reticle(&mut self, world: &mut World) {
        if let Some(reticle) = self.reticle.filter(|reticle| world.contains(*reticle)) {
            let _ = world.remove_one::<Visible>(reticle);
        }
    }
}

impl Scene for HitTest {
    fn descriptor(&self) -> SessionDescriptor {
        SessionDescriptor::immersive_ar().require(features::HIT_TEST)
    }

    fn setup(&mut self, context: &mut SetupContext<'_>) -> Result<()> {
        add_hemisphere_light(context.world);
        Ok(())
    }

    fn frame(&mut self, frame: &Frame, world: &mut World) {
        match (&frame.hit_test, frame.immersive) {
            (Some(hit), true) => self.place_reticle(world, hit),
            _ => self.hide_reticle(world),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_relative_eq;
    use xrloop::glam::{Quat, Vec3};

    use super::*;
    use crate::scenes::test_support::mount_simulated;

    const STEP: Duration = Duration::from_millis(16);

    #[test]
    pub fn test_reticle_follows_hits() {
        let mut simulated = mount_simulated(HitTest::default());
        assert!(simulated
            .mounted
            .scene()
            .descriptor()
            .required_features()
            .contains(features::HIT_TEST));

        simulated.enter();
        simulated.tick(STEP);
        let reticle = simulated.mounted.scene().reticle().unwrap();
        {
            let world = &simulated.mounted.manager().world;
            assert!(world.get::<&Visible>(reticle).is_ok());
            let global_transform = world.get::<&GlobalTransform>(reticle).unwrap();
            assert_relative_eq!(
                global_transform.translation(),
                Vec3::new(0.0, -1.6, -1.0),
                epsilon = 0.0001
            );
        }

        simulated.platform.set_hit_test(Some(HitTestResult {
            position: Vec3::new(0.5, -1.6, -2.0),
            orientation: Quat::IDENTITY,
        }));
        simulated.tick(STEP);
        assert_eq!(simulated.mounted.scene().reticle(), Some(reticle));
        {
            let world = &simulated.mounted.manager().world;
            let local_transform = world.get::<&LocalTransform>(reticle).unwrap();
            assert_relative_eq!(
                local_transform.translation,
                Vec3::new(0.5, -1.6, -2.0),
                epsilon = 0.0001
            );
        }

        simulated.platform.set_hit_test(None);
        simulated.tick(STEP);
        assert!(simulated
            .mounted
            .manager()
            .world
            .get::<&Visible>(reticle)
            .is_err());
    }

    #[test]
    pub fn test_reticle_goes_with_the_session() {
        let mut simulated = mount_simulated(HitTest::default());
        simulated.enter();
        simulated.tick(STEP);
        let reticle = simulated.mounted.scene().reticle().unwrap();

        assert!(simulated.platform.end_active_session());
        simulated.tick(STEP);
        assert!(!simulated.mounted.manager().world.contains(reticle));

        // Inline frames never have a hit, and must not trip over the stale entity.
        let tick = simulated.tick(STEP);
        assert!(!tick.frame.unwrap().immersive);
        assert_eq!(simulated.surface.snapshot().visible_meshes, 0);
    }
}
