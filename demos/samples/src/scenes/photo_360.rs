use anyhow::{anyhow, Result};
use xrloop::{
    assets::{AssetKind, Loading},
    components::{Geometry, GlobalTransform, Info, LocalTransform, Material, Mesh},
    hecs::{Entity, World},
    Frame, Scene, SessionDescriptor, SetupContext,
};

use super::configure_camera;

const PHOTO: &str = "media/textures/360-photo.jpg";

/// The panorama is a sphere big enough to stand inside of, textured on the inside.
pub(crate) const PANORAMA: Geometry = Geometry::Sphere {
    radius: 500.0,
    width_segments: 60,
    height_segments: 40,
};

/// Stand inside a 360° photo
#[derive(Debug, Default)]
pub struct Photo360 {
    panorama: Option<Entity>,
}

impl Photo360 {
    /// The sphere the photo is drawn on, once set up
    pub fn panorama(&self) -> Option<Entity> {
        self.panorama
    }
}

impl Scene for Photo360 {
    fn descriptor(&self) -> SessionDescriptor {
        SessionDescriptor::immersive_vr()
    }

    fn setup(&mut self, context: &mut SetupContext<'_>) -> Result<()> {
        let assets = context
            .assets
            .ok_or_else(|| anyhow!("No asset loader to load {PHOTO} with"))?;
        configure_camera(context.camera, 75.0, 0.1, 1000.0, [0.0, 0.0, 0.1].into());

        // Hidden until the photo arrives.
        let panorama = context.world.spawn((
            Info::new("Panorama"),
            Mesh::inside_out(PANORAMA),
            Material::unlit_texture(PHOTO),
            LocalTransform::default(),
            GlobalTransform::default(),
            Loading::start(assets, AssetKind::Texture, PHOTO),
        ));
        self.panorama = Some(panorama);
        Ok(())
    }

    fn frame(&mut self, _frame: &Frame, _world: &mut World) {}
}

#[cfg(test)]
mod tests {
    use std::{rc::Rc, time::Duration};

    use xrloop::{
        assets::{LoadFailed, Loaded},
        components::Visible,
        simulator::{SimulatedAssets, SimulatedSurface},
        surface::RenderSurface,
        XrSessionManager,
    };

    use super::*;
    use crate::scenes::test_support::mount_simulated;

    const STEP: Duration = Duration::from_millis(16);

    #[test]
    pub fn test_photo_shows_once_loaded() {
        let mut simulated = mount_simulated(Photo360::default());
        {
            let camera = &simulated.mounted.manager().camera;
            assert_eq!(camera.fov_y_degrees, 75.0);
            assert_eq!(camera.far, 1000.0);
            assert_eq!(camera.position.z, 0.1);
        }

        simulated.tick(STEP);
        assert_eq!(simulated.surface.snapshot().visible_meshes, 0);

        assert_eq!(simulated.assets.resolve_all(), 1);
        simulated.tick(STEP);
        assert_eq!(simulated.surface.snapshot().visible_meshes, 1);

        let panorama = simulated.mounted.scene().panorama().unwrap();
        let world = &simulated.mounted.manager().world;
        assert_eq!(world.get::<&Loaded>(panorama).unwrap().0.path, PHOTO);
        assert!(world.get::<&Mesh>(panorama).unwrap().inside_out);
    }

    #[test]
    pub fn test_missing_photo_stays_hidden() {
        let surface = SimulatedSurface::default();
        let builder =
            XrSessionManager::builder().asset_loader(Rc::new(SimulatedAssets::new().fail(PHOTO)));
        let mut mounted = xrloop::mount(Photo360::default(), builder, || {
            Ok(Box::new(surface.clone()) as Box<dyn RenderSurface>)
        })
        .unwrap();

        mounted.update().unwrap();
        let panorama = mounted.scene().panorama().unwrap();
        let world = &mounted.manager().world;
        assert!(world.get::<&LoadFailed>(panorama).is_ok());
        assert!(world.get::<&Visible>(panorama).is_err());
        assert_eq!(surface.snapshot().visible_meshes, 0);
    }
}
