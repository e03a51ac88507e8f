use anyhow::{anyhow, Result};
use xrloop::{
    assets::{AssetKind, Loading},
    components::{Color, Geometry, Material, Mesh, SoundEmitter, Spin},
    hecs::{Entity, World},
    systems::{spin_system, stop_all_sounds},
    Frame, Scene, SessionDescriptor, SetupContext,
};

use super::{add_hemisphere_light, spawn_mesh, ROTATION_SPEED};

const SOUND: &str = "media/audio/positional-audio.mp3";

/// A spinning red ball a metre in front of the viewer that plays a looping sound
#[derive(Debug, Default)]
pub struct PositionalAudio {
    speaker: Option<Entity>,
}

impl PositionalAudio {
    /// The ball the sound comes from, once set up
    pub fn speaker(&self) -> Option<Entity> {
        self.speaker
    }
}

impl Scene for PositionalAudio {
    fn descriptor(&self) -> SessionDescriptor {
        SessionDescriptor::immersive_vr()
    }

    fn setup(&mut self, context: &mut SetupContext<'_>) -> Result<()> {
        let assets = context
            .assets
            .ok_or_else(|| anyhow!("No asset loader to load {SOUND} with"))?;

        context.camera.position = [0.0, 0.0, 1.0].into();
        let world = &mut *context.world;
        add_hemisphere_light(world);

        let speaker = spawn_mesh(
            world,
            "Speaker",
            Mesh::new(Geometry::sphere(0.1)),
            Material::phong(Color(0xff0000)),
            [0.0, 0.0, -1.0].into(),
        );

        let mut sound = SoundEmitter::default();
        sound.ref_distance = 1.0;
        sound.looping = true;
        // Starts as soon as the buffer arrives.
        sound.play();
        world.insert(
            speaker,
            (
                Spin::about_y(ROTATION_SPEED),
                sound,
                Loading::start(assets, AssetKind::Audio, SOUND),
            ),
        )?;

        self.speaker = Some(speaker);
        Ok(())
    }

    fn frame(&mut self, frame: &Frame, world: &mut World) {
        spin_system(world, frame);
    }

    fn teardown(&mut self, world: &mut World) {
        stop_all_sounds(world);
    }
}
