use anyhow::Result;
use xrloop::{
    components::{Material, Mesh, VideoPlayback},
    hecs::{Entity, World},
    systems::release_all_videos,
    Frame, Scene, SessionDescriptor, SetupContext,
};

use super::{configure_camera, photo_360::PANORAMA, spawn_mesh};

const VIDEO: &str = "media/videos/stereo-video.mp4";

/// Stand inside a looping stereo video
#[derive(Debug, Default)]
pub struct StereoVideo {
    screen: Option<Entity>,
}

impl StereoVideo {
    /// The sphere the video plays on, once set up
    pub fn screen(&self) -> Option<Entity> {
        self.screen
    }
}

impl Scene for StereoVideo {
    fn descriptor(&self) -> SessionDescriptor {
        SessionDescriptor::immersive_vr()
    }

    fn setup(&mut self, context: &mut SetupContext<'_>) -> Result<()> {
        configure_camera(context.camera, 75.0, 0.1, 1000.0, [0.0, 0.0, 0.1].into());

        let screen = spawn_mesh(
            context.world,
            "Screen",
            Mesh::inside_out(PANORAMA),
            Material::unlit_texture(VIDEO),
            Default::default(),
        );
        let mut video = VideoPlayback::new(VIDEO);
        video.looping = true;
        video.muted = true;
        video.play();
        context.world.insert_one(screen, video)?;

        self.screen = Some(screen);
        Ok(())
    }

    fn frame(&mut self, _frame: &Frame, _world: &mut World) {}

    fn teardown(&mut self, world: &mut World) {
        release_all_videos(world);
    }
}
