use hecs::World;

use crate::{components::VideoPlayback, Frame};

/// Video system
/// Moves every playing video on by the frame's delta
pub fn video_system(world: &mut World, frame: &Frame) {
    for (_, video) in world.query_mut::<&mut VideoPlayback>() {
        video.advance(frame.delta);
    }
}

/// Pause every video and drop its source, eg. while tearing a scene down.
pub fn release_all_videos(world: &mut World) {
    for (_, video) in world.query_mut::<&mut VideoPlayback>() {
        video.pause();
        video.clear_source();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::components::SoundState;

    use super::*;

    #[test]
    pub fn test_video_system() {
        let mut world = World::new();
        let mut video = VideoPlayback::new("stereo-video.mp4");
        video.play();
        let entity = world.spawn((video,));

        let frame = Frame {
            index: 0,
            elapsed: Duration::from_millis(16),
            delta: Duration::from_millis(16),
            immersive: false,
            viewer_pose: None,
            hit_test: None,
        };
        video_system(&mut world, &frame);
        video_system(&mut world, &frame);
        assert_eq!(
            world.get::<&VideoPlayback>(entity).unwrap().position,
            Duration::from_millis(32)
        );

        release_all_videos(&mut world);
        let video = world.get::<&VideoPlayback>(entity).unwrap();
        assert_eq!(video.state, SoundState::Stopped);
        assert_eq!(video.source, None);
    }
}
