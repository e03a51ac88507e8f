use glam::Vec3;
use hecs::World;
use log::info;

use crate::{
    assets::Loaded,
    components::{GlobalTransform, SoundEmitter, SoundState, HMD},
};

/// Audio system
/// Applies requested state changes to every [`SoundEmitter`] and attenuates it by its distance from
/// the listener, which is the [`HMD`]. A request to play waits until the emitter's buffer is
/// [`Loaded`].
pub fn audio_system(world: &mut World) {
    let listener = world
        .query_mut::<(&HMD, &GlobalTransform)>()
        .into_iter()
        .next()
        .map(|(_, (_, global_transform))| global_transform.translation())
        .unwrap_or(Vec3::ZERO);

    for (entity, (emitter, global_transform, loaded)) in
        world.query_mut::<(&mut SoundEmitter, &GlobalTransform, Option<&Loaded>)>()
    {
        if let Some(next_state) = emitter.pending_state() {
            let waiting_for_buffer = next_state == SoundState::Playing && loaded.is_none();
            if !waiting_for_buffer {
                if next_state != emitter.current_state() {
                    info!("[XRLOOP_AUDIO] {entity:?} is now {next_state:?}");
                }
                emitter.apply(next_state);
            }
        }

        let distance = global_transform.translation().distance(listener);
        emitter.gain = match emitter.current_state() {
            SoundState::Playing => emitter.gain_at(distance),
            _ => 0.0,
        };
    }
}

/// Stop every sound in the world straight away, eg. while tearing a scene down.
pub fn stop_all_sounds(world: &mut World) {
    for (_, emitter) in world.query_mut::<&mut SoundEmitter>() {
        emitter.apply(SoundState::Stopped);
        emitter.gain = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Affine3A;

    use crate::assets::{Asset, AssetKind};

    use super::*;

    fn loaded() -> Loaded {
        Loaded(Asset {
            kind: AssetKind::Audio,
            path: "positional-audio.mp3".into(),
            data: vec![0; 4].into(),
        })
    }

    #[test]
    pub fn test_play_waits_for_buffer() {
        let mut world = World::new();
        world.spawn((HMD {}, GlobalTransform::default()));
        let transform = GlobalTransform(Affine3A::from_translation([0.0, 0.0, -2.0].into()));
        let mut emitter = SoundEmitter::default();
        emitter.play();
        let sound = world.spawn((emitter, transform));

        audio_system(&mut world);
        {
            let emitter = world.get::<&SoundEmitter>(sound).unwrap();
            assert_eq!(emitter.current_state(), SoundState::Stopped);
            assert_eq!(emitter.gain, 0.0);
        }

        world.insert_one(sound, loaded()).unwrap();
        audio_system(&mut world);
        {
            let emitter = world.get::<&SoundEmitter>(sound).unwrap();
            assert_eq!(emitter.current_state(), SoundState::Playing);
            assert_relative_eq!(emitter.gain, 0.5);
        }

        stop_all_sounds(&mut world);
        let emitter = world.get::<&SoundEmitter>(sound).unwrap();
        assert_eq!(emitter.current_state(), SoundState::Stopped);
    }

    #[test]
    pub fn test_stop_does_not_wait_for_buffer() {
        let mut world = World::new();
        let mut emitter = SoundEmitter::default();
        emitter.stop();
        let sound = world.spawn((emitter, GlobalTransform::default()));

        audio_system(&mut world);
        let emitter = world.get::<&SoundEmitter>(sound).unwrap();
        assert_eq!(emitter.pending_state(), None);
    }
}
