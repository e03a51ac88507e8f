/// Playback state of a sound or video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SoundState {
    /// Not playing, and will start from the beginning
    #[default]
    Stopped,
    /// Playing
    Playing,
    /// Not playing, and will resume where it left off
    Paused,
}

/// A sound positioned in the scene by its entity's transform.
///
/// State changes are requests: they take effect the next time
/// [`crate::systems::audio_system`] runs, and a request to play waits until the entity's audio
/// buffer has finished loading.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundEmitter {
    /// Distance at which the volume starts to fall off
    pub ref_distance: f32,
    /// How quickly the volume falls off past `ref_distance`
    pub rolloff_factor: f32,
    /// Start again from the beginning when the end is reached
    pub looping: bool,
    /// Volume after distance attenuation, as of the last audio system run
    pub gain: f32,
    state: SoundState,
    next_state: Option<SoundState>,
}

impl Default for SoundEmitter {
    fn default() -> Self {
        Self {
            ref_distance: 1.0,
            rolloff_factor: 1.0,
            looping: false,
            gain: 1.0,
            state: SoundState::Stopped,
            next_state: None,
        }
    }
}

impl SoundEmitter {
    /// The state as of the last audio system run
    pub fn current_state(&self) -> SoundState {
        self.state
    }

    /// Ask for the sound to start
    pub fn play(&mut self) {
        self.next_state = Some(SoundState::Playing);
    }

    /// Ask for the sound to pause
    pub fn pause(&mut self) {
        self.next_state = Some(SoundState::Paused);
    }

    /// Ask for the sound to stop
    pub fn stop(&mut self) {
        self.next_state = Some(SoundState::Stopped);
    }

    /// Ask for a paused sound to carry on
    pub fn resume(&mut self) {
        self.next_state = Some(SoundState::Playing);
    }

    pub(crate) fn pending_state(&self) -> Option<SoundState> {
        self.next_state
    }

    pub(crate) fn apply(&mut self, state: SoundState) {
        self.state = state;
        self.next_state = None;
    }

    /// Inverse distance attenuation: full volume inside `ref_distance`, falling off past it.
    pub fn gain_at(&self, distance: f32) -> f32 {
        let distance = distance.max(self.ref_distance);
        let denominator = self.ref_distance + self.rolloff_factor * (distance - self.ref_distance);
        if denominator <= 0.0 {
            return 1.0;
        }
        self.ref_distance / denominator
    }
}
