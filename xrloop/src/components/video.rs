use std::time::Duration;

use super::SoundState;

/// A video used as a texture, eg. on a panorama sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoPlayback {
    /// Where the video comes from. `None` once the source has been cleared.
    pub source: Option<String>,
    /// Start again from the beginning when the end is reached
    pub looping: bool,
    /// Whether the audio track is muted
    pub muted: bool,
    /// Playback state
    pub state: SoundState,
    /// How far into the video playback is
    pub position: Duration,
    /// Length of the video, once known
    pub duration: Option<Duration>,
}

impl VideoPlayback {
    /// A stopped video from `source`
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            looping: false,
            muted: false,
            state: SoundState::Stopped,
            position: Duration::ZERO,
            duration: None,
        }
    }

    /// Start playing. Does nothing without a source.
    pub fn play(&mut self) {
        if self.source.is_some() {
            self.state = SoundState::Playing;
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state == SoundState::Playing {
            self.state = SoundState::Paused;
        }
    }

    /// Stop playback and drop the source
    pub fn clear_source(&mut self) {
        self.source = None;
        self.state = SoundState::Stopped;
        self.position = Duration::ZERO;
    }

    /// Move playback on by `delta`
    pub fn advance(&mut self, delta: Duration) {
        if self.state != SoundState::Playing {
            return;
        }

        self.position += delta;
        let Some(duration) = self.duration.filter(|d| !d.is_zero()) else {
            return;
        };
        if self.position < duration {
            return;
        }

        if self.looping {
            self.position = Duration::from_nanos(
                (self.position.as_nanos() % duration.as_nanos()) as u64,
            );
        } else {
            self.position = duration;
            self.state = SoundState::Stopped;
        }
    }
}
