//! Audio playback interface.
//!
//! Cards and the dialogue voice only fire one-shot samples, so the sink
//! needs nothing beyond play and stop. `RecordingAudio` keeps a log for tests.

use serde::{Deserialize, Serialize};

/// Handle to one playing instance of a sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundHandle(pub u32);

/// Per-play parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackParams {
    /// Playback rate, 1.0 is normal speed.
    pub rate: f32,
    /// Volume in `[0, 1]`.
    pub volume: f32,
    /// Start offset in seconds.
    pub seek: f32,
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self { rate: 1.0, volume: 1.0, seek: 0.0 }
    }
}

impl PlaybackParams {
    #[must_use]
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = rate;
        self
    }

    #[must_use]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    #[must_use]
    pub fn with_seek(mut self, seek: f32) -> Self {
        self.seek = seek.max(0.0);
        self
    }
}

/// Audio collaborator.
pub trait AudioSink {
    fn play(&mut self, alias: &str, params: PlaybackParams) -> SoundHandle;

    fn stop(&mut self, handle: SoundHandle);
}

/// Discards everything.
#[derive(Clone, Debug, Default)]
pub struct NullAudio {
    next: u32,
}

impl AudioSink for NullAudio {
    fn play(&mut self, _alias: &str, _params: PlaybackParams) -> SoundHandle {
        self.next += 1;
        SoundHandle(self.next)
    }

    fn stop(&mut self, _handle: SoundHandle) {}
}

/// A play recorded by [`RecordingAudio`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlayedSound {
    pub handle: SoundHandle,
    pub alias: String,
    pub params: PlaybackParams,
}

/// Records plays and stops in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<PlayedSound>,
    pub stopped: Vec<SoundHandle>,
}

impl RecordingAudio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times a given alias was played.
    #[must_use]
    pub fn play_count(&self, alias: &str) -> usize {
        self.played.iter().filter(|p| p.alias == alias).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, alias: &str, params: PlaybackParams) -> SoundHandle {
        let handle = SoundHandle(self.played.len() as u32 + 1);
        self.played.push(PlayedSound {
            handle,
            alias: alias.to_owned(),
            params,
        });
        handle
    }

    fn stop(&mut self, handle: SoundHandle) {
        self.stopped.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_builder_clamps() {
        let params = PlaybackParams::default()
            .with_rate(0.8)
            .with_volume(3.0)
            .with_seek(-0.04);

        assert_eq!(params.rate, 0.8);
        assert_eq!(params.volume, 1.0);
        assert_eq!(params.seek, 0.0);
    }

    #[test]
    fn test_recording() {
        let mut audio = RecordingAudio::new();
        let a = audio.play("sfx_whoosh", PlaybackParams::default().with_volume(0.2));
        let b = audio.play("sfx_whoosh", PlaybackParams::default());
        audio.stop(a);

        assert_ne!(a, b);
        assert_eq!(audio.play_count("sfx_whoosh"), 2);
        assert_eq!(audio.play_count("sfx_card_hover"), 0);
        assert_eq!(audio.stopped, vec![a]);
        assert_eq!(audio.played[0].params.volume, 0.2);
    }
}
