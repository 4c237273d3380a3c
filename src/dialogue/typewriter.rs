//! Character-by-character text reveal.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypingState {
    #[default]
    Typing,
    Complete,
}

/// What one step revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reveal {
    /// Newly revealed typing units.
    pub chars: usize,
    /// Voice cues crossed, one per `voice_every` units.
    pub voices: usize,
}

/// Reveals `total` units at a fixed rate.
#[derive(Clone, Debug, PartialEq)]
pub struct Typewriter {
    total: usize,
    revealed: usize,
    /// Fractional units typed so far.
    progress: f32,
    chars_per_second: f32,
    voice_every: usize,
    state: TypingState,
}

impl Typewriter {
    /// Nothing to type means already complete.
    #[must_use]
    pub fn new(total: usize, chars_per_second: f32, voice_every: usize) -> Self {
        Self {
            total,
            revealed: 0,
            progress: 0.0,
            chars_per_second,
            voice_every,
            state: if total == 0 {
                TypingState::Complete
            } else {
                TypingState::Typing
            },
        }
    }

    /// Type for `delta_ms`.
    pub fn advance(&mut self, delta_ms: f32) -> Reveal {
        if self.state == TypingState::Complete {
            return Reveal::default();
        }

        self.progress += delta_ms.max(0.0) * self.chars_per_second / 1000.0;
        // Float to int casts saturate
        let target = (self.progress.floor() as usize).min(self.total);
        self.reveal_to(target)
    }

    /// Reveal everything at once. Skipped text is not voiced.
    pub fn finish(&mut self) -> usize {
        let before = self.revealed;
        self.revealed = self.total;
        self.progress = self.total as f32;
        self.state = TypingState::Complete;
        self.total - before
    }

    fn reveal_to(&mut self, target: usize) -> Reveal {
        let chars = target.saturating_sub(self.revealed);
        let voices = if self.voice_every > 0 {
            target / self.voice_every - self.revealed / self.voice_every
        } else {
            0
        };
        self.revealed = self.revealed.max(target);
        if self.revealed >= self.total {
            self.state = TypingState::Complete;
        }
        Reveal { chars, voices }
    }

    #[must_use]
    pub fn state(&self) -> TypingState {
        self.state
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == TypingState::Complete
    }

    #[must_use]
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }
}
