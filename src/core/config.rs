//! Showcase configuration.
//!
//! Every scene is tunable from one JSON document:
//! - `fire`: `EmitterOptions` layered over the fire defaults
//! - `deck`: `DeckConfig` for the draw/discard piles
//! - `dialogue`: `DialogueConfig` for the typed dialogue
//!
//! Missing sections and fields take their defaults.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::particles::EmitterOptions;

/// Most cards a discard pile may keep on screen.
pub const MAX_DISPLAY_LIMIT: usize = 64;

/// How the draw pile's move timer behaves when a frame spans more than one
/// move interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPolicy {
    /// Reset the timer to zero on dispatch: at most one card per update,
    /// however long the frame was.
    #[default]
    Reset,
    /// Subtract one interval per dispatch: a long frame dispatches once per
    /// whole interval it covered.
    CatchUp,
}

/// Draw/discard pile parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Cards in the draw pile when the scene opens.
    pub initial_count: u32,

    /// Time between automatic dispatches, in ms.
    pub move_interval_ms: f32,

    /// Flight time from draw pile to discard pile, in ms.
    pub move_duration_ms: f32,

    /// Fade-in time of a replenished bottom card, in ms.
    pub replenish_fade_ms: f32,

    /// Cards the discard pile keeps on screen.
    pub display_limit: usize,

    /// Vertical offset between the top and bottom card, in px.
    pub card_spacing: f32,

    pub timer_policy: TimerPolicy,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            initial_count: 144,
            move_interval_ms: 1000.0,
            move_duration_ms: 2000.0,
            replenish_fade_ms: 300.0,
            display_limit: 5,
            card_spacing: 20.0,
            timer_policy: TimerPolicy::Reset,
        }
    }
}

impl DeckConfig {
    #[must_use]
    pub fn with_initial_count(mut self, count: u32) -> Self {
        self.initial_count = count;
        self
    }

    #[must_use]
    pub fn with_move_interval(mut self, ms: f32) -> Self {
        self.move_interval_ms = ms;
        self
    }

    #[must_use]
    pub fn with_move_duration(mut self, ms: f32) -> Self {
        self.move_duration_ms = ms;
        self
    }

    #[must_use]
    pub fn with_replenish_fade(mut self, ms: f32) -> Self {
        self.replenish_fade_ms = ms;
        self
    }

    #[must_use]
    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    #[must_use]
    pub fn with_timer_policy(mut self, policy: TimerPolicy) -> Self {
        self.timer_policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.move_interval_ms.is_finite() && self.move_interval_ms > 0.0) {
            return Err(ConfigError::MoveInterval(self.move_interval_ms));
        }
        if !(self.move_duration_ms >= 0.0) {
            return Err(ConfigError::MoveDuration(self.move_duration_ms));
        }
        if !(self.replenish_fade_ms >= 0.0) {
            return Err(ConfigError::ReplenishFade(self.replenish_fade_ms));
        }
        if !(1..=MAX_DISPLAY_LIMIT).contains(&self.display_limit) {
            return Err(ConfigError::DisplayLimit(self.display_limit));
        }
        Ok(())
    }
}

/// Typed dialogue parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// Typing speed.
    pub chars_per_second: f32,

    /// A voice clip plays every this many revealed characters (0 = silent).
    pub voice_every: usize,

    /// Bubble text column width in px.
    pub text_width: f32,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            chars_per_second: 40.0,
            voice_every: 4,
            text_width: 400.0,
        }
    }
}

impl DialogueConfig {
    #[must_use]
    pub fn with_chars_per_second(mut self, cps: f32) -> Self {
        self.chars_per_second = cps;
        self
    }

    #[must_use]
    pub fn with_voice_every(mut self, chars: usize) -> Self {
        self.voice_every = chars;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.chars_per_second.is_finite() && self.chars_per_second > 0.0) {
            return Err(ConfigError::TypingSpeed(self.chars_per_second));
        }
        Ok(())
    }
}

/// Complete showcase configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Overrides on top of the fire effect's own defaults.
    pub fire: EmitterOptions,
    pub deck: DeckConfig,
    pub dialogue: DialogueConfig,
    /// Seed for every random stream in the showcase.
    pub seed: u64,
}

impl ShowcaseConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ShowcaseConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fire.resolve_over(&crate::particles::Fire::defaults())?;
        self.deck.validate()?;
        self.dialogue.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_defaults() {
        let deck = DeckConfig::default();

        assert_eq!(deck.initial_count, 144);
        assert_eq!(deck.move_interval_ms, 1000.0);
        assert_eq!(deck.move_duration_ms, 2000.0);
        assert_eq!(deck.display_limit, 5);
        assert_eq!(deck.timer_policy, TimerPolicy::Reset);
        assert!(deck.validate().is_ok());
    }

    #[test]
    fn test_deck_validation() {
        assert!(matches!(
            DeckConfig::default().with_move_interval(0.0).validate(),
            Err(ConfigError::MoveInterval(_))
        ));
        assert!(matches!(
            DeckConfig::default().with_move_duration(-1.0).validate(),
            Err(ConfigError::MoveDuration(_))
        ));
        assert!(matches!(
            DeckConfig::default().with_display_limit(0).validate(),
            Err(ConfigError::DisplayLimit(0))
        ));
    }

    #[test]
    fn test_display_limit_upper_bound() {
        assert!(DeckConfig::default().with_display_limit(MAX_DISPLAY_LIMIT).validate().is_ok());
        assert!(matches!(
            DeckConfig::default().with_display_limit(MAX_DISPLAY_LIMIT + 1).validate(),
            Err(ConfigError::DisplayLimit(_))
        ));
        assert!(matches!(
            DeckConfig::default().with_display_limit(usize::MAX).validate(),
            Err(ConfigError::DisplayLimit(_))
        ));
        assert!(matches!(
            ShowcaseConfig::from_json_str(r#"{ "deck": { "display_limit": 1000000000000 } }"#),
            Err(ConfigError::DisplayLimit(1_000_000_000_000))
        ));
    }

    #[test]
    fn test_replenish_fade_names_its_field() {
        let err = DeckConfig::default().with_replenish_fade(-5.0).validate().unwrap_err();

        assert!(matches!(err, ConfigError::ReplenishFade(_)));
        assert_eq!(err.to_string(), "replenish fade must be non-negative, got -5 ms");
    }

    #[test]
    fn test_dialogue_validation() {
        assert!(DialogueConfig::default().validate().is_ok());
        assert!(matches!(
            DialogueConfig::default().with_chars_per_second(0.0).validate(),
            Err(ConfigError::TypingSpeed(_))
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let config = ShowcaseConfig::from_json_str(
            r#"{
                "seed": 7,
                "fire": { "maxParticles": 80 },
                "deck": { "initial_count": 10, "timer_policy": "catch_up" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.fire.max_particles, Some(80));
        assert_eq!(config.deck.initial_count, 10);
        assert_eq!(config.deck.timer_policy, TimerPolicy::CatchUp);
        assert_eq!(config.deck.move_interval_ms, 1000.0);
        assert_eq!(config.dialogue, DialogueConfig::default());
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            ShowcaseConfig::from_json_str(r#"{ "fire": { "emitRate": -1 } }"#),
            Err(ConfigError::EmitRate(_))
        ));
        assert!(matches!(
            ShowcaseConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        let config = ShowcaseConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ShowcaseConfig::from_json_str(&json).unwrap(), config);
    }
}
