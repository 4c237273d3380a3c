//! Error types.
//!
//! Simulation itself never fails: an update that cannot do anything this
//! frame simply does nothing. Errors only surface when building components
//! from configuration or parsing external data.

use thiserror::Error;

use super::config::MAX_DISPLAY_LIMIT;

/// Invalid configuration for an emitter, a pile, or the dialogue player.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("maxParticles must be at least 1")]
    MaxParticles,

    #[error("emitRate must be a positive number of seconds, got {0}")]
    EmitRate(f32),

    #[error("{name} must be non-negative, got {value}")]
    NegativeScale { name: &'static str, value: f32 },

    #[error("lifespan [{min}, {max}] must satisfy 0 <= min <= max")]
    Lifespan { min: f32, max: f32 },

    #[error("move interval must be positive, got {0} ms")]
    MoveInterval(f32),

    #[error("move duration must be non-negative, got {0} ms")]
    MoveDuration(f32),

    #[error("replenish fade must be non-negative, got {0} ms")]
    ReplenishFade(f32),

    #[error("discard display limit must be between 1 and {max}, got {0}", max = MAX_DISPLAY_LIMIT)]
    DisplayLimit(usize),

    #[error("typing speed must be positive, got {0} chars/s")]
    TypingSpeed(f32),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Asset lookup and manifest failures.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset '{0}' is not loaded")]
    Missing(String),

    #[error("failed to parse asset manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Dialogue data failures.
#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("failed to parse dialogue data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("dialogue contains no lines")]
    NoLines,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
