//! Emitter configuration.

use serde::{Deserialize, Serialize};

use crate::core::ConfigError;

/// Validated emitter parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Upper bound on live particles.
    pub max_particles: usize,

    /// Seconds between emissions.
    pub emit_rate: f32,

    /// Vertical acceleration in px/s² (negative rises).
    pub gravity: f32,

    /// Scale at spawn.
    pub start_scale: f32,

    /// Scale reached exactly at end of life.
    pub end_scale: f32,

    /// Lifetime range `[min, max]` in seconds.
    pub lifespan: [f32; 2],
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_particles: 10,
            emit_rate: 0.1,
            gravity: 0.0,
            start_scale: 1.0,
            end_scale: 0.0,
            lifespan: [0.5, 1.5],
        }
    }
}

impl EmitterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_particles == 0 {
            return Err(ConfigError::MaxParticles);
        }
        if !(self.emit_rate.is_finite() && self.emit_rate > 0.0) {
            return Err(ConfigError::EmitRate(self.emit_rate));
        }
        for (name, value) in [("startScale", self.start_scale), ("endScale", self.end_scale)] {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeScale { name, value });
            }
        }
        let [min, max] = self.lifespan;
        if !(min >= 0.0 && min <= max) {
            return Err(ConfigError::Lifespan { min, max });
        }
        Ok(())
    }
}

/// Partial emitter options. Unset fields fall back to a base config.
///
/// Field names follow the JSON shape used by the front end
/// (`maxParticles`, `emitRate`, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmitterOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_particles: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emit_rate: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_scale: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<[f32; 2]>,
}

impl EmitterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_particles(mut self, max: usize) -> Self {
        self.max_particles = Some(max);
        self
    }

    #[must_use]
    pub fn with_emit_rate(mut self, seconds: f32) -> Self {
        self.emit_rate = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = Some(gravity);
        self
    }

    #[must_use]
    pub fn with_scale(mut self, start: f32, end: f32) -> Self {
        self.start_scale = Some(start);
        self.end_scale = Some(end);
        self
    }

    #[must_use]
    pub fn with_lifespan(mut self, min: f32, max: f32) -> Self {
        self.lifespan = Some([min, max]);
        self
    }

    /// Layer `other` on top: its set fields win.
    #[must_use]
    pub fn merged(mut self, other: &EmitterOptions) -> Self {
        self.max_particles = other.max_particles.or(self.max_particles);
        self.emit_rate = other.emit_rate.or(self.emit_rate);
        self.gravity = other.gravity.or(self.gravity);
        self.start_scale = other.start_scale.or(self.start_scale);
        self.end_scale = other.end_scale.or(self.end_scale);
        self.lifespan = other.lifespan.or(self.lifespan);
        self
    }

    /// Apply over the documented defaults and validate.
    pub fn resolve(&self) -> Result<EmitterConfig, ConfigError> {
        self.resolve_over(&EmitterConfig::default())
    }

    /// Apply over `base` and validate.
    pub fn resolve_over(&self, base: &EmitterConfig) -> Result<EmitterConfig, ConfigError> {
        let config = EmitterConfig {
            max_particles: self.max_particles.unwrap_or(base.max_particles),
            emit_rate: self.emit_rate.unwrap_or(base.emit_rate),
            gravity: self.gravity.unwrap_or(base.gravity),
            start_scale: self.start_scale.unwrap_or(base.start_scale),
            end_scale: self.end_scale.unwrap_or(base.end_scale),
            lifespan: self.lifespan.unwrap_or(base.lifespan),
        };
        config.validate()?;
        Ok(config)
    }
}
