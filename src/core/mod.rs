//! Core types shared by every scene: RNG, configuration, errors.
//!
//! Nothing here knows about particles or cards specifically; scenes receive
//! these as explicit handles rather than reaching for globals.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{DeckConfig, DialogueConfig, ShowcaseConfig, TimerPolicy, MAX_DISPLAY_LIMIT};
pub use error::{AssetError, ConfigError, DialogueError};
pub use rng::SimRng;
