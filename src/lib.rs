//! # softgames-showcase
//!
//! Frame-driven simulation behind a small interactive showcase: a particle
//! fire, a card dealer, and a typed speech-bubble dialogue.
//!
//! ## Design Principles
//!
//! 1. **Headless core**: rendering, tweening, audio and asset loading sit
//!    behind small traits (`SceneGraph`, `AudioSink`, `AssetCatalog`) with
//!    in-memory implementations, so every scene runs and tests without a
//!    window.
//!
//! 2. **One thread, one ticker**: a `Stage` steps tweens and then every
//!    registered `Updatable` once per frame. Nothing blocks; long effects
//!    are state that the next frame advances.
//!
//! 3. **Deterministic randomness**: every random choice draws from an
//!    injected `SimRng`.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors
//! - `scene`: scene graph trait and the in-memory scene
//! - `tween`: property tweening with easing curves
//! - `audio`: sound playback trait
//! - `assets`: asset manifest, catalog and load progress
//! - `stage`: the per-frame driver
//! - `particles`: generic particle simulation and the fire emitter
//! - `cards`: cards, the draw pile and the discard pile
//! - `dialogue`: script data, layout, typewriter and player
//! - `screens`: the showcase scenes composed from the above

pub mod assets;
pub mod audio;
pub mod cards;
pub mod core;
pub mod dialogue;
pub mod particles;
pub mod scene;
pub mod screens;
pub mod stage;
pub mod tween;

// Re-export commonly used types
pub use crate::core::{
    AssetError, ConfigError, DeckConfig, DialogueConfig, DialogueError, ShowcaseConfig, SimRng,
    TimerPolicy,
};

pub use crate::scene::{MemoryScene, NodeId, Property, SceneGraph, Vec2};

pub use crate::tween::{Easing, TweenId, Tweener};

pub use crate::audio::{AudioSink, NullAudio, PlaybackParams, RecordingAudio};

pub use crate::assets::{AssetCatalog, AssetManifest, LoadProgress, MemoryCatalog};

pub use crate::stage::{Frame, Stage, Updatable, UpdateHandle};

pub use crate::particles::{Emitter, EmitterConfig, EmitterOptions, Fire, FireTextures, Follow, ParticleEffect};

pub use crate::cards::{Card, CardTextures, Deck, DeckState, DiscardPile, DrawPile};

pub use crate::dialogue::{DialogueData, DialoguePlayer, PlayerState, Typewriter};

pub use crate::screens::{AceOfShadows, MagicWords, PhoenixFlame, Screen, Viewport};
