//! Particle effects.
//!
//! `ParticleEffect` is the simulation core: it emits on a fixed cadence up
//! to a capacity, integrates every particle, fades it out over its life and
//! retires it. What a particle looks like at birth is decided by an
//! `Emitter`; `Fire` is the showcase's emitter. `Follow` eases an effect
//! towards the pointer.
//!
//! ## Example
//!
//! ```
//! use softgames_showcase::core::SimRng;
//! use softgames_showcase::particles::{EmitterOptions, Fire, FireTextures};
//! use softgames_showcase::scene::{MemoryScene, SceneGraph};
//!
//! let mut scene = MemoryScene::new();
//! let textures = FireTextures::from_frames(vec!["fire_00.png".into()]);
//! let mut fire = Fire::effect(textures, &EmitterOptions::new(), SimRng::new(1), &mut scene).unwrap();
//!
//! for _ in 0..60 {
//!     fire.advance(1000.0 / 60.0, &mut scene);
//! }
//! assert!(fire.particle_count() <= fire.config().max_particles);
//! ```

mod config;
mod effect;
mod fire;
mod follow;
mod particle;

pub use config::{EmitterConfig, EmitterOptions};
pub use effect::{Emitter, ParticleEffect};
pub use fire::{Fire, FireTextures};
pub use follow::{Follow, FOLLOW_LERP};
pub use particle::Particle;
