//! Fire: an upward, shrinking flipbook plume.

use std::f32::consts::FRAC_PI_2;

use super::{Emitter, EmitterConfig, EmitterOptions, Particle, ParticleEffect};
use crate::assets::{fire_frame_alias, AssetCatalog, FIRE_FRAME_COUNT};
use crate::core::{AssetError, ConfigError, SimRng};
use crate::scene::{SceneGraph, Vec2};

/// Spawn area half-extents around the effect origin, in px.
const SPAWN_SPREAD: Vec2 = Vec2::new(20.0, 10.0);
/// Initial speed range in px/s.
const SPEED: [f32; 2] = [50.0, 100.0];
/// Spread of the launch angle around straight up, in radians.
const ANGLE_SPREAD: f32 = 0.5;
/// Start scale is multiplied by a factor in this range.
const SCALE_JITTER: [f32; 2] = [0.8, 1.2];

/// The flipbook frames a fire particle picks from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FireTextures {
    frames: Vec<String>,
}

impl FireTextures {
    /// All fire frames, checked against the catalog.
    pub fn resolve(catalog: &dyn AssetCatalog) -> Result<Self, AssetError> {
        let frames = (0..FIRE_FRAME_COUNT).map(fire_frame_alias).collect::<Vec<_>>();
        for frame in &frames {
            catalog.require(frame)?;
        }
        Ok(Self { frames })
    }

    /// An explicit frame list. An empty list draws untextured particles.
    #[must_use]
    pub fn from_frames(frames: Vec<String>) -> Self {
        Self { frames }
    }

    #[must_use]
    pub fn frames(&self) -> &[String] {
        &self.frames
    }
}

/// Fire particle strategy.
#[derive(Clone, Debug)]
pub struct Fire {
    textures: FireTextures,
}

impl Fire {
    #[must_use]
    pub fn new(textures: FireTextures) -> Self {
        Self { textures }
    }

    /// Fire's own defaults: a dense, short-lived, rising plume.
    #[must_use]
    pub fn defaults() -> EmitterConfig {
        EmitterConfig {
            max_particles: 50,
            emit_rate: 0.02,
            gravity: -150.0,
            start_scale: 0.5,
            end_scale: 0.0,
            lifespan: [0.5, 1.0],
        }
    }

    /// Build a fire effect with `options` layered over [`Fire::defaults`].
    pub fn effect(
        textures: FireTextures,
        options: &EmitterOptions,
        rng: SimRng,
        scene: &mut dyn SceneGraph,
    ) -> Result<ParticleEffect<Fire>, ConfigError> {
        ParticleEffect::with_options(Fire::new(textures), options, rng, scene)
    }
}

impl Emitter for Fire {
    fn create_particle(
        &mut self,
        config: &EmitterConfig,
        rng: &mut SimRng,
        scene: &mut dyn SceneGraph,
    ) -> Particle {
        let texture = rng.choose(&self.textures.frames).map(String::as_str);
        let node = scene.create_node(texture);

        let position = Vec2::new(rng.jitter(SPAWN_SPREAD.x), rng.jitter(SPAWN_SPREAD.y));

        let speed = rng.range_f32(SPEED[0], SPEED[1]);
        let angle = -FRAC_PI_2 + rng.jitter(ANGLE_SPREAD);
        let velocity = Vec2::new(angle.cos() * speed, angle.sin() * speed);

        let [min_life, max_life] = config.lifespan;
        let lifetime = rng.range_f32(min_life, max_life);

        let start_scale = config.start_scale * rng.range_f32(SCALE_JITTER[0], SCALE_JITTER[1]);

        Particle::new(node, position, velocity, lifetime, start_scale, config.end_scale)
    }

    fn base_config(&self) -> EmitterConfig {
        Fire::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetManifest, MemoryCatalog};
    use crate::scene::MemoryScene;

    fn textures() -> FireTextures {
        FireTextures::resolve(&MemoryCatalog::fully_loaded(&AssetManifest::showcase())).unwrap()
    }

    #[test]
    fn test_resolve_requires_every_frame() {
        assert_eq!(textures().frames().len(), 64);

        let mut partial = MemoryCatalog::new();
        partial.mark_loaded("fire_00.png");
        assert!(matches!(
            FireTextures::resolve(&partial),
            Err(AssetError::Missing(alias)) if alias == "fire_01.png"
        ));
    }

    #[test]
    fn test_defaults_apply() {
        let mut scene = MemoryScene::new();
        let fx = Fire::effect(textures(), &EmitterOptions::new(), SimRng::new(3), &mut scene).unwrap();

        assert_eq!(fx.config(), &Fire::defaults());

        let mut scene = MemoryScene::new();
        let fx = Fire::effect(
            textures(),
            &EmitterOptions::new().with_max_particles(5),
            SimRng::new(3),
            &mut scene,
        )
        .unwrap();
        assert_eq!(fx.config().max_particles, 5);
        assert_eq!(fx.config().gravity, -150.0);
    }

    #[test]
    fn test_particle_ranges() {
        let mut scene = MemoryScene::new();
        let mut fire = Fire::new(textures());
        let config = Fire::defaults();
        let mut rng = SimRng::new(11);

        for _ in 0..200 {
            let p = fire.create_particle(&config, &mut rng, &mut scene);

            assert!(p.position.x.abs() <= 10.0 && p.position.y.abs() <= 5.0);
            let speed = (p.velocity.x.powi(2) + p.velocity.y.powi(2)).sqrt();
            assert!((50.0 - 1e-3..100.0 + 1e-3).contains(&speed));
            // Always launched upwards
            assert!(p.velocity.y < 0.0);
            assert!((0.5..1.0).contains(&p.max_life));
            assert!((0.4..0.6).contains(&p.scale));
            assert_eq!(p.alpha, 1.0);
            assert!(scene.texture(p.node).unwrap().starts_with("fire_"));

            let end = p.scale + p.scale_rate * p.max_life;
            assert!(end.abs() < 1e-5);
        }
    }

    #[test]
    fn test_untextured_frames() {
        let mut scene = MemoryScene::new();
        let mut fire = Fire::new(FireTextures::from_frames(Vec::new()));
        let p = fire.create_particle(&Fire::defaults(), &mut SimRng::new(1), &mut scene);
        assert_eq!(scene.texture(p.node), None);
    }

    #[test]
    fn test_plume_rises() {
        let mut scene = MemoryScene::new();
        let mut fx = Fire::effect(textures(), &EmitterOptions::new(), SimRng::new(5), &mut scene).unwrap();

        for _ in 0..30 {
            fx.advance(16.0, &mut scene);
        }

        assert!(fx.particle_count() > 0);
        assert!(fx.particle_count() <= 50);
        assert!(fx.particles().iter().all(|p| p.position.y < 5.0));
    }
}
