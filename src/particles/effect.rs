//! Generic timed-emission particle simulation.

use super::{EmitterConfig, EmitterOptions, Particle};
use crate::core::{ConfigError, SimRng};
use crate::scene::{NodeId, SceneGraph, Vec2};
use crate::stage::{Frame, Updatable};

/// Particle creation strategy.
///
/// Decides a new particle's texture and initial kinematics. The simulation
/// core handles emission timing, capacity, integration and cleanup.
///
/// Any `FnMut(&EmitterConfig, &mut SimRng, &mut dyn SceneGraph) -> Particle`
/// is an emitter, which keeps ad-hoc effects and tests short.
pub trait Emitter {
    /// Create one particle. The returned node is parented under the effect
    /// by the caller.
    fn create_particle(
        &mut self,
        config: &EmitterConfig,
        rng: &mut SimRng,
        scene: &mut dyn SceneGraph,
    ) -> Particle;

    /// Configuration that unset options fall back to.
    fn base_config(&self) -> EmitterConfig {
        EmitterConfig::default()
    }
}

impl<F> Emitter for F
where
    F: FnMut(&EmitterConfig, &mut SimRng, &mut dyn SceneGraph) -> Particle,
{
    fn create_particle(
        &mut self,
        config: &EmitterConfig,
        rng: &mut SimRng,
        scene: &mut dyn SceneGraph,
    ) -> Particle {
        self(config, rng, scene)
    }
}

/// A particle effect: an emitter plus the particles it has spawned.
///
/// Particles are children of the effect's node, so moving the effect moves
/// the whole plume. `start`/`stop` only gate emission; live particles always
/// run out their lifetime.
#[derive(Debug)]
pub struct ParticleEffect<E> {
    node: NodeId,
    particles: Vec<Particle>,
    emit_counter: f32,
    emitting: bool,
    config: EmitterConfig,
    emitter: E,
    rng: SimRng,
}

impl<E: Emitter> ParticleEffect<E> {
    /// Create an emitting effect with a detached container node.
    pub fn new(emitter: E, config: EmitterConfig, rng: SimRng, scene: &mut dyn SceneGraph) -> Self {
        Self {
            node: scene.create_node(None),
            particles: Vec::new(),
            emit_counter: 0.0,
            emitting: true,
            config,
            emitter,
            rng,
        }
    }

    /// Create an effect from partial options layered over the emitter's
    /// base configuration.
    pub fn with_options(
        emitter: E,
        options: &EmitterOptions,
        rng: SimRng,
        scene: &mut dyn SceneGraph,
    ) -> Result<Self, ConfigError> {
        let config = options.resolve_over(&emitter.base_config())?;
        Ok(Self::new(emitter, config, rng, scene))
    }

    /// Replace the configuration. Unset options take the emitter's base
    /// values. Live particles keep the kinematics they spawned with.
    pub fn configure(&mut self, options: &EmitterOptions) -> Result<(), ConfigError> {
        self.config = options.resolve_over(&self.emitter.base_config())?;
        Ok(())
    }

    pub fn start(&mut self) {
        self.emitting = true;
    }

    pub fn stop(&mut self) {
        self.emitting = false;
    }

    #[must_use]
    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    /// Advance by `delta_ms`: emit, integrate, and retire dead particles.
    pub fn advance(&mut self, delta_ms: f32, scene: &mut dyn SceneGraph) {
        let dt = delta_ms.max(0.0) / 1000.0;

        if self.emitting {
            self.emit_counter += dt;
            while self.emit_counter >= self.config.emit_rate
                && self.particles.len() < self.config.max_particles
            {
                self.emit_counter -= self.config.emit_rate;
                let particle = self.emitter.create_particle(&self.config, &mut self.rng, scene);
                scene.add_child(self.node, particle.node);
                particle.sync(scene);
                self.particles.push(particle);
            }
            if self.emit_counter >= self.config.emit_rate {
                log::trace!("{} at capacity ({} particles)", self.node, self.particles.len());
            }
        }

        let gravity = self.config.gravity;
        self.particles.retain_mut(|particle| {
            let alive = particle.advance(dt, gravity);
            if alive {
                particle.sync(scene);
            } else {
                scene.destroy_node(particle.node);
            }
            alive
        });
    }

    /// The container node; attach it wherever the effect should appear.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    #[must_use]
    pub fn emitter(&self) -> &E {
        &self.emitter
    }

    #[must_use]
    pub fn position(&self, scene: &dyn SceneGraph) -> Vec2 {
        scene.position(self.node)
    }

    pub fn set_position(&self, scene: &mut dyn SceneGraph, position: Vec2) {
        scene.set_position(self.node, position);
    }

    /// Tear down the container and every live particle.
    pub fn destroy(self, scene: &mut dyn SceneGraph) {
        scene.destroy_node(self.node);
    }
}

impl<E: Emitter> Updatable for ParticleEffect<E> {
    fn update(&mut self, delta_ms: f32, frame: &mut Frame<'_>) {
        self.advance(delta_ms, frame.scene);
    }
}
