//! A fire that trails the pointer.

use std::cell::RefCell;
use std::rc::Rc;

use super::{attach_container, Screen, Viewport};
use crate::audio::AudioSink;
use crate::core::{ConfigError, SimRng};
use crate::particles::{EmitterOptions, Fire, FireTextures, Follow, ParticleEffect};
use crate::scene::{NodeId, SceneGraph, Vec2};
use crate::stage::{Frame, Stage, Updatable, UpdateHandle};

const FIRE_AT: (f32, f32) = (0.5, 0.3);

/// The fire plus the pointer it chases.
#[derive(Debug)]
struct Flame {
    effect: ParticleEffect<Fire>,
    follow: Follow,
}

impl Updatable for Flame {
    fn update(&mut self, delta_ms: f32, frame: &mut Frame<'_>) {
        let position = self.effect.position(frame.scene);
        self.effect.set_position(frame.scene, self.follow.step(position));
        self.effect.advance(delta_ms, frame.scene);
    }
}

struct Shown {
    container: NodeId,
    flame: Rc<RefCell<Flame>>,
    handle: UpdateHandle,
}

pub struct PhoenixFlame {
    textures: FireTextures,
    options: EmitterOptions,
    rng: SimRng,
    shown: Option<Shown>,
}

impl PhoenixFlame {
    /// `options` are layered over the fire's own defaults.
    #[must_use]
    pub fn new(textures: FireTextures, options: EmitterOptions, rng: SimRng) -> Self {
        Self {
            textures,
            options,
            rng,
            shown: None,
        }
    }

    /// Point the fire at a new pointer position, in screen px.
    pub fn pointer_move(&mut self, position: Vec2) {
        if let Some(shown) = &self.shown {
            shown.flame.borrow_mut().follow.set_target(position);
        }
    }

    #[must_use]
    pub fn fire_position<S: SceneGraph, A: AudioSink>(&self, stage: &Stage<S, A>) -> Option<Vec2> {
        self.shown
            .as_ref()
            .map(|s| s.flame.borrow().effect.position(&stage.scene))
    }

    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.shown
            .as_ref()
            .map_or(0, |s| s.flame.borrow().effect.particle_count())
    }

    #[must_use]
    pub fn is_emitting(&self) -> bool {
        self.shown
            .as_ref()
            .is_some_and(|s| s.flame.borrow().effect.is_emitting())
    }
}

impl Screen for PhoenixFlame {
    type Error = ConfigError;

    fn show<S: SceneGraph, A: AudioSink>(
        &mut self,
        stage: &mut Stage<S, A>,
        viewport: Viewport,
    ) -> Result<(), ConfigError> {
        if self.shown.is_some() {
            return Ok(());
        }

        let scene: &mut dyn SceneGraph = &mut stage.scene;
        let mut effect = Fire::effect(self.textures.clone(), &self.options, self.rng.fork(), scene)?;
        let container = attach_container(scene);
        scene.add_child(container, effect.node());

        let origin = viewport.at(FIRE_AT.0, FIRE_AT.1);
        effect.set_position(scene, origin);
        effect.start();

        // Until the pointer moves the fire holds its spot.
        let flame = Rc::new(RefCell::new(Flame {
            effect,
            follow: Follow::new(origin),
        }));
        let handle = stage.register(Rc::clone(&flame));
        log::debug!("Phoenix Flame shown at ({:.0}, {:.0})", origin.x, origin.y);

        self.shown = Some(Shown {
            container,
            flame,
            handle,
        });
        Ok(())
    }

    fn hide<S: SceneGraph, A: AudioSink>(&mut self, stage: &mut Stage<S, A>) {
        let Some(shown) = self.shown.take() else {
            return;
        };
        stage.unregister(shown.handle);
        shown.flame.borrow_mut().effect.stop();
        // Particles are children of the effect node, itself under the container
        stage.scene.destroy_node(shown.container);
        log::debug!("Phoenix Flame hidden");
    }

    fn is_visible(&self) -> bool {
        self.shown.is_some()
    }
}
