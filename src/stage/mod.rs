//! Frame driver.
//!
//! One ticker, one thread. Every tick:
//! 1. running tweens advance and their completions fire,
//! 2. every registered `Updatable` is updated in registration order.
//!
//! Nothing blocks: a card flight or a particle's life is just state that the
//! next tick moves forward.

mod fps;

pub use fps::FpsMeter;

use std::cell::RefCell;
use std::rc::Rc;

use crate::audio::{AudioSink, NullAudio};
use crate::scene::{MemoryScene, SceneGraph};
use crate::tween::Tweener;

/// Collaborators an updatable may touch during its update.
pub struct Frame<'a> {
    pub scene: &'a mut dyn SceneGraph,
    pub tweens: &'a mut Tweener,
    pub audio: &'a mut dyn AudioSink,
}

impl<'a> Frame<'a> {
    pub fn new(
        scene: &'a mut dyn SceneGraph,
        tweens: &'a mut Tweener,
        audio: &'a mut dyn AudioSink,
    ) -> Self {
        Self { scene, tweens, audio }
    }
}

/// Something advanced once per frame.
pub trait Updatable {
    /// Advance by `delta_ms` milliseconds of simulated time.
    fn update(&mut self, delta_ms: f32, frame: &mut Frame<'_>);
}

/// Returned by [`Stage::register`]; pass to [`Stage::unregister`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UpdateHandle(u64);

/// Owns the collaborators and the update list.
pub struct Stage<S = MemoryScene, A = NullAudio> {
    pub scene: S,
    pub tweens: Tweener,
    pub audio: A,
    updatables: Vec<(UpdateHandle, Rc<RefCell<dyn Updatable>>)>,
    next_handle: u64,
    fps: FpsMeter,
    elapsed_ms: f64,
}

impl Default for Stage<MemoryScene, NullAudio> {
    fn default() -> Self {
        Self::new(MemoryScene::new(), NullAudio::default())
    }
}

impl<S: SceneGraph, A: AudioSink> Stage<S, A> {
    pub fn new(scene: S, audio: A) -> Self {
        Self {
            scene,
            tweens: Tweener::new(),
            audio,
            updatables: Vec::new(),
            next_handle: 0,
            fps: FpsMeter::new(),
            elapsed_ms: 0.0,
        }
    }

    /// Borrow the collaborators for work outside of a tick (building a
    /// scene, forwarding pointer events).
    pub fn frame(&mut self) -> Frame<'_> {
        Frame::new(&mut self.scene, &mut self.tweens, &mut self.audio)
    }

    /// Add to the end of the update order.
    pub fn register<U: Updatable + 'static>(&mut self, updatable: Rc<RefCell<U>>) -> UpdateHandle {
        let handle = UpdateHandle(self.next_handle);
        self.next_handle += 1;
        let updatable: Rc<RefCell<dyn Updatable>> = updatable;
        self.updatables.push((handle, updatable));
        handle
    }

    /// Returns `false` if the handle was not registered.
    pub fn unregister(&mut self, handle: UpdateHandle) -> bool {
        let before = self.updatables.len();
        self.updatables.retain(|(h, _)| *h != handle);
        self.updatables.len() != before
    }

    #[must_use]
    pub fn registered(&self) -> usize {
        self.updatables.len()
    }

    /// Advance everything by one frame of `delta_ms`.
    pub fn tick(&mut self, delta_ms: f32) {
        let delta_ms = delta_ms.max(0.0);
        self.fps.record(delta_ms);
        self.elapsed_ms += f64::from(delta_ms);

        self.tweens.step(delta_ms, &mut self.scene);

        let mut frame = Frame::new(&mut self.scene, &mut self.tweens, &mut self.audio);
        for (_, updatable) in &self.updatables {
            updatable.borrow_mut().update(delta_ms, &mut frame);
        }
    }

    /// Tick `frames` times at a fixed delta.
    pub fn run(&mut self, frames: usize, delta_ms: f32) {
        for _ in 0..frames {
            self.tick(delta_ms);
        }
    }

    #[must_use]
    pub fn fps(&self) -> &FpsMeter {
        &self.fps
    }

    /// Total simulated time in ms.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<(&'static str, f32)>>>,
    }

    impl Updatable for Recorder {
        fn update(&mut self, delta_ms: f32, _frame: &mut Frame<'_>) {
            self.log.borrow_mut().push((self.name, delta_ms));
        }
    }

    #[test]
    fn test_registration_order() {
        let mut stage: Stage = Stage::default();
        let log = Rc::new(RefCell::new(Vec::new()));

        for name in ["deck", "fire", "dialogue"] {
            stage.register(Rc::new(RefCell::new(Recorder { name, log: log.clone() })));
        }
        stage.tick(16.0);

        let names: Vec<_> = log.borrow().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["deck", "fire", "dialogue"]);
        assert!(log.borrow().iter().all(|(_, d)| *d == 16.0));
    }

    #[test]
    fn test_unregister() {
        let mut stage: Stage = Stage::default();
        let log = Rc::new(RefCell::new(Vec::new()));

        let a = stage.register(Rc::new(RefCell::new(Recorder { name: "a", log: log.clone() })));
        stage.register(Rc::new(RefCell::new(Recorder { name: "b", log: log.clone() })));

        assert!(stage.unregister(a));
        assert!(!stage.unregister(a));
        stage.tick(10.0);

        assert_eq!(*log.borrow(), vec![("b", 10.0)]);
        assert_eq!(stage.registered(), 1);
    }

    #[test]
    fn test_negative_delta_is_clamped() {
        let mut stage: Stage = Stage::default();
        stage.tick(-5.0);
        stage.run(3, 10.0);
        assert_eq!(stage.elapsed_ms(), 30.0);
    }
}
