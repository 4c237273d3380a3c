//! Property tweening driven by the frame clock.
//!
//! A tween interpolates a handful of node properties from the values they
//! have on its first step to target values, over a duration in
//! milliseconds. When it finishes, its completion closure runs with the
//! scene and the tweener, so multi-stage animations chain by starting the
//! next stage from the closure.
//!
//! ## Example
//!
//! ```
//! use softgames_showcase::scene::{MemoryScene, Property, SceneGraph};
//! use softgames_showcase::tween::{Easing, Tweener};
//!
//! let mut scene = MemoryScene::new();
//! let mut tweens = Tweener::new();
//! let node = scene.create_node(None);
//!
//! tweens
//!     .tween(node, 100.0, Easing::Linear)
//!     .to(Property::X, 50.0)
//!     .on_complete(move |scene, _| scene.set(node, Property::Alpha, 0.0))
//!     .start();
//!
//! tweens.step(50.0, &mut scene);
//! assert_eq!(scene.get(node, Property::X), 25.0);
//!
//! tweens.step(50.0, &mut scene);
//! assert_eq!(scene.get(node, Property::X), 50.0);
//! assert_eq!(scene.get(node, Property::Alpha), 0.0);
//! ```

mod easing;

pub use easing::Easing;

use smallvec::SmallVec;

use crate::scene::{NodeId, Property, SceneGraph};

/// Identifier of a started tween.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u64);

/// Closure run once when a tween reaches its duration.
pub type Completion = Box<dyn FnOnce(&mut dyn SceneGraph, &mut Tweener)>;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Channel {
    property: Property,
    from: Option<f32>,
    to: f32,
}

/// A running tween.
pub struct Tween {
    id: TweenId,
    target: NodeId,
    channels: SmallVec<[Channel; 3]>,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
    on_complete: Option<Completion>,
}

impl Tween {
    #[must_use]
    pub fn id(&self) -> TweenId {
        self.id
    }

    #[must_use]
    pub fn target(&self) -> NodeId {
        self.target
    }

    #[must_use]
    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// The value this tween drives `property` towards, if it drives it.
    #[must_use]
    pub fn end_value(&self, property: Property) -> Option<f32> {
        self.channels.iter().find(|c| c.property == property).map(|c| c.to)
    }

    fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).min(1.0)
        }
    }

    fn apply(&mut self, scene: &mut dyn SceneGraph) {
        let progress = self.progress();
        let eased = self.easing.apply(progress);
        let target = self.target;
        for channel in &mut self.channels {
            let from = match channel.from {
                Some(from) => from,
                None => {
                    let from = scene.get(target, channel.property);
                    channel.from = Some(from);
                    from
                }
            };
            let value = if progress >= 1.0 {
                channel.to
            } else {
                from + (channel.to - from) * eased
            };
            scene.set(target, channel.property, value);
        }
    }
}

impl std::fmt::Debug for Tween {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("channels", &self.channels)
            .field("duration_ms", &self.duration_ms)
            .field("elapsed_ms", &self.elapsed_ms)
            .field("easing", &self.easing)
            .field("has_completion", &self.on_complete.is_some())
            .finish()
    }
}

/// Builder returned by [`Tweener::tween`].
#[must_use = "a tween does nothing until started"]
pub struct TweenBuilder<'a> {
    tweener: &'a mut Tweener,
    tween: Tween,
}

impl<'a> TweenBuilder<'a> {
    /// Drive `property` to `value`.
    pub fn to(mut self, property: Property, value: f32) -> Self {
        self.tween.channels.retain(|c| c.property != property);
        self.tween.channels.push(Channel { property, from: None, to: value });
        self
    }

    pub fn on_complete<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut dyn SceneGraph, &mut Tweener) + 'static,
    {
        self.tween.on_complete = Some(Box::new(f));
        self
    }

    /// Register the tween. Start values are sampled on its first step.
    pub fn start(self) -> TweenId {
        let id = self.tween.id;
        self.tweener.active.push(self.tween);
        id
    }
}

/// Owns and advances every running tween.
#[derive(Debug, Default)]
pub struct Tweener {
    active: Vec<Tween>,
    next_id: u64,
}

impl Tweener {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin building a tween on `target`.
    pub fn tween(&mut self, target: NodeId, duration_ms: f32, easing: Easing) -> TweenBuilder<'_> {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        TweenBuilder {
            tweener: self,
            tween: Tween {
                id,
                target,
                channels: SmallVec::new(),
                duration_ms: duration_ms.max(0.0),
                elapsed_ms: 0.0,
                easing,
                on_complete: None,
            },
        }
    }

    /// Advance every tween by `delta_ms`, then run the completions of the
    /// ones that finished, in start order. Tweens started by a completion
    /// first advance on the next step.
    pub fn step(&mut self, delta_ms: f32, scene: &mut dyn SceneGraph) {
        let delta_ms = delta_ms.max(0.0);
        self.active.retain(|t| scene.contains(t.target));

        for tween in &mut self.active {
            tween.elapsed_ms += delta_ms;
            tween.apply(scene);
        }

        let (finished, running): (Vec<Tween>, Vec<Tween>) =
            std::mem::take(&mut self.active).into_iter().partition(|t| t.progress() >= 1.0);
        self.active = running;

        for mut tween in finished {
            if let Some(on_complete) = tween.on_complete.take() {
                on_complete(scene, self);
            }
        }
    }

    /// Cancel a tween without running its completion.
    ///
    /// Returns `false` if it already finished or never existed.
    pub fn stop(&mut self, id: TweenId) -> bool {
        let before = self.active.len();
        self.active.retain(|t| t.id != id);
        self.active.len() != before
    }

    #[must_use]
    pub fn is_active(&self, id: TweenId) -> bool {
        self.active.iter().any(|t| t.id == id)
    }

    #[must_use]
    pub fn get(&self, id: TweenId) -> Option<&Tween> {
        self.active.iter().find(|t| t.id == id)
    }

    /// Running tweens in start order.
    pub fn active(&self) -> impl Iterator<Item = &Tween> {
        self.active.iter()
    }

    /// Running tweens that drive `node`.
    pub fn targeting(&self, node: NodeId) -> impl Iterator<Item = &Tween> {
        self.active.iter().filter(move |t| t.target == node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_start_value_sampled_on_first_step() {
        let mut scene = MemoryScene::new();
        let mut tweens = Tweener::new();
        let node = scene.create_node(None);

        tweens.tween(node, 100.0, Easing::Linear).to(Property::X, 100.0).start();
        // Moved after start but before the first step
        scene.set(node, Property::X, 50.0);

        tweens.step(50.0, &mut scene);
        assert_eq!(scene.get(node, Property::X), 75.0);
    }

    #[test]
    fn test_completion_runs_once() {
        let mut scene = MemoryScene::new();
        let mut tweens = Tweener::new();
        let node = scene.create_node(None);
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        tweens
            .tween(node, 10.0, Easing::QuadraticOut)
            .to(Property::Alpha, 0.0)
            .on_complete(move |_, _| counter.set(counter.get() + 1))
            .start();

        tweens.step(5.0, &mut scene);
        assert_eq!(calls.get(), 0);

        tweens.step(100.0, &mut scene);
        tweens.step(100.0, &mut scene);
        assert_eq!(calls.get(), 1);
        assert!(tweens.is_empty());
        assert_eq!(scene.get(node, Property::Alpha), 0.0);
    }

    #[test]
    fn test_chained_tween_starts_next_step() {
        let mut scene = MemoryScene::new();
        let mut tweens = Tweener::new();
        let node = scene.create_node(None);

        tweens
            .tween(node, 10.0, Easing::Linear)
            .to(Property::ScaleX, 0.0)
            .on_complete(move |_, tweens| {
                tweens.tween(node, 10.0, Easing::Linear).to(Property::ScaleX, 1.0).start();
            })
            .start();

        tweens.step(10.0, &mut scene);
        assert_eq!(scene.get(node, Property::ScaleX), 0.0);
        assert_eq!(tweens.len(), 1);

        tweens.step(5.0, &mut scene);
        assert_eq!(scene.get(node, Property::ScaleX), 0.5);

        tweens.step(5.0, &mut scene);
        assert_eq!(scene.get(node, Property::ScaleX), 1.0);
        assert!(tweens.is_empty());
    }

    #[test]
    fn test_stop_skips_completion() {
        let mut scene = MemoryScene::new();
        let mut tweens = Tweener::new();
        let node = scene.create_node(None);
        let done = Rc::new(Cell::new(false));

        let flag = done.clone();
        let id = tweens
            .tween(node, 10.0, Easing::Linear)
            .to(Property::X, 10.0)
            .on_complete(move |_, _| flag.set(true))
            .start();

        assert!(tweens.stop(id));
        assert!(!tweens.stop(id));
        tweens.step(20.0, &mut scene);

        assert!(!done.get());
        assert_eq!(scene.get(node, Property::X), 0.0);
    }

    #[test]
    fn test_destroyed_target_drops_tween() {
        let mut scene = MemoryScene::new();
        let mut tweens = Tweener::new();
        let node = scene.create_node(None);

        let id = tweens.tween(node, 10.0, Easing::Linear).to(Property::X, 10.0).start();
        scene.destroy_node(node);
        tweens.step(1.0, &mut scene);

        assert!(!tweens.is_active(id));
    }

    #[test]
    fn test_zero_duration_finishes_on_first_step() {
        let mut scene = MemoryScene::new();
        let mut tweens = Tweener::new();
        let node = scene.create_node(None);

        tweens.tween(node, 0.0, Easing::BounceOut).to(Property::Y, -40.0).start();
        tweens.step(0.0, &mut scene);

        assert_eq!(scene.get(node, Property::Y), -40.0);
        assert!(tweens.is_empty());
    }

    #[test]
    fn test_end_value_inspection() {
        let mut tweens = Tweener::new();
        let node = NodeId(3);

        let id = tweens
            .tween(node, 2000.0, Easing::QuadraticOut)
            .to(Property::X, 10.0)
            .to(Property::Y, 20.0)
            .to(Property::X, 30.0)
            .start();

        let tween = tweens.get(id).unwrap();
        assert_eq!(tween.end_value(Property::X), Some(30.0));
        assert_eq!(tween.end_value(Property::Y), Some(20.0));
        assert_eq!(tween.end_value(Property::Alpha), None);
        assert_eq!(tweens.targeting(node).count(), 1);
    }
}
