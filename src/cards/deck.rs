//! Behaviour shared by the draw and discard piles.

use serde::{Deserialize, Serialize};

use super::Card;
use crate::core::SimRng;
use crate::scene::{NodeId, Property, SceneGraph};
use crate::stage::Updatable;

/// Max rotation jitter of the top card, in radians (full width).
const TOP_ROTATION_JITTER: f32 = 0.1;

/// A pile of cards with a display illusion over an integer count.
///
/// The count is authoritative; the cards on screen only suggest it.
pub trait Deck: Updatable {
    /// Count form: one more card in the pile. Materializes whatever the
    /// display is missing.
    fn add_card(&mut self, scene: &mut dyn SceneGraph);

    /// Hand-off form: take ownership of a fully formed card from elsewhere.
    fn receive_card(&mut self, card: Card, scene: &mut dyn SceneGraph);

    /// Logical number of cards in the pile.
    fn count(&self) -> u32;

    /// The pile's container node.
    fn node(&self) -> NodeId;

    fn render_state(&self) -> DeckState;

    /// The caption under the pile.
    fn label(&self) -> String {
        self.render_state().label()
    }
}

/// What a pile currently shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckState {
    pub title: String,
    pub count: u32,
    pub has_top: bool,
    pub has_bottom: bool,
    /// Cards materialized on screen.
    pub displayed: usize,
}

impl DeckState {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}\n{} cards", self.title, self.count)
    }
}

/// Draw pile dispatch state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileState {
    /// Waiting for the next interval.
    #[default]
    Idle,
    /// At least one card is in flight.
    Dispatching,
}

/// The two-slot stack a pile draws: a top card, and a peek-ahead card
/// behind it while more than one card remains.
#[derive(Debug)]
pub(crate) struct CardStack {
    pub node: NodeId,
    pub top: Option<Card>,
    pub bottom: Option<Card>,
    pub spacing: f32,
}

impl CardStack {
    pub fn new(scene: &mut dyn SceneGraph, spacing: f32) -> Self {
        Self {
            node: scene.create_node(None),
            top: None,
            bottom: None,
            spacing,
        }
    }

    /// Fill the slots `count` calls for.
    pub fn refresh(&mut self, count: u32, scene: &mut dyn SceneGraph, rng: &mut SimRng) {
        if count > 0 && self.top.is_none() {
            let card = Card::new(scene, rng);
            self.set_top(card, scene, rng);
        }
        if count > 1 && self.bottom.is_none() {
            let card = Card::new(scene, rng);
            self.set_bottom(card, scene);
        }
    }

    /// Put `card` in the top slot: raised by the spacing, slightly askew,
    /// drawn above the bottom card.
    pub fn set_top(&mut self, card: Card, scene: &mut dyn SceneGraph, rng: &mut SimRng) {
        scene.add_child(self.node, card.node());
        scene.set(card.node(), Property::X, 0.0);
        scene.set(card.node(), Property::Y, -self.spacing);
        scene.set(card.node(), Property::Rotation, rng.jitter(TOP_ROTATION_JITTER));
        scene.set_z_index(card.node(), 1);
        if let Some(previous) = self.top.replace(card) {
            previous.destroy(scene);
        }
    }

    pub fn set_bottom(&mut self, card: Card, scene: &mut dyn SceneGraph) {
        scene.add_child(self.node, card.node());
        scene.set(card.node(), Property::X, 0.0);
        scene.set(card.node(), Property::Y, 0.0);
        scene.set(card.node(), Property::Rotation, 0.0);
        scene.set_z_index(card.node(), 0);
        if let Some(previous) = self.bottom.replace(card) {
            previous.destroy(scene);
        }
    }

    /// Remove the top card and move the bottom card up into its place.
    pub fn take_top(&mut self, scene: &mut dyn SceneGraph, rng: &mut SimRng) -> Option<Card> {
        let card = self.top.take()?;
        if let Some(bottom) = self.bottom.take() {
            self.set_top(bottom, scene, rng);
        }
        Some(card)
    }

    pub fn displayed(&self) -> usize {
        usize::from(self.top.is_some()) + usize::from(self.bottom.is_some())
    }

    /// Tear down the container and the cards in it.
    pub fn destroy(self, scene: &mut dyn SceneGraph) {
        scene.destroy_node(self.node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;

    #[test]
    fn test_label() {
        let state = DeckState {
            title: "Draw Pile".into(),
            count: 144,
            has_top: true,
            has_bottom: true,
            displayed: 2,
        };
        assert_eq!(state.label(), "Draw Pile\n144 cards");
    }

    #[test]
    fn test_refresh_fills_slots_by_count() {
        let mut scene = MemoryScene::new();
        let mut rng = SimRng::new(1);
        let mut stack = CardStack::new(&mut scene, 20.0);

        stack.refresh(0, &mut scene, &mut rng);
        assert_eq!(stack.displayed(), 0);

        stack.refresh(1, &mut scene, &mut rng);
        assert!(stack.top.is_some() && stack.bottom.is_none());

        stack.refresh(7, &mut scene, &mut rng);
        assert_eq!(stack.displayed(), 2);

        let top = stack.top.as_ref().unwrap().node();
        let bottom = stack.bottom.as_ref().unwrap().node();
        assert_eq!(scene.get(top, Property::Y), -20.0);
        assert!(scene.get(top, Property::Rotation).abs() <= 0.05);
        assert_eq!(scene.z_index(top), 1);
        assert_eq!(scene.get(bottom, Property::Y), 0.0);
        assert_eq!(scene.z_index(bottom), 0);
        // Top draws last
        assert_eq!(scene.children(stack.node), &[bottom, top]);
    }

    #[test]
    fn test_take_top_promotes_bottom() {
        let mut scene = MemoryScene::new();
        let mut rng = SimRng::new(1);
        let mut stack = CardStack::new(&mut scene, 20.0);
        stack.refresh(2, &mut scene, &mut rng);
        let bottom = stack.bottom.as_ref().unwrap().node();

        let taken = stack.take_top(&mut scene, &mut rng).unwrap();
        assert_ne!(taken.node(), bottom);
        assert_eq!(stack.top.as_ref().unwrap().node(), bottom);
        assert!(stack.bottom.is_none());
        assert_eq!(scene.get(bottom, Property::Y), -20.0);
        assert_eq!(scene.z_index(bottom), 1);

        stack.take_top(&mut scene, &mut rng).unwrap();
        assert!(stack.take_top(&mut scene, &mut rng).is_none());
    }
}
