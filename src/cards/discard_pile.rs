//! The receiving pile.

use std::collections::VecDeque;

use super::{Card, Deck, DeckState};
use crate::core::SimRng;
use crate::scene::{NodeId, Property, SceneGraph};
use crate::stage::{Frame, Updatable};

pub const DISCARD_PILE_TITLE: &str = "Discard Pile";

/// Collects dispatched cards, keeping only the newest few on screen.
///
/// The count is every card ever received; eviction only drops visuals.
#[derive(Debug)]
pub struct DiscardPile {
    node: NodeId,
    count: u32,
    cards: VecDeque<Card>,
    display_limit: usize,
    rng: SimRng,
}

impl DiscardPile {
    /// An empty pile with a detached container node.
    pub fn new(display_limit: usize, rng: SimRng, scene: &mut dyn SceneGraph) -> Self {
        Self {
            node: scene.create_node(None),
            count: 0,
            cards: VecDeque::new(),
            display_limit,
            rng,
        }
    }

    /// Cards on screen, oldest first.
    pub fn displayed(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn display_len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn display_limit(&self) -> usize {
        self.display_limit
    }

    /// Tear down the pile and the cards it shows.
    pub fn destroy(self, scene: &mut dyn SceneGraph) {
        scene.destroy_node(self.node);
    }
}

impl Deck for DiscardPile {
    fn add_card(&mut self, scene: &mut dyn SceneGraph) {
        let card = Card::new(scene, &mut self.rng);
        self.receive_card(card, scene);
    }

    fn receive_card(&mut self, card: Card, scene: &mut dyn SceneGraph) {
        // Arrival order is draw order
        scene.set_z_index(card.node(), 0);
        scene.add_child(self.node, card.node());
        scene.set(card.node(), Property::X, 0.0);
        scene.set(card.node(), Property::Y, 0.0);
        scene.set(card.node(), Property::Alpha, 1.0);
        self.cards.push_back(card);

        while self.cards.len() > self.display_limit {
            if let Some(oldest) = self.cards.pop_front() {
                log::trace!("{} evicting {}", DISCARD_PILE_TITLE, oldest.node());
                oldest.destroy(scene);
            }
        }

        self.count += 1;
    }

    fn count(&self) -> u32 {
        self.count
    }

    fn node(&self) -> NodeId {
        self.node
    }

    fn render_state(&self) -> DeckState {
        DeckState {
            title: DISCARD_PILE_TITLE.to_string(),
            count: self.count,
            has_top: !self.cards.is_empty(),
            has_bottom: self.cards.len() > 1,
            displayed: self.cards.len(),
        }
    }
}

impl Updatable for DiscardPile {
    /// The discard pile only reacts to hand-offs.
    fn update(&mut self, _delta_ms: f32, _frame: &mut Frame<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::MemoryScene;

    fn pile(scene: &mut MemoryScene) -> DiscardPile {
        DiscardPile::new(5, SimRng::new(2), scene)
    }

    #[test]
    fn test_receive_positions_card() {
        let mut scene = MemoryScene::new();
        let mut rng = SimRng::new(1);
        let mut discard = pile(&mut scene);

        let card = Card::new(&mut scene, &mut rng);
        let node = card.node();
        scene.set(node, Property::X, 300.0);
        scene.set(node, Property::Alpha, 0.5);
        discard.receive_card(card, &mut scene);

        assert_eq!(scene.parent(node), Some(discard.node()));
        assert_eq!(scene.position(node).x, 0.0);
        assert_eq!(scene.get(node, Property::Alpha), 1.0);
        assert_eq!(discard.count(), 1);
        assert_eq!(discard.label(), "Discard Pile\n1 cards");
    }

    #[test]
    fn test_eviction_keeps_count() {
        let mut scene = MemoryScene::new();
        let mut rng = SimRng::new(1);
        let mut discard = pile(&mut scene);

        let first = Card::new(&mut scene, &mut rng);
        let first_node = first.node();
        discard.receive_card(first, &mut scene);
        for _ in 0..5 {
            let card = Card::new(&mut scene, &mut rng);
            discard.receive_card(card, &mut scene);
        }

        assert_eq!(discard.count(), 6);
        assert_eq!(discard.display_len(), 5);
        assert!(discard.displayed().all(|c| c.node() != first_node));
        assert!(!scene.contains(first_node));
    }

    #[test]
    fn test_count_form_materializes() {
        let mut scene = MemoryScene::new();
        let mut discard = pile(&mut scene);

        discard.add_card(&mut scene);
        discard.add_card(&mut scene);

        let state = discard.render_state();
        assert_eq!(state.count, 2);
        assert_eq!(state.displayed, 2);
        assert!(state.has_top && state.has_bottom);
        assert_eq!(scene.children(discard.node()).len(), 2);
    }

    #[test]
    fn test_large_limit_allocates_lazily() {
        let mut scene = MemoryScene::new();
        let mut discard = DiscardPile::new(usize::MAX, SimRng::new(3), &mut scene);

        discard.add_card(&mut scene);

        assert_eq!(discard.display_limit(), usize::MAX);
        assert_eq!(discard.display_len(), 1);
    }

    #[test]
    fn test_newest_draws_on_top() {
        let mut scene = MemoryScene::new();
        let mut discard = pile(&mut scene);
        for _ in 0..3 {
            discard.add_card(&mut scene);
        }

        let newest = discard.displayed().last().unwrap().node();
        assert_eq!(scene.children(discard.node()).last(), Some(&newest));
    }
}
