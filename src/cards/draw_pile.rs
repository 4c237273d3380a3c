//! The dealing pile.

use std::cell::RefCell;
use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use super::deck::CardStack;
use super::{Card, Deck, DeckState, DiscardPile, PileState};
use crate::core::{ConfigError, DeckConfig, SimRng, TimerPolicy};
use crate::scene::{NodeId, Property, SceneGraph, Vec2};
use crate::stage::{Frame, Updatable};
use crate::tween::{Easing, TweenId};

pub const DRAW_PILE_TITLE: &str = "Draw Pile";

/// A card on its way to the discard pile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flight {
    /// The flying card's outer node, parented under the root.
    pub card: NodeId,
    pub tween: TweenId,
    /// Screen position of the discard pile when the card left.
    pub destination: Vec2,
}

/// Deals one card to its discard pile every move interval.
///
/// Dispatches do not wait for each other: a new card leaves on every
/// interval even while earlier ones are still flying.
#[derive(Debug)]
pub struct DrawPile {
    stack: CardStack,
    count: u32,
    target: Rc<RefCell<DiscardPile>>,
    move_timer: f32,
    flights: Rc<RefCell<Vec<Flight>>>,
    config: DeckConfig,
    rng: SimRng,
}

impl DrawPile {
    /// A pile of `config.initial_count` cards dealing into `target`.
    pub fn new(
        config: DeckConfig,
        target: Rc<RefCell<DiscardPile>>,
        mut rng: SimRng,
        scene: &mut dyn SceneGraph,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut stack = CardStack::new(scene, config.card_spacing);
        stack.refresh(config.initial_count, scene, &mut rng);

        Ok(Self {
            stack,
            count: config.initial_count,
            target,
            move_timer: 0.0,
            flights: Rc::new(RefCell::new(Vec::new())),
            config,
            rng,
        })
    }

    #[must_use]
    pub fn state(&self) -> PileState {
        if self.flights.borrow().is_empty() {
            PileState::Idle
        } else {
            PileState::Dispatching
        }
    }

    /// Cards currently in flight, oldest first.
    #[must_use]
    pub fn flights(&self) -> Vec<Flight> {
        self.flights.borrow().clone()
    }

    /// Time accumulated towards the next dispatch, in ms.
    #[must_use]
    pub fn move_timer(&self) -> f32 {
        self.move_timer
    }

    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    #[must_use]
    pub fn target(&self) -> &Rc<RefCell<DiscardPile>> {
        &self.target
    }

    #[must_use]
    pub fn top_card(&self) -> Option<&Card> {
        self.stack.top.as_ref()
    }

    #[must_use]
    pub fn bottom_card(&self) -> Option<&Card> {
        self.stack.bottom.as_ref()
    }

    /// Send the top card flying to the discard pile.
    ///
    /// The card is lifted to the root so the pile's transform does not
    /// affect the flight, flipped, and tweened onto the discard pile; on
    /// arrival it is handed off. Returns the flight tween, or `None` when
    /// there was nothing to send.
    pub fn dispatch(&mut self, frame: &mut Frame<'_>) -> Option<TweenId> {
        if self.count == 0 {
            log::trace!("{} is empty, skipping dispatch", DRAW_PILE_TITLE);
            return None;
        }
        let Some(mut card) = self.stack.take_top(frame.scene, &mut self.rng) else {
            log::trace!("{} has no top card, skipping dispatch", DRAW_PILE_TITLE);
            return None;
        };
        self.count -= 1;

        let node = card.node();
        frame.scene.lift_to_root(node);

        if self.count > 1 && self.stack.bottom.is_none() {
            let fresh = Card::new(frame.scene, &mut self.rng);
            let fresh_node = fresh.node();
            self.stack.set_bottom(fresh, frame.scene);
            frame.scene.set(fresh_node, Property::Alpha, 0.0);
            frame
                .tweens
                .tween(fresh_node, self.config.replenish_fade_ms, Easing::Linear)
                .to(Property::Alpha, 1.0)
                .start();
        }
        self.stack.refresh(self.count, frame.scene, &mut self.rng);

        card.flip(frame, &mut self.rng);

        let destination = frame.scene.global_position(self.target.borrow().node());
        let rotation = self.rng.jitter(FRAC_PI_2);

        let target = Rc::clone(&self.target);
        let flights = Rc::clone(&self.flights);
        let tween = frame
            .tweens
            .tween(node, self.config.move_duration_ms, Easing::QuadraticOut)
            .to(Property::X, destination.x)
            .to(Property::Y, destination.y)
            .to(Property::Rotation, rotation)
            .on_complete(move |scene, _| {
                flights.borrow_mut().retain(|f| f.card != node);
                scene.detach(node);
                let mut target = target.borrow_mut();
                target.receive_card(card, scene);
                log::debug!("{} landed on {} ({} cards)", node, target.node(), target.count());
            })
            .start();

        self.flights.borrow_mut().push(Flight { card: node, tween, destination });
        log::debug!(
            "{} dispatched {} towards ({:.0}, {:.0}), {} left",
            DRAW_PILE_TITLE,
            node,
            destination.x,
            destination.y,
            self.count
        );
        Some(tween)
    }

    /// Pointer entered the top card.
    ///
    /// Returns `false` when the pile is empty.
    pub fn pointer_over_top(&mut self, frame: &mut Frame<'_>) -> bool {
        match self.stack.top.as_mut() {
            Some(card) => {
                card.pointer_over(frame, &mut self.rng);
                true
            }
            None => false,
        }
    }

    /// Pointer left the top card.
    pub fn pointer_out_top(&mut self, frame: &mut Frame<'_>) -> bool {
        match self.stack.top.as_mut() {
            Some(card) => {
                card.pointer_out(frame, &mut self.rng);
                true
            }
            None => false,
        }
    }

    /// Destroy every card still in flight. Their tweens go with the nodes,
    /// so none of them lands. Returns how many were recalled.
    pub fn recall_flights(&mut self, scene: &mut dyn SceneGraph) -> usize {
        let flights = std::mem::take(&mut *self.flights.borrow_mut());
        for flight in &flights {
            scene.destroy_node(flight.card);
        }
        if !flights.is_empty() {
            log::debug!("{} recalled {} cards in flight", DRAW_PILE_TITLE, flights.len());
        }
        flights.len()
    }

    /// Tear down the pile and every card still in flight.
    pub fn destroy(mut self, scene: &mut dyn SceneGraph) {
        self.recall_flights(scene);
        self.stack.destroy(scene);
    }
}

impl Deck for DrawPile {
    fn add_card(&mut self, scene: &mut dyn SceneGraph) {
        self.count += 1;
        self.stack.refresh(self.count, scene, &mut self.rng);
    }

    /// The received card goes on top; the old top becomes the peek-ahead
    /// card.
    fn receive_card(&mut self, card: Card, scene: &mut dyn SceneGraph) {
        self.count += 1;
        if let Some(previous) = self.stack.top.take() {
            self.stack.set_bottom(previous, scene);
        }
        scene.set(card.node(), Property::Alpha, 1.0);
        self.stack.set_top(card, scene, &mut self.rng);
        self.stack.refresh(self.count, scene, &mut self.rng);
    }

    fn count(&self) -> u32 {
        self.count
    }

    fn node(&self) -> NodeId {
        self.stack.node
    }

    fn render_state(&self) -> DeckState {
        DeckState {
            title: DRAW_PILE_TITLE.to_string(),
            count: self.count,
            has_top: self.stack.top.is_some(),
            has_bottom: self.stack.bottom.is_some(),
            displayed: self.stack.displayed(),
        }
    }
}

impl Updatable for DrawPile {
    fn update(&mut self, delta_ms: f32, frame: &mut Frame<'_>) {
        self.move_timer += delta_ms.max(0.0);
        let interval = self.config.move_interval_ms;

        match self.config.timer_policy {
            TimerPolicy::Reset => {
                if self.move_timer >= interval {
                    self.move_timer = 0.0;
                    self.dispatch(frame);
                }
            }
            TimerPolicy::CatchUp => {
                while self.move_timer >= interval {
                    self.move_timer -= interval;
                    self.dispatch(frame);
                }
            }
        }
    }
}
