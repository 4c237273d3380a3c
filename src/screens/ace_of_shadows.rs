//! Card dealing: a draw pile sending its cards to a discard pile.

use std::cell::RefCell;
use std::rc::Rc;

use super::{attach_container, Screen, Viewport};
use crate::audio::AudioSink;
use crate::cards::{CardTextures, Deck, DiscardPile, DrawPile};
use crate::core::{ConfigError, DeckConfig, SimRng};
use crate::scene::{NodeId, SceneGraph};
use crate::stage::{Stage, UpdateHandle};

const DRAW_PILE_AT: (f32, f32) = (0.3, 0.5);
const DISCARD_PILE_AT: (f32, f32) = (0.7, 0.5);

struct Table {
    container: NodeId,
    draw: Rc<RefCell<DrawPile>>,
    discard: Rc<RefCell<DiscardPile>>,
    handle: UpdateHandle,
}

/// Deals `config.initial_count` cards, one per interval, from the left
/// pile to the right one.
pub struct AceOfShadows {
    textures: CardTextures,
    config: DeckConfig,
    rng: SimRng,
    table: Option<Table>,
}

impl AceOfShadows {
    #[must_use]
    pub fn new(textures: CardTextures, config: DeckConfig, rng: SimRng) -> Self {
        Self {
            textures,
            config,
            rng,
            table: None,
        }
    }

    #[must_use]
    pub fn textures(&self) -> &CardTextures {
        &self.textures
    }

    /// Pointer entered the draw pile's top card. Returns `false` when
    /// hidden or the pile is empty.
    pub fn pointer_over<S: SceneGraph, A: AudioSink>(&mut self, stage: &mut Stage<S, A>) -> bool {
        let Some(table) = &self.table else {
            return false;
        };
        let mut frame = stage.frame();
        table.draw.borrow_mut().pointer_over_top(&mut frame)
    }

    /// Pointer left the draw pile's top card.
    pub fn pointer_out<S: SceneGraph, A: AudioSink>(&mut self, stage: &mut Stage<S, A>) -> bool {
        let Some(table) = &self.table else {
            return false;
        };
        let mut frame = stage.frame();
        table.draw.borrow_mut().pointer_out_top(&mut frame)
    }

    /// Cards left in the draw pile while shown.
    #[must_use]
    pub fn draw_count(&self) -> Option<u32> {
        self.table.as_ref().map(|t| t.draw.borrow().count())
    }

    /// Cards received by the discard pile while shown.
    #[must_use]
    pub fn discard_count(&self) -> Option<u32> {
        self.table.as_ref().map(|t| t.discard.borrow().count())
    }

    #[must_use]
    pub fn draw_pile(&self) -> Option<&Rc<RefCell<DrawPile>>> {
        self.table.as_ref().map(|t| &t.draw)
    }

    #[must_use]
    pub fn discard_pile(&self) -> Option<&Rc<RefCell<DiscardPile>>> {
        self.table.as_ref().map(|t| &t.discard)
    }

    #[must_use]
    pub fn container(&self) -> Option<NodeId> {
        self.table.as_ref().map(|t| t.container)
    }
}

impl Screen for AceOfShadows {
    type Error = ConfigError;

    fn show<S: SceneGraph, A: AudioSink>(
        &mut self,
        stage: &mut Stage<S, A>,
        viewport: Viewport,
    ) -> Result<(), ConfigError> {
        if self.table.is_some() {
            return Ok(());
        }
        self.config.validate()?;

        let scene: &mut dyn SceneGraph = &mut stage.scene;
        let container = attach_container(scene);

        // The draw pile aims at the discard pile, so it must exist first.
        let discard = DiscardPile::new(self.config.display_limit, self.rng.fork(), scene);
        scene.add_child(container, discard.node());
        scene.set_position(discard.node(), viewport.at(DISCARD_PILE_AT.0, DISCARD_PILE_AT.1));
        let discard = Rc::new(RefCell::new(discard));

        let draw = DrawPile::new(self.config.clone(), Rc::clone(&discard), self.rng.fork(), scene)?;
        scene.add_child(container, draw.node());
        scene.set_position(draw.node(), viewport.at(DRAW_PILE_AT.0, DRAW_PILE_AT.1));
        let draw = Rc::new(RefCell::new(draw));

        let handle = stage.register(Rc::clone(&draw));
        log::debug!(
            "Ace of Shadows shown with {} cards over {} faces",
            self.config.initial_count,
            self.textures.fronts().len()
        );

        self.table = Some(Table {
            container,
            draw,
            discard,
            handle,
        });
        Ok(())
    }

    fn hide<S: SceneGraph, A: AudioSink>(&mut self, stage: &mut Stage<S, A>) {
        let Some(table) = self.table.take() else {
            return;
        };
        stage.unregister(table.handle);

        // Cards in flight live under the root, not the container.
        table.draw.borrow_mut().recall_flights(&mut stage.scene);
        stage.scene.destroy_node(table.container);
        log::debug!("Ace of Shadows hidden");
    }

    fn is_visible(&self) -> bool {
        self.table.is_some()
    }
}
