//! Typed dialogue between the show's characters.

use std::cell::RefCell;
use std::rc::Rc;

use super::{attach_container, Screen, Viewport};
use crate::audio::AudioSink;
use crate::core::{DialogueConfig, DialogueError, SimRng};
use crate::dialogue::{DialogueData, DialoguePlayer, PlayerState};
use crate::scene::{NodeId, SceneGraph};
use crate::stage::{Stage, UpdateHandle};

const DIALOGUE_AT: (f32, f32) = (0.5, 0.8);

struct Shown {
    container: NodeId,
    player: Rc<RefCell<DialoguePlayer>>,
    handle: UpdateHandle,
}

pub struct MagicWords {
    data: DialogueData,
    config: DialogueConfig,
    rng: SimRng,
    shown: Option<Shown>,
}

impl MagicWords {
    #[must_use]
    pub fn new(data: DialogueData, config: DialogueConfig, rng: SimRng) -> Self {
        Self {
            data,
            config,
            rng,
            shown: None,
        }
    }

    /// Parse the dialogue script from JSON.
    pub fn from_json_str(json: &str, config: DialogueConfig, rng: SimRng) -> Result<Self, DialogueError> {
        Ok(Self::new(DialogueData::from_json_str(json)?, config, rng))
    }

    /// Pointer press anywhere: finish the line or move to the next one.
    ///
    /// Returns `None` while hidden.
    pub fn pointer_down<S: SceneGraph, A: AudioSink>(&mut self, stage: &mut Stage<S, A>) -> Option<PlayerState> {
        let shown = self.shown.as_ref()?;
        let state = shown.player.borrow_mut().pointer_down(&mut stage.scene);
        Some(state)
    }

    #[must_use]
    pub fn player(&self) -> Option<&Rc<RefCell<DialoguePlayer>>> {
        self.shown.as_ref().map(|s| &s.player)
    }

    #[must_use]
    pub fn state(&self) -> Option<PlayerState> {
        self.shown.as_ref().map(|s| s.player.borrow().state())
    }
}

impl Screen for MagicWords {
    type Error = DialogueError;

    fn show<S: SceneGraph, A: AudioSink>(
        &mut self,
        stage: &mut Stage<S, A>,
        viewport: Viewport,
    ) -> Result<(), DialogueError> {
        if self.shown.is_some() {
            return Ok(());
        }

        let scene: &mut dyn SceneGraph = &mut stage.scene;
        let player = DialoguePlayer::new(self.data.clone(), self.config.clone(), self.rng.fork(), scene)?;
        let container = attach_container(scene);
        scene.add_child(container, player.node());
        scene.set_position(player.node(), viewport.at(DIALOGUE_AT.0, DIALOGUE_AT.1));

        let player = Rc::new(RefCell::new(player));
        let handle = stage.register(Rc::clone(&player));
        log::debug!("Magic Words shown with {} lines", self.data.dialogue.len());

        self.shown = Some(Shown {
            container,
            player,
            handle,
        });
        Ok(())
    }

    fn hide<S: SceneGraph, A: AudioSink>(&mut self, stage: &mut Stage<S, A>) {
        let Some(shown) = self.shown.take() else {
            return;
        };
        stage.unregister(shown.handle);
        stage.scene.destroy_node(shown.container);
        log::debug!("Magic Words hidden");
    }

    fn is_visible(&self) -> bool {
        self.shown.is_some()
    }
}
