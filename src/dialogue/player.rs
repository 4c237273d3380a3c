//! Line-by-line dialogue playback.

use super::layout::{BubbleLayout, PlacedToken, TextLayout, TextMeasure, Token, PADDING};
use super::{avatar_alias, emoji_alias, tokenize, DialogueData, MonospaceMeasure, Side, Typewriter};
use crate::assets::{voice_clip_alias, VOICE_CLIP_COUNT};
use crate::audio::PlaybackParams;
use crate::core::{DialogueConfig, DialogueError, SimRng};
use crate::scene::{NodeId, Property, SceneGraph, Vec2};
use crate::stage::{Frame, Updatable};

const VOICE_VOLUME: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerState {
    /// The current line is still being typed.
    Typing,
    /// The current line is fully shown.
    Waiting,
    /// The last line has been dismissed.
    Finished,
}

#[derive(Debug)]
struct ShownLine {
    index: usize,
    bubble: BubbleLayout,
    text: TextLayout,
    typewriter: Typewriter,
    content: NodeId,
    /// Emoji nodes with the typing unit at which they appear.
    emoji: Vec<(usize, NodeId)>,
}

impl ShownLine {
    fn sync_emoji(&self, scene: &mut dyn SceneGraph) {
        let revealed = self.typewriter.revealed();
        for &(unit, node) in &self.emoji {
            let alpha = if revealed > unit { 1.0 } else { 0.0 };
            scene.set(node, Property::Alpha, alpha);
        }
    }
}

/// Plays a conversation one speech bubble at a time.
///
/// Each line types itself out, voiced by short gibberish clips. A pointer
/// press completes a line still typing, and otherwise moves on.
pub struct DialoguePlayer {
    data: DialogueData,
    config: DialogueConfig,
    measure: Box<dyn TextMeasure>,
    node: NodeId,
    line: Option<ShownLine>,
    finished: bool,
    rng: SimRng,
}

impl std::fmt::Debug for DialoguePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialoguePlayer")
            .field("node", &self.node)
            .field("line", &self.line)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl DialoguePlayer {
    /// Start playing `data` with monospace text metrics. The first line
    /// starts typing immediately.
    pub fn new(
        data: DialogueData,
        config: DialogueConfig,
        rng: SimRng,
        scene: &mut dyn SceneGraph,
    ) -> Result<Self, DialogueError> {
        Self::with_measure(data, config, Box::new(MonospaceMeasure::default()), rng, scene)
    }

    pub fn with_measure(
        data: DialogueData,
        config: DialogueConfig,
        measure: Box<dyn TextMeasure>,
        rng: SimRng,
        scene: &mut dyn SceneGraph,
    ) -> Result<Self, DialogueError> {
        config.validate()?;
        if data.dialogue.is_empty() {
            return Err(DialogueError::NoLines);
        }

        let mut player = Self {
            data: data.with_default_avatar(),
            config,
            measure,
            node: scene.create_node(None),
            line: None,
            finished: false,
            rng,
        };
        player.show_line(0, scene);
        Ok(player)
    }

    fn show_line(&mut self, index: usize, scene: &mut dyn SceneGraph) {
        if let Some(previous) = self.line.take() {
            scene.destroy_node(previous.content);
        }
        let Some(line) = self.data.dialogue.get(index) else {
            return;
        };

        let avatar = self.data.avatar_for(&line.name);
        let text_width = self.config.text_width;
        let bubble = BubbleLayout::compose(avatar.map(|a| a.position), text_width);
        let tokens = tokenize(&line.text, |name| self.data.emoji(name).is_some());
        let text = TextLayout::wrap(&tokens, self.measure.as_ref(), text_width - PADDING * 2.0);

        let pivot = BubbleLayout::pivot(text_width);
        let content = scene.create_node(None);
        scene.add_child(self.node, content);
        scene.set_position(content, Vec2::new(-pivot.x, -pivot.y));

        let bubble_node = scene.create_node(None);
        scene.add_child(content, bubble_node);
        scene.set_position(bubble_node, bubble.bubble);

        if let (Some(avatar), Some(position)) = (avatar, bubble.avatar) {
            let avatar_node = scene.create_node(Some(&avatar_alias(&avatar.name)));
            scene.add_child(content, avatar_node);
            scene.set_position(avatar_node, position);
        }

        let text_node = scene.create_node(None);
        scene.add_child(content, text_node);
        scene.set_position(text_node, bubble.text);

        let mut emoji = Vec::new();
        let mut unit = 0;
        for placed in &text.tokens {
            if let Token::Emoji(name) = &placed.token {
                let node = scene.create_node(Some(&emoji_alias(name)));
                scene.add_child(text_node, node);
                scene.set_position(node, placed.position);
                scene.set(node, Property::Alpha, 0.0);
                emoji.push((unit, node));
            }
            unit += placed.token.units();
        }

        log::debug!(
            "dialogue line {}/{}: {} ({} units, {} lines)",
            index + 1,
            self.data.dialogue.len(),
            line.name,
            text.units(),
            text.lines
        );

        let typewriter = Typewriter::new(text.units(), self.config.chars_per_second, self.config.voice_every);
        let shown = ShownLine { index, bubble, text, typewriter, content, emoji };
        shown.sync_emoji(scene);
        self.line = Some(shown);
    }

    /// Pointer press: finish typing, or show the next line.
    pub fn advance(&mut self, scene: &mut dyn SceneGraph) -> PlayerState {
        match self.state() {
            PlayerState::Finished => {}
            PlayerState::Typing => {
                if let Some(line) = self.line.as_mut() {
                    line.typewriter.finish();
                    line.sync_emoji(scene);
                }
            }
            PlayerState::Waiting => {
                let next = self.line.as_ref().map_or(0, |l| l.index + 1);
                if next < self.data.dialogue.len() {
                    self.show_line(next, scene);
                } else {
                    log::debug!("dialogue finished after {} lines", self.data.dialogue.len());
                    self.finished = true;
                }
            }
        }
        self.state()
    }

    /// Alias for [`DialoguePlayer::advance`], named after the event.
    pub fn pointer_down(&mut self, scene: &mut dyn SceneGraph) -> PlayerState {
        self.advance(scene)
    }

    #[must_use]
    pub fn state(&self) -> PlayerState {
        match &self.line {
            _ if self.finished => PlayerState::Finished,
            Some(line) if !line.typewriter.is_complete() => PlayerState::Typing,
            Some(_) => PlayerState::Waiting,
            None => PlayerState::Finished,
        }
    }

    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Index of the line on screen.
    #[must_use]
    pub fn line_index(&self) -> Option<usize> {
        self.line.as_ref().map(|l| l.index)
    }

    #[must_use]
    pub fn speaker(&self) -> Option<&str> {
        let index = self.line_index()?;
        self.data.dialogue.get(index).map(|l| l.name.as_str())
    }

    #[must_use]
    pub fn side(&self) -> Option<Side> {
        self.line.as_ref().and_then(|l| l.bubble.side)
    }

    #[must_use]
    pub fn bubble(&self) -> Option<&BubbleLayout> {
        self.line.as_ref().map(|l| &l.bubble)
    }

    #[must_use]
    pub fn text_layout(&self) -> Option<&TextLayout> {
        self.line.as_ref().map(|l| &l.text)
    }

    /// Tokens typed so far, at their final positions.
    #[must_use]
    pub fn visible_tokens(&self) -> Vec<PlacedToken> {
        self.line
            .as_ref()
            .map(|l| l.text.visible(l.typewriter.revealed()))
            .unwrap_or_default()
    }

    /// Text typed so far, with emoji written as `{name}`.
    #[must_use]
    pub fn visible_text(&self) -> String {
        self.visible_tokens()
            .iter()
            .map(|placed| match &placed.token {
                Token::Word(word) => word.clone(),
                Token::Emoji(name) => format!("{{{}}}", name),
            })
            .collect()
    }

    #[must_use]
    pub fn data(&self) -> &DialogueData {
        &self.data
    }

    pub fn destroy(self, scene: &mut dyn SceneGraph) {
        scene.destroy_node(self.node);
    }
}

impl Updatable for DialoguePlayer {
    fn update(&mut self, delta_ms: f32, frame: &mut Frame<'_>) {
        if self.finished {
            return;
        }
        let Some(line) = self.line.as_mut() else {
            return;
        };

        let reveal = line.typewriter.advance(delta_ms);
        if reveal.chars == 0 {
            return;
        }
        line.sync_emoji(frame.scene);

        for _ in 0..reveal.voices {
            let clip = self.rng.gen_range_usize(1..VOICE_CLIP_COUNT + 1);
            frame.audio.play(
                &voice_clip_alias(clip),
                PlaybackParams::default().with_volume(VOICE_VOLUME),
            );
        }
    }
}
