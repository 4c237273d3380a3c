//! A single animated playing card.
//!
//! A card is two nodes deep: the outer node belongs to whoever holds the
//! card (a pile, or the root while in flight) and is what they position;
//! the inner body node is what the card animates for itself. Flips and
//! hover scaling therefore never fight a flight tween on the same property.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use crate::assets::{card_front_alias, AssetCatalog, CARD_BACK, SFX_CARD_HOVER, SFX_WHOOSH, SUITS, VALUES_PER_SUIT};
use crate::audio::PlaybackParams;
use crate::core::{AssetError, SimRng};
use crate::scene::{NodeId, Property, SceneGraph};
use crate::stage::Frame;
use crate::tween::{Easing, TweenId};

/// Full flip time in ms; each half takes half of it.
pub const FLIP_DURATION_MS: f32 = 350.0;
/// Hover scale-in/out time in ms.
pub const HOVER_DURATION_MS: f32 = 20.0;

const HOVER_SCALE: [f32; 2] = [0.1, 0.15];
const BOUNCE_HEIGHT: [f32; 2] = [40.0, 60.0];
const SKEW_AMOUNT: [f32; 2] = [0.25, 0.35];
const SFX_RATE: [f32; 2] = [0.75, 0.85];
const WHOOSH_VOLUME: f32 = 0.2;
const HOVER_VOLUME: f32 = 0.3;
const HOVER_SEEK: f32 = 0.04;

/// Suit and value of a card front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CardFace {
    pub suit: &'static str,
    /// 1 to 13.
    pub value: u8,
}

impl CardFace {
    /// A uniformly random face.
    pub fn random(rng: &mut SimRng) -> Self {
        let suit = SUITS[rng.gen_range_usize(0..SUITS.len())];
        let value = rng.gen_range_usize(0..usize::from(VALUES_PER_SUIT)) as u8 + 1;
        Self { suit, value }
    }

    /// Texture alias of this face.
    #[must_use]
    pub fn alias(&self) -> String {
        card_front_alias(self.suit, self.value)
    }
}

impl std::fmt::Display for CardFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.suit, self.value)
    }
}

/// The sprites and sounds a card can use, checked against a catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardTextures {
    back: String,
    fronts: Vec<String>,
    sounds: [&'static str; 2],
}

impl CardTextures {
    /// The card back, every front and both card sounds.
    pub fn resolve(catalog: &dyn AssetCatalog) -> Result<Self, AssetError> {
        let textures = Self::full_deck();
        catalog.require(&textures.back)?;
        for front in &textures.fronts {
            catalog.require(front)?;
        }
        for sound in textures.sounds {
            catalog.require(sound)?;
        }
        Ok(textures)
    }

    /// Every alias a card may draw or play, unchecked.
    #[must_use]
    pub fn full_deck() -> Self {
        let fronts = SUITS
            .iter()
            .flat_map(|suit| (1..=VALUES_PER_SUIT).map(move |value| card_front_alias(suit, value)))
            .collect();
        Self {
            back: CARD_BACK.to_owned(),
            fronts,
            sounds: [SFX_WHOOSH, SFX_CARD_HOVER],
        }
    }

    #[must_use]
    pub fn back(&self) -> &str {
        &self.back
    }

    #[must_use]
    pub fn fronts(&self) -> &[String] {
        &self.fronts
    }

    #[must_use]
    pub fn sounds(&self) -> &[&'static str] {
        &self.sounds
    }

    /// Whether `face` has a front in this set.
    #[must_use]
    pub fn covers(&self, face: CardFace) -> bool {
        let alias = face.alias();
        self.fronts.iter().any(|f| *f == alias)
    }
}

/// A face-down card with a random front.
#[derive(Debug)]
pub struct Card {
    node: NodeId,
    body: NodeId,
    front: NodeId,
    back: NodeId,
    face: CardFace,
    flipped: bool,
    animating: Rc<Cell<bool>>,
    hover: Option<TweenId>,
}

impl Card {
    /// Create the card's nodes. The outer node starts detached.
    pub fn new(scene: &mut dyn SceneGraph, rng: &mut SimRng) -> Self {
        Self::with_face(scene, CardFace::random(rng))
    }

    pub fn with_face(scene: &mut dyn SceneGraph, face: CardFace) -> Self {
        let node = scene.create_node(None);
        let body = scene.create_node(None);
        let back = scene.create_node(Some(CARD_BACK));
        let front = scene.create_node(Some(&face.alias()));

        scene.add_child(node, body);
        scene.add_child(body, back);
        scene.add_child(body, front);
        scene.set(front, Property::Alpha, 0.0);

        Self {
            node,
            body,
            front,
            back,
            face,
            flipped: false,
            animating: Rc::new(Cell::new(false)),
            hover: None,
        }
    }

    /// The node piles and flights position.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The node flips and hovers animate.
    #[must_use]
    pub fn body(&self) -> NodeId {
        self.body
    }

    #[must_use]
    pub fn face(&self) -> CardFace {
        self.face
    }

    /// Whether the front is (or is turning to be) showing.
    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating.get()
    }

    /// The sprite currently drawn.
    #[must_use]
    pub fn visible_side(&self, scene: &dyn SceneGraph) -> NodeId {
        if scene.get(self.front, Property::Alpha) > 0.0 {
            self.front
        } else {
            self.back
        }
    }

    /// Turn the card over with a hop.
    ///
    /// The body lifts and skews while squashing to zero width, the faces
    /// swap at the midpoint, then it widens again and drops back with a
    /// bounce. Returns `false` (and does nothing) while a flip is running.
    pub fn flip(&mut self, frame: &mut Frame<'_>, rng: &mut SimRng) -> bool {
        if self.animating.get() {
            return false;
        }
        self.animating.set(true);

        if let Some(hover) = self.hover.take() {
            frame.tweens.stop(hover);
        }
        frame.scene.set_scale(self.body, 1.0);

        frame.audio.play(
            SFX_WHOOSH,
            PlaybackParams::default()
                .with_rate(rng.range_f32(SFX_RATE[0], SFX_RATE[1]))
                .with_volume(WHOOSH_VOLUME),
        );

        let (current, next) = if self.flipped {
            (self.front, self.back)
        } else {
            (self.back, self.front)
        };
        let bounce = rng.choose(&BOUNCE_HEIGHT).copied().unwrap_or(BOUNCE_HEIGHT[0]);
        let skew = rng.choose(&SKEW_AMOUNT).copied().unwrap_or(SKEW_AMOUNT[0]);
        let half = FLIP_DURATION_MS / 2.0;
        let body = self.body;
        let rest_y = frame.scene.get(body, Property::Y);

        frame
            .tweens
            .tween(body, half, Easing::QuadraticIn)
            .to(Property::Y, rest_y - bounce)
            .start();

        frame
            .tweens
            .tween(body, half, Easing::QuadraticIn)
            .to(Property::SkewX, -skew)
            .on_complete(move |_, tweens| {
                tweens.tween(body, half, Easing::QuadraticOut).to(Property::SkewX, 0.0).start();
            })
            .start();

        let animating = Rc::clone(&self.animating);
        frame
            .tweens
            .tween(body, half, Easing::QuadraticIn)
            .to(Property::ScaleX, 0.0)
            .on_complete(move |scene, tweens| {
                scene.set(current, Property::Alpha, 0.0);
                scene.set(next, Property::Alpha, 1.0);

                tweens.tween(body, half, Easing::QuadraticOut).to(Property::ScaleX, 1.0).start();
                tweens
                    .tween(body, half, Easing::BounceOut)
                    .to(Property::Y, rest_y)
                    .on_complete(move |_, _| animating.set(false))
                    .start();
            })
            .start();

        self.flipped = !self.flipped;
        true
    }

    /// Grow slightly under the pointer.
    pub fn pointer_over(&mut self, frame: &mut Frame<'_>, rng: &mut SimRng) {
        let grow = rng.choose(&HOVER_SCALE).copied().unwrap_or(HOVER_SCALE[0]);
        self.hover_to(frame, rng, 1.0 + grow, Easing::BackOut);
    }

    /// Settle back to rest size.
    pub fn pointer_out(&mut self, frame: &mut Frame<'_>, rng: &mut SimRng) {
        self.hover_to(frame, rng, 1.0, Easing::CubicOut);
    }

    fn hover_to(&mut self, frame: &mut Frame<'_>, rng: &mut SimRng, scale: f32, easing: Easing) {
        if self.animating.get() {
            return;
        }

        frame.audio.play(
            SFX_CARD_HOVER,
            PlaybackParams::default()
                .with_rate(rng.range_f32(SFX_RATE[0], SFX_RATE[1]))
                .with_volume(HOVER_VOLUME)
                .with_seek(HOVER_SEEK),
        );

        if let Some(previous) = self.hover.take() {
            frame.tweens.stop(previous);
        }
        self.hover = Some(
            frame
                .tweens
                .tween(self.body, HOVER_DURATION_MS, easing)
                .to(Property::ScaleX, scale)
                .to(Property::ScaleY, scale)
                .start(),
        );
    }

    /// Remove the card and its sprites from the scene.
    pub fn destroy(self, scene: &mut dyn SceneGraph) {
        scene.destroy_node(self.node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetManifest, MemoryCatalog};
    use crate::audio::RecordingAudio;
    use crate::scene::MemoryScene;
    use crate::tween::Tweener;

    struct Rig {
        scene: MemoryScene,
        tweens: Tweener,
        audio: RecordingAudio,
        rng: SimRng,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                scene: MemoryScene::new(),
                tweens: Tweener::new(),
                audio: RecordingAudio::new(),
                rng: SimRng::new(9),
            }
        }

        fn card(&mut self) -> Card {
            Card::new(&mut self.scene, &mut self.rng)
        }

        fn flip(&mut self, card: &mut Card) -> bool {
            let mut frame = Frame::new(&mut self.scene, &mut self.tweens, &mut self.audio);
            card.flip(&mut frame, &mut self.rng)
        }

        fn step(&mut self, ms: f32) {
            self.tweens.step(ms, &mut self.scene);
        }
    }

    #[test]
    fn test_new_card_is_face_down() {
        let mut rig = Rig::new();
        let card = rig.card();

        assert!(!card.is_flipped());
        assert!(!card.is_animating());
        assert_eq!(card.visible_side(&rig.scene), card.back);
        assert_eq!(rig.scene.texture(card.back), Some("cardback"));
        assert_eq!(rig.scene.texture(card.front), Some(card.face().alias().as_str()));
        assert_eq!(rig.scene.parent(card.body()), Some(card.node()));
        assert!((1..=13).contains(&card.face().value));
    }

    #[test]
    fn test_flip_swaps_faces_at_midpoint() {
        let mut rig = Rig::new();
        let mut card = rig.card();

        assert!(rig.flip(&mut card));
        assert!(card.is_flipped());
        assert!(card.is_animating());
        assert_eq!(rig.audio.play_count("sfx_whoosh"), 1);
        let rate = rig.audio.played[0].params.rate;
        assert!((0.75..0.85).contains(&rate));

        rig.step(100.0);
        assert_eq!(card.visible_side(&rig.scene), card.back);
        assert!(rig.scene.get(card.body(), Property::Y) < 0.0);

        rig.step(75.0);
        assert_eq!(card.visible_side(&rig.scene), card.front);
        assert_eq!(rig.scene.get(card.body(), Property::ScaleX), 0.0);
        let lifted = -rig.scene.get(card.body(), Property::Y);
        assert!(lifted == 40.0 || lifted == 60.0);

        rig.step(175.0);
        assert!(!card.is_animating());
        assert_eq!(rig.scene.get(card.body(), Property::ScaleX), 1.0);
        assert_eq!(rig.scene.get(card.body(), Property::Y), 0.0);
        assert_eq!(rig.scene.get(card.body(), Property::SkewX), 0.0);
    }

    #[test]
    fn test_flip_ignored_while_animating() {
        let mut rig = Rig::new();
        let mut card = rig.card();

        rig.flip(&mut card);
        rig.step(10.0);
        assert!(!rig.flip(&mut card));
        assert!(card.is_flipped());
        assert_eq!(rig.audio.play_count("sfx_whoosh"), 1);

        rig.step(400.0);
        assert!(rig.flip(&mut card));
        assert!(!card.is_flipped());
    }

    #[test]
    fn test_hover_scales_body() {
        let mut rig = Rig::new();
        let mut card = rig.card();

        {
            let mut frame = Frame::new(&mut rig.scene, &mut rig.tweens, &mut rig.audio);
            card.pointer_over(&mut frame, &mut rig.rng);
        }
        rig.step(20.0);
        let scale = rig.scene.get(card.body(), Property::ScaleX);
        assert!(scale == 1.1 || scale == 1.15);
        assert_eq!(rig.scene.get(card.node(), Property::ScaleX), 1.0);

        let hover = &rig.audio.played[0];
        assert_eq!(hover.alias, "sfx_card_hover");
        assert_eq!(hover.params.volume, 0.3);
        assert_eq!(hover.params.seek, 0.04);

        {
            let mut frame = Frame::new(&mut rig.scene, &mut rig.tweens, &mut rig.audio);
            card.pointer_out(&mut frame, &mut rig.rng);
        }
        rig.step(20.0);
        assert_eq!(rig.scene.get(card.body(), Property::ScaleX), 1.0);
    }

    #[test]
    fn test_flip_cancels_hover() {
        let mut rig = Rig::new();
        let mut card = rig.card();

        {
            let mut frame = Frame::new(&mut rig.scene, &mut rig.tweens, &mut rig.audio);
            card.pointer_over(&mut frame, &mut rig.rng);
        }
        rig.step(10.0);
        rig.flip(&mut card);
        assert_eq!(rig.scene.get(card.body(), Property::ScaleY), 1.0);

        // Hover is ignored mid-flip
        {
            let mut frame = Frame::new(&mut rig.scene, &mut rig.tweens, &mut rig.audio);
            card.pointer_over(&mut frame, &mut rig.rng);
        }
        assert_eq!(rig.audio.play_count("sfx_card_hover"), 1);
    }

    #[test]
    fn test_textures_cover_every_face() {
        let catalog = MemoryCatalog::fully_loaded(&AssetManifest::showcase());
        let textures = CardTextures::resolve(&catalog).unwrap();

        assert_eq!(textures.back(), "cardback");
        assert_eq!(textures.fronts().len(), 52);
        assert_eq!(textures.sounds(), &["sfx_whoosh", "sfx_card_hover"]);

        let mut rng = SimRng::new(5);
        for _ in 0..200 {
            assert!(textures.covers(CardFace::random(&mut rng)));
        }
    }

    #[test]
    fn test_textures_require_every_alias() {
        let mut catalog = MemoryCatalog::new();
        assert!(matches!(
            CardTextures::resolve(&catalog),
            Err(AssetError::Missing(alias)) if alias == "cardback"
        ));

        for alias in AssetManifest::showcase().aliases() {
            if alias != "card_spades-13" {
                catalog.mark_loaded(alias);
            }
        }
        assert!(matches!(
            CardTextures::resolve(&catalog),
            Err(AssetError::Missing(alias)) if alias == "card_spades-13"
        ));

        catalog.mark_loaded("card_spades-13");
        assert!(CardTextures::resolve(&catalog).is_ok());
    }

    #[test]
    fn test_destroy() {
        let mut rig = Rig::new();
        let card = rig.card();
        let body = card.body();
        card.destroy(&mut rig.scene);

        assert!(!rig.scene.contains(body));
        assert_eq!(rig.scene.node_count(), 1);
    }
}
