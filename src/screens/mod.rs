//! Showcase screens.
//!
//! A screen owns one scene's components while it is shown: it builds them
//! under its own container node, registers what needs per-frame updates on
//! the [`Stage`], and tears all of it down again on hide.
//!
//! ## Example
//!
//! ```
//! use softgames_showcase::assets::{AssetManifest, MemoryCatalog};
//! use softgames_showcase::cards::CardTextures;
//! use softgames_showcase::core::{DeckConfig, SimRng};
//! use softgames_showcase::screens::{AceOfShadows, Screen, Viewport};
//! use softgames_showcase::stage::Stage;
//!
//! let catalog = MemoryCatalog::fully_loaded(&AssetManifest::showcase());
//! let textures = CardTextures::resolve(&catalog).unwrap();
//!
//! let mut stage: Stage = Stage::default();
//! let mut screen = AceOfShadows::new(textures, DeckConfig::default(), SimRng::new(3));
//!
//! screen.show(&mut stage, Viewport::new(800.0, 600.0)).unwrap();
//! stage.run(10, 100.0);
//! assert_eq!(screen.draw_count(), Some(143));
//!
//! screen.hide(&mut stage);
//! assert_eq!(stage.registered(), 0);
//! ```

mod ace_of_shadows;
mod magic_words;
mod phoenix_flame;

pub use ace_of_shadows::AceOfShadows;
pub use magic_words::MagicWords;
pub use phoenix_flame::PhoenixFlame;

use serde::{Deserialize, Serialize};

use crate::audio::AudioSink;
use crate::scene::{NodeId, SceneGraph, Vec2};
use crate::stage::Stage;

/// Size of the drawable area in px.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The point at fractions `(fx, fy)` of the viewport.
    #[must_use]
    pub fn at(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(self.width * fx, self.height * fy)
    }

    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.at(0.5, 0.5)
    }
}

/// One scene of the showcase.
pub trait Screen {
    /// What can go wrong while building the scene.
    type Error;

    /// Build the scene and start it. Showing a visible screen does nothing.
    fn show<S: SceneGraph, A: AudioSink>(
        &mut self,
        stage: &mut Stage<S, A>,
        viewport: Viewport,
    ) -> Result<(), Self::Error>;

    /// Stop updates and destroy everything the screen built.
    fn hide<S: SceneGraph, A: AudioSink>(&mut self, stage: &mut Stage<S, A>);

    fn is_visible(&self) -> bool;
}

/// A fresh container for a screen's nodes, attached to the root.
pub(crate) fn attach_container(scene: &mut dyn SceneGraph) -> NodeId {
    let container = scene.create_node(None);
    let root = scene.root();
    scene.add_child(root, container);
    container
}
