//! Asset registration, lookup and load progress.
//!
//! Loading itself belongs to the host (browser fetch, file system, bundler);
//! this module describes what must be loaded and tracks how far along it is.

mod catalog;
mod manifest;
mod progress;

pub use catalog::{AssetCatalog, MemoryCatalog};
pub use manifest::{
    card_assets, card_front_alias, fire_assets, fire_frame_alias, voice_assets, voice_clip_alias,
    AssetBundle, AssetEntry, AssetManifest, CARD_BACK, FIRE_FRAME_COUNT, SFX_CARD_HOVER,
    SFX_WHOOSH, SUITS, VALUES_PER_SUIT, VOICE_CLIP_COUNT,
};
pub use progress::LoadProgress;
