//! Asset manifest: which aliases exist and where they load from.

use serde::{Deserialize, Serialize};

use crate::core::AssetError;

/// Card suits, in manifest order.
pub const SUITS: [&str; 4] = ["hearts", "diamonds", "clubs", "spades"];

/// Card values per suit (1 through 13).
pub const VALUES_PER_SUIT: u8 = 13;

/// Number of frames in the fire flipbook.
pub const FIRE_FRAME_COUNT: usize = 64;

/// Number of recorded voice clips for the dialogue.
pub const VOICE_CLIP_COUNT: usize = 3;

pub const CARD_BACK: &str = "cardback";
pub const SFX_CARD_HOVER: &str = "sfx_card_hover";
pub const SFX_WHOOSH: &str = "sfx_whoosh";

#[must_use]
pub fn card_front_alias(suit: &str, value: u8) -> String {
    format!("card_{}-{}", suit, value)
}

#[must_use]
pub fn fire_frame_alias(index: usize) -> String {
    format!("fire_{:02}.png", index)
}

#[must_use]
pub fn voice_clip_alias(index: usize) -> String {
    format!("gibberish-{:02}", index)
}

/// One loadable asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub alias: String,
    pub src: String,
}

impl AssetEntry {
    pub fn new(alias: impl Into<String>, src: impl Into<String>) -> Self {
        Self { alias: alias.into(), src: src.into() }
    }
}

/// A named group of assets loaded together.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBundle {
    pub name: String,
    pub assets: Vec<AssetEntry>,
}

/// Every asset the showcase knows about.
///
/// Bundles load first, one after another; loose assets load last as one
/// trailing group. See [`LoadProgress`](super::LoadProgress).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    pub bundles: Vec<AssetBundle>,
    #[serde(default)]
    pub assets: Vec<AssetEntry>,
}

impl AssetManifest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Register (or replace) a named bundle.
    pub fn register_bundle(&mut self, name: impl Into<String>, assets: Vec<AssetEntry>) {
        let name = name.into();
        match self.bundles.iter_mut().find(|b| b.name == name) {
            Some(bundle) => bundle.assets = assets,
            None => self.bundles.push(AssetBundle { name, assets }),
        }
    }

    /// Register loose assets. An alias registered twice keeps its first source.
    pub fn register_assets<I>(&mut self, assets: I)
    where
        I: IntoIterator<Item = AssetEntry>,
    {
        for entry in assets {
            if !self.assets.iter().any(|a| a.alias == entry.alias) {
                self.assets.push(entry);
            }
        }
    }

    /// Every alias, bundles first.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.bundles
            .iter()
            .flat_map(|b| b.assets.iter())
            .chain(self.assets.iter())
            .map(|a| a.alias.as_str())
    }

    #[must_use]
    pub fn find(&self, alias: &str) -> Option<&AssetEntry> {
        self.bundles
            .iter()
            .flat_map(|b| b.assets.iter())
            .chain(self.assets.iter())
            .find(|a| a.alias == alias)
    }

    /// Number of load groups: one per bundle plus the trailing loose group.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.bundles.len() + 1
    }

    /// The full showcase manifest.
    #[must_use]
    pub fn showcase() -> Self {
        let mut manifest = Self::new();

        manifest.register_bundle(
            "ui-kit",
            vec![
                AssetEntry::new("font-ui", "/assets/fonts/Gluten-VariableFont.ttf"),
                AssetEntry::new("button", "/assets/cozy-garden-kit/big-bar.png"),
                AssetEntry::new("button-pressed", "/assets/cozy-garden-kit/big-bar-pressed.png"),
                AssetEntry::new("button-back", "/assets/cozy-garden-kit/button-back.png"),
                AssetEntry::new("button-back-pressed", "/assets/cozy-garden-kit/button-back-pressed.png"),
                AssetEntry::new("bg-blue", "/assets/cozy-garden-kit/bg-blue.png"),
                AssetEntry::new("bg-green", "/assets/cozy-garden-kit/bg-green.png"),
                AssetEntry::new("bg-pink", "/assets/cozy-garden-kit/bg-pink.png"),
                AssetEntry::new("bg-yellow", "/assets/cozy-garden-kit/bg-yellow.png"),
            ],
        );

        manifest.register_assets(card_assets());
        manifest.register_assets(fire_assets());
        manifest.register_assets(voice_assets());
        manifest
    }
}

/// Card fronts, the card back and the card sounds.
#[must_use]
pub fn card_assets() -> Vec<AssetEntry> {
    let mut assets: Vec<AssetEntry> = SUITS
        .iter()
        .flat_map(|suit| {
            (1..=VALUES_PER_SUIT).map(move |value| {
                AssetEntry::new(
                    card_front_alias(suit, value),
                    format!("/assets/card-deck-fronts/sheet_{}/sheet_{}-{}.png", suit, suit, value),
                )
            })
        })
        .collect();

    assets.push(AssetEntry::new(CARD_BACK, "/assets/colorful-poker-card-back/red.png"));
    assets.push(AssetEntry::new(SFX_CARD_HOVER, "/assets/audio/hover-card.mp3"));
    assets.push(AssetEntry::new(SFX_WHOOSH, "/assets/audio/whoosh.mp3"));
    assets
}

/// Fire flipbook frames.
#[must_use]
pub fn fire_assets() -> Vec<AssetEntry> {
    (0..FIRE_FRAME_COUNT)
        .map(|i| {
            let alias = fire_frame_alias(i);
            let src = format!("/assets/particles/{}", alias);
            AssetEntry::new(alias, src)
        })
        .collect()
}

/// Dialogue voice clips.
#[must_use]
pub fn voice_assets() -> Vec<AssetEntry> {
    (1..=VOICE_CLIP_COUNT)
        .map(|i| {
            let alias = voice_clip_alias(i);
            let src = format!("/assets/audio/talking/{}.mp3", alias);
            AssetEntry::new(alias, src)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_formats() {
        assert_eq!(card_front_alias("hearts", 1), "card_hearts-1");
        assert_eq!(fire_frame_alias(7), "fire_07.png");
        assert_eq!(fire_frame_alias(63), "fire_63.png");
        assert_eq!(voice_clip_alias(2), "gibberish-02");
    }

    #[test]
    fn test_showcase_manifest() {
        let manifest = AssetManifest::showcase();

        assert_eq!(manifest.bundles.len(), 1);
        assert_eq!(manifest.group_count(), 2);
        // 52 fronts + back + 2 sfx + 64 frames + 3 voices
        assert_eq!(manifest.assets.len(), 52 + 3 + 64 + 3);
        assert_eq!(manifest.aliases().count(), 9 + 122);

        let spade = manifest.find("card_spades-13").unwrap();
        assert_eq!(spade.src, "/assets/card-deck-fronts/sheet_spades/sheet_spades-13.png");
        assert_eq!(manifest.find("fire_00.png").unwrap().src, "/assets/particles/fire_00.png");
        assert!(manifest.find("card_spades-14").is_none());
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut manifest = AssetManifest::new();
        manifest.register_assets(vec![AssetEntry::new("a", "/one.png")]);
        manifest.register_assets(vec![AssetEntry::new("a", "/two.png")]);
        manifest.register_bundle("b", vec![]);
        manifest.register_bundle("b", vec![AssetEntry::new("c", "/c.png")]);

        assert_eq!(manifest.assets.len(), 1);
        assert_eq!(manifest.find("a").unwrap().src, "/one.png");
        assert_eq!(manifest.bundles.len(), 1);
        assert_eq!(manifest.bundles[0].assets.len(), 1);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "bundles": [{ "name": "ui", "assets": [{ "alias": "button", "src": "/b.png" }] }]
        }"#;
        let manifest = AssetManifest::from_json_str(json).unwrap();

        assert_eq!(manifest.bundles[0].name, "ui");
        assert!(manifest.assets.is_empty());
        assert!(AssetManifest::from_json_str("{").is_err());
    }
}
