//! Dialogue script format.
//!
//! ```json
//! {
//!   "dialogue": [{ "name": "Sheldon", "text": "Hi {satisfied}" }],
//!   "emojies": [{ "name": "satisfied", "url": "https://example.com:81/satisfied.png" }],
//!   "avatars": [{ "name": "Sheldon", "url": "https://example.com/sheldon.png", "position": "left" }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::assets::AssetEntry;
use crate::core::DialogueError;

/// Avatar used for speakers without one of their own.
pub const DEFAULT_AVATAR: &str = "default";
pub const DEFAULT_AVATAR_URL: &str = "https://api.dicebear.com/9.x/avataaars/svg?seed=Oliver";

/// Which side of the bubble the speaker sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Speaker name.
    pub name: String,
    /// Text with `{emoji}` placeholders.
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueEmoji {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueAvatar {
    pub name: String,
    pub url: String,
    pub position: Side,
}

/// A full conversation with the emoji and avatars it references.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueData {
    #[serde(default)]
    pub dialogue: Vec<DialogueLine>,
    #[serde(default)]
    pub emojies: Vec<DialogueEmoji>,
    #[serde(default)]
    pub avatars: Vec<DialogueAvatar>,
}

impl DialogueData {
    pub fn from_json_str(json: &str) -> Result<Self, DialogueError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add the left-side default avatar unless the data brings its own.
    #[must_use]
    pub fn with_default_avatar(mut self) -> Self {
        if !self.avatars.iter().any(|a| a.name == DEFAULT_AVATAR) {
            self.avatars.push(DialogueAvatar {
                name: DEFAULT_AVATAR.to_string(),
                url: DEFAULT_AVATAR_URL.to_string(),
                position: Side::Left,
            });
        }
        self
    }

    /// The speaker's own avatar, falling back to the default one.
    #[must_use]
    pub fn avatar_for(&self, speaker: &str) -> Option<&DialogueAvatar> {
        self.avatars
            .iter()
            .find(|a| a.name == speaker)
            .or_else(|| self.avatars.iter().find(|a| a.name == DEFAULT_AVATAR))
    }

    #[must_use]
    pub fn emoji(&self, name: &str) -> Option<&DialogueEmoji> {
        self.emojies.iter().find(|e| e.name == name)
    }

    /// Loadable entries for every emoji and avatar, with sanitized URLs.
    #[must_use]
    pub fn assets(&self) -> Vec<AssetEntry> {
        let emojies = self
            .emojies
            .iter()
            .map(|e| AssetEntry::new(emoji_alias(&e.name), sanitize_url(&e.url)));
        let avatars = self
            .avatars
            .iter()
            .map(|a| AssetEntry::new(avatar_alias(&a.name), sanitize_url(&a.url)));
        emojies.chain(avatars).collect()
    }
}

#[must_use]
pub fn emoji_alias(name: &str) -> String {
    format!("emoji_{}", name)
}

#[must_use]
pub fn avatar_alias(name: &str) -> String {
    format!("avatar_{}", name)
}

/// Strip the first explicit port from a URL (`host:81/path` -> `host/path`).
///
/// Only a `:` followed by digits and then `/` counts, so schemes and
/// query strings are left alone.
#[must_use]
pub fn sanitize_url(url: &str) -> String {
    let bytes = url.as_bytes();
    for (colon, _) in url.match_indices(':') {
        let digits = bytes[colon + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        let end = colon + 1 + digits;
        if digits > 0 && bytes.get(end) == Some(&b'/') {
            return format!("{}{}", &url[..colon], &url[end..]);
        }
    }
    url.to_string()
}
