//! Typed speech-bubble dialogue.
//!
//! - `data`: the JSON script format and URL/avatar resolution
//! - `layout`: tokenizing `{emoji}` placeholders, wrapping, bubble geometry
//! - `typewriter`: the reveal-over-time state machine
//! - `player`: plays a script line by line on pointer presses

mod data;
mod layout;
mod player;
mod typewriter;

pub use data::{
    avatar_alias, emoji_alias, sanitize_url, DialogueAvatar, DialogueData, DialogueEmoji, DialogueLine, Side,
    DEFAULT_AVATAR, DEFAULT_AVATAR_URL,
};
pub use layout::{
    tokenize, BubbleLayout, MonospaceMeasure, PlacedToken, TextLayout, TextMeasure, Token, AVATAR_SIZE,
    BUBBLE_RADIUS, EMOJI_ADVANCE, EMOJI_RAISE, EMOJI_SIZE, LINE_HEIGHT, LINE_STEP, PADDING, TAIL_SIZE, TEXT_WIDTH,
    VERTICAL_OFFSET,
};
pub use player::{DialoguePlayer, PlayerState};
pub use typewriter::{Reveal, TypingState, Typewriter};
