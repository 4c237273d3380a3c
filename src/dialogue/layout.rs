//! Speech bubble layout: tokenizing, word wrapping, and placing the
//! bubble, avatar and name around the text.

use super::Side;
use crate::scene::Vec2;

pub const LINE_HEIGHT: f32 = 40.0;
pub const AVATAR_SIZE: f32 = 64.0;
pub const EMOJI_SIZE: f32 = 24.0;
pub const PADDING: f32 = 10.0;
pub const TEXT_WIDTH: f32 = 400.0;
pub const BUBBLE_RADIUS: f32 = 15.0;
pub const TAIL_SIZE: f32 = 20.0;
/// How far a left-side bubble sits below its avatar.
pub const VERTICAL_OFFSET: f32 = 60.0;

/// Horizontal advance of an inline emoji.
pub const EMOJI_ADVANCE: f32 = EMOJI_SIZE + 2.0;
/// Distance between wrapped lines.
pub const LINE_STEP: f32 = LINE_HEIGHT / 2.0;
/// Emoji sit this much above the text baseline.
pub const EMOJI_RAISE: f32 = 4.0;
/// Gap between the bottom of the avatar and the speaker name.
const NAME_GAP: f32 = 12.0;

/// A unit of bubble text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// A word including its trailing space.
    Word(String),
    /// An emoji by name.
    Emoji(String),
}

impl Token {
    /// Typing units: one per character, one per emoji.
    #[must_use]
    pub fn units(&self) -> usize {
        match self {
            Token::Word(word) => word.chars().count(),
            Token::Emoji(_) => 1,
        }
    }
}

/// Split `text` into words and `{emoji}` placeholders.
///
/// Placeholders naming an emoji `is_known` rejects are dropped.
pub fn tokenize(text: &str, is_known: impl Fn(&str) -> bool) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pending = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find('{') {
        let open = cursor + offset;
        let Some(len) = text[open + 1..].find('}') else {
            break;
        };
        let close = open + 1 + len;
        if len == 0 {
            // "{}" is plain text
            cursor = close + 1;
            continue;
        }

        push_words(&text[pending..open], &mut tokens);
        let name = &text[open + 1..close];
        if is_known(name) {
            tokens.push(Token::Emoji(name.to_string()));
        } else {
            log::warn!("dropping unknown emoji '{}'", name);
        }
        pending = close + 1;
        cursor = pending;
    }
    push_words(&text[pending..], &mut tokens);

    tokens
}

fn push_words(text: &str, tokens: &mut Vec<Token>) {
    tokens.extend(text.split_whitespace().map(|w| Token::Word(format!("{} ", w))));
}

/// Width of rendered text.
pub trait TextMeasure {
    fn width(&self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f32,
{
    fn width(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Fixed advance per character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasure {
    pub char_width: f32,
}

impl Default for MonospaceMeasure {
    /// Roughly the bubble's 16 px font.
    fn default() -> Self {
        Self { char_width: 8.0 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }
}

/// A token at its place in the text block.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedToken {
    pub token: Token,
    pub position: Vec2,
    pub width: f32,
    /// Zero-based wrapped line.
    pub line: usize,
}

/// Wrapped text, positioned relative to the text block's origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextLayout {
    pub tokens: Vec<PlacedToken>,
    pub lines: usize,
}

impl TextLayout {
    /// Wrap `tokens` into lines no wider than `max_width`. A token wider
    /// than the line still gets a line of its own.
    pub fn wrap(tokens: &[Token], measure: &dyn TextMeasure, max_width: f32) -> Self {
        let mut layout = TextLayout::default();
        let mut x = 0.0;
        let mut y = 0.0;
        let mut line_len = 0;

        for token in tokens {
            let width = match token {
                Token::Word(word) => measure.width(word),
                Token::Emoji(_) => EMOJI_ADVANCE,
            };
            if line_len > 0 && x + width > max_width {
                layout.lines += 1;
                x = 0.0;
                y += LINE_STEP;
                line_len = 0;
            }

            let raise = if matches!(token, Token::Emoji(_)) { EMOJI_RAISE } else { 0.0 };
            layout.tokens.push(PlacedToken {
                token: token.clone(),
                position: Vec2::new(x, y - raise),
                width,
                line: layout.lines,
            });
            x += width;
            line_len += 1;
        }
        if line_len > 0 {
            layout.lines += 1;
        }

        layout
    }

    #[must_use]
    pub fn height(&self) -> f32 {
        self.lines as f32 * LINE_STEP
    }

    /// Total typing units.
    #[must_use]
    pub fn units(&self) -> usize {
        self.tokens.iter().map(|t| t.token.units()).sum()
    }

    /// The first `units` typing units, cutting the last word short.
    ///
    /// Tokens keep the positions of the full layout, so words never jump
    /// between lines as they are typed.
    #[must_use]
    pub fn visible(&self, units: usize) -> Vec<PlacedToken> {
        let mut left = units;
        let mut visible = Vec::new();
        for placed in &self.tokens {
            if left == 0 {
                break;
            }
            let n = placed.token.units();
            if n <= left {
                visible.push(placed.clone());
                left -= n;
            } else {
                let mut partial = placed.clone();
                if let Token::Word(word) = &placed.token {
                    partial.token = Token::Word(word.chars().take(left).collect());
                }
                visible.push(partial);
                left = 0;
            }
        }
        visible
    }
}

/// Where the parts of a line go, relative to the dialogue's origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleLayout {
    /// Side of the speaker, `None` when the line has no avatar.
    pub side: Option<Side>,
    pub bubble: Vec2,
    pub bubble_size: Vec2,
    /// Tip of the bubble's tail, relative to the bubble.
    pub tail_tip: Vec2,
    pub text: Vec2,
    pub avatar: Option<Vec2>,
    /// Centre of the speaker name.
    pub name: Option<Vec2>,
}

impl BubbleLayout {
    pub fn compose(side: Option<Side>, text_width: f32) -> Self {
        let bubble_size = Vec2::new(text_width + PADDING * 4.0, LINE_HEIGHT + PADDING * 2.0);
        let name_y = AVATAR_SIZE + NAME_GAP;

        match side {
            Some(Side::Left) => {
                let avatar = Vec2::new(PADDING, 0.0);
                let text = Vec2::new(AVATAR_SIZE + PADDING * 3.0, PADDING + VERTICAL_OFFSET);
                Self {
                    side,
                    bubble: Vec2::new(text.x - PADDING, VERTICAL_OFFSET),
                    bubble_size,
                    tail_tip: Vec2::new(TAIL_SIZE, -TAIL_SIZE),
                    text,
                    avatar: Some(avatar),
                    name: Some(Vec2::new(avatar.x + AVATAR_SIZE / 2.0, name_y)),
                }
            }
            Some(Side::Right) => {
                let avatar = Vec2::new(text_width + PADDING * 4.0, 0.0);
                Self {
                    side,
                    bubble: Vec2::ZERO,
                    bubble_size,
                    tail_tip: Vec2::new(bubble_size.x - TAIL_SIZE, bubble_size.y + TAIL_SIZE),
                    text: Vec2::new(PADDING * 2.0, PADDING),
                    avatar: Some(avatar),
                    name: Some(Vec2::new(avatar.x + AVATAR_SIZE / 2.0, name_y)),
                }
            }
            None => Self {
                side,
                bubble: Vec2::ZERO,
                bubble_size,
                tail_tip: Vec2::new(bubble_size.x - TAIL_SIZE, bubble_size.y + TAIL_SIZE),
                text: Vec2::new(0.0, PADDING),
                avatar: None,
                name: None,
            },
        }
    }

    /// The point of the layout that sits on the dialogue's position.
    #[must_use]
    pub fn pivot(text_width: f32) -> Vec2 {
        Vec2::new(text_width / 2.0, LINE_HEIGHT / 2.0)
    }
}
