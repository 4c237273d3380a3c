//! Card flow: a draw pile dealing into a discard pile.
//!
//! ## Key Types
//!
//! - `Card`: one animated card (flip, hover)
//! - `CardTextures`: the loaded sprites and sounds cards rely on
//! - `Deck`: what both piles can do
//! - `DrawPile`: deals its top card on a fixed cadence
//! - `DiscardPile`: receives cards, keeps the newest few on screen
//!
//! ## Display Illusion
//!
//! A pile's count is an integer. At most two cards are materialized for
//! it: the top card, and while more than one card remains, a peek-ahead
//! card behind it. A 144-card pile is two sprites.
//!
//! ## Usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use softgames_showcase::cards::{Deck, DiscardPile, DrawPile};
//! use softgames_showcase::core::{DeckConfig, SimRng};
//! use softgames_showcase::stage::Stage;
//!
//! let mut stage: Stage = Stage::default();
//! let config = DeckConfig::default().with_initial_count(3);
//!
//! let discard = Rc::new(RefCell::new(DiscardPile::new(config.display_limit, SimRng::new(1), &mut stage.scene)));
//! let draw = DrawPile::new(config, discard.clone(), SimRng::new(2), &mut stage.scene).unwrap();
//! let draw = Rc::new(RefCell::new(draw));
//! stage.register(draw.clone());
//!
//! // Three intervals, then let the last flight land
//! stage.run(3, 1000.0);
//! stage.tick(2000.0);
//!
//! assert_eq!(draw.borrow().count(), 0);
//! assert_eq!(discard.borrow().count(), 3);
//! ```

mod card;
mod deck;
mod discard_pile;
mod draw_pile;

pub use card::{Card, CardFace, CardTextures, FLIP_DURATION_MS, HOVER_DURATION_MS};
pub use deck::{Deck, DeckState, PileState};
pub use discard_pile::{DiscardPile, DISCARD_PILE_TITLE};
pub use draw_pile::{DrawPile, Flight, DRAW_PILE_TITLE};
