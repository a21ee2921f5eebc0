//! Core engine types: cards, pile ids, layout configuration, RNG, errors.
//!
//! Nothing in here knows about a particular variant. Piles and variant
//! scripts are built on top of these types.

pub mod card;
pub mod config;
pub mod error;
pub mod rng;

pub use card::{
    any_cards_prone, ordinal_to_long_string, ordinal_to_short_string, short_string_to_ordinal,
    Card, CardId, Color, Suit, ACE, CARDS_PER_SUIT, KING,
};
pub use config::{FanType, MoveType, PileId, SessionConfig, Slot};
pub use error::{illegal, IllegalMove, Legality, MoveError};
pub use rng::GameRng;
