//! Card identity and orientation.
//!
//! A card's identity (`CardId`) never changes during a game. Its
//! orientation and the pile it lives in do, but a `Card` carries no rules:
//! legality lives in piles and variant scripts.
//!
//! ## Usage
//!
//! ```
//! use patience::core::{Card, CardId, PileId, Suit};
//!
//! let mut card = Card::new(CardId::new(0, Suit::Heart, 12), PileId::new(0));
//! assert!(card.is_prone());
//!
//! card.flip_up();
//! assert!(!card.is_prone());
//! assert_eq!(card.to_string(), "Q♥");
//! ```

use serde::{Deserialize, Serialize};

use super::config::PileId;

/// Number of ordinals in a suit (Ace..King).
pub const CARDS_PER_SUIT: usize = 13;

/// Ordinal of the Ace.
pub const ACE: u8 = 1;

/// Ordinal of the King.
pub const KING: u8 = 13;

const ORDINAL_SHORT: [&str; 14] = [
    "", "A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K",
];

/// Short label for an ordinal ("A", "2", .. "10", "J", "Q", "K").
///
/// Foundations store this string as their label when a base rank is pinned.
#[must_use]
pub fn ordinal_to_short_string(ordinal: u8) -> &'static str {
    ORDINAL_SHORT.get(ordinal as usize).copied().unwrap_or("")
}

const ORDINAL_LONG: [&str; 14] = [
    "", "Ace", "2", "3", "4", "5", "6", "7", "8", "9", "10", "Jack", "Queen", "King",
];

/// Ordinal encoded by a short label, if it is one.
#[must_use]
pub fn short_string_to_ordinal(short: &str) -> Option<u8> {
    ORDINAL_SHORT
        .iter()
        .skip(1)
        .position(|s| *s == short)
        .map(|i| i as u8 + 1)
}

/// Long form of a short ordinal label ("A" becomes "Ace"), for messages.
#[must_use]
pub fn ordinal_to_long_string(short: &str) -> &'static str {
    short_string_to_ordinal(short).map_or("", |ord| ORDINAL_LONG[ord as usize])
}

/// Card suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    /// All suits, in deal order.
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    /// Colour of the suit.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Club | Suit::Spade => Color::Black,
            Suit::Diamond | Suit::Heart => Color::Red,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Club => '♣',
            Suit::Diamond => '♦',
            Suit::Heart => '♥',
            Suit::Spade => '♠',
        }
    }
}

/// Card colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Red,
}

/// Immutable identity of a card: which pack it came from, its suit and ordinal.
///
/// Multi-deck variants deal several packs, so two cards can share suit and
/// ordinal while still being distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId {
    pub pack: u8,
    pub suit: Suit,
    pub ordinal: u8,
}

impl CardId {
    /// Create a card identity.
    ///
    /// `ordinal` runs from 1 (Ace) to 13 (King).
    #[must_use]
    pub fn new(pack: u8, suit: Suit, ordinal: u8) -> Self {
        debug_assert!((ACE..=KING).contains(&ordinal), "ordinal {ordinal} out of range");
        Self { pack, suit, ordinal }
    }

    /// Same suit and ordinal, ignoring pack.
    #[must_use]
    pub fn same_card(self, other: CardId) -> bool {
        self.suit == other.suit && self.ordinal == other.ordinal
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", ordinal_to_short_string(self.ordinal), self.suit.symbol())
    }
}

/// A card in play.
///
/// `owner` is a back reference used for lookup only; the pile holding the
/// card owns it. `slot` is the card's index within that pile and exists for
/// layout, never for rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    face_up: bool,
    owner: PileId,
    slot: usize,
}

impl Card {
    /// Create a face-down card owned by `owner`.
    #[must_use]
    pub fn new(id: CardId, owner: PileId) -> Self {
        Self {
            id,
            face_up: false,
            owner,
            slot: 0,
        }
    }

    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.id.suit
    }

    #[must_use]
    pub const fn ordinal(&self) -> u8 {
        self.id.ordinal
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.id.suit.color()
    }

    /// The pile this card currently lives in.
    #[must_use]
    pub const fn owner(&self) -> PileId {
        self.owner
    }

    /// Index of this card within its pile.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Is the card face down?
    #[must_use]
    pub const fn is_prone(&self) -> bool {
        !self.face_up
    }

    /// Turn the card face up. Returns true if the orientation changed.
    pub fn flip_up(&mut self) -> bool {
        let changed = !self.face_up;
        self.face_up = true;
        changed
    }

    /// Turn the card face down. Returns true if the orientation changed.
    pub fn flip_down(&mut self) -> bool {
        let changed = self.face_up;
        self.face_up = false;
        changed
    }

    pub(crate) fn set_owner(&mut self, owner: PileId, slot: usize) {
        self.owner = owner;
        self.slot = slot;
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.id.fmt(f)
    }
}

/// True if any card in the slice is face down.
#[must_use]
pub fn any_cards_prone(cards: &[Card]) -> bool {
    cards.iter().any(Card::is_prone)
}
