//! Pairwise card comparisons shared by every variant.
//!
//! A tail of N cards is split into N-1 adjacent pairs. It is internally
//! legal iff every pair satisfies the variant's [`CompareRule`]. Rules are
//! pure functions of two cards, so variants reuse them by substitution.
//!
//! ```
//! use patience::core::{Card, CardId, PileId, Suit};
//! use patience::rules::{tail_conforms, CompareRule};
//!
//! let up = |suit, ordinal| {
//!     let mut card = Card::new(CardId::new(0, suit, ordinal), PileId::new(0));
//!     card.flip_up();
//!     card
//! };
//!
//! let run = [up(Suit::Club, 7), up(Suit::Diamond, 6), up(Suit::Spade, 5)];
//! assert!(tail_conforms(&run, CompareRule::Down).is_ok());
//!
//! let gap = [up(Suit::Club, 7), up(Suit::Diamond, 5), up(Suit::Spade, 4)];
//! assert!(tail_conforms(&gap, CompareRule::Down).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{
    illegal, ordinal_to_long_string, ordinal_to_short_string, Card, Legality, ACE, KING,
};
use crate::piles::Pile;

/// Two adjacent cards: `prev` lies underneath, `next` is placed on it.
#[derive(Clone, Copy, Debug)]
pub struct CardPair<'a> {
    pub prev: &'a Card,
    pub next: &'a Card,
}

impl<'a> CardPair<'a> {
    #[must_use]
    pub fn new(prev: &'a Card, next: &'a Card) -> Self {
        Self { prev, next }
    }

    fn descending(&self) -> bool {
        self.prev.ordinal() == self.next.ordinal() + 1
    }

    fn descending_wrap(&self) -> bool {
        self.descending() || (self.prev.ordinal() == ACE && self.next.ordinal() == KING)
    }

    fn ascending(&self) -> bool {
        self.prev.ordinal() + 1 == self.next.ordinal()
    }

    fn ascending_wrap(&self) -> bool {
        self.ascending() || (self.prev.ordinal() == KING && self.next.ordinal() == ACE)
    }

    fn same_suit(&self) -> bool {
        self.prev.suit() == self.next.suit()
    }

    fn alt_color(&self) -> bool {
        self.prev.color() != self.next.color()
    }
}

/// Adjacent pairs of a slice, bottom to top.
pub fn card_pairs(cards: &[Card]) -> impl Iterator<Item = CardPair<'_>> {
    cards.windows(2).map(|w| CardPair::new(&w[0], &w[1]))
}

/// Ordering predicate between two adjacent cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareRule {
    /// Down by one, any suit.
    Down,
    /// Down by one, any suit, Kings may go on Aces.
    DownWrap,
    /// Down by one in suit.
    DownSuit,
    /// Down by one in suit, Kings may go on Aces.
    DownSuitWrap,
    /// Down by one in alternating colours.
    DownAltColor,
    /// Down by one in alternating colours, Kings may go on Aces.
    DownAltColorWrap,
    /// Down by one in any suit but the same.
    DownOtherSuit,
    /// Up by one in suit.
    UpSuit,
    /// Up by one in suit, Aces may go on Kings.
    UpSuitWrap,
}

impl CompareRule {
    /// Check a single pair.
    pub fn compare(self, pair: CardPair<'_>) -> Legality {
        match self {
            CompareRule::Down => descending(pair),
            CompareRule::DownWrap => descending_wrap(pair),
            CompareRule::DownSuit => {
                same_suit(pair)?;
                descending(pair)
            }
            CompareRule::DownSuitWrap => {
                same_suit(pair)?;
                descending_wrap(pair)
            }
            CompareRule::DownAltColor => {
                alt_color(pair)?;
                descending(pair)
            }
            CompareRule::DownAltColorWrap => {
                alt_color(pair)?;
                descending_wrap(pair)
            }
            CompareRule::DownOtherSuit => {
                if pair.same_suit() {
                    return illegal("Cards must not be the same suit");
                }
                descending(pair)
            }
            CompareRule::UpSuit => {
                same_suit(pair)?;
                if !pair.ascending() {
                    return illegal("Cards must be in ascending sequence");
                }
                Ok(())
            }
            CompareRule::UpSuitWrap => {
                same_suit(pair)?;
                if !pair.ascending_wrap() {
                    return illegal("Cards must be in ascending sequence (Aces on Kings allowed)");
                }
                Ok(())
            }
        }
    }

    /// Check `next` placed on top of `prev`.
    pub fn compare_cards(self, prev: &Card, next: &Card) -> Legality {
        self.compare(CardPair::new(prev, next))
    }
}

fn descending(pair: CardPair<'_>) -> Legality {
    if !pair.descending() {
        return illegal("Cards must be in descending sequence");
    }
    Ok(())
}

fn descending_wrap(pair: CardPair<'_>) -> Legality {
    if !pair.descending_wrap() {
        return illegal("Cards must be in descending sequence (Kings on Aces allowed)");
    }
    Ok(())
}

fn same_suit(pair: CardPair<'_>) -> Legality {
    if !pair.same_suit() {
        return illegal("Cards must be the same suit");
    }
    Ok(())
}

fn alt_color(pair: CardPair<'_>) -> Legality {
    if !pair.alt_color() {
        return illegal("Cards must be in alternating colors");
    }
    Ok(())
}

/// Every adjacent pair of `tail` satisfies `rule`.
///
/// Returns the first failing pair's reason.
pub fn tail_conforms(tail: &[Card], rule: CompareRule) -> Legality {
    card_pairs(tail).try_for_each(|pair| rule.compare(pair))
}

/// Count adjacent pairs that are out of order under `rule`.
///
/// A pair with a face-down card always counts as unsorted.
pub fn unsorted_pairs<'a, I>(cards: I, rule: CompareRule) -> usize
where
    I: IntoIterator<Item = &'a Card>,
{
    let mut iter = cards.into_iter();
    let Some(mut prev) = iter.next() else {
        return 0;
    };
    let mut unsorted = 0;
    for next in iter {
        if prev.is_prone() || next.is_prone() || rule.compare_cards(prev, next).is_err() {
            unsorted += 1;
        }
        prev = next;
    }
    unsorted
}

/// Can an empty `pile` accept `card`, given the pile's label?
///
/// An unlabelled pile accepts anything; a labelled pile accepts only cards
/// of that ordinal.
pub fn compare_empty(pile: &Pile, card: &Card) -> Legality {
    if let Some(label) = pile.label() {
        let ord = ordinal_to_short_string(card.ordinal());
        if ord != label {
            return illegal(format!(
                "Can only accept {}, not {}",
                ordinal_to_long_string(label),
                ordinal_to_long_string(ord)
            ));
        }
    }
    Ok(())
}
