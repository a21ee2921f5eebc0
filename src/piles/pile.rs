//! Piles: ordered cards with a kind-specific movement policy.
//!
//! Every pile shares one contract (`can_move_tail`, `can_accept_tail`,
//! `conformant`, `complete`, `unsorted_pairs`) and dispatches on its
//! [`PileKind`]. Variant scripts layer their own rules on top; a move is
//! legal only when both the piles and the script agree.
//!
//! Cards are held in an `im::Vector` so a pile can be snapshotted in O(1)
//! for the undo history.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{
    any_cards_prone, illegal, Card, CardId, FanType, Legality, MoveType, PileId, Slot,
    CARDS_PER_SUIT,
};
use crate::rules::compare::{tail_conforms, unsorted_pairs, CompareRule};

use super::board::Board;

/// The role a pile plays on the baize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    /// Face-down cards waiting to be dealt.
    Stock,
    /// Cards dealt from the stock, top card playable.
    Waste,
    /// Where suits are built up to win.
    Foundation,
    /// Working columns.
    Tableau,
    /// A fixed supply, top card playable, never built on.
    Reserve,
    /// Holds at most one card.
    Cell,
    /// Receives completed 13-card runs.
    Discard,
}

impl PileKind {
    /// Staging piles are never considered sorted.
    #[must_use]
    pub const fn is_staging(self) -> bool {
        matches!(self, PileKind::Stock | PileKind::Waste | PileKind::Reserve)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PileKind::Stock => "Stock",
            PileKind::Waste => "Waste",
            PileKind::Foundation => "Foundation",
            PileKind::Tableau => "Tableau",
            PileKind::Reserve => "Reserve",
            PileKind::Cell => "Cell",
            PileKind::Discard => "Discard",
        }
    }
}

impl std::fmt::Display for PileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered stack of cards, bottom (index 0) to top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pile {
    id: PileId,
    kind: PileKind,
    slot: Slot,
    fan: FanType,
    move_type: MoveType,
    compare: CompareRule,
    label: Option<String>,
    cards: Vector<Card>,
}

impl Pile {
    /// Create an empty pile.
    ///
    /// The move type and natural ordering default per kind: tableaux move
    /// any run and build down in alternating colours, foundations build up
    /// in suit, everything else moves one card.
    #[must_use]
    pub fn new(id: PileId, kind: PileKind, slot: Slot, fan: FanType) -> Self {
        let (move_type, compare) = match kind {
            PileKind::Stock | PileKind::Foundation => (MoveType::None, CompareRule::UpSuitWrap),
            PileKind::Discard => (MoveType::None, CompareRule::DownSuit),
            PileKind::Tableau => (MoveType::Any, CompareRule::DownAltColor),
            PileKind::Waste | PileKind::Reserve | PileKind::Cell => {
                (MoveType::One, CompareRule::DownAltColor)
            }
        };
        Self {
            id,
            kind,
            slot,
            fan,
            move_type,
            compare,
            label: None,
            cards: Vector::new(),
        }
    }

    #[must_use]
    pub fn with_move_type(mut self, move_type: MoveType) -> Self {
        self.move_type = move_type;
        self
    }

    /// Set the pile's natural ordering, used by `unsorted_pairs`,
    /// `conformant` and `complete`.
    #[must_use]
    pub fn with_compare(mut self, compare: CompareRule) -> Self {
        self.compare = compare;
        self
    }

    // === Identity ===

    #[must_use]
    pub const fn id(&self) -> PileId {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> PileKind {
        self.kind
    }

    #[must_use]
    pub const fn slot(&self) -> Slot {
        self.slot
    }

    #[must_use]
    pub const fn fan(&self) -> FanType {
        self.fan
    }

    #[must_use]
    pub const fn move_type(&self) -> MoveType {
        self.move_type
    }

    #[must_use]
    pub const fn compare(&self) -> CompareRule {
        self.compare
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Set or clear the label. Returns true if it changed.
    pub fn set_label(&mut self, label: Option<String>) -> bool {
        if self.label == label {
            return false;
        }
        self.label = label;
        true
    }

    // === Cards ===

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Top card, if any.
    #[must_use]
    pub fn peek(&self) -> Option<&Card> {
        self.cards.back()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    pub(crate) fn peek_mut(&mut self) -> Option<&mut Card> {
        self.cards.back_mut()
    }

    /// Index of a card by identity.
    #[must_use]
    pub fn index_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == id)
    }

    /// Copy of the cards from `index` to the top.
    ///
    /// Empty if `index` is past the top.
    #[must_use]
    pub fn tail(&self, index: usize) -> Vec<Card> {
        if index >= self.cards.len() {
            return Vec::new();
        }
        self.cards.iter().skip(index).copied().collect()
    }

    /// Put a card on top.
    ///
    /// The card takes this pile as its owner. Cards pushed onto a stock turn
    /// face down, onto anything else face up. Returns true if the card's
    /// orientation changed.
    pub fn push(&mut self, mut card: Card) -> bool {
        card.set_owner(self.id, self.cards.len());
        let flipped = if self.kind == PileKind::Stock {
            card.flip_down()
        } else {
            card.flip_up()
        };
        self.cards.push_back(card);
        flipped
    }

    /// Take the top card. `None` on an empty pile.
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Remove the card at `index`, closing the gap.
    pub fn delete(&mut self, index: usize) -> Option<Card> {
        if index >= self.cards.len() {
            return None;
        }
        let card = self.cards.remove(index);
        for (slot, c) in self.cards.iter_mut().enumerate().skip(index) {
            c.set_owner(self.id, slot);
        }
        Some(card)
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }

    pub(crate) fn restore(&mut self, cards: Vector<Card>, label: Option<String>) {
        self.cards = cards;
        self.label = label;
    }

    // === Movement policy ===

    /// Can `tail` be lifted from this pile, regardless of destination?
    pub fn can_move_tail(&self, tail: &[Card]) -> Legality {
        if tail.is_empty() {
            return illegal("There is nothing to move");
        }
        if any_cards_prone(tail) {
            return illegal("Cannot move a face down card");
        }
        match self.kind {
            PileKind::Stock => illegal("Cards cannot be dragged from the Stock"),
            PileKind::Foundation => illegal("Cannot move cards from a Foundation"),
            PileKind::Discard => illegal("Cannot move cards from a Discard"),
            PileKind::Waste | PileKind::Reserve | PileKind::Cell => {
                if tail.len() > 1 {
                    return illegal(format!("Can only move a single card from a {}", self.kind));
                }
                Ok(())
            }
            PileKind::Tableau => match self.move_type {
                MoveType::None => illegal("Cannot move cards from this Tableau"),
                MoveType::One if tail.len() > 1 => illegal("Can only move one card"),
                MoveType::OneOrAll if tail.len() > 1 && tail.len() != self.len() => {
                    illegal("Can only move one card, or the whole pile")
                }
                _ => Ok(()),
            },
        }
    }

    /// Can this pile receive a single card?
    pub fn can_accept_card(&self, card: &Card, board: &Board) -> Legality {
        match self.kind {
            PileKind::Stock => illegal("Cannot move cards to the Stock"),
            PileKind::Reserve => illegal("Cannot move cards to a Reserve"),
            PileKind::Waste => {
                if board.kind_of(card.owner()) != Some(PileKind::Stock) {
                    return illegal("Waste can only accept cards from the Stock");
                }
                Ok(())
            }
            PileKind::Foundation => {
                if self.len() >= CARDS_PER_SUIT {
                    return illegal("The Foundation is full");
                }
                if card.is_prone() {
                    return illegal("Cannot add a face down card");
                }
                Ok(())
            }
            PileKind::Tableau => {
                if card.is_prone() {
                    return illegal("Cannot add a face down card");
                }
                Ok(())
            }
            PileKind::Cell => {
                if !self.is_empty() {
                    return illegal("A Cell can only hold one card");
                }
                if card.is_prone() {
                    return illegal("Cannot add a face down card");
                }
                Ok(())
            }
            PileKind::Discard => illegal("A Discard can only accept a complete run of 13 cards"),
        }
    }

    /// Can this pile receive `tail` on top?
    pub fn can_accept_tail(&self, tail: &[Card], board: &Board) -> Legality {
        let Some(first) = tail.first() else {
            return illegal("There is nothing to move");
        };
        if self.kind != PileKind::Discard && tail.len() == 1 {
            return self.can_accept_card(first, board);
        }
        match self.kind {
            PileKind::Stock | PileKind::Reserve => self.can_accept_card(first, board),
            PileKind::Waste => {
                self.can_accept_card(first, board)?;
                illegal("Waste can only accept a single card")
            }
            PileKind::Foundation => illegal("Cannot move more than one card to a Foundation"),
            PileKind::Cell => illegal("Can only move one card to a Cell"),
            PileKind::Tableau => {
                if any_cards_prone(tail) {
                    return illegal("Cannot add a face down card");
                }
                if self.move_type == MoveType::OnePlus {
                    let power = board.power_moves(self.id);
                    if tail.len() > power {
                        return illegal(format!(
                            "Only enough space to move {} cards, not {}",
                            power,
                            tail.len()
                        ));
                    }
                }
                Ok(())
            }
            PileKind::Discard => {
                if !self.is_empty() {
                    return illegal("The Discard is already full");
                }
                if tail.len() != CARDS_PER_SUIT || any_cards_prone(tail) {
                    return illegal("A Discard can only accept a complete run of 13 cards");
                }
                tail_conforms(tail, self.compare)
            }
        }
    }

    // === Progress ===

    /// Does the pile need no further internal reordering?
    #[must_use]
    pub fn conformant(&self) -> bool {
        match self.kind {
            PileKind::Stock => self.is_empty(),
            PileKind::Waste | PileKind::Reserve => self.len() < 2,
            PileKind::Foundation | PileKind::Cell | PileKind::Discard => true,
            PileKind::Tableau => self.unsorted_pairs() == 0,
        }
    }

    /// Has the pile reached its terminal state?
    #[must_use]
    pub fn complete(&self) -> bool {
        match self.kind {
            PileKind::Foundation => self.len() == CARDS_PER_SUIT,
            PileKind::Stock | PileKind::Waste | PileKind::Reserve | PileKind::Cell => {
                self.is_empty()
            }
            PileKind::Discard => self.is_empty() || self.len() == CARDS_PER_SUIT,
            PileKind::Tableau => {
                self.is_empty() || (self.len() == CARDS_PER_SUIT && self.unsorted_pairs() == 0)
            }
        }
    }

    /// Adjacent pairs that break the pile's natural ordering.
    ///
    /// Staging piles (stock, waste, reserve) are never sorted and report
    /// `len - 1`.
    #[must_use]
    pub fn unsorted_pairs(&self) -> usize {
        match self.kind {
            PileKind::Stock | PileKind::Waste | PileKind::Reserve => {
                self.len().saturating_sub(1)
            }
            PileKind::Cell | PileKind::Discard => 0,
            PileKind::Foundation | PileKind::Tableau => unsorted_pairs(&self.cards, self.compare),
        }
    }
}
