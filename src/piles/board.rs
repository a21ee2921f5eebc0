//! The board: every pile of one game plus the authoritative deal helpers.
//!
//! The `Board` owns all piles and cards. Variant scripts receive it by
//! reference and mutate it only through the helpers here, which keep card
//! ownership, dirty flags and the event queue consistent. Every mutation
//! also bumps a change counter so the session can tell whether a tap did
//! anything worth recording.
//!
//! ## Usage
//!
//! ```
//! use patience::core::{FanType, Slot, Suit};
//! use patience::piles::Board;
//!
//! let mut board = Board::new();
//! let stock = board.add_stock(Slot::new(0, 0), 1, &Suit::ALL);
//! let waste = board.add_waste(Slot::new(1, 0), FanType::Right3);
//!
//! let card = board.move_card(stock, waste).unwrap();
//! assert_eq!(board.pile(waste).unwrap().peek().unwrap().id(), card);
//! assert_eq!(board.total_cards(), 52);
//! ```

use im::Vector;

use crate::core::{
    illegal, Card, CardId, FanType, GameRng, Legality, MoveError, MoveType, PileId, Slot, Suit,
    ACE, KING,
};
use crate::events::{DirtyFlags, GameEvent};
use crate::rules::compare::CompareRule;

use super::pile::{Pile, PileKind};

/// Cards and label of one pile at a point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PileSnapshot {
    cards: Vector<Card>,
    label: Option<String>,
}

/// Everything undo needs to put the board back exactly: every pile's cards
/// (orientation included), labels and the recycle count.
///
/// Cheap to take: pile contents are persistent vectors, so a snapshot
/// shares structure with the live board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    piles: Vec<PileSnapshot>,
    recycles: u32,
}

impl BoardSnapshot {
    /// Total cards across all piles in the snapshot.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.piles.iter().map(|p| p.cards.len()).sum()
    }
}

/// All piles of a game.
#[derive(Clone, Debug)]
pub struct Board {
    piles: Vec<Pile>,
    recycles: u32,
    /// `None` means unlimited.
    recycle_limit: Option<u32>,
    power_moves: bool,
    dirty: DirtyFlags,
    events: Vec<GameEvent>,
    changes: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with power moves enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            piles: Vec::new(),
            recycles: 0,
            recycle_limit: None,
            power_moves: true,
            dirty: DirtyFlags::ALL,
            events: Vec::new(),
            changes: 0,
        }
    }

    #[must_use]
    pub fn with_power_moves(mut self, enabled: bool) -> Self {
        self.power_moves = enabled;
        self
    }

    // === Layout ===

    fn add_pile(&mut self, pile: Pile) -> PileId {
        let id = pile.id();
        self.piles.push(pile);
        id
    }

    fn next_id(&self) -> PileId {
        PileId::new(self.piles.len() as u16)
    }

    /// Add a stock holding `packs` packs of the given suits, face down.
    pub fn add_stock(&mut self, slot: Slot, packs: u8, suits: &[Suit]) -> PileId {
        let id = self.next_id();
        let mut stock = Pile::new(id, PileKind::Stock, slot, FanType::None);
        for pack in 0..packs {
            for &suit in suits {
                for ordinal in ACE..=KING {
                    stock.push(Card::new(CardId::new(pack, suit, ordinal), id));
                }
            }
        }
        self.add_pile(stock)
    }

    pub fn add_waste(&mut self, slot: Slot, fan: FanType) -> PileId {
        let id = self.next_id();
        self.add_pile(Pile::new(id, PileKind::Waste, slot, fan))
    }

    pub fn add_foundation(&mut self, slot: Slot) -> PileId {
        let id = self.next_id();
        self.add_pile(Pile::new(id, PileKind::Foundation, slot, FanType::None))
    }

    /// Add a tableau with its move type and natural ordering.
    pub fn add_tableau(
        &mut self,
        slot: Slot,
        fan: FanType,
        move_type: MoveType,
        compare: CompareRule,
    ) -> PileId {
        let id = self.next_id();
        let pile = Pile::new(id, PileKind::Tableau, slot, fan)
            .with_move_type(move_type)
            .with_compare(compare);
        self.add_pile(pile)
    }

    pub fn add_reserve(&mut self, slot: Slot, fan: FanType) -> PileId {
        let id = self.next_id();
        self.add_pile(Pile::new(id, PileKind::Reserve, slot, fan))
    }

    pub fn add_cell(&mut self, slot: Slot) -> PileId {
        let id = self.next_id();
        self.add_pile(Pile::new(id, PileKind::Cell, slot, FanType::None))
    }

    pub fn add_discard(&mut self, slot: Slot) -> PileId {
        let id = self.next_id();
        self.add_pile(Pile::new(id, PileKind::Discard, slot, FanType::None))
    }

    // === Lookup ===

    #[must_use]
    pub fn pile(&self, id: PileId) -> Option<&Pile> {
        self.piles.get(id.index())
    }

    pub(crate) fn pile_mut(&mut self, id: PileId) -> Option<&mut Pile> {
        self.piles.get_mut(id.index())
    }

    #[must_use]
    pub fn piles(&self) -> &[Pile] {
        &self.piles
    }

    #[must_use]
    pub fn kind_of(&self, id: PileId) -> Option<PileKind> {
        self.pile(id).map(Pile::kind)
    }

    /// Ids of every pile of `kind`, in layout order.
    pub fn piles_of(&self, kind: PileKind) -> impl Iterator<Item = PileId> + '_ {
        self.piles
            .iter()
            .filter(move |p| p.kind() == kind)
            .map(Pile::id)
    }

    /// The pile that holds `card`, by scanning every pile.
    #[must_use]
    pub fn find_card_owner(&self, card: CardId) -> Option<PileId> {
        self.piles
            .iter()
            .find(|p| p.index_of(card).is_some())
            .map(Pile::id)
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.piles.iter().map(Pile::len).sum()
    }

    fn checked(&self, id: PileId) -> Option<PileId> {
        if id.index() < self.piles.len() {
            Some(id)
        } else {
            MoveError::structural(format!("unknown pile {id}"));
            None
        }
    }

    // === Deal helpers ===

    /// Push a card taken from `src` onto `dst`, announcing the move and any
    /// change of orientation.
    fn place(&mut self, card: Card, src: PileId, dst: PileId) -> CardId {
        let id = card.id();
        let pile = &mut self.piles[dst.index()];
        let flipped = pile.push(card);
        let face_up = pile.kind() != PileKind::Stock;
        self.events.push(GameEvent::CardMoved {
            card: id,
            from: src,
            to: dst,
        });
        if flipped {
            self.events.push(GameEvent::CardFlipped {
                card: id,
                pile: dst,
                face_up,
            });
        }
        id
    }

    /// Move the top card of `src` onto `dst`, flipping up the newly exposed
    /// card of a non-stock `src`.
    ///
    /// Returns the moved card, or `None` if `src` was empty.
    pub fn move_card(&mut self, src: PileId, dst: PileId) -> Option<CardId> {
        self.checked(src)?;
        self.checked(dst)?;
        let card = self.piles[src.index()].pop()?;
        let id = self.place(card, src, dst);
        self.flip_up_exposed(src);
        self.touch(DirtyFlags::CARD_POSITIONS);
        Some(id)
    }

    /// Move a specific card, wherever it lies in `src`, onto `dst`.
    ///
    /// Matches suit and ordinal in any pack. A missing card is a structural
    /// error.
    pub fn move_named_card(
        &mut self,
        src: PileId,
        suit: Suit,
        ordinal: u8,
        dst: PileId,
    ) -> Option<CardId> {
        self.checked(src)?;
        self.checked(dst)?;
        let wanted = CardId::new(0, suit, ordinal);
        let pile = &mut self.piles[src.index()];
        let Some(index) = pile.cards().iter().position(|c| c.id().same_card(wanted)) else {
            MoveError::structural(format!("{wanted} not found in {src}"));
            return None;
        };
        let card = pile.delete(index)?;
        let id = self.place(card, src, dst);
        self.flip_up_exposed(src);
        self.touch(DirtyFlags::CARD_POSITIONS);
        Some(id)
    }

    /// Move the cards from `index` to the top of `src` onto `dst`,
    /// preserving their order.
    ///
    /// Returns the number of cards moved.
    pub fn move_cards(&mut self, src: PileId, index: usize, dst: PileId) -> usize {
        if self.checked(src).is_none() || self.checked(dst).is_none() {
            return 0;
        }
        let len = self.piles[src.index()].len();
        if index >= len {
            MoveError::structural(format!("index {index} out of range for {src} of {len}"));
            return 0;
        }

        let mut tail = Vec::with_capacity(len - index);
        while self.piles[src.index()].len() > index {
            if let Some(card) = self.piles[src.index()].pop() {
                tail.push(card);
            }
        }
        let moved = tail.len();
        for card in tail.into_iter().rev() {
            self.place(card, src, dst);
        }
        self.flip_up_exposed(src);
        self.touch(DirtyFlags::CARD_POSITIONS);
        moved
    }

    /// Move every card of `src` onto `dst`, bottom card first.
    pub fn move_all_cards(&mut self, src: PileId, dst: PileId) -> usize {
        let empty = self.pile(src).map_or(true, Pile::is_empty);
        if empty {
            return 0;
        }
        self.move_cards(src, 0, dst)
    }

    /// Turn the top card of a pile face up. Stocks are left alone.
    pub fn flip_up_exposed(&mut self, id: PileId) {
        let Some(pile) = self.pile_mut(id) else {
            return;
        };
        if pile.kind() == PileKind::Stock {
            return;
        }
        if let Some(card) = pile.peek_mut() {
            if card.flip_up() {
                let card = card.id();
                self.events.push(GameEvent::CardFlipped {
                    card,
                    pile: id,
                    face_up: true,
                });
                self.touch(DirtyFlags::CARD_POSITIONS);
            }
        }
    }

    /// Turn the card at `index` face down. Returns true if it changed.
    pub fn flip_down(&mut self, id: PileId, index: usize) -> bool {
        let Some(card) = self.pile_mut(id).and_then(|p| p.get_mut(index)) else {
            MoveError::structural(format!("no card at {index} in {id}"));
            return false;
        };
        if !card.flip_down() {
            return false;
        }
        let card = card.id();
        self.events.push(GameEvent::CardFlipped {
            card,
            pile: id,
            face_up: false,
        });
        self.touch(DirtyFlags::CARD_POSITIONS);
        true
    }

    /// Turn the top card of a pile face down.
    pub fn flip_down_top(&mut self, id: PileId) -> bool {
        match self.pile(id).map(Pile::len) {
            Some(len) if len > 0 => self.flip_down(id, len - 1),
            _ => false,
        }
    }

    /// Shuffle a pile in place with the game's RNG.
    pub fn shuffle_pile(&mut self, id: PileId, rng: &mut GameRng) {
        let Some(pile) = self.pile_mut(id) else {
            return;
        };
        let mut cards: Vec<Card> = pile.cards().iter().copied().collect();
        rng.shuffle(&mut cards);
        pile.clear();
        for card in cards {
            pile.push(card);
        }
        self.touch(DirtyFlags::CARD_POSITIONS);
    }

    // === Recycling ===

    /// Turn the waste back over onto the stock.
    ///
    /// Cards are moved one at a time, so their order reverses and they land
    /// face down, each announced as a flip. An empty waste is a no-op.
    /// Refused once the recycle limit is used up.
    pub fn recycle_waste_to_stock(&mut self, waste: PileId, stock: PileId) -> Legality {
        if self.checked(waste).is_none() || self.checked(stock).is_none() {
            return Ok(());
        }
        if self.piles[waste.index()].is_empty() {
            return Ok(());
        }
        if !self.can_recycle() {
            return illegal("No more recycles");
        }

        let mut count = 0;
        while let Some(card) = self.piles[waste.index()].pop() {
            let id = card.id();
            if self.piles[stock.index()].push(card) {
                self.events.push(GameEvent::CardFlipped {
                    card: id,
                    pile: stock,
                    face_up: false,
                });
            }
            count += 1;
        }
        self.recycles += 1;
        self.events.push(GameEvent::PileRecycled {
            from: waste,
            to: stock,
            count,
        });
        log::debug!("recycled {count} cards, {} recycles used", self.recycles);
        self.touch(DirtyFlags::CARD_POSITIONS | DirtyFlags::GAME_STATE);
        Ok(())
    }

    /// Set how many times the waste may be recycled. `None` is unlimited.
    pub fn set_recycle_limit(&mut self, limit: Option<u32>) {
        self.recycle_limit = limit;
        self.recycles = 0;
        self.touch(DirtyFlags::GAME_STATE);
    }

    /// Recycles used so far.
    #[must_use]
    pub const fn recycles(&self) -> u32 {
        self.recycles
    }

    #[must_use]
    pub const fn recycle_limit(&self) -> Option<u32> {
        self.recycle_limit
    }

    /// Is another recycle allowed?
    #[must_use]
    pub fn can_recycle(&self) -> bool {
        self.recycle_limit.map_or(true, |limit| self.recycles < limit)
    }

    // === Labels ===

    /// Set or clear a pile's label.
    pub fn set_label(&mut self, id: PileId, label: Option<String>) {
        let Some(pile) = self.pile_mut(id) else {
            MoveError::structural(format!("unknown pile {id}"));
            return;
        };
        if pile.set_label(label) {
            self.touch(DirtyFlags::PILE_LABELS);
        }
    }

    // === Power moves ===

    #[must_use]
    pub const fn power_moves_enabled(&self) -> bool {
        self.power_moves
    }

    /// How many cards a `OnePlus` tableau can move onto `dst` at once.
    ///
    /// `(1 + empty cells) * 2 ^ (empty unlabelled tableaux other than dst)`,
    /// or 1 when power moves are disabled.
    #[must_use]
    pub fn power_moves(&self, dst: PileId) -> usize {
        if !self.power_moves {
            return 1;
        }
        let cells = self
            .piles
            .iter()
            .filter(|p| p.kind() == PileKind::Cell && p.is_empty())
            .count();
        let tableaux = self
            .piles
            .iter()
            .filter(|p| {
                p.kind() == PileKind::Tableau && p.is_empty() && p.label().is_none() && p.id() != dst
            })
            .count();
        (1 + cells).saturating_mul(1usize << tableaux.min(16))
    }

    // === Outbound ===

    fn touch(&mut self, flags: DirtyFlags) {
        self.dirty.insert(flags);
        self.changes += 1;
    }

    pub(crate) fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty.insert(flags);
    }

    /// Take and clear the dirty flags.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Monotonic count of mutations.
    #[must_use]
    pub const fn changes(&self) -> u64 {
        self.changes
    }

    // === Snapshots ===

    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            piles: self
                .piles
                .iter()
                .map(|p| PileSnapshot {
                    cards: p.cards().clone(),
                    label: p.label().map(str::to_owned),
                })
                .collect(),
            recycles: self.recycles,
        }
    }

    /// Put every pile back to `snapshot`.
    pub fn restore(&mut self, snapshot: &BoardSnapshot) {
        if snapshot.piles.len() != self.piles.len() {
            MoveError::structural(format!(
                "snapshot has {} piles, board has {}",
                snapshot.piles.len(),
                self.piles.len()
            ));
            return;
        }
        for (pile, saved) in self.piles.iter_mut().zip(&snapshot.piles) {
            pile.restore(saved.cards.clone(), saved.label.clone());
        }
        self.recycles = snapshot.recycles;
        self.touch(DirtyFlags::ALL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock_and_waste() -> (Board, PileId, PileId) {
        let mut board = Board::new();
        let stock = board.add_stock(Slot::new(0, 0), 1, &Suit::ALL);
        let waste = board.add_waste(Slot::new(1, 0), FanType::Right3);
        (board, stock, waste)
    }

    #[test]
    fn test_add_stock_builds_face_down_pack() {
        let mut board = Board::new();
        let stock = board.add_stock(Slot::default(), 2, &Suit::ALL);
        let pile = board.pile(stock).unwrap();
        assert_eq!(pile.len(), 104);
        assert!(pile.cards().iter().all(Card::is_prone));
        assert!(pile.cards().iter().all(|c| c.owner() == stock));
    }

    #[test]
    fn test_move_card_pops_and_pushes() {
        let (mut board, stock, waste) = stock_and_waste();
        let top = board.pile(stock).unwrap().peek().unwrap().id();

        let moved = board.move_card(stock, waste).unwrap();
        assert_eq!(moved, top);
        assert_eq!(board.pile(stock).unwrap().len(), 51);

        let card = board.pile(waste).unwrap().peek().unwrap();
        assert!(!card.is_prone());
        assert_eq!(card.owner(), waste);
        assert!(board.pile(stock).unwrap().peek().unwrap().is_prone());

        let events = board.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::CardMoved {
                    card: moved,
                    from: stock,
                    to: waste
                },
                GameEvent::CardFlipped {
                    card: moved,
                    pile: waste,
                    face_up: true
                }
            ]
        );
        assert!(board.take_dirty().contains(DirtyFlags::CARD_POSITIONS));
    }

    #[test]
    fn test_move_card_from_empty_is_none() {
        let mut board = Board::new();
        let waste = board.add_waste(Slot::default(), FanType::None);
        let cell = board.add_cell(Slot::default());
        assert!(board.move_card(waste, cell).is_none());
    }

    #[test]
    fn test_move_named_card() {
        let (mut board, stock, waste) = stock_and_waste();
        let id = board.move_named_card(stock, Suit::Heart, 2, waste).unwrap();
        assert_eq!(id, CardId::new(0, Suit::Heart, 2));
        assert_eq!(board.find_card_owner(id), Some(waste));

        // Slots in the stock are closed up
        let stock_pile = board.pile(stock).unwrap();
        for (i, card) in stock_pile.cards().iter().enumerate() {
            assert_eq!(card.slot(), i);
        }
    }

    #[test]
    fn test_move_cards_preserves_order_and_exposes() {
        let mut board = Board::new();
        let stock = board.add_stock(Slot::default(), 1, &[Suit::Club]);
        let a = board.add_tableau(Slot::new(0, 1), FanType::Down, MoveType::Any, CompareRule::Down);
        let b = board.add_tableau(Slot::new(1, 1), FanType::Down, MoveType::Any, CompareRule::Down);
        for _ in 0..4 {
            board.move_card(stock, a);
        }
        board.flip_down(a, 0);
        board.flip_down(a, 1);

        let before: Vec<CardId> = board.pile(a).unwrap().tail(2).iter().map(Card::id).collect();
        assert_eq!(board.move_cards(a, 2, b), 2);

        let after: Vec<CardId> = board.pile(b).unwrap().cards().iter().map(Card::id).collect();
        assert_eq!(before, after);
        assert!(!board.pile(a).unwrap().peek().unwrap().is_prone());
        assert!(board.pile(a).unwrap().get(0).unwrap().is_prone());
    }

    #[test]
    fn test_move_onto_face_up_pile_announces_no_flip() {
        let (mut board, stock, waste) = stock_and_waste();
        let cell = board.add_cell(Slot::new(2, 0));
        board.move_card(stock, waste);
        board.drain_events();

        let card = board.move_card(waste, cell).unwrap();
        assert_eq!(
            board.drain_events(),
            vec![GameEvent::CardMoved {
                card,
                from: waste,
                to: cell
            }]
        );
    }

    #[test]
    fn test_move_cards_announces_each_flip() {
        let mut board = Board::new();
        let stock = board.add_stock(Slot::default(), 1, &[Suit::Spade]);
        let reserve = board.add_reserve(Slot::new(0, 1), FanType::Down);
        board.move_card(stock, reserve);
        board.move_card(stock, reserve);
        board.flip_down(reserve, 0);
        board.flip_down(reserve, 1);
        board.drain_events();

        let waste = board.add_waste(Slot::new(1, 0), FanType::Right3);
        assert_eq!(board.move_cards(reserve, 0, waste), 2);
        let flips = board
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::CardFlipped { pile, face_up: true, .. } if *pile == waste))
            .count();
        assert_eq!(flips, 2);
    }

    #[test]
    fn test_move_all_cards() {
        let (mut board, stock, waste) = stock_and_waste();
        assert_eq!(board.move_all_cards(stock, waste), 52);
        assert!(board.pile(stock).unwrap().is_empty());
        assert_eq!(board.move_all_cards(stock, waste), 0);
    }

    #[test]
    fn test_recycle_reverses_and_counts() {
        let (mut board, stock, waste) = stock_and_waste();
        board.set_recycle_limit(Some(1));
        for _ in 0..3 {
            board.move_card(stock, waste);
        }
        let dealt: Vec<CardId> = board.pile(waste).unwrap().cards().iter().map(Card::id).collect();
        board.drain_events();

        board.recycle_waste_to_stock(waste, stock).unwrap();
        assert!(board.pile(waste).unwrap().is_empty());
        assert_eq!(board.recycles(), 1);

        let stock_pile = board.pile(stock).unwrap();
        let returned: Vec<CardId> = stock_pile.cards().iter().rev().take(3).map(Card::id).collect();
        assert_eq!(returned, dealt);
        assert!(stock_pile.peek().unwrap().is_prone());

        let mut expected: Vec<GameEvent> = dealt
            .iter()
            .rev()
            .map(|&card| GameEvent::CardFlipped {
                card,
                pile: stock,
                face_up: false,
            })
            .collect();
        expected.push(GameEvent::PileRecycled {
            from: waste,
            to: stock,
            count: 3,
        });
        assert_eq!(board.drain_events(), expected);

        board.move_card(stock, waste);
        let err = board.recycle_waste_to_stock(waste, stock).unwrap_err();
        assert_eq!(err.reason(), "No more recycles");
        assert_eq!(board.pile(waste).unwrap().len(), 1);
    }

    #[test]
    fn test_recycle_empty_waste_is_noop() {
        let (mut board, stock, waste) = stock_and_waste();
        board.set_recycle_limit(Some(0));
        let changes = board.changes();
        assert!(board.recycle_waste_to_stock(waste, stock).is_ok());
        assert_eq!(board.changes(), changes);
    }

    #[test]
    fn test_unlimited_recycles() {
        let board = Board::new();
        assert!(board.can_recycle());
        assert_eq!(board.recycle_limit(), None);
    }

    #[test]
    fn test_power_moves() {
        let mut board = Board::new();
        let t0 = board.add_tableau(Slot::new(0, 1), FanType::Down, MoveType::OnePlus, CompareRule::DownSuit);
        let _t1 = board.add_tableau(Slot::new(1, 1), FanType::Down, MoveType::OnePlus, CompareRule::DownSuit);
        let t2 = board.add_tableau(Slot::new(2, 1), FanType::Down, MoveType::OnePlus, CompareRule::DownSuit);
        let _cell = board.add_cell(Slot::new(3, 0));

        // one empty cell, two empty tableaux besides t0
        assert_eq!(board.power_moves(t0), 2 * 4);

        board.set_label(t2, Some("K".to_string()));
        assert_eq!(board.power_moves(t0), 2 * 2);

        let board = board.with_power_moves(false);
        assert_eq!(board.power_moves(t0), 1);
    }

    #[test]
    fn test_snapshot_restore_is_exact() {
        let (mut board, stock, waste) = stock_and_waste();
        let foundation = board.add_foundation(Slot::new(3, 0));
        board.set_recycle_limit(None);
        let before = board.snapshot();

        board.move_card(stock, waste);
        board.move_card(stock, waste);
        board.set_label(foundation, Some("A".to_string()));
        board.recycle_waste_to_stock(waste, stock).unwrap();
        assert_ne!(board.snapshot(), before);

        board.restore(&before);
        assert_eq!(board.snapshot(), before);
        assert_eq!(board.recycles(), 0);
        assert_eq!(board.pile(foundation).unwrap().label(), None);
        assert_eq!(before.total_cards(), 52);
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let (mut a, stock, _) = stock_and_waste();
        let (mut b, _, _) = stock_and_waste();
        a.shuffle_pile(stock, &mut GameRng::new(9));
        b.shuffle_pile(stock, &mut GameRng::new(9));
        assert_eq!(a.snapshot(), b.snapshot());
        assert!(a.pile(stock).unwrap().cards().iter().all(Card::is_prone));
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "structural error"))]
    fn test_named_card_missing_is_structural() {
        let mut board = Board::new();
        let stock = board.add_stock(Slot::default(), 1, &[Suit::Club]);
        let waste = board.add_waste(Slot::default(), FanType::None);
        assert!(board.move_named_card(stock, Suit::Heart, 2, waste).is_none());
    }
}
