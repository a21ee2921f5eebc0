//! Canfield and relatives.
//!
//! Layout: stock and waste top left, a 13-card reserve below them, four
//! foundations and four tableaux to the right. Foundations build up in suit
//! from a base rank taken from the first card dealt, wrapping from King to
//! Ace. Tableau spaces are filled from the reserve at once; when the
//! reserve runs out they may be filled from the waste, never from another
//! tableau.

use serde::{Deserialize, Serialize};

use crate::core::{
    illegal, ordinal_to_short_string, Card, FanType, Legality, MoveType, PileId, Slot, Suit,
};
use crate::piles::{Board, Pile, PileKind};
use crate::rules::compare::{tail_conforms, unsorted_pairs, CompareRule};
use crate::rules::script::{PileGroups, Tapped, VariantInfo, VariantScript};

/// Parameters of a Canfield-style game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanfieldParams {
    /// Cards turned from stock to waste per tap.
    pub draw: usize,
    /// Times the waste can be turned back. `None` is unlimited.
    pub recycles: Option<u32>,
    /// Ordering for building on tableaux.
    pub tab_compare: CompareRule,
    /// Deal the four 2s to the foundations instead of pinning a base rank.
    pub storehouse: bool,
}

impl Default for CanfieldParams {
    fn default() -> Self {
        Self::canfield()
    }
}

impl CanfieldParams {
    /// Classic Canfield: draw three, unlimited recycles.
    #[must_use]
    pub fn canfield() -> Self {
        Self {
            draw: 3,
            recycles: None,
            tab_compare: CompareRule::DownAltColorWrap,
            storehouse: false,
        }
    }

    #[must_use]
    pub fn draw_one() -> Self {
        Self {
            draw: 1,
            ..Self::canfield()
        }
    }

    /// Storehouse: foundations start from the 2s, tableaux build down in suit.
    #[must_use]
    pub fn storehouse() -> Self {
        Self {
            draw: 1,
            recycles: Some(2),
            tab_compare: CompareRule::DownSuitWrap,
            storehouse: true,
        }
    }

    /// Rainbow: tableaux build down regardless of suit.
    #[must_use]
    pub fn rainbow() -> Self {
        Self {
            draw: 1,
            recycles: Some(2),
            tab_compare: CompareRule::DownWrap,
            storehouse: false,
        }
    }
}

/// The Canfield script.
#[derive(Clone, Debug)]
pub struct Canfield {
    params: CanfieldParams,
    piles: PileGroups,
}

impl Canfield {
    #[must_use]
    pub fn new(params: CanfieldParams) -> Self {
        Self {
            params,
            piles: PileGroups::default(),
        }
    }

    #[must_use]
    pub fn params(&self) -> &CanfieldParams {
        &self.params
    }

    fn stock(&self) -> Option<PileId> {
        self.piles.stock
    }

    fn reserve(&self) -> Option<PileId> {
        self.piles.reserves.first().copied()
    }

    fn pin_foundations(&self, board: &mut Board, ordinal: u8) {
        let label = ordinal_to_short_string(ordinal);
        for &id in &self.piles.foundations {
            board.set_label(id, Some(label.to_string()));
        }
    }

    fn foundation_append_error(&self, dst: &Pile, card: &Card, board: &Board) -> Legality {
        let Some(top) = dst.peek() else {
            let ord = ordinal_to_short_string(card.ordinal());
            return match dst.label() {
                None => {
                    if board.kind_of(card.owner()) != Some(PileKind::Reserve) {
                        return illegal("The first Foundation card must come from a Reserve");
                    }
                    Ok(())
                }
                Some(label) if label != ord => illegal(format!(
                    "Foundations can only accept an {label}, not a {ord}"
                )),
                Some(_) => Ok(()),
            };
        };
        CompareRule::UpSuitWrap.compare_cards(top, card)
    }

    fn tableau_append_error(&self, dst: &Pile, card: &Card, board: &Board) -> Legality {
        match dst.peek() {
            None => {
                if board.kind_of(card.owner()) == Some(PileKind::Tableau) {
                    return illegal("An empty Tableau must be filled from the Reserve or Waste");
                }
                Ok(())
            }
            Some(top) => self.params.tab_compare.compare_cards(top, card),
        }
    }
}

impl VariantScript for Canfield {
    fn info(&self) -> VariantInfo {
        VariantInfo {
            window_shape: "square",
            wikipedia: "https://en.wikipedia.org/wiki/Canfield_(solitaire)",
            relaxable: false,
        }
    }

    fn build_piles(&mut self, board: &mut Board) {
        self.piles = PileGroups::default();
        self.piles.stock = Some(board.add_stock(Slot::new(0, 0), 1, &Suit::ALL));
        self.piles.waste = Some(board.add_waste(Slot::new(1, 0), FanType::Right3));
        self.piles
            .reserves
            .push(board.add_reserve(Slot::new(0, 1), FanType::Down));
        for x in 3..7 {
            self.piles.foundations.push(board.add_foundation(Slot::new(x, 0)));
        }
        for x in 3..7 {
            self.piles.tableaux.push(board.add_tableau(
                Slot::new(x, 1),
                FanType::Down,
                MoveType::OneOrAll,
                self.params.tab_compare,
            ));
        }
    }

    fn start_game(&mut self, board: &mut Board) {
        let (Some(stock), Some(reserve)) = (self.stock(), self.reserve()) else {
            return;
        };

        if self.params.storehouse {
            for (&foundation, suit) in self.piles.foundations.iter().zip(Suit::ALL) {
                board.move_named_card(stock, suit, 2, foundation);
            }
        } else if let Some(&first) = self.piles.foundations.first() {
            if let Some(card) = board.move_card(stock, first) {
                self.pin_foundations(board, card.ordinal);
            }
        }

        for _ in 0..12 {
            board.move_card(stock, reserve);
            board.flip_down_top(reserve);
        }
        board.move_card(stock, reserve);

        for &tableau in &self.piles.tableaux {
            board.move_card(stock, tableau);
        }

        board.set_recycle_limit(self.params.recycles);
    }

    /// Fill empty tableaux from the reserve. Foundation labels are pinned
    /// once at `start_game` and never change afterwards.
    fn after_move(&self, board: &mut Board) {
        let Some(reserve) = self.reserve() else {
            return;
        };
        for &tableau in &self.piles.tableaux {
            if board.pile(tableau).is_some_and(Pile::is_empty) {
                board.move_card(reserve, tableau);
            }
        }
    }

    fn tail_move_error(&self, board: &Board, tail: &[Card]) -> Legality {
        match tail.first().map(|c| board.kind_of(c.owner())) {
            Some(Some(PileKind::Tableau)) => tail_conforms(tail, self.params.tab_compare),
            _ => Ok(()),
        }
    }

    fn tail_append_error(&self, board: &Board, dst: &Pile, tail: &[Card]) -> Legality {
        let Some(card) = tail.first() else {
            return Ok(());
        };
        match dst.kind() {
            PileKind::Foundation => self.foundation_append_error(dst, card, board),
            PileKind::Tableau => self.tableau_append_error(dst, card, board),
            _ => Ok(()),
        }
    }

    fn unsorted_pairs(&self, pile: &Pile) -> usize {
        match pile.kind() {
            PileKind::Tableau => unsorted_pairs(pile.cards(), self.params.tab_compare),
            _ => pile.unsorted_pairs(),
        }
    }

    fn tail_tapped(&self, board: &mut Board, pile: PileId, index: usize) -> Tapped {
        let (Some(stock), Some(waste)) = (self.piles.stock, self.piles.waste) else {
            return Tapped::Unhandled;
        };
        let is_top = board.pile(pile).is_some_and(|p| index + 1 == p.len());
        if pile != stock || !is_top {
            return Tapped::Unhandled;
        }
        for _ in 0..self.params.draw {
            if board.move_card(stock, waste).is_none() {
                break;
            }
        }
        Tapped::Handled
    }

    fn pile_tapped(&self, board: &mut Board, pile: PileId) -> Legality {
        match (self.piles.stock, self.piles.waste) {
            (Some(stock), Some(waste))
                if pile == stock && board.pile(stock).is_some_and(Pile::is_empty) =>
            {
                board.recycle_waste_to_stock(waste, stock)
            }
            _ => Ok(()),
        }
    }

    fn piles(&self) -> &PileGroups {
        &self.piles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    fn deal(params: CanfieldParams, seed: u64) -> (Canfield, Board) {
        let mut script = Canfield::new(params);
        let mut board = Board::new();
        script.build_piles(&mut board);
        let stock = script.piles().stock.unwrap();
        board.shuffle_pile(stock, &mut GameRng::new(seed));
        script.start_game(&mut board);
        (script, board)
    }

    #[test]
    fn test_layout() {
        let (script, board) = deal(CanfieldParams::canfield(), 1);
        let piles = script.piles();
        assert_eq!(piles.foundations.len(), 4);
        assert_eq!(piles.tableaux.len(), 4);
        assert_eq!(piles.reserves.len(), 1);
        assert_eq!(board.piles().len(), 11);
        assert_eq!(board.total_cards(), 52);
    }

    #[test]
    fn test_deal_pins_foundation_labels() {
        let (script, board) = deal(CanfieldParams::canfield(), 3);
        let piles = script.piles();
        let first = board.pile(piles.foundations[0]).unwrap();
        assert_eq!(first.len(), 1);
        let label = ordinal_to_short_string(first.peek().unwrap().ordinal());
        for &id in &piles.foundations {
            assert_eq!(board.pile(id).unwrap().label(), Some(label));
        }
    }

    #[test]
    fn test_reserve_and_tableaux() {
        let (script, board) = deal(CanfieldParams::canfield(), 5);
        let reserve = board.pile(script.piles().reserves[0]).unwrap();
        assert_eq!(reserve.len(), 13);
        assert!(reserve.cards().iter().take(12).all(Card::is_prone));
        assert!(!reserve.peek().unwrap().is_prone());

        for &id in &script.piles().tableaux {
            let tableau = board.pile(id).unwrap();
            assert_eq!(tableau.len(), 1);
            assert!(!tableau.peek().unwrap().is_prone());
        }

        let stock = board.pile(script.piles().stock.unwrap()).unwrap();
        assert_eq!(stock.len(), 52 - 1 - 13 - 4);
    }

    #[test]
    fn test_storehouse_deals_twos() {
        let (script, board) = deal(CanfieldParams::storehouse(), 8);
        for (&id, suit) in script.piles().foundations.iter().zip(Suit::ALL) {
            let foundation = board.pile(id).unwrap();
            let card = foundation.peek().unwrap();
            assert_eq!((card.suit(), card.ordinal()), (suit, 2));
            assert_eq!(foundation.label(), None);
        }
        assert_eq!(board.pile(script.piles().stock.unwrap()).unwrap().len(), 52 - 4 - 13 - 4);
    }

    #[test]
    fn test_after_move_fills_tableau_from_reserve() {
        let (script, mut board) = deal(CanfieldParams::canfield(), 11);
        let tableau = script.piles().tableaux[2];
        let waste = script.piles().waste.unwrap();
        board.move_all_cards(tableau, waste);
        assert!(board.pile(tableau).unwrap().is_empty());

        script.after_move(&mut board);
        assert_eq!(board.pile(tableau).unwrap().len(), 1);
        assert_eq!(board.pile(script.piles().reserves[0]).unwrap().len(), 12);
        // the new reserve top is turned up
        assert!(!board.pile(script.piles().reserves[0]).unwrap().peek().unwrap().is_prone());
    }

    #[test]
    fn test_after_move_leaves_labels_alone() {
        let (script, mut board) = deal(CanfieldParams::storehouse(), 6);
        let tableau = script.piles().tableaux[0];
        let waste = script.piles().waste.unwrap();
        board.move_all_cards(tableau, waste);

        script.after_move(&mut board);
        for &id in &script.piles().foundations {
            assert_eq!(board.pile(id).unwrap().label(), None);
        }
    }

    #[test]
    fn test_stock_tap_draws_three() {
        let (script, mut board) = deal(CanfieldParams::canfield(), 2);
        let stock = script.piles().stock.unwrap();
        let waste = script.piles().waste.unwrap();
        let top = board.pile(stock).unwrap().len() - 1;

        assert_eq!(script.tail_tapped(&mut board, stock, top), Tapped::Handled);
        assert_eq!(board.pile(waste).unwrap().len(), 3);
        assert_eq!(script.tail_tapped(&mut board, waste, 2), Tapped::Unhandled);
    }

    #[test]
    fn test_pile_tap_recycles_only_empty_stock() {
        let (script, mut board) = deal(CanfieldParams::canfield(), 2);
        let stock = script.piles().stock.unwrap();
        let waste = script.piles().waste.unwrap();
        board.move_card(stock, waste);

        let changes = board.changes();
        assert!(script.pile_tapped(&mut board, stock).is_ok());
        assert_eq!(board.changes(), changes);

        board.move_all_cards(stock, waste);
        assert!(script.pile_tapped(&mut board, stock).is_ok());
        assert!(board.pile(waste).unwrap().is_empty());
        assert_eq!(board.recycles(), 1);
    }

    #[test]
    fn test_empty_tableau_rejects_tableau_source() {
        let (script, mut board) = deal(CanfieldParams::canfield(), 4);
        let reserve = script.piles().reserves[0];
        let t0 = script.piles().tableaux[0];
        let t1 = script.piles().tableaux[1];
        // empty the reserve so t0 stays empty
        let waste = script.piles().waste.unwrap();
        board.move_all_cards(reserve, waste);
        board.move_all_cards(t0, waste);

        let tail = board.pile(t1).unwrap().tail(0);
        let dst = board.pile(t0).unwrap();
        let err = script.tail_append_error(&board, dst, &tail).unwrap_err();
        assert_eq!(err.reason(), "An empty Tableau must be filled from the Reserve or Waste");

        let from_waste = board.pile(waste).unwrap().tail(board.pile(waste).unwrap().len() - 1);
        assert!(script.tail_append_error(&board, dst, &from_waste).is_ok());
    }
}
