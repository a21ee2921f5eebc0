//! Forty Thieves and relatives.
//!
//! Two or more packs, a row of foundations building up in suit from Ace,
//! and tableaux building down. One card is turned to the waste at the start
//! and again whenever the waste empties. The family differs only in its
//! [`FortyThievesParams`].

use serde::{Deserialize, Serialize};

use crate::core::{Card, FanType, Legality, MoveType, PileId, Slot, Suit};
use crate::piles::{Board, Pile, PileKind};
use crate::rules::compare::{compare_empty, tail_conforms, unsorted_pairs, CompareRule};
use crate::rules::script::{PileGroups, Tapped, VariantInfo, VariantScript};

/// Parameters of a Forty Thieves-style game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortyThievesParams {
    pub packs: u8,
    /// Column of each foundation (row 0).
    pub foundations: Vec<i16>,
    /// Column of each tableau (row 1).
    pub tableaux: Vec<i16>,
    pub cards_per_tableau: usize,
    /// Rows of every tableau dealt face down.
    pub prone_rows: Vec<usize>,
    /// Times the waste can be turned back. `None` is unlimited.
    pub recycles: Option<u32>,
    /// Start with the Aces on the foundations.
    pub deal_aces: bool,
    pub move_type: MoveType,
    pub tab_compare: CompareRule,
}

impl Default for FortyThievesParams {
    fn default() -> Self {
        Self::forty_thieves()
    }
}

fn columns(range: std::ops::Range<i16>) -> Vec<i16> {
    range.collect()
}

impl FortyThievesParams {
    /// Forty Thieves: ten tableaux of four, no recycles.
    #[must_use]
    pub fn forty_thieves() -> Self {
        Self {
            packs: 2,
            foundations: columns(3..11),
            tableaux: columns(0..10),
            cards_per_tableau: 4,
            prone_rows: Vec::new(),
            recycles: Some(0),
            deal_aces: false,
            move_type: MoveType::OnePlus,
            tab_compare: CompareRule::DownSuit,
        }
    }

    #[must_use]
    pub fn lucas() -> Self {
        Self {
            foundations: columns(5..13),
            tableaux: columns(0..13),
            cards_per_tableau: 3,
            deal_aces: true,
            ..Self::forty_thieves()
        }
    }

    #[must_use]
    pub fn limited() -> Self {
        Self {
            foundations: columns(4..12),
            tableaux: columns(0..12),
            cards_per_tableau: 3,
            ..Self::forty_thieves()
        }
    }

    #[must_use]
    pub fn forty_and_eight() -> Self {
        Self {
            tableaux: columns(3..11),
            cards_per_tableau: 5,
            recycles: Some(1),
            ..Self::forty_thieves()
        }
    }

    #[must_use]
    pub fn red_and_black() -> Self {
        Self {
            tableaux: columns(3..11),
            deal_aces: true,
            tab_compare: CompareRule::DownAltColor,
            ..Self::forty_thieves()
        }
    }

    #[must_use]
    pub fn number_ten() -> Self {
        Self {
            foundations: columns(2..10),
            prone_rows: vec![0, 1],
            move_type: MoveType::Any,
            tab_compare: CompareRule::DownAltColor,
            ..Self::forty_thieves()
        }
    }

    #[must_use]
    pub fn rank_and_file() -> Self {
        Self {
            prone_rows: vec![0, 1, 2],
            ..Self::number_ten()
        }
    }

    #[must_use]
    pub fn indian() -> Self {
        Self {
            cards_per_tableau: 3,
            prone_rows: vec![0],
            tab_compare: CompareRule::DownOtherSuit,
            ..Self::forty_thieves()
        }
    }

    #[must_use]
    pub fn maria() -> Self {
        Self {
            foundations: columns(2..10),
            tableaux: columns(0..9),
            tab_compare: CompareRule::DownAltColor,
            ..Self::forty_thieves()
        }
    }

    /// Three packs, twelve foundations, twelve tableaux of five.
    #[must_use]
    pub fn sixty_thieves() -> Self {
        Self {
            packs: 3,
            foundations: columns(3..15),
            tableaux: columns(0..12),
            cards_per_tableau: 5,
            ..Self::forty_thieves()
        }
    }
}

/// The Forty Thieves script.
#[derive(Clone, Debug)]
pub struct FortyThieves {
    params: FortyThievesParams,
    piles: PileGroups,
}

impl FortyThieves {
    #[must_use]
    pub fn new(params: FortyThievesParams) -> Self {
        Self {
            params,
            piles: PileGroups::default(),
        }
    }

    #[must_use]
    pub fn params(&self) -> &FortyThievesParams {
        &self.params
    }
}

impl VariantScript for FortyThieves {
    fn info(&self) -> VariantInfo {
        VariantInfo {
            window_shape: "landscape",
            wikipedia: "https://en.wikipedia.org/wiki/Forty_Thieves_(solitaire)",
            relaxable: false,
        }
    }

    fn build_piles(&mut self, board: &mut Board) {
        let packs = self.params.packs.max(1);
        self.piles = PileGroups::default();
        self.piles.stock = Some(board.add_stock(Slot::new(0, 0), packs, &Suit::ALL));
        self.piles.waste = Some(board.add_waste(Slot::new(1, 0), FanType::Right3));

        for &x in &self.params.foundations {
            let foundation = board.add_foundation(Slot::new(x, 0));
            board.set_label(foundation, Some("A".to_string()));
            self.piles.foundations.push(foundation);
        }

        for &x in &self.params.tableaux {
            self.piles.tableaux.push(board.add_tableau(
                Slot::new(x, 1),
                FanType::Down,
                self.params.move_type,
                self.params.tab_compare,
            ));
        }
    }

    fn start_game(&mut self, board: &mut Board) {
        let (Some(stock), Some(waste)) = (self.piles.stock, self.piles.waste) else {
            return;
        };

        if self.params.deal_aces {
            let suits = Suit::ALL.iter().cycle();
            for (&foundation, &suit) in self.piles.foundations.iter().zip(suits) {
                board.move_named_card(stock, suit, 1, foundation);
            }
        }

        for &tableau in &self.piles.tableaux {
            for _ in 0..self.params.cards_per_tableau {
                board.move_card(stock, tableau);
            }
        }
        for &row in &self.params.prone_rows {
            for &tableau in &self.piles.tableaux {
                board.flip_down(tableau, row);
            }
        }

        board.set_recycle_limit(self.params.recycles);
        board.move_card(stock, waste);
    }

    fn after_move(&self, board: &mut Board) {
        let (Some(stock), Some(waste)) = (self.piles.stock, self.piles.waste) else {
            return;
        };
        let waste_empty = board.pile(waste).is_some_and(Pile::is_empty);
        let stock_empty = board.pile(stock).map_or(true, Pile::is_empty);
        if waste_empty && !stock_empty {
            board.move_card(stock, waste);
        }
    }

    fn tail_move_error(&self, board: &Board, tail: &[Card]) -> Legality {
        match tail.first().map(|c| board.kind_of(c.owner())) {
            Some(Some(PileKind::Tableau)) => tail_conforms(tail, self.params.tab_compare),
            _ => Ok(()),
        }
    }

    fn tail_append_error(&self, _board: &Board, dst: &Pile, tail: &[Card]) -> Legality {
        let Some(card) = tail.first() else {
            return Ok(());
        };
        let rule = match dst.kind() {
            PileKind::Foundation => CompareRule::UpSuit,
            PileKind::Tableau => self.params.tab_compare,
            _ => return Ok(()),
        };
        match dst.peek() {
            None => compare_empty(dst, card),
            Some(top) => rule.compare_cards(top, card),
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
        board.move_card(stock, waste);
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
