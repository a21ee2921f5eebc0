//! The variant script contract.
//!
//! Each patience variant implements [`VariantScript`] to define:
//! - its layout (`build_piles`) and deal (`start_game`)
//! - automatic follow-ups after a move (`after_move`)
//! - move legality on top of the pile rules (`tail_move_error`,
//!   `tail_append_error`)
//! - what taps on piles and tails do
//!
//! The session calls into the script but never interprets variant-specific
//! rules directly. Scripts receive the [`Board`] as a parameter; they hold
//! only pile ids and their own parameters.

use crate::core::{Card, Legality, PileId};
use crate::piles::{Board, Pile};

/// Static facts about a variant, for the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VariantInfo {
    /// Preferred window aspect: "square", "landscape" or "portrait".
    pub window_shape: &'static str,
    /// Rules reference.
    pub wikipedia: &'static str,
    /// Whether a relaxed rule set exists.
    pub relaxable: bool,
}

/// The piles a script created, grouped by role.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PileGroups {
    pub stock: Option<PileId>,
    pub waste: Option<PileId>,
    pub foundations: Vec<PileId>,
    pub tableaux: Vec<PileId>,
    pub reserves: Vec<PileId>,
    pub cells: Vec<PileId>,
}

/// Result of offering a tap to the script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tapped {
    /// The script did something (or deliberately nothing).
    Handled,
    /// Fall back to the generic handler: send the tail to the first
    /// foundation, then the first tableau, that legally accepts it.
    Unhandled,
}

/// Per-variant rules.
pub trait VariantScript {
    fn info(&self) -> VariantInfo;

    /// Create every pile on an empty board.
    fn build_piles(&mut self, board: &mut Board);

    /// Deal from the (already shuffled) stock and set the recycle limit.
    fn start_game(&mut self, board: &mut Board);

    /// Automatic follow-ups after a successful move or tap.
    fn after_move(&self, _board: &mut Board) {}

    /// Can `tail` be lifted from its pile under this variant's rules?
    ///
    /// Called only after the source pile's own `can_move_tail` passed.
    fn tail_move_error(&self, _board: &Board, _tail: &[Card]) -> Legality {
        Ok(())
    }

    /// Can `tail` be placed on `dst` under this variant's rules?
    ///
    /// Called only after `dst.can_accept_tail` passed.
    fn tail_append_error(&self, _board: &Board, _dst: &Pile, _tail: &[Card]) -> Legality {
        Ok(())
    }

    /// Adjacent pairs of `pile` out of order under this variant.
    fn unsorted_pairs(&self, pile: &Pile) -> usize {
        pile.unsorted_pairs()
    }

    /// The player tapped the cards from `index` to the top of `pile`.
    fn tail_tapped(&self, _board: &mut Board, _pile: PileId, _index: usize) -> Tapped {
        Tapped::Unhandled
    }

    /// The player tapped an empty pile (or its background).
    fn pile_tapped(&self, _board: &mut Board, _pile: PileId) -> Legality {
        Ok(())
    }

    fn piles(&self) -> &PileGroups;

    /// Is the game won? By default when every foundation is complete.
    fn complete(&self, board: &Board) -> bool {
        self.piles()
            .foundations
            .iter()
            .all(|&id| board.pile(id).is_some_and(Pile::complete))
    }
}
