//! Piles and the board that holds them.
//!
//! - [`Pile`]: an ordered stack of cards with a kind-specific policy
//! - [`Board`]: every pile of a game plus the deal helpers that move cards

mod board;
mod pile;

pub use board::{Board, BoardSnapshot};
pub use pile::{Pile, PileKind};
