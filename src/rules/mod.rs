//! Move rules shared by every variant.
//!
//! - `compare`: pairwise card orderings and tail checks
//! - `script`: the [`VariantScript`] trait variants implement
//!
//! The session calls into `VariantScript` but never interprets
//! variant-specific rules directly.

pub mod compare;
pub mod script;

pub use compare::{card_pairs, compare_empty, tail_conforms, unsorted_pairs, CardPair, CompareRule};
pub use script::{PileGroups, Tapped, VariantInfo, VariantScript};
