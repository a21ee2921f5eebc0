//! # patience
//!
//! A rule engine for patience (solitaire) card games.
//!
//! ## Design Principles
//!
//! 1. **Variant-Agnostic Core**: Piles know their own movement policy;
//!    everything variant-specific lives in a `VariantScript`.
//!
//! 2. **No Ambient State**: The `Baize` session is passed explicitly and
//!    scripts receive the `Board` as a parameter.
//!
//! 3. **Side-Effect Free**: The engine emits semantic events and dirty
//!    flags. Sound, animation and rendering are someone else's job.
//!
//! ## Architecture
//!
//! - **Exact Undo**: Each history entry keeps board snapshots from before
//!   and after the move. Snapshots are O(1) via `im-rs` persistent vectors.
//!
//! - **Replayable Saves**: A save is the variant, the seed and the move
//!   records; restoring deals again and replays.
//!
//! ## Modules
//!
//! - `core`: Cards, pile ids, layout types, RNG, session configuration, errors
//! - `piles`: Pile kinds and the board
//! - `rules`: Card comparisons and the `VariantScript` trait
//! - `variants`: Canfield and Forty Thieves families, variant registry
//! - `baize`: The session, undo/redo history and saved sessions
//! - `events`: Outbound events and dirty flags

pub mod baize;
pub mod core;
pub mod events;
pub mod piles;
pub mod rules;
pub mod variants;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, Color, FanType, GameRng, IllegalMove, Legality, MoveError, MoveType, PileId,
    SessionConfig, Slot, Suit,
};

pub use crate::piles::{Board, BoardSnapshot, Pile, PileKind};

pub use crate::rules::{CompareRule, PileGroups, Tapped, VariantInfo, VariantScript};

pub use crate::variants::{
    Canfield, CanfieldParams, FortyThieves, FortyThievesParams, VariantRegistry,
};

pub use crate::baize::{
    Baize, GameState, History, HistoryEntry, MoveAction, MoveRecord, SavedSession, TapTarget,
};

pub use crate::events::{DirtyFlags, EventSink, GameEvent};
