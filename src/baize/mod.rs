//! The game session and its history.
//!
//! - `session`: [`Baize`], the single entry point for moves, taps, undo and
//!   redo
//! - `history`: the undo/redo stack and the [`MoveRecord`]s it persists
//! - `save`: [`SavedSession`], a replayable save encoded as JSON or bincode

pub mod history;
pub mod save;
pub mod session;

pub use history::{History, HistoryEntry, MoveAction, MoveRecord};
pub use save::SavedSession;
pub use session::{Baize, GameState, TapTarget};
