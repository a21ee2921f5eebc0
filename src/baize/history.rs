//! Undo/redo history.
//!
//! A linear stack of entries with a cursor. Each entry holds the semantic
//! [`MoveRecord`] (what the player did, used for saving and replay) plus
//! board snapshots from immediately before and after the move, after-move
//! follow-ups included. Undo restores the before-snapshot, redo the
//! after-snapshot, so both are exact whatever the variant did.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Card, CardId, PileId};
use crate::piles::BoardSnapshot;

/// What the player did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveAction {
    /// Dragged a tail onto another pile.
    Drag,
    /// Tapped a tail.
    TailTap,
    /// Tapped a pile (usually an empty stock).
    PileTap,
}

/// A recorded move with metadata for saving and replay.
///
/// Replaying the records in order on a fresh deal of the same variant and
/// seed reproduces the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub action: MoveAction,

    pub source_pile: PileId,

    /// Where the cards went, if anywhere.
    pub dest_pile: Option<PileId>,

    /// Index of the first card of the tail in the source pile.
    pub first_index: usize,

    /// The cards that moved, bottom first.
    pub card_ids: SmallVec<[CardId; 4]>,

    /// Face-up flag of each moved card before the move.
    pub orientation_before: SmallVec<[bool; 4]>,

    /// Wall-clock time of the move, in milliseconds since the Unix epoch.
    pub timestamp_ms: u64,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

impl MoveRecord {
    fn new(action: MoveAction, source_pile: PileId, first_index: usize, tail: &[Card]) -> Self {
        Self {
            action,
            source_pile,
            dest_pile: None,
            first_index,
            card_ids: tail.iter().map(Card::id).collect(),
            orientation_before: tail.iter().map(|c| !c.is_prone()).collect(),
            timestamp_ms: now_ms(),
        }
    }

    /// A tail dragged from `src` onto `dst`.
    #[must_use]
    pub fn drag(src: PileId, first_index: usize, dst: PileId, tail: &[Card]) -> Self {
        Self {
            dest_pile: Some(dst),
            ..Self::new(MoveAction::Drag, src, first_index, tail)
        }
    }

    /// A tap on the tail of `pile` starting at `first_index`.
    #[must_use]
    pub fn tail_tap(pile: PileId, first_index: usize, tail: &[Card]) -> Self {
        Self::new(MoveAction::TailTap, pile, first_index, tail)
    }

    /// A tap on `pile` itself.
    #[must_use]
    pub fn pile_tap(pile: PileId) -> Self {
        Self::new(MoveAction::PileTap, pile, 0, &[])
    }

    #[must_use]
    pub fn with_dest(mut self, dst: PileId) -> Self {
        self.dest_pile = Some(dst);
        self
    }

    /// Same move, ignoring when it was made.
    #[must_use]
    pub fn same_move(&self, other: &MoveRecord) -> bool {
        self.action == other.action
            && self.source_pile == other.source_pile
            && self.dest_pile == other.dest_pile
            && self.first_index == other.first_index
            && self.card_ids == other.card_ids
            && self.orientation_before == other.orientation_before
    }
}

/// One undoable step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub record: MoveRecord,
    pub before: BoardSnapshot,
    pub after: BoardSnapshot,
}

/// Linear undo/redo stack.
///
/// ## Example
///
/// ```
/// use patience::baize::{History, HistoryEntry, MoveRecord};
/// use patience::core::PileId;
/// use patience::piles::Board;
///
/// let board = Board::new();
/// let mut history = History::new();
/// history.record(HistoryEntry {
///     record: MoveRecord::pile_tap(PileId::new(0)),
///     before: board.snapshot(),
///     after: board.snapshot(),
/// });
///
/// assert!(history.undo().is_some());
/// assert!(history.undo().is_none());
/// assert!(history.redo().is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an entry, discarding anything that could have been redone.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.cursor);
        self.entries.push(entry);
        self.cursor = self.entries.len();
    }

    /// Step back. Returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<&BoardSnapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor].before)
    }

    /// Step forward. Returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<&BoardSnapshot> {
        let entry = self.entries.get(self.cursor)?;
        self.cursor += 1;
        Some(&entry.after)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Number of entries before the cursor.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every record, oldest first, including undone ones.
    pub fn records(&self) -> impl Iterator<Item = &MoveRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    #[must_use]
    pub fn last_record(&self) -> Option<&MoveRecord> {
        self.entries.last().map(|e| &e.record)
    }

    /// Replace the record of entry `index`, keeping its snapshots.
    pub(crate) fn set_record(&mut self, index: usize, record: MoveRecord) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.record = record;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
