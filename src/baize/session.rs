//! The baize: one game session.
//!
//! `Baize` owns the board, the active variant script, the variant registry
//! and the history. Every inbound operation passes through it:
//!
//! 1. the pile rules and the script are consulted for legality
//! 2. the move runs against the board, followed by the script's `after_move`
//! 3. a history entry is recorded and Won/Stuck is re-evaluated
//! 4. pending events are pushed to subscribed sinks
//!
//! A rejected operation changes nothing.
//!
//! ## Usage
//!
//! ```
//! use patience::baize::{Baize, TapTarget};
//! use patience::core::SessionConfig;
//!
//! let mut baize = Baize::new(&SessionConfig::new("canfield").with_seed(7)).unwrap();
//! let stock = baize.script().piles().stock.unwrap();
//! let top = baize.board().pile(stock).unwrap().len() - 1;
//!
//! baize.request_tap(TapTarget::Tail { pile: stock, index: top }).unwrap();
//! assert!(baize.can_undo());
//!
//! assert!(baize.request_undo());
//! assert!(!baize.request_undo());
//! ```

use std::fmt;

use anyhow::{bail, Context, Result};

use crate::core::{Card, GameRng, IllegalMove, MoveError, PileId, SessionConfig};
use crate::events::{DirtyFlags, EventSink, GameEvent};
use crate::piles::{Board, BoardSnapshot, Pile, PileKind};
use crate::rules::script::{Tapped, VariantInfo, VariantScript};
use crate::variants::VariantRegistry;

use super::history::{History, HistoryEntry, MoveAction, MoveRecord};
use super::save::SavedSession;

/// Where a session is in its lifecycle.
///
/// Undo and redo are synchronous: they restore a snapshot and re-evaluate
/// in one call, announcing `Undone`/`Redone`, so there is no in-between
/// state to observe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Building piles and dealing.
    Dealing,
    Playing,
    /// Every foundation is complete.
    Won,
    /// No legal move is left. Advisory: undo still works.
    Stuck,
}

/// What the player tapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TapTarget {
    /// A pile itself, usually empty.
    Pile(PileId),
    /// The cards of `pile` from `index` to the top.
    Tail { pile: PileId, index: usize },
}

/// A solitaire session.
pub struct Baize {
    board: Board,
    script: Box<dyn VariantScript>,
    registry: VariantRegistry,
    history: History,
    state: GameState,
    variant: String,
    seed: u64,
    power_moves: bool,
    sinks: Vec<Box<dyn EventSink>>,
    pending: Vec<GameEvent>,
}

impl fmt::Debug for Baize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Baize")
            .field("variant", &self.variant)
            .field("seed", &self.seed)
            .field("state", &self.state)
            .field("moves", &self.history.cursor())
            .finish_non_exhaustive()
    }
}

/// Build the piles of a variant and deal a shuffled game.
fn deal(
    registry: &VariantRegistry,
    variant: &str,
    seed: u64,
    power_moves: bool,
) -> Result<(Board, Box<dyn VariantScript>)> {
    let mut script = registry
        .create(variant)
        .with_context(|| format!("Cannot start a game of '{variant}'"))?;

    let mut board = Board::new().with_power_moves(power_moves);
    script.build_piles(&mut board);
    if board.total_cards() == 0 {
        bail!("Variant '{variant}' built no cards");
    }
    if let Some(stock) = script.piles().stock {
        board.shuffle_pile(stock, &mut GameRng::new(seed));
    }
    script.start_game(&mut board);

    // The deal itself is announced as a single event.
    board.drain_events();
    board.push_event(GameEvent::NewDeal {
        variant: variant.to_string(),
        seed,
    });
    board.mark_dirty(DirtyFlags::ALL);
    Ok((board, script))
}

impl Baize {
    /// Start a session with the built-in variants.
    pub fn new(config: &SessionConfig) -> Result<Self> {
        Self::with_registry(VariantRegistry::standard(), config)
    }

    /// Start a session using a custom registry.
    pub fn with_registry(registry: VariantRegistry, config: &SessionConfig) -> Result<Self> {
        let (board, script) = deal(&registry, &config.variant, config.seed, config.power_moves)?;
        let mut baize = Self {
            board,
            script,
            registry,
            history: History::new(),
            state: GameState::Dealing,
            variant: config.variant.clone(),
            seed: config.seed,
            power_moves: config.power_moves,
            sinks: Vec::new(),
            pending: Vec::new(),
        };
        log::info!("dealt {} with seed {}", baize.variant, baize.seed);
        baize.evaluate();
        baize.flush();
        Ok(baize)
    }

    // === Accessors ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn script(&self) -> &dyn VariantScript {
        self.script.as_ref()
    }

    #[must_use]
    pub fn info(&self) -> VariantInfo {
        self.script.info()
    }

    #[must_use]
    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn variant(&self) -> &str {
        &self.variant
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Unsorted pairs of a pile under the active variant.
    #[must_use]
    pub fn unsorted_pairs(&self, pile: PileId) -> Option<usize> {
        self.board.pile(pile).map(|p| self.script.unsorted_pairs(p))
    }

    /// Does the pile need no further reordering?
    #[must_use]
    pub fn conformant(&self, pile: PileId) -> Option<bool> {
        self.board.pile(pile).map(|p| match p.kind() {
            PileKind::Tableau => self.script.unsorted_pairs(p) == 0,
            _ => p.conformant(),
        })
    }

    // === Outbound ===

    /// Push every future event to `sink`.
    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Take every event since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Take and clear what needs redrawing.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        self.board.take_dirty()
    }

    fn flush(&mut self) {
        let events = self.board.drain_events();
        if events.is_empty() {
            return;
        }
        for sink in &mut self.sinks {
            for event in &events {
                sink.on_event(event);
            }
        }
        self.pending.extend(events);
    }

    // === Inbound ===

    /// Discard the current game and deal a new one.
    ///
    /// On failure the current game is left as it was.
    pub fn request_new_game(&mut self, variant: &str, seed: u64) -> Result<()> {
        let (board, script) = deal(&self.registry, variant, seed, self.power_moves)?;
        self.board = board;
        self.script = script;
        self.history.clear();
        self.variant = variant.to_string();
        self.seed = seed;
        self.state = GameState::Dealing;
        log::info!("dealt {variant} with seed {seed}");
        self.evaluate();
        self.flush();
        Ok(())
    }

    /// Drag the cards of `src` from `index` to the top onto `dst`.
    pub fn request_move(&mut self, src: PileId, index: usize, dst: PileId) -> Result<(), MoveError> {
        let result = self.execute_move(src, index, dst);
        if let Err(MoveError::Illegal(err)) = &result {
            log::warn!("move {src} -> {dst} rejected: {err}");
        }
        self.flush();
        result
    }

    /// Tap a pile or a tail.
    pub fn request_tap(&mut self, target: TapTarget) -> Result<(), MoveError> {
        let result = self.execute_tap(target);
        if let Err(MoveError::Illegal(err)) = &result {
            log::warn!("tap on {target:?} rejected: {err}");
        }
        self.flush();
        result
    }

    /// Step back one move. Does nothing and returns false with no history.
    pub fn request_undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.restore_snapshot(&snapshot, GameEvent::Undone);
        self.flush();
        true
    }

    /// Step forward one undone move. Returns false if nothing to redo.
    pub fn request_redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.restore_snapshot(&snapshot, GameEvent::Redone);
        self.flush();
        true
    }

    fn restore_snapshot(&mut self, snapshot: &BoardSnapshot, event: GameEvent) {
        self.board.restore(snapshot);
        self.board.push_event(event);
        self.evaluate();
    }

    // === Moves ===

    fn pile(&self, id: PileId) -> Result<&Pile, MoveError> {
        self.board
            .pile(id)
            .ok_or_else(|| MoveError::structural(format!("unknown pile {id}")))
    }

    fn tail(&self, id: PileId, index: usize) -> Result<Vec<Card>, MoveError> {
        let pile = self.pile(id)?;
        if index >= pile.len() {
            return Err(MoveError::structural(format!(
                "index {index} out of range for {id} of {}",
                pile.len()
            )));
        }
        Ok(pile.tail(index))
    }

    /// Can `tail` leave its pile?
    fn check_lift(&self, src: &Pile, tail: &[Card]) -> Result<(), MoveError> {
        src.can_move_tail(tail)?;
        self.script.tail_move_error(&self.board, tail)?;
        Ok(())
    }

    /// Can `tail` land on `dst`?
    fn check_drop(&self, dst: &Pile, tail: &[Card]) -> Result<(), MoveError> {
        dst.can_accept_tail(tail, &self.board)?;
        self.script.tail_append_error(&self.board, dst, tail)?;
        Ok(())
    }

    fn execute_move(&mut self, src: PileId, index: usize, dst: PileId) -> Result<(), MoveError> {
        if src == dst {
            return Err(IllegalMove::new("Cannot move cards onto the same pile").into());
        }
        self.pile(dst)?;
        let tail = self.tail(src, index)?;
        self.check_lift(self.pile(src)?, &tail)?;
        self.check_drop(self.pile(dst)?, &tail)?;

        let before = self.board.snapshot();
        let record = MoveRecord::drag(src, index, dst, &tail);
        let moved = self.board.move_cards(src, index, dst);
        log::debug!("moved {moved} cards {src} -> {dst}");
        self.script.after_move(&mut self.board);
        self.commit(record, before);
        Ok(())
    }

    fn execute_tap(&mut self, target: TapTarget) -> Result<(), MoveError> {
        let changes = self.board.changes();
        let before = self.board.snapshot();

        let record = match target {
            TapTarget::Pile(id) => {
                self.pile(id)?;
                self.script.pile_tapped(&mut self.board, id)?;
                MoveRecord::pile_tap(id)
            }
            TapTarget::Tail { pile, index } => {
                let tail = self.tail(pile, index)?;
                let record = MoveRecord::tail_tap(pile, index, &tail);
                match self.script.tail_tapped(&mut self.board, pile, index) {
                    Tapped::Handled => record,
                    Tapped::Unhandled => {
                        let dst = self.generic_tail_tap(pile, index, &tail)?;
                        record.with_dest(dst)
                    }
                }
            }
        };

        if self.board.changes() == changes {
            return Ok(());
        }
        self.script.after_move(&mut self.board);
        self.commit(record, before);
        Ok(())
    }

    /// Send a tapped tail to the first foundation, then the first tableau,
    /// that accepts it.
    fn generic_tail_tap(
        &mut self,
        src: PileId,
        index: usize,
        tail: &[Card],
    ) -> Result<PileId, MoveError> {
        self.check_lift(self.pile(src)?, tail)?;

        let groups = self.script.piles();
        let target = groups
            .foundations
            .iter()
            .chain(&groups.tableaux)
            .copied()
            .filter(|&dst| dst != src)
            .find(|&dst| {
                self.board
                    .pile(dst)
                    .is_some_and(|p| self.check_drop(p, tail).is_ok())
            });

        let Some(dst) = target else {
            let card = tail.first().map(ToString::to_string).unwrap_or_default();
            return Err(IllegalMove::new(format!("There is nowhere to put the {card}")).into());
        };
        self.board.move_cards(src, index, dst);
        Ok(dst)
    }

    fn commit(&mut self, record: MoveRecord, before: BoardSnapshot) {
        let after = self.board.snapshot();
        self.history.record(HistoryEntry {
            record,
            before,
            after,
        });
        self.board.mark_dirty(DirtyFlags::GAME_STATE);
        self.evaluate();
    }

    // === Won / Stuck ===

    /// Re-evaluate Won/Stuck, announcing a change of state.
    fn evaluate(&mut self) {
        let previous = self.state;
        let next = if self.script.complete(&self.board) {
            GameState::Won
        } else if self.is_stuck() {
            GameState::Stuck
        } else {
            GameState::Playing
        };
        self.state = next;

        if next == previous {
            return;
        }
        self.board.mark_dirty(DirtyFlags::GAME_STATE);
        match next {
            GameState::Won => {
                log::info!("{} won after {} moves", self.variant, self.history.cursor());
                self.board.push_event(GameEvent::GameWon);
            }
            GameState::Stuck => {
                log::info!("{} is stuck", self.variant);
                self.board.push_event(GameEvent::GameStuck);
            }
            _ => {}
        }
    }

    /// True when the stock cannot deal, no recycle is possible and no tail
    /// of any pile can legally move to any other pile.
    ///
    /// Moving a whole pile onto an empty pile of the same kind is not
    /// counted as a move.
    #[must_use]
    pub fn is_stuck(&self) -> bool {
        let groups = self.script.piles();
        let pile_len = |id: Option<PileId>| id.and_then(|id| self.board.pile(id)).map_or(0, Pile::len);
        if pile_len(groups.stock) > 0 {
            return false;
        }
        if pile_len(groups.waste) > 0 && self.board.can_recycle() {
            return false;
        }
        !self.any_legal_move()
    }

    fn any_legal_move(&self) -> bool {
        let piles = self.board.piles();
        for src in piles {
            for index in 0..src.len() {
                let tail = src.tail(index);
                if self.check_lift(src, &tail).is_err() {
                    continue;
                }
                let whole = index == 0;
                let found = piles.iter().any(|dst| {
                    dst.id() != src.id()
                        && !(whole && dst.is_empty() && dst.kind() == src.kind())
                        && self.check_drop(dst, &tail).is_ok()
                });
                if found {
                    return true;
                }
            }
        }
        false
    }

    // === Saving ===

    /// Everything needed to rebuild this session.
    #[must_use]
    pub fn save(&self) -> SavedSession {
        SavedSession {
            variant: self.variant.clone(),
            seed: self.seed,
            records: self.history.records().cloned().collect(),
            cursor: self.history.cursor(),
            power_moves: self.power_moves,
        }
    }

    /// Rebuild a saved session with the built-in variants.
    pub fn restore(saved: &SavedSession) -> Result<Self> {
        Self::restore_with_registry(VariantRegistry::standard(), saved)
    }

    /// Rebuild a saved session by dealing it again and replaying its moves.
    pub fn restore_with_registry(registry: VariantRegistry, saved: &SavedSession) -> Result<Self> {
        if saved.cursor > saved.records.len() {
            bail!(
                "Saved cursor {} is past the last of {} moves",
                saved.cursor,
                saved.records.len()
            );
        }
        let config = SessionConfig::new(saved.variant.clone())
            .with_seed(saved.seed)
            .with_power_moves(saved.power_moves);
        let mut baize = Self::with_registry(registry, &config)?;

        for (i, record) in saved.records.iter().enumerate() {
            baize
                .replay(record)
                .with_context(|| format!("Cannot replay move {} of {}", i + 1, saved.records.len()))?;
            baize.history.set_record(i, record.clone());
        }
        for _ in saved.cursor..saved.records.len() {
            baize.request_undo();
        }

        baize.pending.clear();
        baize.board.mark_dirty(DirtyFlags::ALL);
        log::info!(
            "restored {} with seed {} at move {} of {}",
            baize.variant,
            baize.seed,
            saved.cursor,
            saved.records.len()
        );
        Ok(baize)
    }

    /// Rebuild a saved session, or deal `fallback` if it cannot be restored.
    pub fn restore_or_fresh(saved: &SavedSession, fallback: &SessionConfig) -> Result<Self> {
        match Self::restore(saved) {
            Ok(baize) => Ok(baize),
            Err(err) => {
                log::warn!("cannot restore saved session, dealing a new game: {err:#}");
                Self::new(fallback)
            }
        }
    }

    /// Decode a JSON save and restore it, or deal `fallback` on any failure.
    pub fn load_or_fresh(json: &str, fallback: &SessionConfig) -> Result<Self> {
        match SavedSession::from_json(json) {
            Ok(saved) => Self::restore_or_fresh(&saved, fallback),
            Err(err) => {
                log::warn!("cannot read saved session, dealing a new game: {err:#}");
                Self::new(fallback)
            }
        }
    }

    fn replay(&mut self, record: &MoveRecord) -> Result<()> {
        let before = self.history.len();
        match record.action {
            MoveAction::Drag => {
                let dst = record.dest_pile.context("Drag without a destination")?;
                self.request_move(record.source_pile, record.first_index, dst)?;
            }
            MoveAction::TailTap => self.request_tap(TapTarget::Tail {
                pile: record.source_pile,
                index: record.first_index,
            })?,
            MoveAction::PileTap => self.request_tap(TapTarget::Pile(record.source_pile))?,
        }

        let replayed = match self.history.last_record() {
            Some(last) if self.history.len() == before + 1 => last,
            _ => bail!("Move changed nothing"),
        };
        if !replayed.same_move(record) {
            bail!("Saved move does not match the deal");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canfield(seed: u64) -> Baize {
        Baize::new(&SessionConfig::new("canfield").with_seed(seed)).unwrap()
    }

    fn stock_top(baize: &Baize) -> TapTarget {
        let stock = baize.script().piles().stock.unwrap();
        let len = baize.board().pile(stock).unwrap().len();
        TapTarget::Tail {
            pile: stock,
            index: len - 1,
        }
    }

    #[test]
    fn test_new_game_announces_deal() {
        let mut baize = canfield(1);
        assert_eq!(baize.state(), GameState::Playing);
        let events = baize.drain_events();
        assert_eq!(
            events[0],
            GameEvent::NewDeal {
                variant: "canfield".to_string(),
                seed: 1
            }
        );
        assert!(baize.take_dirty().contains(DirtyFlags::ALL));
    }

    #[test]
    fn test_unknown_variant_fails() {
        let err = Baize::new(&SessionConfig::new("golf")).unwrap_err();
        assert!(format!("{err:#}").contains("Unknown variant 'golf'"));
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = canfield(99);
        let b = canfield(99);
        assert_eq!(a.board().snapshot(), b.board().snapshot());
    }

    #[test]
    fn test_move_onto_same_pile_rejected() {
        let mut baize = canfield(2);
        let tableau = baize.script().piles().tableaux[0];
        let err = baize.request_move(tableau, 0, tableau).unwrap_err();
        assert_eq!(err.reason(), Some("Cannot move cards onto the same pile"));
    }

    #[test]
    fn test_rejected_move_changes_nothing() {
        let mut baize = canfield(3);
        let stock = baize.script().piles().stock.unwrap();
        let tableau = baize.script().piles().tableaux[0];
        let before = baize.board().snapshot();

        let err = baize.request_move(stock, 0, tableau).unwrap_err();
        assert!(err.reason().is_some());
        assert_eq!(baize.board().snapshot(), before);
        assert!(!baize.can_undo());
    }

    #[test]
    fn test_stock_tap_records_history() {
        let mut baize = canfield(4);
        let before = baize.board().snapshot();
        baize.request_tap(stock_top(&baize)).unwrap();
        assert_eq!(baize.history().len(), 1);
        assert_eq!(baize.history().last_record().unwrap().action, MoveAction::TailTap);

        assert!(baize.request_undo());
        assert_eq!(baize.board().snapshot(), before);
        assert!(baize.request_redo());
        assert!(!baize.request_redo());
    }

    #[test]
    fn test_undo_on_empty_history_is_noop() {
        let mut baize = canfield(5);
        baize.drain_events();
        let before = baize.board().snapshot();
        assert!(!baize.request_undo());
        assert_eq!(baize.board().snapshot(), before);
        assert_eq!(baize.state(), GameState::Playing);
        assert!(baize.drain_events().is_empty());
    }

    #[test]
    fn test_subscribed_sink_sees_events() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut baize = canfield(6);
        let sink_seen = Rc::clone(&seen);
        baize.subscribe(Box::new(move |event: &GameEvent| {
            sink_seen.borrow_mut().push(event.clone());
        }));

        baize.request_tap(stock_top(&baize)).unwrap();
        assert_eq!(seen.borrow().len(), 6);
        assert!(seen.borrow().iter().all(GameEvent::is_card_event));
        let waste = baize.script().piles().waste.unwrap();
        let flips = seen
            .borrow()
            .iter()
            .filter(|e| matches!(e, GameEvent::CardFlipped { pile, face_up: true, .. } if *pile == waste))
            .count();
        assert_eq!(flips, 3);

        baize.request_undo();
        assert_eq!(seen.borrow().last(), Some(&GameEvent::Undone));
    }

    #[test]
    fn test_new_game_resets_history() {
        let mut baize = canfield(7);
        baize.request_tap(stock_top(&baize)).unwrap();
        baize.request_new_game("forty-thieves", 8).unwrap();
        assert!(!baize.can_undo());
        assert_eq!(baize.variant(), "forty-thieves");
        assert_eq!(baize.board().total_cards(), 104);

        assert!(baize.request_new_game("nope", 1).is_err());
        assert_eq!(baize.variant(), "forty-thieves");
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "structural error"))]
    fn test_unknown_pile_is_structural() {
        let mut baize = canfield(9);
        let err = baize.request_move(PileId::new(500), 0, PileId::new(0)).unwrap_err();
        assert!(matches!(err, MoveError::Structural(_)));
    }
}
