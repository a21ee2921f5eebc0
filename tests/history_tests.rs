//! Undo/redo and card conservation tests.
//!
//! These tests drive sessions with random move, tap, undo and redo
//! sequences and verify after every step:
//! - No card is created, lost or duplicated
//! - Every card's owner and slot match the pile holding it
//! - Undo right after a move restores the exact prior board, redo the
//!   exact later one

use std::collections::HashSet;

use proptest::prelude::*;

use patience::baize::{Baize, TapTarget};
use patience::core::{CardId, PileId, SessionConfig};
use patience::variants::VariantRegistry;

/// One random operation; indices are reduced modulo what is on the board.
#[derive(Clone, Debug)]
enum Op {
    Move { src: usize, index: usize, dst: usize },
    TapTail { pile: usize, index: usize },
    TapPile { pile: usize },
    Undo,
    Redo,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<usize>(), any::<usize>(), any::<usize>())
            .prop_map(|(src, index, dst)| Op::Move { src, index, dst }),
        3 => (any::<usize>(), any::<usize>()).prop_map(|(pile, index)| Op::TapTail { pile, index }),
        1 => any::<usize>().prop_map(|pile| Op::TapPile { pile }),
        1 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

fn variant_ids() -> Vec<String> {
    VariantRegistry::standard()
        .ids()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn pile_at(baize: &Baize, n: usize) -> PileId {
    let piles = baize.board().piles();
    piles[n % piles.len()].id()
}

fn len_of(baize: &Baize, id: PileId) -> usize {
    baize.board().pile(id).map_or(0, |p| p.len())
}

/// Run one op. Returns true if something was recorded in history.
fn apply(baize: &mut Baize, op: &Op) -> bool {
    let cursor = baize.history().cursor();
    match *op {
        Op::Move { src, index, dst } => {
            let src = pile_at(baize, src);
            let dst = pile_at(baize, dst);
            let len = len_of(baize, src);
            if len == 0 {
                return false;
            }
            let _ = baize.request_move(src, index % len, dst);
        }
        Op::TapTail { pile, index } => {
            let pile = pile_at(baize, pile);
            let len = len_of(baize, pile);
            if len == 0 {
                return false;
            }
            let _ = baize.request_tap(TapTarget::Tail {
                pile,
                index: index % len,
            });
        }
        Op::TapPile { pile } => {
            let pile = pile_at(baize, pile);
            let _ = baize.request_tap(TapTarget::Pile(pile));
        }
        Op::Undo => {
            baize.request_undo();
            return false;
        }
        Op::Redo => {
            baize.request_redo();
            return false;
        }
    }
    baize.history().cursor() == cursor + 1
}

fn assert_conserved(baize: &Baize, total: usize) {
    let board = baize.board();
    assert_eq!(board.total_cards(), total);

    let mut seen: HashSet<CardId> = HashSet::new();
    for pile in board.piles() {
        for (slot, card) in pile.cards().iter().enumerate() {
            assert!(seen.insert(card.id()), "{} appears twice", card.id());
            assert_eq!(card.owner(), pile.id(), "{} has the wrong owner", card.id());
            assert_eq!(card.slot(), slot, "{} has the wrong slot", card.id());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_cards_conserved_and_undo_exact(
        variant in 0usize..14,
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..80),
    ) {
        let ids = variant_ids();
        let variant = &ids[variant % ids.len()];
        let mut baize = Baize::new(&SessionConfig::new(variant.as_str()).with_seed(seed)).unwrap();
        let total = baize.board().total_cards();

        for op in &ops {
            let before = baize.board().snapshot();
            let recorded = apply(&mut baize, op);
            assert_conserved(&baize, total);

            if recorded {
                let after = baize.board().snapshot();
                prop_assert!(baize.request_undo());
                prop_assert_eq!(baize.board().snapshot(), before);
                prop_assert!(baize.request_redo());
                prop_assert_eq!(baize.board().snapshot(), after);
                assert_conserved(&baize, total);
            }
        }
    }

    #[test]
    fn prop_undo_all_returns_to_deal(
        seed in any::<u64>(),
        ops in prop::collection::vec(op_strategy(), 1..60),
    ) {
        let mut baize = Baize::new(&SessionConfig::new("canfield").with_seed(seed)).unwrap();
        let dealt = baize.board().snapshot();

        for op in &ops {
            apply(&mut baize, op);
        }
        while baize.request_undo() {}

        prop_assert_eq!(baize.board().snapshot(), dealt);
        prop_assert_eq!(baize.board().recycles(), 0);
        prop_assert!(!baize.can_undo());
    }
}

#[test]
fn test_undo_on_fresh_game_is_noop() {
    let mut baize = Baize::new(&SessionConfig::new("storehouse").with_seed(3)).unwrap();
    baize.drain_events();
    baize.take_dirty();
    let before = baize.board().snapshot();

    assert!(!baize.request_undo());
    assert!(!baize.request_redo());
    assert_eq!(baize.board().snapshot(), before);
    assert!(baize.drain_events().is_empty());
    assert!(baize.take_dirty().is_empty());
}

#[test]
fn test_new_move_discards_redo() {
    let mut baize = Baize::new(&SessionConfig::new("canfield-draw-one").with_seed(12)).unwrap();
    let stock = baize.script().piles().stock.unwrap();

    for _ in 0..3 {
        let top = len_of(&baize, stock) - 1;
        baize.request_tap(TapTarget::Tail { pile: stock, index: top }).unwrap();
    }
    assert!(baize.request_undo());
    assert!(baize.request_undo());
    assert!(baize.can_redo());

    let top = len_of(&baize, stock) - 1;
    baize.request_tap(TapTarget::Tail { pile: stock, index: top }).unwrap();
    assert!(!baize.can_redo());
    assert_eq!(baize.history().len(), 2);
}

#[test]
fn test_undo_restores_orientation() {
    let mut baize = Baize::new(&SessionConfig::new("canfield").with_seed(30)).unwrap();
    let stock = baize.script().piles().stock.unwrap();
    let before = baize.board().snapshot();

    let top = len_of(&baize, stock) - 1;
    baize.request_tap(TapTarget::Tail { pile: stock, index: top }).unwrap();
    let record = baize.history().last_record().unwrap().clone();
    assert!(record.orientation_before.iter().all(|&up| !up));

    baize.request_undo();
    assert_eq!(baize.board().snapshot(), before);
    let pile = baize.board().pile(stock).unwrap();
    assert!(pile.cards().iter().all(|c| c.is_prone()));
}
