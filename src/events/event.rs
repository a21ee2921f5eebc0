//! Semantic game events.
//!
//! The engine never plays a sound or starts an animation. It records what
//! happened as a stream of `GameEvent`s and collaborators decide how to
//! react (a "place" sound for `CardMoved`, a toast for `GameWon`, ...).

use serde::{Deserialize, Serialize};

use crate::core::{CardId, PileId};

/// Something that happened on the baize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new game was dealt.
    NewDeal { variant: String, seed: u64 },

    /// A card changed piles.
    CardMoved {
        card: CardId,
        from: PileId,
        to: PileId,
    },

    /// A card changed orientation in place.
    CardFlipped {
        card: CardId,
        pile: PileId,
        face_up: bool,
    },

    /// The waste was turned back into the stock.
    PileRecycled {
        from: PileId,
        to: PileId,
        count: usize,
    },

    /// A history entry was undone.
    Undone,

    /// A history entry was redone.
    Redone,

    /// Every completion pile is complete.
    GameWon,

    /// No pile has a legal move and the stock cannot deal or recycle.
    GameStuck,
}

impl GameEvent {
    /// Is this a card-level event (moved or flipped)?
    #[must_use]
    pub fn is_card_event(&self) -> bool {
        matches!(self, GameEvent::CardMoved { .. } | GameEvent::CardFlipped { .. })
    }
}

/// Receiver for pushed events.
///
/// Sinks are called after each inbound operation completes, in event order.
/// Any `FnMut(&GameEvent)` closure is a sink.
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> EventSink for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Suit;

    #[test]
    fn test_is_card_event() {
        let moved = GameEvent::CardMoved {
            card: CardId::new(0, Suit::Club, 1),
            from: PileId::new(0),
            to: PileId::new(1),
        };
        assert!(moved.is_card_event());
        assert!(!GameEvent::GameWon.is_card_event());
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |event: &GameEvent| seen.push(event.clone());
            sink.on_event(&GameEvent::Undone);
            sink.on_event(&GameEvent::Redone);
        }
        assert_eq!(seen, vec![GameEvent::Undone, GameEvent::Redone]);
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::PileRecycled {
            from: PileId::new(1),
            to: PileId::new(0),
            count: 24,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
