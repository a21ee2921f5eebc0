//! Layout and session configuration types.
//!
//! Variant scripts place piles on the board with:
//! - `PileId`: Stable index of a pile within its board
//! - `Slot`: Grid coordinate of the pile (layout only)
//! - `FanType`: How a renderer fans the cards (layout only)
//! - `MoveType`: How many cards may be lifted from a pile at once
//!
//! `SessionConfig` selects the variant and seed for a new game.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Pile identifier: the pile's index in its board.
///
/// Ids are assigned in `build_piles` order and never change for the
/// lifetime of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PileId(pub u16);

impl PileId {
    /// Create a new pile ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pile({})", self.0)
    }
}

/// Grid position of a pile on the baize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub x: i16,
    pub y: i16,
}

impl Slot {
    #[must_use]
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// How a renderer spreads the cards of a pile. Not rule relevant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FanType {
    /// Cards stacked on top of each other.
    #[default]
    None,
    /// Fanned downwards (tableaux, reserves).
    Down,
    /// Fanned to the right.
    Right,
    /// Only the top three cards fanned to the right (waste).
    Right3,
}

/// How many cards may be dragged from the top of a pile together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    /// Nothing can be dragged.
    None,
    /// Only the top card.
    #[default]
    One,
    /// The top card, or a run no longer than the current power moves.
    OnePlus,
    /// The top card, or the whole pile as one unit.
    OneOrAll,
    /// Any run.
    Any,
}

/// Settings for a new game session.
///
/// ## Example
///
/// ```
/// use patience::core::SessionConfig;
///
/// let config = SessionConfig::new("forty-thieves")
///     .with_seed(7)
///     .with_power_moves(false);
///
/// assert_eq!(config.variant, "forty-thieves");
/// assert!(!config.power_moves);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Registered variant identifier.
    pub variant: String,

    /// Shuffle seed. The same seed always produces the same deal.
    pub seed: u64,

    /// Allow `OnePlus` tableaux to move runs bounded by empty cells and
    /// columns. When false they move a single card at a time.
    #[serde(default = "default_power_moves")]
    pub power_moves: bool,
}

fn default_power_moves() -> bool {
    true
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            variant: "canfield".to_string(),
            seed: 42,
            power_moves: true,
        }
    }
}

impl SessionConfig {
    /// Create a config for a variant with the default seed.
    pub fn new(variant: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_power_moves(mut self, enabled: bool) -> Self {
        self.power_moves = enabled;
        self
    }

    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid session config")
    }
}
