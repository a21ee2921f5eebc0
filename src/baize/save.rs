//! Saved sessions.
//!
//! A session is saved as the variant, the seed and the ordered move
//! records. Restoring deals the same game again and replays the records,
//! so nothing about board layout is persisted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::history::MoveRecord;

/// Everything needed to rebuild a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSession {
    pub variant: String,
    pub seed: u64,
    /// Every move made, oldest first, including undone ones.
    pub records: Vec<MoveRecord>,
    /// How many records are in effect; the rest can be redone.
    pub cursor: usize,
    #[serde(default = "default_power_moves")]
    pub power_moves: bool,
}

fn default_power_moves() -> bool {
    true
}

impl SavedSession {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Cannot encode saved session")
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid saved session")
    }

    /// Encode as compact binary.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).context("Cannot encode saved session")
    }

    /// Decode from compact binary.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).context("Invalid saved session")
    }
}
