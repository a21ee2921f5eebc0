//! Dirty flags: what a renderer must refresh after an operation.

use serde::{Deserialize, Serialize};

/// A set of things that changed since the renderer last looked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirtyFlags(u8);

impl DirtyFlags {
    /// Cards moved or flipped.
    pub const CARD_POSITIONS: DirtyFlags = DirtyFlags(1);
    /// A pile label was set or cleared.
    pub const PILE_LABELS: DirtyFlags = DirtyFlags(1 << 1);
    /// Won/stuck status, recycle count or undo availability changed.
    pub const GAME_STATE: DirtyFlags = DirtyFlags(1 << 2);
    pub const ALL: DirtyFlags = DirtyFlags(0b111);

    #[must_use]
    pub const fn empty() -> Self {
        DirtyFlags(0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, other: DirtyFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: DirtyFlags) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for DirtyFlags {
    type Output = DirtyFlags;

    fn bitor(self, rhs: DirtyFlags) -> DirtyFlags {
        DirtyFlags(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut flags = DirtyFlags::empty();
        assert!(flags.is_empty());

        flags.insert(DirtyFlags::CARD_POSITIONS);
        assert!(flags.contains(DirtyFlags::CARD_POSITIONS));
        assert!(!flags.contains(DirtyFlags::PILE_LABELS));

        flags.insert(DirtyFlags::PILE_LABELS | DirtyFlags::GAME_STATE);
        assert_eq!(flags, DirtyFlags::ALL);
    }
}
