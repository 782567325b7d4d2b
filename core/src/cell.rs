use serde::{Deserialize, Serialize};

/// Player-visible state of a grid cell. Whether the cell holds a mine lives in [`crate::MineLayout`].
///
/// An opened cell carries the number of mines around it, fixed at the moment it was opened,
/// so a cell can never be opened and flagged at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Opened(u8),
}

impl CellState {
    pub const fn is_opened(self) -> bool {
        matches!(self, Self::Opened(_))
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub const fn surrounding_mines(self) -> Option<u8> {
        match self {
            Self::Opened(count) => Some(count),
            Self::Hidden | Self::Flagged => None,
        }
    }
}
