use serde::{Deserialize, Serialize};

/// What a cell holds. Fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    /// No adjacent mines.
    Empty,
    /// Between 1 and 8 adjacent mines.
    AdjacentCount(u8),
}

impl CellContent {
    /// Content of a non-mine cell with `adjacent_mines` mines around it.
    pub const fn from_adjacent(adjacent_mines: u8) -> Self {
        if adjacent_mines == 0 {
            Self::Empty
        } else {
            Self::AdjacentCount(adjacent_mines)
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// Adjacent mine count, `None` for mines.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Empty => Some(0),
            Self::AdjacentCount(count) => Some(count),
        }
    }
}

impl Default for CellContent {
    fn default() -> Self {
        Self::Empty
    }
}

/// Player-controlled state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevealState {
    Hidden,
    Flagged,
    Revealed,
}

impl RevealState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for RevealState {
    fn default() -> Self {
        Self::Hidden
    }
}

/// What the presentation layer is allowed to see of a cell.
///
/// Content is only carried for revealed cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(CellContent),
}

impl CellView {
    pub const fn new(state: RevealState, content: CellContent) -> Self {
        match state {
            RevealState::Hidden => Self::Hidden,
            RevealState::Flagged => Self::Flagged,
            RevealState::Revealed => Self::Revealed(content),
        }
    }

    pub const fn reveal_state(self) -> RevealState {
        match self {
            Self::Hidden => RevealState::Hidden,
            Self::Flagged => RevealState::Flagged,
            Self::Revealed(_) => RevealState::Revealed,
        }
    }

    pub const fn content(self) -> Option<CellContent> {
        match self {
            Self::Revealed(content) => Some(content),
            Self::Hidden | Self::Flagged => None,
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
