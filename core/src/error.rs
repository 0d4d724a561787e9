use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column, got {rows}x{columns}")]
    InvalidSize { rows: Coord, columns: Coord },
    #[error("Mine count must be between 1 and {cells} exclusive, got {mines}")]
    InvalidMineCount { mines: CellCount, cells: CellCount },
    #[error("Unknown difficulty")]
    UnknownDifficulty,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

impl GameError {
    /// Whether the error comes from invalid game parameters rather than a bad move.
    pub const fn is_configuration(self) -> bool {
        matches!(
            self,
            Self::InvalidSize { .. } | Self::InvalidMineCount { .. } | Self::UnknownDifficulty
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
