use std::collections::BTreeSet;
use std::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod config;
mod engine;
mod error;
mod generator;
mod snapshot;
mod tile;
mod types;

/// Immutable mine placement and adjacency counts for one game.
///
/// Not serializable: its contents are what the player must not see.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    contents: Array2<CellContent>,
    mine_count: CellCount,
}

impl Board {
    /// Builds a board from a mask where `true` marks a mine.
    ///
    /// The mask must describe a valid [`GameConfig`]: non-empty, with at least one mine and at
    /// least one safe cell.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, columns) = mine_mask.dim();
        let rows: Coord = rows.try_into().map_err(|_| GameError::InvalidBoardShape)?;
        let columns: Coord = columns
            .try_into()
            .map_err(|_| GameError::InvalidBoardShape)?;
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .map_err(|_| GameError::InvalidBoardShape)?;

        if let Err(err) = GameConfig::new((rows, columns), mine_count) {
            log::warn!("Rejected mine layout of {rows}x{columns} with {mine_count} mines: {err}");
            return Err(err);
        }

        Ok(Self::from_checked_mask(mine_mask, mine_count))
    }

    /// Computes every cell's content. `mine_count` must match the mask.
    pub(crate) fn from_checked_mask(mine_mask: &Array2<bool>, mine_count: CellCount) -> Self {
        let contents = Array2::from_shape_fn(mine_mask.dim(), |(row, column)| {
            if mine_mask[(row, column)] {
                CellContent::Mine
            } else {
                let adjacent_mines = mine_mask
                    .iter_neighbors((row as Coord, column as Coord))
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                CellContent::from_adjacent(adjacent_mines as u8)
            }
        });

        Self {
            contents,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize {
                rows: size.0,
                columns: size.1,
            });
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.contents)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size().0, self.size().1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn content(&self, coords: Coord2) -> CellContent {
        self[coords]
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    /// Counts mines around `coords` from the stored contents, independent of the cached count.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        iter_coords(self.size()).filter(|&pos| self.contains_mine(pos))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.contents.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = CellContent;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.contents[coords.to_nd_index()]
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Target was already revealed.
    NoOp,
    /// Target was a mine, the session is now lost.
    MineHit,
    /// Every position that went from unrevealed to revealed during this call.
    CellsOpened(BTreeSet<Coord2>),
    /// The session had already ended, nothing changed.
    AlreadyTerminal,
}

impl RevealOutcome {
    pub fn has_update(&self) -> bool {
        use RevealOutcome::*;
        match self {
            NoOp => false,
            MineHit => true,
            CellsOpened(_) => true,
            AlreadyTerminal => false,
        }
    }

    pub fn opened(&self) -> Option<&BTreeSet<Coord2>> {
        match self {
            Self::CellsOpened(opened) => Some(opened),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Placed,
    Removed,
    /// Cell is revealed, or no flags are left to place.
    Rejected,
    AlreadyTerminal,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        use FlagOutcome::*;
        match self {
            Placed => true,
            Removed => true,
            Rejected => false,
            AlreadyTerminal => false,
        }
    }
}

/// Result of the outcome query, carrying the score once the game has ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    InProgress,
    Won(CellCount),
    Lost(CellCount),
}

impl SessionStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won(_) | Self::Lost(_))
    }
}
