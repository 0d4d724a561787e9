use std::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only picture of the grid as the player is allowed to see it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    cells: Array2<CellView>,
}

/// Everything a host may know about a running session.
///
/// Carries no mine positions beyond what [`Snapshot`] already shows, and cannot be turned back
/// into a playable session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub config: GameConfig,
    pub status: SessionStatus,
    pub score: CellCount,
    pub flags_remaining: CellCount,
    pub triggered_mine: Option<Coord2>,
    pub cells: Snapshot,
}

/// A cell whose view differs between two snapshots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    pub coords: Coord2,
    pub view: CellView,
}

impl Snapshot {
    pub fn from_session(session: &GameSession) -> Self {
        let size = session.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(row, column)| {
            session.view_at((row as Coord, column as Coord))
        });
        Self { cells }
    }

    /// Every cell revealed, mines included.
    pub(crate) fn solution(board: &Board) -> Self {
        let cells = Array2::from_shape_fn(board.size().to_nd_index(), |(row, column)| {
            CellView::Revealed(board[(row as Coord, column as Coord)])
        });
        Self { cells }
    }

    /// A snapshot with nothing revealed, for the first render of a board of `size`.
    pub fn blank(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn get(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Row-major iteration over every cell.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, CellView)> + '_ {
        iter_coords(self.size()).map(|coords| (coords, self[coords]))
    }

    pub fn count(&self, state: RevealState) -> CellCount {
        self.cells
            .iter()
            .filter(|view| view.reveal_state() == state)
            .count() as CellCount
    }

    /// Cells whose view changed since `previous`, in row-major order.
    pub fn diff(&self, previous: &Snapshot) -> Result<Vec<CellUpdate>> {
        if self.cells.dim() != previous.cells.dim() {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(self
            .iter()
            .filter(|&(coords, view)| previous[coords] != view)
            .map(|(coords, view)| CellUpdate { coords, view })
            .collect())
    }
}

impl Index<Coord2> for Snapshot {
    type Output = CellView;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
