use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts, flag counts, and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Size of an `ndarray` grid expressed in board coordinates.
///
/// Grids are only ever built from a validated [`Coord2`] size, so both axes fit.
pub(crate) fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, columns) = grid.dim();
    (
        rows.try_into().unwrap_or(Coord::MAX),
        columns.try_into().unwrap_or(Coord::MAX),
    )
}

/// Row-major iteration over every position of a `size` grid.
pub fn iter_coords((rows, columns): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..columns).map(move |column| (row, column)))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, grid_size(self))
    }
}

/// Up to eight in-bounds cells sharing an edge or a corner with `center`, in row-major order.
///
/// Walks the 3x3 window around `center`, clipped to the board edges, skipping the centre.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    first_column: Coord,
    last: Coord2,
    next: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, (rows, columns): Coord2) -> Self {
        let (row, column) = center;
        if row >= rows || column >= columns {
            return Self {
                center,
                first_column: 0,
                last: (0, 0),
                next: None,
            };
        }

        let first = (row.saturating_sub(1), column.saturating_sub(1));
        let last = (
            row.saturating_add(1).min(rows - 1),
            column.saturating_add(1).min(columns - 1),
        );
        Self {
            center,
            first_column: first.1,
            last,
            next: Some(first),
        }
    }

    fn step(&self, (row, column): Coord2) -> Option<Coord2> {
        if column < self.last.1 {
            Some((row, column + 1))
        } else if row < self.last.0 {
            Some((row + 1, self.first_column))
        } else {
            None
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.next?;
            self.next = self.step(current);

            if current != self.center {
                return Some(current);
            }
        }
    }
}
