use ndarray::Array2;

/// Single coordinate axis used for row/column positions and board dimensions.
///
/// Signed so that positions left of or above the board can be expressed by hosts and rejected as out of bounds.
pub type Coord = i32;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Only meaningful for coordinates that were already bounds-checked.
    fn to_nd_index(self) -> Self::Output {
        [self.0 as usize, self.1 as usize]
    }
}

/// Whether `coords` lies inside a board of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 >= 0 && coords.1 >= 0 && coords.0 < size.0 && coords.1 < size.1
}

/// Product of two dimensions, `None` when either is non-positive or the result does not fit.
pub fn checked_area(rows: Coord, cols: Coord) -> Option<CellCount> {
    let rows = CellCount::try_from(rows).ok()?;
    let cols = CellCount::try_from(cols).ok()?;
    rows.checked_mul(cols).filter(|&area| area > 0)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let size = (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, size)
    }
}

/// Moore neighborhood of a cell, clipped at the board edges.
///
/// Walks the 3x3 window around `center` row by row, skipping the center itself.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    last_row: Coord,
    first_col: Coord,
    last_col: Coord,
    row: Coord,
    col: Coord,
}

impl NeighborIter {
    pub fn new(center: Coord2, size: Coord2) -> Self {
        let (row, col) = center;
        let first_col = col.saturating_sub(1).max(0);
        Self {
            center,
            last_row: row.saturating_add(1).min(size.0.saturating_sub(1)),
            first_col,
            last_col: col.saturating_add(1).min(size.1.saturating_sub(1)),
            row: row.saturating_sub(1).max(0),
            col: first_col,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.row <= self.last_row && self.first_col <= self.last_col {
            let item = (self.row, self.col);
            if self.col < self.last_col {
                self.col += 1;
            } else {
                self.col = self.first_col;
                self.row += 1;
            }

            if item != self.center {
                return Some(item);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn corner_has_three_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();

        assert_eq!(neighbors, [(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        assert_eq!(NeighborIter::new((1, 1), (3, 3)).count(), 8);
    }

    #[test]
    fn single_row_board_clips_vertically() {
        let neighbors: Vec<_> = NeighborIter::new((0, 2), (1, 4)).collect();

        assert_eq!(neighbors, [(0, 1), (0, 3)]);
    }

    #[test]
    fn center_outside_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((-1, 9), (3, 3)).count(), 0);
        assert_eq!(NeighborIter::new((-5, 1), (3, 3)).count(), 0);
    }

    #[test]
    fn center_just_outside_board_sees_adjacent_edge() {
        let neighbors: Vec<_> = NeighborIter::new((-1, 1), (3, 3)).collect();

        assert_eq!(neighbors, [(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn bounds_check_rejects_negative_and_overflowing() {
        assert!(in_bounds((0, 0), (1, 1)));
        assert!(!in_bounds((-1, 0), (5, 5)));
        assert!(!in_bounds((0, 5), (5, 5)));
    }

    #[test]
    fn area_rejects_non_positive_dimensions() {
        assert_eq!(checked_area(5, 5), Some(25));
        assert_eq!(checked_area(0, 5), None);
        assert_eq!(checked_area(-3, 5), None);
    }
}
