#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod types;

/// Unchecked wire form of [`GameConfig`], deserialized values go through [`GameConfig::new`].
#[derive(Deserialize)]
struct RawGameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

/// Shape and mine count of a game, validated on construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    rows: Coord,
    cols: Coord,
    mines: CellCount,
}

impl GameConfig {
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let total = checked_area(rows, cols).ok_or(GameError::InvalidConfig)?;
        if mines == 0 || mines >= total {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self { rows, cols, mines })
    }

    pub const fn easy() -> Self {
        Self {
            rows: 10,
            cols: 10,
            mines: 10,
        }
    }

    pub const fn medium() -> Self {
        Self {
            rows: 16,
            cols: 16,
            mines: 40,
        }
    }

    pub const fn hard() -> Self {
        Self {
            rows: 24,
            cols: 24,
            mines: 99,
        }
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn cols(&self) -> Coord {
        self.cols
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        self.rows as CellCount * self.cols as CellCount
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.rows, raw.cols, raw.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::easy()
    }
}

/// Fixed placement of mines on a board.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Accepts any mask with at least one mine and at least one safe cell.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        let mine_count = CellCount::try_from(mine_count).map_err(|_| GameError::InvalidConfig)?;
        let layout = Self {
            mine_mask,
            mine_count,
        };
        layout.game_config()?;
        Ok(layout)
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        checked_area(size.0, size.1).ok_or(GameError::InvalidConfig)?;
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> Result<GameConfig> {
        let (rows, cols) = self.size();
        GameConfig::new(rows, cols, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        )
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether the host needs to redraw
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn config_rejects_bad_dimensions() {
        assert_eq!(GameConfig::new(0, 5, 1), Err(GameError::InvalidConfig));
        assert_eq!(GameConfig::new(5, -1, 1), Err(GameError::InvalidConfig));
    }

    #[test]
    fn config_rejects_bad_mine_counts() {
        assert_eq!(GameConfig::new(5, 5, 0), Err(GameError::InvalidConfig));
        assert!(GameConfig::new(5, 5, 24).is_ok());
        assert_eq!(GameConfig::new(5, 5, 25), Err(GameError::InvalidConfig));
    }

    #[test]
    fn presets_are_valid() {
        for preset in [GameConfig::easy(), GameConfig::medium(), GameConfig::hard()] {
            assert_eq!(
                GameConfig::new(preset.rows(), preset.cols(), preset.mines()),
                Ok(preset)
            );
        }
        assert_eq!(GameConfig::hard().safe_cell_count(), 24 * 24 - 99);
    }

    #[test]
    fn config_serializes_with_field_names() {
        let json = serde_json::to_string(&GameConfig::easy()).unwrap();

        assert_eq!(json, r#"{"rows":10,"cols":10,"mines":10}"#);
        assert_eq!(
            serde_json::from_str::<GameConfig>(&json).unwrap(),
            GameConfig::easy()
        );
    }

    #[test]
    fn config_deserialization_is_validated() {
        for json in [
            r#"{"rows":0,"cols":3,"mines":1}"#,
            r#"{"rows":-2,"cols":3,"mines":1}"#,
            r#"{"rows":3,"cols":3,"mines":9}"#,
            r#"{"rows":3,"cols":3,"mines":0}"#,
        ] {
            let err = serde_json::from_str::<GameConfig>(json).unwrap_err();

            assert!(err.to_string().contains("Invalid board configuration"), "{json}: {err}");
        }
    }

    #[test]
    fn layout_rejects_mines_outside_board() {
        let result = MineLayout::from_mine_coords((3, 3), &[(3, 0)]);

        assert_eq!(result, Err(GameError::OutOfBounds));
    }

    #[test]
    fn layout_rejects_empty_and_full_boards() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[]),
            Err(GameError::InvalidConfig)
        );
        assert_eq!(
            MineLayout::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::InvalidConfig)
        );
    }

    #[test]
    fn layout_counts_duplicate_coords_once() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(layout.mine_count(), 1);
    }

    #[test]
    fn adjacency_matches_hand_counted_layout() {
        // * . .
        // . . *
        // . * .
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (1, 2), (2, 1)]).unwrap();
        let expected = [[0, 2, 1], [2, 3, 1], [1, 1, 2]];

        for row in 0..3 {
            for col in 0..3 {
                if layout.contains_mine((row, col)) {
                    continue;
                }
                assert_eq!(
                    layout.adjacent_mine_count((row, col)),
                    expected[row as usize][col as usize],
                    "at ({row}, {col})"
                );
            }
        }
    }
}
