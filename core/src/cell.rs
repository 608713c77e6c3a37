use serde::{Deserialize, Serialize};

/// One grid position, as owned by the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub has_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mine_count: u8,
}

impl Cell {
    pub const fn is_unrevealed(self) -> bool {
        !self.is_revealed
    }
}

/// What a player is allowed to know about a cell.
///
/// `mine` is only filled in once the cell is revealed or the game is over, and `adjacent_count` only for revealed
/// safe cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub revealed: bool,
    pub flagged: bool,
    pub mine: Option<bool>,
    pub adjacent_count: Option<u8>,
}

impl CellView {
    pub(crate) const fn of(cell: Cell, game_over: bool) -> Self {
        let mine = if cell.is_revealed || game_over {
            Some(cell.has_mine)
        } else {
            None
        };
        let adjacent_count = if cell.is_revealed && !cell.has_mine {
            Some(cell.adjacent_mine_count)
        } else {
            None
        };
        Self {
            revealed: cell.is_revealed,
            flagged: cell.is_flagged,
            mine,
            adjacent_count,
        }
    }

    /// A flag on a safe cell, only detectable after the game ended
    pub const fn is_incorrect_flag(self) -> bool {
        self.flagged && matches!(self.mine, Some(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mined() -> Cell {
        Cell {
            has_mine: true,
            ..Cell::default()
        }
    }

    #[test]
    fn hidden_mine_is_not_exposed_during_play() {
        let view = CellView::of(mined(), false);

        assert_eq!(view.mine, None);
        assert_eq!(view.adjacent_count, None);
    }

    #[test]
    fn hidden_mine_is_exposed_after_game_over() {
        assert_eq!(CellView::of(mined(), true).mine, Some(true));
    }

    #[test]
    fn revealed_safe_cell_shows_count() {
        let cell = Cell {
            is_revealed: true,
            adjacent_mine_count: 3,
            ..Cell::default()
        };
        let view = CellView::of(cell, false);

        assert_eq!(view.mine, Some(false));
        assert_eq!(view.adjacent_count, Some(3));
    }

    #[test]
    fn flag_on_safe_cell_is_incorrect_after_game_over() {
        let cell = Cell {
            is_flagged: true,
            ..Cell::default()
        };

        assert!(!CellView::of(cell, false).is_incorrect_flag());
        assert!(CellView::of(cell, true).is_incorrect_flag());
    }
}
