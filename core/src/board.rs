use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Initial state, nothing revealed yet
    #[default]
    NotStarted,
    /// At least one reveal happened
    InProgress,
    /// Every safe cell is revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl GamePhase {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    /// No moves are accepted anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Represents a game from the first reveal to a win or loss.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    mine_layout: MineLayout,
    cells: Array2<Cell>,
    revealed_count: CellCount,
    flags_placed: CellCount,
    phase: GamePhase,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Random board, the first reveal is not protected.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new(rows, cols, mines)?;
        Self::with_generator(config, RandomMineGenerator::unprotected(seed))
    }

    /// Fails when the generator hands back a layout that does not match `config`.
    pub fn with_generator(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        let mine_layout = generator.generate(config);
        if mine_layout.size() != config.size() || mine_layout.mine_count() != config.mines() {
            log::warn!(
                "Generated layout {:?} with {} mines does not match {:?}",
                mine_layout.size(),
                mine_layout.mine_count(),
                config
            );
            return Err(GameError::InvalidConfig);
        }
        Ok(Self::build(mine_layout))
    }

    pub fn from_layout(mine_layout: MineLayout) -> Self {
        Self::build(mine_layout)
    }

    fn build(mine_layout: MineLayout) -> Self {
        let cells = Array2::from_shape_fn(mine_layout.size().to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell {
                has_mine: mine_layout.contains_mine(coords),
                adjacent_mine_count: mine_layout.adjacent_mine_count(coords),
                ..Cell::default()
            }
        });
        Self {
            mine_layout,
            cells,
            revealed_count: 0,
            flags_placed: 0,
            phase: GamePhase::default(),
            triggered_mine: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    /// Number of safe cells revealed so far
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn remaining_flags(&self) -> i64 {
        i64::from(self.mine_count()) - i64::from(self.flags_placed)
    }

    /// The mine whose reveal lost the game
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.mine_layout.validate_coords(coords)?;
        Ok(CellView::of(self.cells[coords.to_nd_index()], self.is_finished()))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.mine_layout.validate_coords(coords)?;
        if self.is_finished() {
            log::trace!("Ignoring flag at {:?}, game already ended", coords);
            return Ok(MarkOutcome::NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed {
            return Ok(MarkOutcome::NoChange);
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flags_placed += 1;
        } else {
            self.flags_placed -= 1;
        }
        Ok(MarkOutcome::Changed)
    }

    /// Reveal a cell and flood open the zero region around it, returning the phase after the move.
    ///
    /// Revealing a flagged or already revealed cell, or any cell after the game ended, changes nothing.
    pub fn reveal(&mut self, coords: Coord2) -> Result<GamePhase> {
        let coords = self.mine_layout.validate_coords(coords)?;
        if self.is_finished() {
            log::trace!("Ignoring reveal at {:?}, game already ended", coords);
            return Ok(self.phase);
        }

        let cell = self.cells[coords.to_nd_index()];
        if cell.is_revealed || cell.is_flagged {
            log::trace!("Ignoring reveal at {:?}, cell is {:?}", coords, cell);
            return Ok(self.phase);
        }

        self.mark_started();

        if cell.has_mine {
            self.cells[coords.to_nd_index()].is_revealed = true;
            self.triggered_mine = Some(coords);
            self.end_game(false);
            return Ok(self.phase);
        }

        self.open_cell(coords);
        log::debug!(
            "Revealed cell at {:?}, mine count: {}",
            coords,
            cell.adjacent_mine_count
        );
        if cell.adjacent_mine_count == 0 {
            self.flood_reveal(coords);
        }

        if self.revealed_count == self.mine_layout.safe_cell_count() {
            self.end_game(true);
        }
        Ok(self.phase)
    }

    /// Opens the connected zero region around `start` plus its numbered border.
    ///
    /// Cells are marked revealed before they are pushed, so each one enters the work list at most once.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut to_visit = Vec::from([start]);
        log::trace!("Starting flood-fill from {:?}", start);

        while let Some(visit_coords) = to_visit.pop() {
            for neighbor in self.mine_layout.iter_neighbors(visit_coords) {
                let cell = self.cells[neighbor.to_nd_index()];
                if cell.has_mine || cell.is_revealed || cell.is_flagged {
                    continue;
                }

                self.open_cell(neighbor);
                log::trace!(
                    "Flood opened cell at {:?}, mine count: {}",
                    neighbor,
                    cell.adjacent_mine_count
                );

                // numbered cells form the border, only zeros keep spreading
                if cell.adjacent_mine_count == 0 {
                    to_visit.push(neighbor);
                }
            }
        }
    }

    fn open_cell(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        debug_assert!(cell.is_unrevealed() && !cell.is_flagged && !cell.has_mine);
        cell.is_revealed = true;
        self.revealed_count += 1;
    }

    fn mark_started(&mut self) {
        if self.phase.is_initial() {
            log::debug!("Game started");
            self.phase = GamePhase::InProgress;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.phase.is_finished() {
            return;
        }

        self.phase = if won { GamePhase::Won } else { GamePhase::Lost };
        log::debug!(
            "Game ended: {:?}, {} of {} safe cells revealed",
            self.phase,
            self.revealed_count,
            self.mine_layout.safe_cell_count()
        );
    }
}
