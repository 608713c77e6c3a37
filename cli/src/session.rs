use std::collections::BTreeSet;

use minefield_core::*;

/// Owns the single board being played and rebuilds it on restart.
///
/// With a protected start the board only exists after the first reveal, so the generator knows which cell to keep
/// clear. Flags placed before that are remembered and carried over onto the new board.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    start_cell: StartCell,
    seed: u64,
    board: Option<Board>,
    pending_flags: BTreeSet<Coord2>,
}

impl Session {
    pub fn new(config: GameConfig, start_cell: StartCell, seed: u64) -> Result<Self> {
        log::info!("New game {:?} with seed {}", config, seed);
        let board = match start_cell {
            StartCell::Random => Some(Board::with_generator(
                config,
                RandomMineGenerator::unprotected(seed),
            )?),
            StartCell::SimpleSafe | StartCell::AlwaysZero => None,
        };
        Ok(Self {
            config,
            start_cell,
            seed,
            board,
            pending_flags: BTreeSet::new(),
        })
    }

    pub fn restart(&mut self, seed: u64) -> Result<()> {
        *self = Self::new(self.config, self.start_cell, seed)?;
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Flags placed while the board is still waiting for its first reveal
    pub fn pending_flags(&self) -> &BTreeSet<Coord2> {
        &self.pending_flags
    }

    pub fn phase(&self) -> GamePhase {
        self.board.as_ref().map_or(GamePhase::NotStarted, Board::phase)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<GamePhase> {
        let board = match self.board.take() {
            Some(board) => board,
            None => {
                if !in_bounds(coords, self.config.size()) {
                    return Err(GameError::OutOfBounds);
                }
                if self.pending_flags.contains(&coords) {
                    log::trace!("Ignoring reveal at {:?}, cell is flagged", coords);
                    return Ok(GamePhase::NotStarted);
                }
                self.build_board(coords)?
            }
        };
        self.board.insert(board).reveal(coords)
    }

    fn build_board(&mut self, start: Coord2) -> Result<Board> {
        log::debug!("Placing mines around start {:?}", start);
        let generator = RandomMineGenerator::new(self.seed, start, self.start_cell);
        let mut board = Board::with_generator(self.config, generator)?;
        for coords in std::mem::take(&mut self.pending_flags) {
            board.toggle_flag(coords)?;
        }
        Ok(board)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        if let Some(board) = self.board.as_mut() {
            return board.toggle_flag(coords);
        }
        if !in_bounds(coords, self.config.size()) {
            return Err(GameError::OutOfBounds);
        }
        if !self.pending_flags.remove(&coords) {
            self.pending_flags.insert(coords);
        }
        Ok(MarkOutcome::Changed)
    }

    /// Mines not yet flagged, counting flags placed before the board exists
    pub fn remaining_flags(&self) -> i64 {
        match &self.board {
            Some(board) => board.remaining_flags(),
            None => i64::from(self.config.mines()) - self.pending_flags.len() as i64,
        }
    }
}
