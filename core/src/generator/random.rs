use alloc::vec;
use alloc::vec::Vec;
use core::iter;
use ndarray::Array2;

use super::*;

/// Generation strategy that can optionally keep the starting cell safe or zero, but other than that is purely
/// random.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    start: Coord2,
    start_cell: StartCell,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, start: Coord2, start_cell: StartCell) -> Self {
        Self {
            seed,
            start,
            start_cell,
        }
    }

    /// Plain random placement, the first reveal may lose.
    pub fn unprotected(seed: u64) -> Self {
        Self::new(seed, (0, 0), StartCell::Random)
    }

    fn effective_start_cell(&self, config: &GameConfig) -> StartCell {
        use StartCell::*;

        let size = config.size();
        match self.start_cell {
            Random => Random,
            SimpleSafe | AlwaysZero if !in_bounds(self.start, size) => {
                log::warn!("Start cell {:?} is outside the board, fallback to random", self.start);
                Random
            }
            SimpleSafe => SimpleSafe,
            AlwaysZero => {
                let reserved = 1 + NeighborIter::new(self.start, size).count() as CellCount;
                if config.mines() + reserved > config.total_cells() {
                    log::warn!("Cannot make start cell zero, fallback to simple safe");
                    SimpleSafe
                } else {
                    AlwaysZero
                }
            }
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;
        use StartCell::*;

        let size = config.size();
        let reserved: Vec<Coord2> = match self.effective_start_cell(&config) {
            Random => Vec::new(),
            SimpleSafe => vec![self.start],
            AlwaysZero => iter::once(self.start)
                .chain(NeighborIter::new(self.start, size))
                .collect(),
        };

        // reserved cells are temporarily marked so sampling never lands on them
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in &reserved {
            mine_mask[coords.to_nd_index()] = true;
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines_placed: CellCount = 0;
        while mines_placed < config.mines() {
            let coords = (rng.random_range(0..size.0), rng.random_range(0..size.1));
            let cell = &mut mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                mines_placed += 1;
            }
        }

        for &coords in &reserved {
            mine_mask[coords.to_nd_index()] = false;
        }

        // double check mine count
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        if mine_count != config.mines() {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                mine_count,
                config.mines()
            );
        }
        log::debug!("Generated {} mines on {:?} board, seed {}", mine_count, size, self.seed);

        MineLayout {
            mine_mask,
            mine_count,
        }
    }
}
