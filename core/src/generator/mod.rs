use crate::*;
use serde::{Deserialize, Serialize};
pub use random::*;

mod random;

/// Source of mine placements, the only place randomness enters a game.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// How much the generator protects the first revealed cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartCell {
    /// No protection, the first reveal may hit a mine
    #[default]
    Random,
    /// The start cell is never a mine
    SimpleSafe,
    /// The start cell and all its neighbors are never mines, so the first reveal floods
    AlwaysZero,
}
