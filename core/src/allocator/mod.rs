use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use shuffle::*;

mod fixed;
mod shuffle;

/// Places mines on a cleared grid, keeping the first clicked cell free when possible.
pub trait MineAllocator {
    fn assign_mines(self, grid: &mut Grid, mines: CellCount, safe: Coord2) -> Result<Allocation>;
}

/// Report of a single mine deal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// How many layouts were drawn before one was accepted.
    pub attempts: u32,
    /// Whether the safe cell actually ended up without a mine.
    pub safe_start: bool,
}
