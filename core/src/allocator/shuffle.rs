use alloc::vec::Vec;

use super::*;

/// Retry cap before a layout with a mine under the safe cell is accepted anyway.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Uniformly random placement: a Fisher-Yates shuffle of a "hat" holding every mine up front, drawn again while
/// the safe cell comes out mined.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffleAllocator {
    seed: u64,
    max_attempts: u32,
}

impl ShuffleAllocator {
    pub fn new(seed: u64) -> Self {
        Self::with_max_attempts(seed, DEFAULT_MAX_ATTEMPTS)
    }

    pub fn with_max_attempts(seed: u64, max_attempts: u32) -> Self {
        Self {
            seed,
            max_attempts: max_attempts.max(1),
        }
    }
}

impl MineAllocator for ShuffleAllocator {
    fn assign_mines(self, grid: &mut Grid, mines: CellCount, safe: Coord2) -> Result<Allocation> {
        use rand::prelude::*;

        let safe = grid.validate_coords(safe)?;
        let total_cells = grid.total_cells();
        if mines >= total_cells {
            return Err(GameError::TooManyMines);
        }

        let width = usize::from(grid.width());
        let safe_index = usize::from(safe.1) * width + usize::from(safe.0);

        let mut hat: Vec<bool> = (0..total_cells).map(|i| i < mines).collect();
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut attempts = 0;
        loop {
            attempts += 1;
            for i in (1..hat.len()).rev() {
                let j = rng.random_range(0..=i);
                hat.swap(i, j);
            }

            if !hat[safe_index] {
                break;
            }
            if attempts >= self.max_attempts {
                log::warn!(
                    "Could not keep {:?} free of mines after {} shuffles, accepting the layout anyway",
                    safe,
                    attempts
                );
                break;
            }
        }

        grid.clear_mines();
        for (i, &is_mine) in hat.iter().enumerate() {
            // row-major, same order as `Grid::iter_coords`
            let coords = ((i % width) as Coord, (i / width) as Coord);
            grid[coords].is_mine = is_mine;
        }
        log::debug!("Dealt {} mines after {} shuffle(s)", mines, attempts);

        Ok(Allocation {
            attempts,
            safe_start: !hat[safe_index],
        })
    }
}
