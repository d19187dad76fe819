use super::*;

/// Deals a known list of mine positions, used to replay boards.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedAllocator<'a> {
    mine_coords: &'a [Coord2],
}

impl<'a> FixedAllocator<'a> {
    pub fn new(mine_coords: &'a [Coord2]) -> Self {
        Self { mine_coords }
    }

    /// Places the listed mines, duplicates count once. Returns how many mines ended up on the grid.
    pub fn place(&self, grid: &mut Grid) -> Result<CellCount> {
        for &coords in self.mine_coords {
            grid.validate_coords(coords)?;
        }

        grid.clear_mines();
        for &coords in self.mine_coords {
            grid[coords].is_mine = true;
        }

        if grid.mine_count() >= grid.total_cells() {
            grid.clear_mines();
            return Err(GameError::TooManyMines);
        }
        Ok(grid.mine_count())
    }
}

impl MineAllocator for FixedAllocator<'_> {
    /// Fails with `MineCountMismatch`, leaving no mines behind, unless the list holds exactly `mines` distinct cells.
    fn assign_mines(self, grid: &mut Grid, mines: CellCount, safe: Coord2) -> Result<Allocation> {
        let safe = grid.validate_coords(safe)?;
        let placed = self.place(grid)?;
        if placed != mines {
            grid.clear_mines();
            return Err(GameError::MineCountMismatch { expected: mines, placed });
        }

        Ok(Allocation {
            attempts: 1,
            safe_start: !grid.contains_mine(safe),
        })
    }
}
