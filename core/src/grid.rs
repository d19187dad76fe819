use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size board of cells, indexed by `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }

        let cells = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            // both fit in a `Coord` because the shape came from one
            Cell::new((x as Coord, y as Coord))
        });
        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord2 {
        let (width, height) = self.cells.dim();
        (
            width.try_into().unwrap_or(Coord::MAX),
            height.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Checks that the board came in a usable shape and that every cell knows its own position.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.cells.dim();
        if width == 0 || height == 0 || width > Coord::MAX.into() || height > Coord::MAX.into() {
            return Err(GameError::InvalidBoardShape);
        }

        let misplaced = self
            .cells
            .indexed_iter()
            .any(|((x, y), cell)| usize::from(cell.x) != x || usize::from(cell.y) != y);
        if misplaced {
            Err(GameError::InvalidBoardShape)
        } else {
            Ok(())
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    pub fn state_at(&self, coords: Coord2) -> CellState {
        self[coords].state
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// All positions in row-major order.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        count_u8(self.iter_neighbors(coords).filter(|&pos| self[pos].is_mine))
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        count_u8(
            self.iter_neighbors(coords)
                .filter(|&pos| self[pos].state == CellState::Flagged),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        count_cells(self.cells.iter().filter(|cell| cell.is_mine))
    }

    pub fn flag_count(&self) -> CellCount {
        count_cells(
            self.cells
                .iter()
                .filter(|cell| cell.state == CellState::Flagged),
        )
    }

    pub fn closed_count(&self) -> CellCount {
        count_cells(self.cells.iter().filter(|cell| cell.state.is_closed()))
    }

    /// Forgets every mine, marks stay since players may flag before the first reveal.
    pub(crate) fn clear_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.is_mine = false;
        }
    }
}

fn count_u8<I: Iterator>(iter: I) -> u8 {
    // at most 8 neighbors
    iter.count() as u8
}

fn count_cells<I: Iterator>(iter: I) -> CellCount {
    // a board never holds more than `Coord::MAX * Coord::MAX` cells
    iter.count() as CellCount
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
