use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single cell.
///
/// `Revealed(0)` renders as an open cell, any other count as a numbered one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Unknown,
    Flagged,
    Questioned,
    Revealed(u8),
    Exploded,
}

impl CellState {
    /// Whether the cell still counts as closed for win detection.
    pub const fn is_closed(self) -> bool {
        !self.is_revealed()
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    pub const fn is_open(self) -> bool {
        matches!(self, Self::Revealed(0))
    }

    pub const fn is_numbered(self) -> bool {
        matches!(self, Self::Revealed(count) if count > 0)
    }

    pub const fn is_marked(self) -> bool {
        matches!(self, Self::Flagged | Self::Questioned)
    }

    /// Next state of the secondary action, `None` when the cell cannot be marked anymore.
    pub const fn cycle_mark(self) -> Option<Self> {
        use CellState::*;
        match self {
            Unknown => Some(Flagged),
            Flagged => Some(Questioned),
            Questioned => Some(Unknown),
            Revealed(_) | Exploded => None,
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Unknown
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: Coord,
    pub y: Coord,
    pub is_mine: bool,
    pub state: CellState,
}

impl Cell {
    pub const fn new((x, y): Coord2) -> Self {
        Self {
            x,
            y,
            is_mine: false,
            state: CellState::Unknown,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }

    pub const fn adjacent_mine_count(&self) -> Option<u8> {
        match self.state {
            CellState::Revealed(count) => Some(count),
            _ => None,
        }
    }
}
