#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use allocator::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use records::*;
pub use session::*;
pub use types::*;

mod allocator;
mod cell;
mod engine;
mod error;
mod grid;
mod records;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Checks that the board is not empty and leaves at least one safe cell.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if mines >= mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
    Custom(GameConfig),
}

impl Difficulty {
    pub const PRESETS: [Difficulty; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Beginner => GameConfig::new_unchecked((9, 9), 10),
            Intermediate => GameConfig::new_unchecked((16, 16), 40),
            Expert => GameConfig::new_unchecked((30, 16), 99),
            Custom(config) => config,
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Beginner => "beginner",
            Intermediate => "intermediate",
            Expert => "expert",
            Custom(_) => "custom",
        }
    }

    pub const fn is_preset(self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

/// Outcome of a primary action or chord.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}
