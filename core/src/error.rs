use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be at least one cell wide and tall")]
    InvalidSize,
    #[error("Too many mines, at least one cell must be safe")]
    TooManyMines,
    #[error("Expected {expected} mines but {placed} were placed")]
    MineCountMismatch { expected: CellCount, placed: CellCount },
    #[error("Board cells do not match their positions")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
