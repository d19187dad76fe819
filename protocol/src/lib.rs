//! Messages exchanged with a board worker.
//!
//! Every request carries a full snapshot of the grid and every board-changing response carries the updated one, so
//! the worker holds no state between messages and can run on another thread, in another process, or inline.

use cellsweep_core::{
    CellCount, CellState, ChordOutcome, Coord, Coord2, GameError, Grid, check_win, chord, touch_adjacent,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Reveal a cell and flood-fill from it.
    TouchAdjacent { grid: Grid, x: Coord, y: Coord },
    /// Chord a numbered cell.
    GetAdjacent { grid: Grid, x: Coord, y: Coord },
    CalcWin { grid: Grid, mines: CellCount },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    TouchAdjacent { grid: Grid },
    GetAdjacent { grid: Grid },
    /// A mine went off at `cell`, which is marked as exploded in `grid`.
    Explode { grid: Grid, cell: Coord2 },
    CalcWin { win: bool },
    Error { message: String },
}

impl From<GameError> for Response {
    fn from(err: GameError) -> Self {
        Response::Error {
            message: err.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runs one request to completion.
pub fn handle(request: Request) -> Response {
    match process(request) {
        Ok(response) => response,
        Err(err) => {
            log::warn!("Rejected worker request: {}", err);
            err.into()
        }
    }
}

/// Decodes a JSON request, runs it, and encodes the response.
pub fn handle_json(input: &str) -> Result<String, ProtocolError> {
    let request: Request = serde_json::from_str(input)?;
    let response = handle(request);
    Ok(serde_json::to_string(&response)?)
}

fn process(request: Request) -> Result<Response, GameError> {
    Ok(match request {
        Request::TouchAdjacent { mut grid, x, y } => {
            let coords = checked_coords(&grid, (x, y))?;
            if grid.contains_mine(coords) {
                return Ok(explode(grid, coords));
            }
            touch_adjacent(&mut grid, coords);
            Response::TouchAdjacent { grid }
        }
        Request::GetAdjacent { mut grid, x, y } => {
            let coords = checked_coords(&grid, (x, y))?;
            match chord(&mut grid, coords) {
                ChordOutcome::Detonated(mine) => explode(grid, mine),
                ChordOutcome::NoChange | ChordOutcome::Revealed(_) => Response::GetAdjacent { grid },
            }
        }
        Request::CalcWin { grid, mines } => {
            grid.validate()?;
            Response::CalcWin {
                win: check_win(&grid, mines),
            }
        }
    })
}

fn checked_coords(grid: &Grid, coords: Coord2) -> Result<Coord2, GameError> {
    grid.validate()?;
    grid.validate_coords(coords)
}

fn explode(mut grid: Grid, cell: Coord2) -> Response {
    grid[cell].state = CellState::Exploded;
    Response::Explode { grid, cell }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn grid(size: Coord2, mines: &[Coord2]) -> Grid {
        let mut grid = Grid::new(size).unwrap();
        for &coords in mines {
            grid[coords].is_mine = true;
        }
        grid
    }

    fn roundtrip(request: &Request) -> Response {
        let input = serde_json::to_string(request).unwrap();
        let output = handle_json(&input).unwrap();
        serde_json::from_str(&output).unwrap()
    }

    #[test]
    fn touch_adjacent_returns_the_flooded_grid() {
        let response = roundtrip(&Request::TouchAdjacent {
            grid: grid((3, 3), &[]),
            x: 1,
            y: 1,
        });

        let Response::TouchAdjacent { grid } = response else {
            panic!("unexpected response");
        };
        assert_eq!(grid.closed_count(), 0);
    }

    #[test]
    fn touch_adjacent_on_a_mine_explodes() {
        let response = handle(Request::TouchAdjacent {
            grid: grid((2, 2), &[(1, 0)]),
            x: 1,
            y: 0,
        });

        let Response::Explode { grid, cell } = response else {
            panic!("unexpected response");
        };
        assert_eq!(cell, (1, 0));
        assert_eq!(grid.state_at((1, 0)), CellState::Exploded);
    }

    #[test]
    fn get_adjacent_reports_the_detonated_neighbor() {
        let mut board = grid((3, 3), &[(0, 0)]);
        touch_adjacent(&mut board, (1, 1));
        board[(2, 0)].state = CellState::Flagged;

        let response = roundtrip(&Request::GetAdjacent {
            grid: board,
            x: 1,
            y: 1,
        });

        let Response::Explode { cell, .. } = response else {
            panic!("unexpected response");
        };
        assert_eq!(cell, (0, 0));
    }

    #[test]
    fn get_adjacent_with_matching_flags_reveals() {
        let mut board = grid((3, 3), &[(0, 0)]);
        touch_adjacent(&mut board, (1, 1));
        board[(0, 0)].state = CellState::Flagged;

        let response = handle(Request::GetAdjacent {
            grid: board,
            x: 1,
            y: 1,
        });

        let Response::GetAdjacent { grid } = response else {
            panic!("unexpected response");
        };
        assert!(check_win(&grid, 1));
    }

    #[test]
    fn calc_win_uses_the_tagged_format() {
        let mut board = grid((2, 2), &[(1, 1)]);
        for coords in [(0, 0), (1, 0), (0, 1)] {
            touch_adjacent(&mut board, coords);
        }
        let input = json!({
            "type": "calc_win",
            "grid": serde_json::to_value(&board).unwrap(),
            "mines": 1,
        });

        let output = handle_json(&input.to_string()).unwrap();

        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value, json!({ "type": "calc_win", "win": true }));
    }

    #[test]
    fn out_of_range_coordinates_answer_an_error() {
        let response = handle(Request::TouchAdjacent {
            grid: grid((2, 2), &[]),
            x: 2,
            y: 0,
        });

        assert_eq!(response, Response::from(GameError::InvalidCoords));
    }

    #[test]
    fn inconsistent_snapshots_answer_an_error() {
        let mut board = grid((2, 2), &[]);
        board[(1, 1)].y = 0;

        let response = handle(Request::CalcWin { grid: board, mines: 0 });

        assert_eq!(response, Response::from(GameError::InvalidBoardShape));
    }

    #[test]
    fn malformed_json_is_a_protocol_error() {
        assert!(matches!(handle_json("{\"type\":\"explode\"}"), Err(ProtocolError::Json(_))));
        assert!(matches!(handle_json("not json"), Err(ProtocolError::Json(_))));
    }
}
