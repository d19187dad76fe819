use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Result of resolving a chord on a numbered cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChordOutcome {
    NoChange,
    /// Number of cells that went from closed to revealed.
    Revealed(CellCount),
    /// An unflagged mine among the neighbors, nothing was revealed.
    Detonated(Coord2),
}

/// Reveals `start` and spreads through every connected zero-count cell.
///
/// Each visited cell gets its adjacent mine count. Cells with a count stop the spread, cells without one push all
/// their neighbors that are not revealed yet. Marks inside the spread are cleared by it. Returns how many cells went
/// from closed to revealed, so touching an already revealed cell returns `0` and changes nothing.
///
/// # Panics
///
/// If `start` holds a mine. Callers resolve that as a lost game instead.
pub fn touch_adjacent(grid: &mut Grid, start: Coord2) -> CellCount {
    assert!(
        !grid.contains_mine(start),
        "touched a mine at {start:?}, mines must be handled before revealing"
    );

    let mut opened: CellCount = 0;
    let mut stack = vec![start];

    while let Some(coords) = stack.pop() {
        if grid[coords].state.is_revealed() {
            continue;
        }

        if grid[coords].state.is_marked() {
            log::debug!("Cascade cleared the mark on {:?}", coords);
        }
        let count = grid.adjacent_mine_count(coords);
        grid[coords].state = CellState::Revealed(count);
        opened += 1;
        log::trace!("Revealed {:?} with {} adjacent mine(s)", coords, count);

        if count == 0 {
            stack.extend(
                grid.iter_neighbors(coords)
                    .filter(|&pos| !grid[pos].state.is_revealed()),
            );
        }
    }

    opened
}

/// Opens every neighbor of a numbered cell once the player has flagged exactly as many neighbors as its count.
///
/// Both too few and too many flags leave the board untouched. If a neighbor holding a mine was left unflagged it is
/// reported as detonated before anything else is revealed.
pub fn chord(grid: &mut Grid, coords: Coord2) -> ChordOutcome {
    let count = match grid[coords].state {
        CellState::Revealed(count) if count > 0 => count,
        _ => return ChordOutcome::NoChange,
    };

    if grid.count_flagged_neighbors(coords) != count {
        return ChordOutcome::NoChange;
    }

    let neighbors: Vec<Coord2> = grid.iter_neighbors(coords).collect();

    if let Some(&detonated) = neighbors.iter().find(|&&pos| {
        let cell = grid[pos];
        cell.is_mine && cell.state != CellState::Flagged
    }) {
        log::debug!("Chord on {:?} detonated {:?}", coords, detonated);
        return ChordOutcome::Detonated(detonated);
    }

    let mut opened = 0;
    for pos in neighbors {
        if !grid.contains_mine(pos) {
            opened += touch_adjacent(grid, pos);
        }
    }

    if opened == 0 {
        ChordOutcome::NoChange
    } else {
        ChordOutcome::Revealed(opened)
    }
}

/// The game is won once the closed cells are exactly the mines, flags play no part.
pub fn check_win(grid: &Grid, mines_total: CellCount) -> bool {
    grid.closed_count() == mines_total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: Coord2, mines: &[Coord2]) -> Grid {
        let mut grid = Grid::new(size).unwrap();
        for &coords in mines {
            grid[coords].is_mine = true;
        }
        grid
    }

    #[test]
    fn empty_board_opens_completely() {
        for start in [(0, 0), (1, 1), (2, 1)] {
            let mut grid = grid((3, 3), &[]);

            let opened = touch_adjacent(&mut grid, start);

            assert_eq!(opened, 9);
            for cell in grid.iter_cells() {
                assert_eq!(cell.state, CellState::Revealed(0));
                assert_eq!(cell.adjacent_mine_count(), Some(0));
            }
        }
    }

    #[test]
    fn numbered_cell_does_not_cascade() {
        let mut grid = grid((3, 3), &[(0, 0), (2, 2)]);

        let opened = touch_adjacent(&mut grid, (1, 1));

        assert_eq!(opened, 1);
        assert_eq!(grid.state_at((1, 1)), CellState::Revealed(2));
        for coords in grid.iter_coords().filter(|&pos| pos != (1, 1)) {
            assert_eq!(grid.state_at(coords), CellState::Unknown);
        }
    }

    #[test]
    fn flood_fill_stops_at_numbered_border() {
        let mut grid = grid((4, 4), &[(3, 3)]);

        touch_adjacent(&mut grid, (0, 0));

        assert_eq!(grid.state_at((0, 0)), CellState::Revealed(0));
        assert_eq!(grid.state_at((2, 2)), CellState::Revealed(1));
        assert_eq!(grid.state_at((3, 2)), CellState::Revealed(1));
        assert_eq!(grid.state_at((3, 3)), CellState::Unknown);
        assert!(check_win(&grid, 1));
    }

    #[test]
    fn flood_fill_clears_marks_in_its_way() {
        let mut grid = grid((3, 1), &[]);
        grid[(2, 0)].state = CellState::Flagged;

        touch_adjacent(&mut grid, (0, 0));

        assert_eq!(grid.state_at((2, 0)), CellState::Revealed(0));
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut once = grid((5, 5), &[(4, 0), (0, 4)]);
        touch_adjacent(&mut once, (2, 2));

        let mut twice = once.clone();
        let opened = touch_adjacent(&mut twice, (2, 2));

        assert_eq!(opened, 0);
        assert_eq!(once, twice);
    }

    #[test]
    #[should_panic(expected = "touched a mine")]
    fn touching_a_mine_is_a_contract_violation() {
        let mut grid = grid((2, 2), &[(0, 0)]);

        touch_adjacent(&mut grid, (0, 0));
    }

    #[test]
    fn large_board_does_not_overflow_the_stack() {
        let mut grid = grid((255, 255), &[]);

        let opened = touch_adjacent(&mut grid, (128, 128));

        assert_eq!(opened, grid.total_cells());
    }

    #[test]
    fn chord_requires_matching_flag_count() {
        let mut grid = grid((3, 3), &[(0, 0), (2, 0)]);
        touch_adjacent(&mut grid, (1, 1));
        grid[(0, 0)].state = CellState::Flagged;
        let before = grid.clone();

        assert_eq!(chord(&mut grid, (1, 1)), ChordOutcome::NoChange);
        assert_eq!(grid, before);
    }

    #[test]
    fn chord_with_too_many_flags_is_a_no_op() {
        let mut grid = grid((3, 3), &[(0, 0)]);
        touch_adjacent(&mut grid, (1, 1));
        grid[(0, 0)].state = CellState::Flagged;
        grid[(2, 2)].state = CellState::Flagged;
        let before = grid.clone();

        assert_eq!(chord(&mut grid, (1, 1)), ChordOutcome::NoChange);
        assert_eq!(grid, before);
    }

    #[test]
    fn chord_detonates_unflagged_mine_without_revealing() {
        let mut grid = grid((3, 3), &[(0, 0)]);
        touch_adjacent(&mut grid, (1, 1));
        grid[(2, 2)].state = CellState::Flagged;
        let before = grid.clone();

        assert_eq!(chord(&mut grid, (1, 1)), ChordOutcome::Detonated((0, 0)));
        assert_eq!(grid, before);
    }

    #[test]
    fn chord_reveals_neighbors_and_cascades() {
        let mut grid = grid((5, 3), &[(0, 0)]);
        touch_adjacent(&mut grid, (1, 1));
        grid[(0, 0)].state = CellState::Flagged;

        let outcome = chord(&mut grid, (1, 1));

        assert_eq!(outcome, ChordOutcome::Revealed(13));
        assert_eq!(grid.state_at((0, 0)), CellState::Flagged);
        assert_eq!(grid.state_at((4, 2)), CellState::Revealed(0));
        assert!(check_win(&grid, 1));
    }

    #[test]
    fn chord_on_closed_or_open_cells_does_nothing() {
        let mut grid = grid((3, 3), &[]);

        assert_eq!(chord(&mut grid, (1, 1)), ChordOutcome::NoChange);
        touch_adjacent(&mut grid, (1, 1));
        assert_eq!(chord(&mut grid, (1, 1)), ChordOutcome::NoChange);
    }

    #[test]
    fn win_ignores_flag_state() {
        let mut grid = grid((2, 2), &[(1, 1)]);
        assert!(!check_win(&grid, 1));

        for coords in [(0, 0), (1, 0), (0, 1)] {
            touch_adjacent(&mut grid, coords);
        }
        assert!(check_win(&grid, 1));

        grid[(1, 1)].state = CellState::Flagged;
        assert!(check_win(&grid, 1));
    }

    #[test]
    fn win_is_blocked_by_a_closed_safe_cell() {
        let mut grid = grid((2, 2), &[(1, 1)]);
        touch_adjacent(&mut grid, (0, 0));
        touch_adjacent(&mut grid, (1, 0));
        grid[(1, 1)].state = CellState::Flagged;

        assert!(!check_win(&grid, 1));
    }
}
