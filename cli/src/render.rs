use std::io::{self, Write};

use cellsweep_core::{Cell, CellState, Session, SessionStatus};

/// Character for a cell, mines and wrong flags are uncovered once the game is over.
pub(crate) fn glyph(cell: &Cell, status: SessionStatus) -> char {
    use CellState::*;
    match (cell.state, status) {
        (Revealed(0), _) => '.',
        (Revealed(count), _) => char::from(b'0' + count),
        (Exploded, _) => 'X',
        (Flagged, SessionStatus::Lost) if !cell.is_mine => '!',
        (Flagged, _) => 'F',
        (Unknown | Questioned, SessionStatus::Won) if cell.is_mine => 'F',
        (Unknown | Questioned, SessionStatus::Lost) if cell.is_mine => '*',
        (Questioned, _) => '?',
        (Unknown, _) => '#',
    }
}

pub(crate) fn draw(output: &mut impl Write, session: &Session, elapsed_secs: u32) -> io::Result<()> {
    let grid = session.grid();
    let (width, height) = grid.size();
    let status = session.status();

    let state = match status {
        SessionStatus::Running => "running",
        SessionStatus::Won => "won",
        SessionStatus::Lost => "lost",
    };
    writeln!(
        output,
        "mines left: {}  time: {}s  {}",
        session.mines_left(),
        elapsed_secs,
        state
    )?;

    write!(output, "   ")?;
    for x in 0..width {
        write!(output, "{:>3}", x)?;
    }
    writeln!(output)?;

    for y in 0..height {
        write!(output, "{:>3}", y)?;
        for x in 0..width {
            write!(output, "{:>3}", glyph(&grid[(x, y)], status))?;
        }
        writeln!(output)?;
    }
    Ok(())
}
