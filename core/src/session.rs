use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Running,
    Won,
    Lost,
}

impl SessionStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Running
    }
}

/// One game from the first click to a win or a loss.
///
/// Mines are dealt lazily on the first reveal so that the clicked cell can be kept safe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    config: GameConfig,
    grid: Grid,
    seed: u64,
    max_attempts: u32,
    mines_dealt: bool,
    allocation: Option<Allocation>,
    status: SessionStatus,
    exploded: Option<Coord2>,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        Ok(Self {
            config,
            grid: Grid::new(config.size)?,
            seed,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            mines_dealt: false,
            allocation: None,
            status: Default::default(),
            exploded: None,
        })
    }

    /// Starts a session on a board whose mines are already known.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Grid::new(size)?;
        let mines = FixedAllocator::new(mine_coords).place(&mut grid)?;
        let config = GameConfig::new(size, mines)?;

        Ok(Self {
            config,
            grid,
            seed: 0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            mines_dealt: true,
            allocation: None,
            status: Default::default(),
            exploded: None,
        })
    }

    /// Caps the shuffles spent keeping the first reveal safe, has no effect once mines are dealt.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        self.grid.cell(coords)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn is_won(&self) -> bool {
        matches!(self.status, SessionStatus::Won)
    }

    /// Mines get dealt on the first reveal, which is also when the clock should start.
    pub fn mines_dealt(&self) -> bool {
        self.mines_dealt
    }

    /// How the random deal went, `None` before the first reveal or for boards with known mines.
    pub fn allocation(&self) -> Option<Allocation> {
        self.allocation
    }

    pub fn exploded(&self) -> Option<Coord2> {
        self.exploded
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.grid.flag_count() as isize)
    }

    /// Primary action: reveal a closed cell, or chord a numbered one.
    pub fn primary_action(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_running()?;

        match self.grid.state_at(coords) {
            CellState::Unknown => {}
            CellState::Revealed(count) if count > 0 => return self.chord_action(coords),
            _ => return Ok(RevealOutcome::NoChange),
        }

        self.deal_mines(coords)?;

        if self.grid.contains_mine(coords) {
            return Ok(self.explode(coords));
        }

        let opened = touch_adjacent(&mut self.grid, coords);
        log::debug!("Reveal at {:?} opened {} cell(s)", coords, opened);
        Ok(self.after_reveal())
    }

    /// Secondary action: cycle unknown, flagged and questioned, returns the resulting state.
    pub fn secondary_action(&mut self, coords: Coord2) -> Result<CellState> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_running()?;

        let cell = &mut self.grid[coords];
        if let Some(next) = cell.state.cycle_mark() {
            cell.state = next;
        }
        Ok(cell.state)
    }

    pub fn chord_action(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        self.check_running()?;

        Ok(match chord(&mut self.grid, coords) {
            ChordOutcome::NoChange => RevealOutcome::NoChange,
            ChordOutcome::Revealed(opened) => {
                log::debug!("Chord at {:?} opened {} cell(s)", coords, opened);
                self.after_reveal()
            }
            ChordOutcome::Detonated(mine) => self.explode(mine),
        })
    }

    fn deal_mines(&mut self, safe: Coord2) -> Result<()> {
        if self.mines_dealt {
            return Ok(());
        }

        let allocation = ShuffleAllocator::with_max_attempts(self.seed, self.max_attempts).assign_mines(
            &mut self.grid,
            self.config.mines,
            safe,
        )?;
        if !allocation.safe_start {
            log::warn!("First reveal at {:?} landed on a mine", safe);
        }
        self.allocation = Some(allocation);
        self.mines_dealt = true;
        Ok(())
    }

    fn explode(&mut self, coords: Coord2) -> RevealOutcome {
        self.grid[coords].state = CellState::Exploded;
        self.exploded = Some(coords);
        self.status = SessionStatus::Lost;
        log::debug!("Lost, mine at {:?}", coords);
        RevealOutcome::HitMine
    }

    fn after_reveal(&mut self) -> RevealOutcome {
        if check_win(&self.grid, self.config.mines) {
            self.status = SessionStatus::Won;
            log::debug!("Won");
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    fn check_running(&self) -> Result<()> {
        if self.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
