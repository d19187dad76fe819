use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use cellsweep_core::{BestTimes, Difficulty};

/// Best times kept in a JSON file next to the player.
pub(crate) struct RecordStore {
    path: PathBuf,
    times: BestTimes,
}

impl RecordStore {
    /// Opens the file at `path`, a missing file counts as no records yet.
    pub fn load(path: &Path) -> Result<Self> {
        let times = if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Could not read records from {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Could not parse records in {}", path.display()))?
        } else {
            BestTimes::default()
        };

        Ok(Self {
            path: path.to_owned(),
            times,
        })
    }

    pub fn times(&self) -> &BestTimes {
        &self.times
    }

    /// Records `secs` and writes the file back when it is a new best.
    pub fn submit(&mut self, difficulty: Difficulty, secs: u32) -> Result<bool> {
        if !self.times.submit(difficulty, secs) {
            return Ok(false);
        }

        let text = serde_json::to_string_pretty(&self.times)?;
        fs::write(&self.path, text)
            .with_context(|| format!("Could not write records to {}", self.path.display()))?;
        log::info!("Saved records to {}", self.path.display());
        Ok(true)
    }
}
