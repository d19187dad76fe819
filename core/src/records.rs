use serde::{Deserialize, Serialize};

use crate::*;

/// Best completion times in seconds, one slot per preset difficulty. Custom boards are never recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestTimes {
    #[serde(default)]
    pub beginner: Option<u32>,
    #[serde(default)]
    pub intermediate: Option<u32>,
    #[serde(default)]
    pub expert: Option<u32>,
}

impl BestTimes {
    pub fn best(&self, difficulty: Difficulty) -> Option<u32> {
        use Difficulty::*;
        match difficulty {
            Beginner => self.beginner,
            Intermediate => self.intermediate,
            Expert => self.expert,
            Custom(_) => None,
        }
    }

    /// Stores `secs` if it beats the current record, returns whether it did.
    pub fn submit(&mut self, difficulty: Difficulty, secs: u32) -> bool {
        use Difficulty::*;
        let slot = match difficulty {
            Beginner => &mut self.beginner,
            Intermediate => &mut self.intermediate,
            Expert => &mut self.expert,
            Custom(_) => return false,
        };

        match *slot {
            Some(best) if best <= secs => false,
            _ => {
                log::debug!("New {} record: {}s", difficulty.name(), secs);
                *slot = Some(secs);
                true
            }
        }
    }
}
