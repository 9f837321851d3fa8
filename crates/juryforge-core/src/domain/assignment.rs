use std::fmt;

use serde::{Deserialize, Serialize};

use super::{JurorId, StartupId};

/// A committed pairing of a juror with a startup for one round.
///
/// `(startup_id, juror_id, round_name)` is a key: two equal assignments
/// describe the same pairing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub startup_id: StartupId,
    pub juror_id: JurorId,
    pub round_name: String,
}

impl Assignment {
    pub fn new(
        startup_id: impl Into<StartupId>,
        juror_id: impl Into<JurorId>,
        round_name: impl Into<String>,
    ) -> Self {
        Self {
            startup_id: startup_id.into(),
            juror_id: juror_id.into(),
            round_name: round_name.into(),
        }
    }

    /// Returns true if this assignment pairs `startup_id` with `juror_id`.
    pub fn pairs(&self, startup_id: &StartupId, juror_id: &JurorId) -> bool {
        &self.startup_id == startup_id && &self.juror_id == juror_id
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} [{}]", self.juror_id, self.startup_id, self.round_name)
    }
}
