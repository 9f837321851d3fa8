//! Human review of generated proposals.

mod session;
mod state;

#[cfg(test)]
mod tests;

use juryforge_core::{JurorId, StartupId};
use thiserror::Error;

pub use session::{EntryOrigin, ReviewEntry, ReviewRow, ReviewSession, StartupMatch, WorkloadDelta};
pub use state::ReviewState;

/// Errors raised by review operations. A failed operation changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Cannot {operation} while the session is {state}")]
    InvalidState {
        operation: &'static str,
        state: ReviewState,
    },

    #[error("Unknown startup {0}")]
    UnknownStartup(StartupId),

    #[error("Unknown juror {0}")]
    UnknownJuror(JurorId),

    #[error("Juror {juror_id} is not a candidate for {startup_id}")]
    NotACandidate {
        startup_id: StartupId,
        juror_id: JurorId,
    },

    #[error("Juror {juror_id} is not selected for {startup_id}")]
    NotSelected {
        startup_id: StartupId,
        juror_id: JurorId,
    },

    #[error("Juror {juror_id} is already paired with {startup_id}")]
    AlreadyPaired {
        startup_id: StartupId,
        juror_id: JurorId,
    },

    #[error("Row {0} is accepted; reopen it before editing")]
    RowLocked(StartupId),

    #[error("No row has been accepted")]
    NothingApproved,
}
