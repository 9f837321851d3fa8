//! Persisting approved review sessions.

use std::collections::HashSet;
use std::sync::Arc;

use juryforge_core::{Assignment, AssignmentRepository, RepositoryError};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::review::{ReviewSession, ReviewState};

/// Errors raised while committing a review session.
#[derive(Debug, Error)]
pub enum CommitError {
    #[error("Cannot commit a session that is {0}")]
    InvalidState(ReviewState),

    #[error("{} pairing(s) already exist", duplicates.len())]
    Conflict { duplicates: Vec<Assignment> },

    #[error("Persistence failed: {0}")]
    Persistence(#[from] RepositoryError),
}

/// What a successful commit stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitResult {
    pub round_name: String,
    pub committed: Vec<Assignment>,
}

impl CommitResult {
    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}

/// Writes the approved subset of a session as one batch.
///
/// The batch is checked against itself and against stored assignments
/// before anything is written. The repository's insert is all-or-nothing,
/// so a failed commit leaves storage unchanged and the session `Approved`.
/// Failed writes are not retried.
#[derive(Clone)]
pub struct AssignmentCommitter {
    repository: Arc<dyn AssignmentRepository>,
}

impl AssignmentCommitter {
    pub fn new(repository: Arc<dyn AssignmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn commit(&self, session: &mut ReviewSession) -> Result<CommitResult, CommitError> {
        if session.state() != ReviewState::Approved {
            return Err(CommitError::InvalidState(session.state()));
        }

        let round = session.round_name().to_string();
        let batch = session.approved_assignments();

        let stored = if batch.is_empty() {
            Vec::new()
        } else {
            self.repository.list_assignments(&round).await?
        };
        let duplicates = conflicts(&batch, &stored);

        if !duplicates.is_empty() {
            warn!(
                event = "commit_conflict",
                round = %round,
                duplicates = duplicates.len(),
            );
            return Err(CommitError::Conflict { duplicates });
        }

        if !batch.is_empty() {
            if let Err(err) = self.repository.insert_assignments(&batch).await {
                warn!(event = "commit_failed", round = %round, error = %err);
                return Err(err.into());
            }
        }

        session.mark_committed();
        info!(event = "commit", round = %round, committed = batch.len());

        Ok(CommitResult {
            round_name: round,
            committed: batch,
        })
    }
}

/// Pairings of `batch` that repeat within it or are already stored, each
/// reported once in batch order.
fn conflicts(batch: &[Assignment], stored: &[Assignment]) -> Vec<Assignment> {
    let mut seen = HashSet::with_capacity(batch.len());
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for assignment in batch {
        let key = (&assignment.startup_id, &assignment.juror_id);
        let repeated = !seen.insert(key);
        let persisted = stored
            .iter()
            .any(|s| s.pairs(&assignment.startup_id, &assignment.juror_id));
        if (repeated || persisted) && reported.insert(key) {
            duplicates.push(assignment.clone());
        }
    }
    duplicates
}

impl std::fmt::Debug for AssignmentCommitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignmentCommitter").finish_non_exhaustive()
    }
}
