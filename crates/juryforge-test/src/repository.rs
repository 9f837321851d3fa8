//! Repositories that fail on demand.

use async_trait::async_trait;
use juryforge_core::{
    Assignment, AssignmentRepository, Juror, JurorRepository, RepositoryError, Startup,
    StartupFilter, StartupRepository,
};
use parking_lot::Mutex;

/// Assignment repository that lists a fixed set and rejects every write.
///
/// Attempted batches are recorded so tests can assert that a write was
/// actually tried.
#[derive(Debug, Default)]
pub struct FailingAssignmentRepository {
    existing: Vec<Assignment>,
    attempts: Mutex<Vec<Vec<Assignment>>>,
}

impl FailingAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(existing: Vec<Assignment>) -> Self {
        Self {
            existing,
            ..Self::default()
        }
    }

    /// Batches passed to `insert_assignments`.
    pub fn attempts(&self) -> Vec<Vec<Assignment>> {
        self.attempts.lock().clone()
    }
}

#[async_trait]
impl AssignmentRepository for FailingAssignmentRepository {
    async fn list_assignments(&self, round_name: &str) -> Result<Vec<Assignment>, RepositoryError> {
        Ok(self
            .existing
            .iter()
            .filter(|a| a.round_name == round_name)
            .cloned()
            .collect())
    }

    async fn insert_assignments(&self, batch: &[Assignment]) -> Result<(), RepositoryError> {
        self.attempts.lock().push(batch.to_vec());
        Err(RepositoryError::Write("disk full".into()))
    }
}

/// Repository whose every call reports the store as unreachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRepository;

fn unavailable() -> RepositoryError {
    RepositoryError::Unavailable("connection refused".into())
}

#[async_trait]
impl StartupRepository for UnavailableRepository {
    async fn list_startups(&self, _filter: &StartupFilter) -> Result<Vec<Startup>, RepositoryError> {
        Err(unavailable())
    }
}

#[async_trait]
impl JurorRepository for UnavailableRepository {
    async fn list_jurors(&self) -> Result<Vec<Juror>, RepositoryError> {
        Err(unavailable())
    }
}

#[async_trait]
impl AssignmentRepository for UnavailableRepository {
    async fn list_assignments(&self, _round_name: &str) -> Result<Vec<Assignment>, RepositoryError> {
        Err(unavailable())
    }

    async fn insert_assignments(&self, _batch: &[Assignment]) -> Result<(), RepositoryError> {
        Err(unavailable())
    }
}
