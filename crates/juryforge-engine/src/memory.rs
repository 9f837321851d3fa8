//! In-memory repositories.

use std::collections::HashSet;

use async_trait::async_trait;
use juryforge_core::{
    Assignment, AssignmentRepository, Juror, JurorRepository, RepositoryError, Startup,
    StartupFilter, StartupRepository,
};
use parking_lot::RwLock;

/// Startups, jurors and assignments held in process memory.
///
/// Implements every repository port. Inserts are all-or-nothing: a batch
/// containing a pairing that is already stored, or one listed twice, is
/// rejected without storing any of it.
///
/// # Examples
///
/// ```
/// use juryforge_core::{Assignment, AssignmentRepository};
/// use juryforge_engine::InMemoryRepository;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let repo = InMemoryRepository::new();
/// repo.insert_assignments(&[Assignment::new("S1", "J1", "screening")])
///     .await
///     .unwrap();
///
/// let again = repo
///     .insert_assignments(&[
///         Assignment::new("S2", "J1", "screening"),
///         Assignment::new("S1", "J1", "screening"),
///     ])
///     .await;
/// assert!(again.is_err());
/// assert_eq!(repo.list_assignments("screening").await.unwrap().len(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    startups: RwLock<Vec<Startup>>,
    jurors: RwLock<Vec<Juror>>,
    assignments: RwLock<Vec<Assignment>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_startups(self, startups: Vec<Startup>) -> Self {
        *self.startups.write() = startups;
        self
    }

    pub fn with_jurors(self, jurors: Vec<Juror>) -> Self {
        *self.jurors.write() = jurors;
        self
    }

    pub fn with_assignments(self, assignments: Vec<Assignment>) -> Self {
        *self.assignments.write() = assignments;
        self
    }

    /// Every stored assignment, in insertion order.
    pub fn assignments(&self) -> Vec<Assignment> {
        self.assignments.read().clone()
    }
}

#[async_trait]
impl StartupRepository for InMemoryRepository {
    async fn list_startups(&self, filter: &StartupFilter) -> Result<Vec<Startup>, RepositoryError> {
        Ok(self
            .startups
            .read()
            .iter()
            .filter(|s| filter.admits(s))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl JurorRepository for InMemoryRepository {
    async fn list_jurors(&self) -> Result<Vec<Juror>, RepositoryError> {
        Ok(self.jurors.read().clone())
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryRepository {
    async fn list_assignments(&self, round_name: &str) -> Result<Vec<Assignment>, RepositoryError> {
        Ok(self
            .assignments
            .read()
            .iter()
            .filter(|a| a.round_name == round_name)
            .cloned()
            .collect())
    }

    async fn insert_assignments(&self, batch: &[Assignment]) -> Result<(), RepositoryError> {
        let mut stored = self.assignments.write();
        let mut keys: HashSet<&Assignment> = stored.iter().collect();
        for assignment in batch {
            if !keys.insert(assignment) {
                return Err(RepositoryError::Write(format!(
                    "duplicate assignment {}",
                    assignment
                )));
            }
        }
        drop(keys);
        stored.extend_from_slice(batch);
        Ok(())
    }
}
