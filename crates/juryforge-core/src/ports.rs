//! Ports for the external collaborators the engine consumes.
//!
//! Every collaborator is an object-safe async trait so implementations can
//! be injected as `Arc<dyn Trait>`. The engine performs no I/O of its own
//! beyond calls made through these ports.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Assignment, Juror, JurorId, Startup, StartupFilter, StartupId};
use crate::error::{ProviderError, RepositoryError};

/// Read access to the startups taking part in a round.
#[async_trait]
pub trait StartupRepository: Send + Sync {
    async fn list_startups(&self, filter: &StartupFilter) -> Result<Vec<Startup>, RepositoryError>;
}

/// Read access to the juror pool.
#[async_trait]
pub trait JurorRepository: Send + Sync {
    async fn list_jurors(&self) -> Result<Vec<Juror>, RepositoryError>;
}

/// Persisted assignments.
///
/// `insert_assignments` must be all-or-nothing: on error no record of the
/// batch may remain stored.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn list_assignments(&self, round_name: &str) -> Result<Vec<Assignment>, RepositoryError>;

    async fn insert_assignments(&self, batch: &[Assignment]) -> Result<(), RepositoryError>;
}

/// Reports whether a juror explicitly flagged interest in a startup during
/// an earlier stage of the round.
#[async_trait]
pub trait InterestSignalProvider: Send + Sync {
    async fn has_explicit_interest(
        &self,
        juror_id: &JurorId,
        startup_id: &StartupId,
        round_name: &str,
    ) -> Result<bool, ProviderError>;
}

/// One compatibility estimate returned by an [`AiScoringProvider`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiScore {
    pub juror_id: JurorId,
    /// Compatibility on a 0..=10 scale.
    pub compatibility: f64,
    /// Provider confidence on a 0..=1 scale.
    pub confidence: f64,
    pub reasoning: String,
}

/// Optional auxiliary scorer estimating compatibility for a batch of jurors.
///
/// Callers bound every call with a timeout; implementations need not.
#[async_trait]
pub trait AiScoringProvider: Send + Sync {
    async fn score_batch(
        &self,
        startup: &Startup,
        jurors: &[Juror],
    ) -> Result<Vec<AiScore>, ProviderError>;
}
