//! AssignmentEngine - wires the ports to generation, review and commit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use juryforge_config::{ConfigError, RoundConfigStore};
use juryforge_core::{
    AiScoringProvider, AssignmentRepository, InterestSignalProvider, JurorRepository,
    RepositoryError, StartupFilter, StartupRepository,
};
use juryforge_scoring::ThesisMatcher;
use thiserror::Error;
use tracing::info;

use crate::commit::{AssignmentCommitter, CommitError, CommitResult};
use crate::generator::{GenerateError, GenerationOutcome, ProposalGenerator};
use crate::review::{ReviewError, ReviewSession};

/// Any failure surfaced by [`AssignmentEngine`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Review(#[from] ReviewError),

    #[error(transparent)]
    Commit(#[from] CommitError),
}

/// Entry point for a round: generate, review, commit.
///
/// Every collaborator is injected. The engine reads through the
/// repositories when generating and writes only in [`commit`](Self::commit).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use juryforge_config::{RoundConfigSpec, StaticRoundConfigStore};
/// use juryforge_core::{Juror, Startup};
/// use juryforge_engine::{AssignmentEngine, InMemoryRepository};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let repo = Arc::new(
///     InMemoryRepository::new()
///         .with_startups(vec![Startup::new("S1", "Ledgerly")])
///         .with_jurors(vec![Juror::new("J1", "Ada"), Juror::new("J2", "Grace")]),
/// );
/// let config = RoundConfigSpec::new("screening")
///     .with_target_jurors_per_startup(2)
///     .build()
///     .unwrap();
/// let store = Arc::new(StaticRoundConfigStore::new().with_config(config));
///
/// let engine = AssignmentEngine::new(repo.clone(), repo.clone(), repo.clone(), store);
/// let outcome = engine.generate_proposals("screening", None).await.unwrap();
///
/// let mut session = engine.review(outcome);
/// session.accept_all().unwrap();
/// let result = engine.commit(&mut session).await.unwrap();
///
/// assert_eq!(result.len(), 2);
/// assert_eq!(repo.assignments().len(), 2);
/// # });
/// ```
pub struct AssignmentEngine {
    startups: Arc<dyn StartupRepository>,
    jurors: Arc<dyn JurorRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    configs: Arc<dyn RoundConfigStore>,
    ai_provider: Option<Arc<dyn AiScoringProvider>>,
    interest_provider: Option<Arc<dyn InterestSignalProvider>>,
    thesis_matcher: Option<Arc<dyn ThesisMatcher>>,
    cancel: Arc<AtomicBool>,
}

impl AssignmentEngine {
    pub fn new(
        startups: Arc<dyn StartupRepository>,
        jurors: Arc<dyn JurorRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        configs: Arc<dyn RoundConfigStore>,
    ) -> Self {
        Self {
            startups,
            jurors,
            assignments,
            configs,
            ai_provider: None,
            interest_provider: None,
            thesis_matcher: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_ai_provider(mut self, provider: Arc<dyn AiScoringProvider>) -> Self {
        self.ai_provider = Some(provider);
        self
    }

    pub fn with_interest_provider(mut self, provider: Arc<dyn InterestSignalProvider>) -> Self {
        self.interest_provider = Some(provider);
        self
    }

    pub fn with_thesis_matcher(mut self, matcher: Arc<dyn ThesisMatcher>) -> Self {
        self.thesis_matcher = Some(matcher);
        self
    }

    /// Asks a running generation to stop before its next startup.
    ///
    /// The request stays set until [`reset_cancel`](Self::reset_cancel).
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn reset_cancel(&self) {
        self.cancel.store(false, Ordering::SeqCst);
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Loads the round's configuration and inputs, then generates proposals.
    ///
    /// Without a filter every startup of the round is considered.
    pub async fn generate_proposals(
        &self,
        round_name: &str,
        filter: Option<StartupFilter>,
    ) -> Result<GenerationOutcome, EngineError> {
        let config = self.configs.round_config(round_name).await?;
        let filter = filter.unwrap_or_else(|| StartupFilter::for_round(round_name));

        let startups = self.startups.list_startups(&filter).await?;
        let jurors = self.jurors.list_jurors().await?;
        let existing = self.assignments.list_assignments(round_name).await?;
        info!(
            event = "inputs_loaded",
            round = %round_name,
            startups = startups.len(),
            jurors = jurors.len(),
            existing = existing.len(),
        );

        let mut generator = ProposalGenerator::new(config).with_cancel_flag(self.cancel.clone());
        if let Some(provider) = &self.ai_provider {
            generator = generator.with_ai_provider(provider.clone());
        }
        if let Some(provider) = &self.interest_provider {
            generator = generator.with_interest_provider(provider.clone());
        }
        if let Some(matcher) = &self.thesis_matcher {
            generator = generator.with_thesis_matcher(matcher.clone());
        }

        Ok(generator.generate(startups, jurors, existing).await?)
    }

    /// Opens a review session over generated proposals.
    pub fn review(&self, outcome: GenerationOutcome) -> ReviewSession {
        ReviewSession::new(outcome)
    }

    /// Persists the approved subset of `session`.
    pub async fn commit(&self, session: &mut ReviewSession) -> Result<CommitResult, EngineError> {
        let committer = AssignmentCommitter::new(self.assignments.clone());
        Ok(committer.commit(session).await?)
    }
}

impl std::fmt::Debug for AssignmentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssignmentEngine")
            .field("ai_provider", &self.ai_provider.is_some())
            .field("interest_provider", &self.interest_provider.is_some())
            .field("cancel_requested", &self.is_cancel_requested())
            .finish_non_exhaustive()
    }
}
