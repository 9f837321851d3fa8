//! Greedy proposal generation.
//!
//! Startups are processed one at a time. For each one every eligible juror
//! is scored against the current workload, the best `min(needed,
//! available)` are reserved, and the full ranking is kept as the
//! proposal's explanation. Reservations made for one startup shape the
//! scores of every later startup.

mod forager;
mod placer;
mod proposal;


use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use juryforge_config::RoundConfig;
use juryforge_core::{
    AiScoringProvider, Assignment, InterestSignalProvider, Juror, JurorId, Startup, StartupId,
};
use juryforge_scoring::{ExplainabilityRecorder, ScoreModel, ThesisMatcher};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::ai::{AiEnhancer, AiOutcome};
use crate::interest::InterestLookup;
use crate::stats::GenerationStats;
use crate::workload::{WorkloadEntry, WorkloadTracker};

pub use forager::{select_count, Forage, ScoringPool};
pub use placer::{order_startups, ExistingPairs};
pub use proposal::{Proposal, ProposedCandidate};

/// Errors that stop a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Generation was cancelled")]
    Cancelled,

    #[error("Startup {0} appears more than once")]
    DuplicateStartup(StartupId),

    #[error("Juror {0} appears more than once")]
    DuplicateJuror(JurorId),

    #[error("Failed to build scoring thread pool: {0}")]
    ThreadPool(String),
}

/// Non-fatal conditions a reviewer should know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationWarning {
    /// The juror pool was empty; no proposals were built.
    NoJurors,
    /// Fewer eligible jurors than open slots.
    Understaffed {
        startup_id: StartupId,
        needed: usize,
        available: usize,
    },
    /// A selected juror breaches capacity because no better option existed.
    CapacityExceeded {
        startup_id: StartupId,
        juror_id: JurorId,
        violation: u32,
    },
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationWarning::NoJurors => f.write_str("no jurors available"),
            GenerationWarning::Understaffed {
                startup_id,
                needed,
                available,
            } => write!(
                f,
                "{} needs {} jurors but only {} are eligible",
                startup_id, needed, available
            ),
            GenerationWarning::CapacityExceeded {
                startup_id,
                juror_id,
                violation,
            } => write!(
                f,
                "{} selected for {} exceeds capacity by {}",
                juror_id, startup_id, violation
            ),
        }
    }
}

/// Inputs of a generation run, kept for review.
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    pub startups: Vec<Startup>,
    pub jurors: Vec<Juror>,
    /// Persisted assignments of the round.
    pub existing: Vec<Assignment>,
}

/// Everything a generation run produced.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub round_name: String,
    /// One proposal per startup that needed jurors, in processing order.
    pub proposals: Vec<Proposal>,
    /// Workload after all reservations.
    pub workload: WorkloadTracker,
    pub warnings: Vec<GenerationWarning>,
    pub stats: GenerationStats,
    pub pool: CandidatePool,
    pub config: RoundConfig,
    pub model: ScoreModel,
}

impl GenerationOutcome {
    pub fn proposal(&self, startup_id: &StartupId) -> Option<&Proposal> {
        self.proposals.iter().find(|p| &p.startup_id == startup_id)
    }

    pub fn workload_snapshot(&self) -> Vec<WorkloadEntry> {
        self.workload.snapshot()
    }
}

/// Builds explained proposals for one round.
///
/// # Examples
///
/// ```
/// use juryforge_config::RoundConfigSpec;
/// use juryforge_core::{Juror, Startup};
/// use juryforge_engine::ProposalGenerator;
///
/// # tokio_test_block_on(async {
/// let config = RoundConfigSpec::new("screening")
///     .with_target_jurors_per_startup(1)
///     .build()
///     .unwrap();
/// let startups = vec![Startup::new("S1", "Ledgerly").with_verticals(["Fintech"])];
/// let jurors = vec![
///     Juror::new("J1", "Ada"),
///     Juror::new("J2", "Grace").with_target_verticals(["Fintech"]),
/// ];
///
/// let outcome = ProposalGenerator::new(config)
///     .generate(startups, jurors, Vec::new())
///     .await
///     .unwrap();
///
/// let proposal = &outcome.proposals[0];
/// assert_eq!(proposal.candidates[0].juror_id.as_str(), "J2");
/// assert_eq!(proposal.alternates()[0].juror_id.as_str(), "J1");
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProposalGenerator {
    config: RoundConfig,
    model: ScoreModel,
    ai: AiEnhancer,
    interest: InterestLookup,
    cancel: Option<Arc<AtomicBool>>,
}

impl ProposalGenerator {
    pub fn new(config: RoundConfig) -> Self {
        Self {
            model: ScoreModel::new(&config),
            config,
            ai: AiEnhancer::disabled(),
            interest: InterestLookup::default(),
            cancel: None,
        }
    }

    /// Consults `provider` when the round enables AI enhancement.
    pub fn with_ai_provider(mut self, provider: Arc<dyn AiScoringProvider>) -> Self {
        self.ai = AiEnhancer::new(provider, self.config.tuning().ai_timeout());
        self
    }

    pub fn with_interest_provider(mut self, provider: Arc<dyn InterestSignalProvider>) -> Self {
        self.interest = InterestLookup::new(Some(provider), self.config.tuning().interest_timeout());
        self
    }

    pub fn with_thesis_matcher(mut self, matcher: Arc<dyn ThesisMatcher>) -> Self {
        self.model = self.model.with_thesis_matcher(matcher);
        self
    }

    /// Aborts the run at the next startup once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Builds proposals for every startup that still needs jurors.
    ///
    /// Assignments of other rounds in `existing` are ignored.
    pub async fn generate(
        &self,
        startups: Vec<Startup>,
        jurors: Vec<Juror>,
        existing: Vec<Assignment>,
    ) -> Result<GenerationOutcome, GenerateError> {
        let mut stats = GenerationStats::default();
        stats.start();

        let round = self.config.round_name().to_string();
        check_unique(&startups, &jurors)?;
        let existing: Vec<Assignment> = existing
            .into_iter()
            .filter(|a| a.round_name == round)
            .collect();

        info!(
            event = "generation_start",
            round = %round,
            startups = startups.len(),
            jurors = jurors.len(),
            existing = existing.len(),
            ai = self.config.use_ai_enhancement() && self.ai.is_enabled(),
        );

        let target = self.config.target_jurors_per_startup();
        let mut tracker = WorkloadTracker::new(
            &jurors,
            startups.len() * target,
            self.config.tuning().overload_tolerance,
        );
        tracker.seed(&existing);

        let mut warnings = Vec::new();
        let mut proposals = Vec::new();
        let mut recorder = ExplainabilityRecorder::new();

        if jurors.is_empty() {
            warn!(event = "no_jurors", round = %round);
            warnings.push(GenerationWarning::NoJurors);
        } else {
            let pairs = ExistingPairs::new(&existing);
            let pool = ScoringPool::build(self.config.scoring_threads())?;
            let ai_enabled = self.config.use_ai_enhancement() && self.ai.is_enabled();

            for startup in order_startups(
                &startups,
                self.config.startup_order(),
                self.config.deterministic_seed(),
            ) {
                if self.is_cancelled() {
                    info!(
                        event = "generation_cancelled",
                        round = %round,
                        processed = stats.startups_processed,
                    );
                    return Err(GenerateError::Cancelled);
                }

                let needed = pairs.slots_needed(&startup.id, target);
                if needed == 0 {
                    stats.record_skip();
                    debug!(event = "startup_skipped", startup = %startup.id);
                    continue;
                }

                let eligible: Vec<&Juror> = jurors
                    .iter()
                    .filter(|j| !pairs.contains(&startup.id, &j.id))
                    .collect();

                let interest = self.interest.collect(startup, &eligible, &round).await;
                stats.record_interest_failures(interest.failures);

                let ai = if ai_enabled && !eligible.is_empty() {
                    stats.record_ai_call();
                    let batch: Vec<Juror> = eligible.iter().map(|j| (*j).clone()).collect();
                    self.ai.assess(startup, &batch).await
                } else {
                    AiOutcome::Disabled
                };
                if ai.is_fallback() {
                    stats.record_ai_fallback();
                }

                let ranked = Forage {
                    model: &self.model,
                    startup,
                    tracker: &tracker,
                    interest: &interest,
                    ai: &ai,
                }
                .rank(&eligible, &pool);

                for c in &ranked {
                    trace!(
                        event = "candidate_scored",
                        startup = %startup.id,
                        juror = %c.juror_id,
                        score = %c.breakdown.rank_score(),
                        reasoning = c.breakdown.reasoning(),
                    );
                }
                stats.record_ai_estimates(
                    ranked
                        .iter()
                        .filter(|c| c.breakdown.ai_component().is_some())
                        .count(),
                );

                let selected = select_count(needed, ranked.len());
                for c in &ranked[..selected] {
                    tracker.reserve(&c.juror_id);
                    if c.breakdown.exceeds_capacity() {
                        warnings.push(GenerationWarning::CapacityExceeded {
                            startup_id: startup.id.clone(),
                            juror_id: c.juror_id.clone(),
                            violation: c.breakdown.capacity_violation(),
                        });
                    }
                }
                if selected < needed {
                    warnings.push(GenerationWarning::Understaffed {
                        startup_id: startup.id.clone(),
                        needed,
                        available: ranked.len(),
                    });
                }

                let candidates = ranked.len();
                let explanation = recorder.record(startup, needed, ranked, selected);
                stats.record_startup(candidates, selected);
                debug!(
                    event = "proposal",
                    startup = %startup.id,
                    needed,
                    selected,
                    candidates,
                );
                proposals.push(Proposal::new(explanation, self.config.top_k_per_juror()));
            }
        }

        stats.record_workload_rejections(recorder.workload_rejections());
        stats.finish();
        info!(
            event = "generation_end",
            round = %round,
            proposals = proposals.len(),
            duration_ms = stats.elapsed().as_millis() as u64,
            candidates_scored = stats.candidates_scored,
            reservations = stats.reservations,
            skipped = stats.startups_skipped,
            ai_fallbacks = stats.ai_fallbacks,
            warnings = warnings.len(),
        );

        Ok(GenerationOutcome {
            round_name: round,
            proposals,
            workload: tracker,
            warnings,
            stats,
            pool: CandidatePool {
                startups,
                jurors,
                existing,
            },
            config: self.config.clone(),
            model: self.model.clone(),
        })
    }
}

fn check_unique(startups: &[Startup], jurors: &[Juror]) -> Result<(), GenerateError> {
    let mut seen = HashSet::with_capacity(startups.len());
    for s in startups {
        if !seen.insert(&s.id) {
            return Err(GenerateError::DuplicateStartup(s.id.clone()));
        }
    }
    let mut seen = HashSet::with_capacity(jurors.len());
    for j in jurors {
        if !seen.insert(&j.id) {
            return Err(GenerateError::DuplicateJuror(j.id.clone()));
        }
    }
    Ok(())
}
