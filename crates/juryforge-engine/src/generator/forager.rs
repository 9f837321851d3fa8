//! Candidate foraging: score every eligible juror, rank, pick the best.
//!
//! Scoring of one startup's candidates may fan out over a rayon pool.
//! Workers only read the tracker; reservations happen after all scores
//! have been collected.

use std::fmt;

use juryforge_config::ScoringThreads;
use juryforge_core::{Juror, Startup};
use juryforge_scoring::{rank_candidates, CandidateSignals, ScoreModel, ScoredCandidate};
use rayon::prelude::*;

use crate::ai::AiOutcome;
use crate::interest::InterestSignals;
use crate::workload::WorkloadTracker;

use super::GenerateError;

/// Where candidate scoring runs.
pub enum ScoringPool {
    /// On the calling thread.
    Sequential,
    /// On rayon's global pool.
    Global,
    /// On a pool owned by this run.
    Dedicated(rayon::ThreadPool),
}

impl fmt::Debug for ScoringPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringPool::Sequential => f.write_str("Sequential"),
            ScoringPool::Global => f.write_str("Global"),
            ScoringPool::Dedicated(pool) => write!(f, "Dedicated({})", pool.current_num_threads()),
        }
    }
}

impl ScoringPool {
    pub fn build(threads: ScoringThreads) -> Result<Self, GenerateError> {
        match threads {
            ScoringThreads::None => Ok(ScoringPool::Sequential),
            ScoringThreads::Auto => Ok(ScoringPool::Global),
            ScoringThreads::Count(n) => rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .thread_name(|i| format!("juryforge-scoring-{}", i))
                .build()
                .map(ScoringPool::Dedicated)
                .map_err(|e| GenerateError::ThreadPool(e.to_string())),
        }
    }
}

/// Everything needed to score the candidates of one startup.
pub struct Forage<'a> {
    pub model: &'a ScoreModel,
    pub startup: &'a Startup,
    pub tracker: &'a WorkloadTracker,
    pub interest: &'a InterestSignals,
    pub ai: &'a AiOutcome,
}

impl Forage<'_> {
    fn score_one(&self, juror: &Juror) -> ScoredCandidate {
        let load = self.tracker.load_context(&juror.id);
        let signals = CandidateSignals::default()
            .with_interest(self.interest.has_interest(&juror.id))
            .with_ai(self.ai.assessment(&juror.id));
        ScoredCandidate::new(
            juror.id.clone(),
            juror.name.clone(),
            self.model.score(juror, self.startup, &load, signals),
        )
    }

    /// Scores `candidates` and returns them ranked best first.
    pub fn rank(&self, candidates: &[&Juror], pool: &ScoringPool) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = match pool {
            ScoringPool::Sequential => candidates.iter().map(|j| self.score_one(j)).collect(),
            ScoringPool::Global => candidates.par_iter().map(|j| self.score_one(j)).collect(),
            ScoringPool::Dedicated(pool) => {
                pool.install(|| candidates.par_iter().map(|j| self.score_one(j)).collect())
            }
        };
        rank_candidates(&mut scored);
        scored
    }
}

/// Number of candidates to select: `min(needed, available)`.
pub fn select_count(needed: usize, available: usize) -> usize {
    needed.min(available)
}

#[cfg(test)]
mod tests {
    use super::*;
    use juryforge_test::scenario::{juror_pool, round_config, startup_pool};

    #[test]
    fn test_pools_agree() {
        let config = round_config(3);
        let model = ScoreModel::new(&config);
        let startups = startup_pool(1);
        let jurors = juror_pool(40);
        let mut tracker = WorkloadTracker::new(&jurors, 120, 1);
        for j in jurors.iter().step_by(3) {
            tracker.reserve(&j.id);
        }
        let refs: Vec<&Juror> = jurors.iter().collect();
        let forage = Forage {
            model: &model,
            startup: &startups[0],
            tracker: &tracker,
            interest: &InterestSignals::default(),
            ai: &AiOutcome::Disabled,
        };

        let sequential = forage.rank(&refs, &ScoringPool::Sequential);
        let global = forage.rank(&refs, &ScoringPool::Global);
        let dedicated = forage.rank(&refs, &ScoringPool::build(ScoringThreads::Count(2)).unwrap());

        assert_eq!(sequential.len(), 40);
        assert_eq!(sequential, global);
        assert_eq!(sequential, dedicated);
    }

    #[test]
    fn test_select_count() {
        assert_eq!(select_count(3, 5), 3);
        assert_eq!(select_count(3, 1), 1);
        assert_eq!(select_count(0, 4), 0);
    }
}
