//! Deterministic candidate ranking.

use std::cmp::Ordering;

use juryforge_core::JurorId;
use serde::{Deserialize, Serialize};

use crate::breakdown::ScoreBreakdown;

/// A juror scored against one startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub juror_id: JurorId,
    pub juror_name: String,
    pub breakdown: ScoreBreakdown,
}

impl ScoredCandidate {
    pub fn new(juror_id: JurorId, juror_name: impl Into<String>, breakdown: ScoreBreakdown) -> Self {
        Self {
            juror_id,
            juror_name: juror_name.into(),
            breakdown,
        }
    }
}

/// Best candidate first: fewer capacity violations, then higher total, then
/// lower juror id.
pub fn compare_candidates(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.breakdown
        .rank_score()
        .cmp(&a.breakdown.rank_score())
        .then_with(|| a.juror_id.cmp(&b.juror_id))
}

/// Sorts candidates best first.
///
/// The order is total: no two distinct jurors compare equal, so the result
/// does not depend on input order.
pub fn rank_candidates(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(compare_candidates);
}
