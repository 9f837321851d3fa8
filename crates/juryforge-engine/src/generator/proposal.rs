//! Proposals emitted by the generator.

use juryforge_core::{JurorId, StartupId};
use juryforge_scoring::{CandidateEvaluation, ProposalExplanation, ScoreBreakdown};
use serde::{Deserialize, Serialize};

/// A juror selected for a startup, with the breakdown that ranked it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedCandidate {
    pub juror_id: JurorId,
    pub juror_name: String,
    pub breakdown: ScoreBreakdown,
}

/// An unapproved set of jurors for one startup.
///
/// `candidates` holds the selected jurors best first. The explanation keeps
/// every juror that was considered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub startup_id: StartupId,
    pub candidates: Vec<ProposedCandidate>,
    pub explanation: ProposalExplanation,
    top_k: usize,
}

impl Proposal {
    pub(crate) fn new(explanation: ProposalExplanation, top_k: usize) -> Self {
        let candidates = explanation
            .selected()
            .map(|e| ProposedCandidate {
                juror_id: e.juror_id.clone(),
                juror_name: e.juror_name.clone(),
                breakdown: e.breakdown.clone(),
            })
            .collect();
        Self {
            startup_id: explanation.startup_id.clone(),
            candidates,
            explanation,
            top_k,
        }
    }

    /// The best non-selected candidates, at most `top_k_per_juror`.
    pub fn alternates(&self) -> Vec<&CandidateEvaluation> {
        self.explanation.alternates(self.top_k)
    }

    /// Why `juror_id` is not part of this proposal.
    pub fn why_not(&self, juror_id: &JurorId) -> Option<String> {
        self.explanation.why_not(juror_id)
    }

    pub fn juror_ids(&self) -> impl Iterator<Item = &JurorId> {
        self.candidates.iter().map(|c| &c.juror_id)
    }

    pub fn contains(&self, juror_id: &JurorId) -> bool {
        self.candidates.iter().any(|c| &c.juror_id == juror_id)
    }

    /// Slots left open for lack of candidates.
    pub fn shortfall(&self) -> usize {
        self.explanation.shortfall()
    }
}
