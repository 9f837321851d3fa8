//! Explanation types for proposal review.
//!
//! This module records every candidate considered for a startup, why it was
//! or was not selected, and renders that history as text a reviewer can
//! read next to the proposal.

use std::fmt::{self, Write as _};

use juryforge_core::{JurorId, Startup, StartupId};
use serde::{Deserialize, Serialize};

use crate::ranking::ScoredCandidate;
use crate::ScoreBreakdown;

/// Why a ranked candidate was left out of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Selecting the juror would breach their capacity.
    WorkloadExceeded,
    /// Enough better-ranked candidates filled the slots.
    LowerScore,
}

impl RejectionReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            RejectionReason::WorkloadExceeded => "workload_exceeded",
            RejectionReason::LowerScore => "lower_score",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of one candidate in a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CandidateOutcome {
    Selected,
    Rejected { reason: RejectionReason },
}

/// A ranked candidate with its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvaluation {
    /// Position in the ranking, starting at 1.
    pub rank: usize,
    pub juror_id: JurorId,
    pub juror_name: String,
    pub breakdown: ScoreBreakdown,
    pub outcome: CandidateOutcome,
}

impl CandidateEvaluation {
    pub fn is_selected(&self) -> bool {
        matches!(self.outcome, CandidateOutcome::Selected)
    }

    pub fn rejection_reason(&self) -> Option<RejectionReason> {
        match self.outcome {
            CandidateOutcome::Selected => None,
            CandidateOutcome::Rejected { reason } => Some(reason),
        }
    }
}

/// Every candidate considered for one startup, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalExplanation {
    pub startup_id: StartupId,
    pub startup_name: String,
    /// Slots the startup still needed when it was processed.
    pub needed: usize,
    pub evaluations: Vec<CandidateEvaluation>,
}

impl ProposalExplanation {
    /// Returns the selected candidates in rank order.
    pub fn selected(&self) -> impl Iterator<Item = &CandidateEvaluation> {
        self.evaluations.iter().filter(|e| e.is_selected())
    }

    /// Returns the rejected candidates in rank order.
    pub fn rejected(&self) -> impl Iterator<Item = &CandidateEvaluation> {
        self.evaluations.iter().filter(|e| !e.is_selected())
    }

    /// Returns the evaluation of `juror_id`, if the juror was considered.
    pub fn evaluation(&self, juror_id: &JurorId) -> Option<&CandidateEvaluation> {
        self.evaluations.iter().find(|e| &e.juror_id == juror_id)
    }

    /// Returns the `k` best non-selected candidates.
    pub fn alternates(&self, k: usize) -> Vec<&CandidateEvaluation> {
        self.rejected().take(k).collect()
    }

    /// Slots left unfilled because too few candidates were available.
    pub fn shortfall(&self) -> usize {
        self.needed.saturating_sub(self.selected().count())
    }

    /// Explains why `juror_id` was not selected.
    ///
    /// Returns `None` if the juror was not considered for this startup.
    pub fn why_not(&self, juror_id: &JurorId) -> Option<String> {
        let evaluation = self.evaluation(juror_id)?;
        let breakdown = &evaluation.breakdown;
        let text = match evaluation.rejection_reason() {
            None => format!(
                "{} was selected for {} at rank {} ({:.2})",
                juror_id,
                self.startup_id,
                evaluation.rank,
                breakdown.total()
            ),
            Some(RejectionReason::WorkloadExceeded) => format!(
                "{} ranked {} for {} ({:.2}) but would exceed their workload limit by {}: {}",
                juror_id,
                evaluation.rank,
                self.startup_id,
                breakdown.total(),
                breakdown.capacity_violation(),
                breakdown.reasoning()
            ),
            Some(RejectionReason::LowerScore) => {
                let cutoff = self.selected().last();
                match cutoff {
                    Some(last) => format!(
                        "{} ranked {} for {} ({:.2}), below the last selected juror {} ({:.2}): {}",
                        juror_id,
                        evaluation.rank,
                        self.startup_id,
                        breakdown.total(),
                        last.juror_id,
                        last.breakdown.total(),
                        breakdown.reasoning()
                    ),
                    None => format!(
                        "{} ranked {} for {} ({:.2}) but no slots were open: {}",
                        juror_id,
                        evaluation.rank,
                        self.startup_id,
                        breakdown.total(),
                        breakdown.reasoning()
                    ),
                }
            }
        };
        Some(text)
    }

    /// Renders the explanation as plain text, one candidate per line.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        let selected = self.selected().count();
        let _ = writeln!(
            out,
            "{} ({}): {} of {} selected from {} candidates",
            self.startup_id,
            self.startup_name,
            selected,
            self.needed,
            self.evaluations.len()
        );
        for e in &self.evaluations {
            let status = match e.outcome {
                CandidateOutcome::Selected => "selected".to_string(),
                CandidateOutcome::Rejected { reason } => format!("rejected: {}", reason),
            };
            let _ = writeln!(
                out,
                "  {:>2}. {} {:<20} {:>9.2}  [{}] {}",
                e.rank,
                e.juror_id,
                e.juror_name,
                e.breakdown.total(),
                status,
                e.breakdown.reasoning()
            );
        }
        out
    }
}

/// Builds a [`ProposalExplanation`] per startup and keeps run totals.
#[derive(Debug, Clone, Default)]
pub struct ExplainabilityRecorder {
    candidates_recorded: usize,
    workload_rejections: usize,
    lower_score_rejections: usize,
}

impl ExplainabilityRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records ranked candidates for `startup`, marking the first `selected`
    /// as chosen.
    ///
    /// `ranked` must already be sorted best first.
    pub fn record(
        &mut self,
        startup: &Startup,
        needed: usize,
        ranked: Vec<ScoredCandidate>,
        selected: usize,
    ) -> ProposalExplanation {
        let evaluations: Vec<CandidateEvaluation> = ranked
            .into_iter()
            .enumerate()
            .map(|(i, candidate)| {
                let outcome = if i < selected {
                    CandidateOutcome::Selected
                } else if candidate.breakdown.exceeds_capacity() {
                    self.workload_rejections += 1;
                    CandidateOutcome::Rejected {
                        reason: RejectionReason::WorkloadExceeded,
                    }
                } else {
                    self.lower_score_rejections += 1;
                    CandidateOutcome::Rejected {
                        reason: RejectionReason::LowerScore,
                    }
                };
                CandidateEvaluation {
                    rank: i + 1,
                    juror_id: candidate.juror_id,
                    juror_name: candidate.juror_name,
                    breakdown: candidate.breakdown,
                    outcome,
                }
            })
            .collect();
        self.candidates_recorded += evaluations.len();

        ProposalExplanation {
            startup_id: startup.id.clone(),
            startup_name: startup.name.clone(),
            needed,
            evaluations,
        }
    }

    pub fn candidates_recorded(&self) -> usize {
        self.candidates_recorded
    }

    pub fn workload_rejections(&self) -> usize {
        self.workload_rejections
    }

    pub fn lower_score_rejections(&self) -> usize {
        self.lower_score_rejections
    }
}
