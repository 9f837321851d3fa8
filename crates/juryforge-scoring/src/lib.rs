//! Compatibility scoring for juror assignment.
//!
//! This crate turns one (juror, startup) pair into an explainable
//! [`ScoreBreakdown`]:
//!
//! - [`ScoreModel`] applies the weighted criteria, interest bonus, AI blend
//!   and load penalty
//! - [`LoadContext`] describes the juror's workload at scoring time
//! - [`ThesisMatcher`] estimates thesis similarity
//! - [`ExplainabilityRecorder`] turns a ranked candidate list into a
//!   [`ProposalExplanation`]
//!
//! Scoring is pure: identical inputs always give identical breakdowns.

pub mod analysis;
pub mod blend;
pub mod breakdown;
pub mod load;
pub mod model;
pub mod ranking;
pub mod thesis;

#[cfg(test)]
mod analysis_tests;
#[cfg(test)]
mod model_tests;

pub use analysis::{
    CandidateEvaluation, CandidateOutcome, ExplainabilityRecorder, ProposalExplanation,
    RejectionReason,
};
pub use blend::{blend_credit, AiAssessment};
pub use breakdown::{AiComponent, ScoreBreakdown};
pub use load::{LoadContext, LoadPenalty};
pub use model::{CandidateSignals, ScoreModel};
pub use ranking::{compare_candidates, rank_candidates, ScoredCandidate};
pub use thesis::{KeywordOverlapMatcher, ThesisMatcher};
