//! ScoreBreakdown - the explained result of scoring one candidate

use std::fmt;

use juryforge_core::MatchScore;
use serde::{Deserialize, Serialize};

/// How an AI estimate entered a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiComponent {
    /// Compatibility on a 0..=10 scale.
    pub compatibility: f64,
    pub confidence: f64,
    /// AI share of the blended credit.
    pub blend_ratio: f64,
    /// Positive credit before blending.
    pub rule_credit: f64,
    /// Positive credit after blending.
    pub blended_credit: f64,
    pub reasoning: String,
}

/// Per-criterion credit, penalty and reasoning for one (juror, startup) pair.
///
/// Built by [`ScoreModel`](crate::ScoreModel) and never mutated afterwards.
/// `total` is the positive credit (blended when an AI estimate was used)
/// plus the load penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    vertical: f64,
    stage: f64,
    region: f64,
    thesis: f64,
    interest: f64,
    load_penalty: f64,
    capacity_violation: u32,
    ai_component: Option<AiComponent>,
    total: f64,
    reasoning: String,
}

/// Criterion credit gathered before the breakdown is frozen.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Credits {
    pub vertical: f64,
    pub stage: f64,
    pub region: f64,
    pub thesis: f64,
    pub interest: f64,
}

impl Credits {
    pub(crate) fn rule_credit(&self) -> f64 {
        self.vertical + self.stage + self.region + self.thesis + self.interest
    }
}

impl ScoreBreakdown {
    pub(crate) fn new(
        credits: Credits,
        load_penalty: f64,
        capacity_violation: u32,
        ai_component: Option<AiComponent>,
        reasoning: String,
    ) -> Self {
        let positive = ai_component
            .as_ref()
            .map_or_else(|| credits.rule_credit(), |ai| ai.blended_credit);
        Self {
            vertical: credits.vertical,
            stage: credits.stage,
            region: credits.region,
            thesis: credits.thesis,
            interest: credits.interest,
            load_penalty,
            capacity_violation,
            ai_component,
            total: positive + load_penalty,
            reasoning,
        }
    }

    pub fn vertical(&self) -> f64 {
        self.vertical
    }

    pub fn stage(&self) -> f64 {
        self.stage
    }

    pub fn region(&self) -> f64 {
        self.region
    }

    pub fn thesis(&self) -> f64 {
        self.thesis
    }

    /// Bonus for an explicit interest signal.
    pub fn interest(&self) -> f64 {
        self.interest
    }

    /// Total load penalty, capacity part included. Never positive.
    pub fn load_penalty(&self) -> f64 {
        self.load_penalty
    }

    /// Units by which reserving this juror would exceed capacity.
    pub fn capacity_violation(&self) -> u32 {
        self.capacity_violation
    }

    pub fn exceeds_capacity(&self) -> bool {
        self.capacity_violation > 0
    }

    pub fn ai_component(&self) -> Option<&AiComponent> {
        self.ai_component.as_ref()
    }

    /// Sum of criterion credit and interest bonus, before any AI blend.
    pub fn rule_credit(&self) -> f64 {
        self.vertical + self.stage + self.region + self.thesis + self.interest
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    /// Lexicographic ranking key: capacity violation first, total second.
    pub fn rank_score(&self) -> MatchScore {
        MatchScore::from_credit(self.capacity_violation, self.total)
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}: {}", self.total, self.reasoning)
    }
}
