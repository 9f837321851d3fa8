//! ScoreModel - weighted multi-criteria compatibility scoring

use std::fmt::Write as _;
use std::sync::Arc;

use juryforge_config::{CriterionWeights, RoundConfig, ScoringTuning};
use juryforge_core::domain::first_overlap;
use juryforge_core::{Juror, Startup};
use smallvec::SmallVec;

use crate::blend::{blend_credit, AiAssessment};
use crate::breakdown::{AiComponent, Credits, ScoreBreakdown};
use crate::load::{LoadContext, LoadPenalty};
use crate::thesis::{KeywordOverlapMatcher, ThesisMatcher};

/// Signals about a candidate gathered from collaborators before scoring.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateSignals<'a> {
    /// The juror flagged interest in the startup earlier in the round.
    pub explicit_interest: bool,
    /// AI estimate for this candidate, if one was obtained.
    pub ai: Option<&'a AiAssessment>,
}

impl CandidateSignals<'static> {
    /// No interest signal and no AI estimate.
    pub const NONE: Self = CandidateSignals {
        explicit_interest: false,
        ai: None,
    };
}

impl<'a> CandidateSignals<'a> {
    pub fn with_interest(mut self, explicit_interest: bool) -> Self {
        self.explicit_interest = explicit_interest;
        self
    }

    pub fn with_ai(mut self, ai: Option<&'a AiAssessment>) -> Self {
        self.ai = ai;
        self
    }
}

/// Scores (juror, startup) pairs against a round configuration.
///
/// The model is immutable and `Sync`, so one instance can score the
/// candidates of a startup in parallel.
///
/// # Examples
///
/// ```
/// use juryforge_config::RoundConfigSpec;
/// use juryforge_core::{Juror, Startup};
/// use juryforge_scoring::{CandidateSignals, LoadContext, ScoreModel};
///
/// let config = RoundConfigSpec::new("screening").build().unwrap();
/// let model = ScoreModel::new(&config);
///
/// let startup = Startup::new("S1", "Ledgerly")
///     .with_verticals(["Fintech"])
///     .with_regions(["Europe"]);
/// let juror = Juror::new("J1", "Ada")
///     .with_target_verticals(["fintech"])
///     .with_preferred_regions(["Europe"]);
///
/// let breakdown = model.score(&juror, &startup, &LoadContext::new(0, 1, 1, None), CandidateSignals::NONE);
/// assert_eq!(breakdown.total(), 40.0);
/// assert_eq!(
///     breakdown.reasoning(),
///     "Region match (Europe), Vertical match (Fintech), Load 1/1 (-10.00)"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ScoreModel {
    weights: CriterionWeights,
    tuning: ScoringTuning,
    matcher: Arc<dyn ThesisMatcher>,
}

impl ScoreModel {
    /// Creates a model using keyword overlap for thesis similarity.
    pub fn new(config: &RoundConfig) -> Self {
        Self {
            weights: config.weights(),
            tuning: config.tuning().clone(),
            matcher: Arc::new(KeywordOverlapMatcher),
        }
    }

    /// Replaces the thesis matcher.
    pub fn with_thesis_matcher(mut self, matcher: Arc<dyn ThesisMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn weights(&self) -> &CriterionWeights {
        &self.weights
    }

    pub fn tuning(&self) -> &ScoringTuning {
        &self.tuning
    }

    /// Scores `juror` for `startup` given the juror's current workload.
    pub fn score(
        &self,
        juror: &Juror,
        startup: &Startup,
        load: &LoadContext,
        signals: CandidateSignals<'_>,
    ) -> ScoreBreakdown {
        let mut credits = Credits::default();
        let mut reasons: SmallVec<[String; 8]> = SmallVec::new();

        if let Some(region) = first_overlap(&startup.regions, &juror.preferred_regions) {
            credits.region = self.weights.region;
            reasons.push(format!("Region match ({})", region));
        }
        if let Some(vertical) = first_overlap(&startup.verticals, &juror.target_verticals) {
            credits.vertical = self.weights.vertical;
            reasons.push(format!("Vertical match ({})", vertical));
        }
        if juror.prefers_stage(&startup.stage) {
            credits.stage = self.weights.stage;
            reasons.push(format!("Stage match ({})", startup.stage.trim()));
        }

        let similarity = self.matcher.similarity(juror, startup);
        let similarity = if similarity.is_nan() {
            0.0
        } else {
            similarity.clamp(0.0, 1.0)
        };
        credits.thesis = self.weights.thesis * similarity;
        if credits.thesis > 0.0 {
            reasons.push(format!(
                "Thesis match {:.0}% (+{:.2})",
                similarity * 100.0,
                credits.thesis
            ));
        }

        if signals.explicit_interest {
            credits.interest = self.tuning.interest_bonus;
            reasons.push(format!("Explicit interest (+{:.2})", credits.interest));
        }

        let ai_component = signals
            .ai
            .filter(|ai| ai.is_usable(self.tuning.ai_min_confidence))
            .map(|ai| {
                let rule_credit = credits.rule_credit();
                let mut reason = format!(
                    "AI {:.1}/10 (confidence {:.2})",
                    ai.compatibility, ai.confidence
                );
                if !ai.reasoning.trim().is_empty() {
                    let _ = write!(reason, ": {}", ai.reasoning.trim());
                }
                reasons.push(reason);
                AiComponent {
                    compatibility: ai.compatibility,
                    confidence: ai.confidence,
                    blend_ratio: self.tuning.ai_blend_ratio,
                    rule_credit,
                    blended_credit: blend_credit(
                        rule_credit,
                        ai.compatibility,
                        self.tuning.ai_blend_ratio,
                    ),
                    reasoning: ai.reasoning.clone(),
                }
            });

        if reasons.is_empty() {
            reasons.push("No criteria matched".to_string());
        }

        let penalty = LoadPenalty::compute(load, self.weights.load_penalty, &self.tuning);
        reasons.push(format!(
            "Load {}/{} ({:.2})",
            load.load(),
            load.effective_limit(),
            signed_zero_free(penalty.base)
        ));
        if penalty.violation > 0 {
            reasons.push(format!(
                "Exceeds limit {} by {} ({:.2})",
                load.effective_limit(),
                penalty.violation,
                penalty.capacity
            ));
        }

        ScoreBreakdown::new(
            credits,
            penalty.total(),
            penalty.violation,
            ai_component,
            reasons.join(", "),
        )
    }
}

// Keeps "-0.00" out of reasoning text.
fn signed_zero_free(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
