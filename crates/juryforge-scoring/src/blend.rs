//! Blending of AI compatibility estimates with rule-based credit.

use juryforge_core::AiScore;
use serde::{Deserialize, Serialize};

/// Upper bound of the AI compatibility scale.
pub const AI_SCALE_MAX: f64 = 10.0;

/// Factor mapping the AI scale onto the 0..=100 credit scale.
const AI_TO_CREDIT: f64 = 10.0;

/// A usable AI estimate for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAssessment {
    /// Compatibility on a 0..=10 scale.
    pub compatibility: f64,
    /// Provider confidence on a 0..=1 scale.
    pub confidence: f64,
    pub reasoning: String,
}

impl AiAssessment {
    pub fn new(compatibility: f64, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            compatibility,
            confidence,
            reasoning: reasoning.into(),
        }
    }

    /// Returns true if the estimate is well-formed and at least as
    /// confident as `min_confidence`.
    pub fn is_usable(&self, min_confidence: f64) -> bool {
        self.compatibility.is_finite()
            && (0.0..=AI_SCALE_MAX).contains(&self.compatibility)
            && self.confidence.is_finite()
            && self.confidence >= min_confidence
    }
}

impl From<AiScore> for AiAssessment {
    fn from(score: AiScore) -> Self {
        Self {
            compatibility: score.compatibility,
            confidence: score.confidence,
            reasoning: score.reasoning,
        }
    }
}

/// Blends rule-based credit with an AI compatibility estimate.
///
/// Returns `(1 - ratio) * rule_credit + ratio * compatibility * 10`.
///
/// # Examples
///
/// ```
/// use juryforge_scoring::blend_credit;
///
/// // 30% of 40 rule credit plus 70% of 8/10 scaled to 80
/// assert!((blend_credit(40.0, 8.0, 0.7) - 68.0).abs() < 1e-9);
/// assert_eq!(blend_credit(40.0, 8.0, 0.0), 40.0);
/// ```
pub fn blend_credit(rule_credit: f64, compatibility: f64, ratio: f64) -> f64 {
    let ai_credit = compatibility.clamp(0.0, AI_SCALE_MAX) * AI_TO_CREDIT;
    (1.0 - ratio) * rule_credit + ratio * ai_credit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_ratio_ignores_rules() {
        assert_eq!(blend_credit(90.0, 2.0, 1.0), 20.0);
    }

    #[test]
    fn test_usable_bounds() {
        assert!(AiAssessment::new(7.5, 0.4, "").is_usable(0.0));
        assert!(!AiAssessment::new(7.5, 0.4, "").is_usable(0.5));
        assert!(!AiAssessment::new(11.0, 1.0, "").is_usable(0.0));
        assert!(!AiAssessment::new(f64::NAN, 1.0, "").is_usable(0.0));
        assert!(!AiAssessment::new(-1.0, 1.0, "").is_usable(0.0));
    }
}
