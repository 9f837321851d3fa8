//! Bounded calls to the optional AI scoring provider.
//!
//! A failed or slow provider never fails generation: the affected
//! startup's candidates are scored by the rules alone.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use juryforge_core::{AiScoringProvider, Juror, JurorId, ProviderError, Startup};
use juryforge_scoring::AiAssessment;
use tracing::warn;

/// Result of asking the provider about one startup.
#[derive(Debug, Clone, PartialEq)]
pub enum AiOutcome {
    /// AI enhancement is off or no provider is configured.
    Disabled,
    /// Estimates keyed by juror. Jurors the provider skipped are absent.
    Scored(HashMap<JurorId, AiAssessment>),
    /// The call failed; candidates fall back to rule-based scoring.
    Fallback(ProviderError),
}

impl AiOutcome {
    pub fn assessment(&self, juror_id: &JurorId) -> Option<&AiAssessment> {
        match self {
            AiOutcome::Scored(scores) => scores.get(juror_id),
            _ => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AiOutcome::Fallback(_))
    }
}

/// Wraps an [`AiScoringProvider`] with a timeout and silent fallback.
#[derive(Clone)]
pub struct AiEnhancer {
    provider: Option<Arc<dyn AiScoringProvider>>,
    timeout: Duration,
}

impl fmt::Debug for AiEnhancer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiEnhancer")
            .field("enabled", &self.provider.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AiEnhancer {
    /// An enhancer that never calls out.
    pub fn disabled() -> Self {
        Self {
            provider: None,
            timeout: Duration::ZERO,
        }
    }

    pub fn new(provider: Arc<dyn AiScoringProvider>, timeout: Duration) -> Self {
        Self {
            provider: Some(provider),
            timeout,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Asks the provider to score `jurors` for `startup` within the timeout.
    pub async fn assess(&self, startup: &Startup, jurors: &[Juror]) -> AiOutcome {
        let Some(provider) = &self.provider else {
            return AiOutcome::Disabled;
        };
        if jurors.is_empty() {
            return AiOutcome::Scored(HashMap::new());
        }

        let result = match tokio::time::timeout(self.timeout, provider.score_batch(startup, jurors)).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(self.timeout.as_millis() as u64)),
        };

        match result {
            Ok(scores) => {
                let mut assessments = HashMap::with_capacity(scores.len());
                for score in scores {
                    assessments
                        .entry(score.juror_id.clone())
                        .or_insert_with(|| AiAssessment::from(score));
                }
                AiOutcome::Scored(assessments)
            }
            Err(error) => {
                warn!(
                    event = "ai_fallback",
                    startup = %startup.id,
                    error = %error,
                    "AI scoring unavailable, using rule-based scores"
                );
                AiOutcome::Fallback(error)
            }
        }
    }
}
