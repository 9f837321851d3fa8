//! Local stand-ins for the AI estimator and the interest signal store.

use std::collections::HashSet;

use async_trait::async_trait;
use juryforge::{
    AiScore, AiScoringProvider, InterestSignalProvider, Juror, JurorId, ProviderError, Startup,
    StartupId,
};

/// Estimates compatibility from words shared by thesis and description.
pub struct KeywordEstimator;

#[async_trait]
impl AiScoringProvider for KeywordEstimator {
    async fn score_batch(
        &self,
        startup: &Startup,
        jurors: &[Juror],
    ) -> Result<Vec<AiScore>, ProviderError> {
        let words: HashSet<String> = startup
            .description
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();

        Ok(jurors
            .iter()
            .map(|juror| {
                let hits: Vec<&str> = juror
                    .thesis_keywords
                    .iter()
                    .filter(|k| words.contains(&k.to_lowercase()))
                    .map(String::as_str)
                    .collect();
                AiScore {
                    juror_id: juror.id.clone(),
                    compatibility: (hits.len() as f64 * 4.0).min(10.0),
                    confidence: if juror.thesis_keywords.is_empty() { 0.2 } else { 0.8 },
                    reasoning: if hits.is_empty() {
                        "no shared themes".to_string()
                    } else {
                        format!("shares {}", hits.join(", "))
                    },
                }
            })
            .collect())
    }
}

/// Interest flags collected in the application stage.
pub struct FlaggedInterest {
    flags: HashSet<(JurorId, StartupId)>,
}

impl FlaggedInterest {
    pub fn new(flags: &[(&str, &str)]) -> Self {
        Self {
            flags: flags
                .iter()
                .map(|(j, s)| (JurorId::new(*j), StartupId::new(*s)))
                .collect(),
        }
    }
}

#[async_trait]
impl InterestSignalProvider for FlaggedInterest {
    async fn has_explicit_interest(
        &self,
        juror_id: &JurorId,
        startup_id: &StartupId,
        _round_name: &str,
    ) -> Result<bool, ProviderError> {
        Ok(self.flags.contains(&(juror_id.clone(), startup_id.clone())))
    }
}
