//! Stub scoring and interest-signal providers.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use juryforge_core::{
    AiScore, AiScoringProvider, InterestSignalProvider, Juror, JurorId, ProviderError, Startup,
    StartupId,
};

/// AI provider returning fixed estimates per juror.
///
/// Jurors without an entry get `default` when one is set and are left out
/// of the response otherwise.
#[derive(Debug, Default)]
pub struct FixedAiProvider {
    scores: HashMap<JurorId, (f64, f64)>,
    default: Option<(f64, f64)>,
    calls: AtomicUsize,
}

impl FixedAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same compatibility and confidence for every juror.
    pub fn uniform(compatibility: f64, confidence: f64) -> Self {
        Self {
            default: Some((compatibility, confidence)),
            ..Self::default()
        }
    }

    pub fn with_score(mut self, juror_id: &str, compatibility: f64, confidence: f64) -> Self {
        self.scores
            .insert(JurorId::new(juror_id), (compatibility, confidence));
        self
    }

    /// Number of batch calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AiScoringProvider for FixedAiProvider {
    async fn score_batch(
        &self,
        startup: &Startup,
        jurors: &[Juror],
    ) -> Result<Vec<AiScore>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(jurors
            .iter()
            .filter_map(|j| {
                let (compatibility, confidence) =
                    self.scores.get(&j.id).copied().or(self.default)?;
                Some(AiScore {
                    juror_id: j.id.clone(),
                    compatibility,
                    confidence,
                    reasoning: format!("{} fits {}", j.name, startup.name),
                })
            })
            .collect())
    }
}

/// AI provider that always fails.
#[derive(Debug, Default)]
pub struct FailingAiProvider {
    calls: AtomicUsize,
}

impl FailingAiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AiScoringProvider for FailingAiProvider {
    async fn score_batch(
        &self,
        _startup: &Startup,
        _jurors: &[Juror],
    ) -> Result<Vec<AiScore>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::Unavailable("scoring service is down".into()))
    }
}

/// AI provider that sleeps before delegating to a uniform estimate.
#[derive(Debug)]
pub struct SlowAiProvider {
    delay: Duration,
    inner: FixedAiProvider,
}

impl SlowAiProvider {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            inner: FixedAiProvider::uniform(10.0, 1.0),
        }
    }
}

#[async_trait]
impl AiScoringProvider for SlowAiProvider {
    async fn score_batch(
        &self,
        startup: &Startup,
        jurors: &[Juror],
    ) -> Result<Vec<AiScore>, ProviderError> {
        tokio::time::sleep(self.delay).await;
        self.inner.score_batch(startup, jurors).await
    }
}

/// Interest provider answering from a fixed set of `(juror, startup)` pairs.
#[derive(Debug, Default, Clone)]
pub struct StaticInterestProvider {
    pairs: HashSet<(JurorId, StartupId)>,
}

impl StaticInterestProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interest(mut self, juror_id: &str, startup_id: &str) -> Self {
        self.pairs
            .insert((JurorId::new(juror_id), StartupId::new(startup_id)));
        self
    }
}

#[async_trait]
impl InterestSignalProvider for StaticInterestProvider {
    async fn has_explicit_interest(
        &self,
        juror_id: &JurorId,
        startup_id: &StartupId,
        _round_name: &str,
    ) -> Result<bool, ProviderError> {
        Ok(self
            .pairs
            .contains(&(juror_id.clone(), startup_id.clone())))
    }
}

/// Interest provider that always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingInterestProvider;

#[async_trait]
impl InterestSignalProvider for FailingInterestProvider {
    async fn has_explicit_interest(
        &self,
        _juror_id: &JurorId,
        _startup_id: &StartupId,
        _round_name: &str,
    ) -> Result<bool, ProviderError> {
        Err(ProviderError::Unavailable("interest signals offline".into()))
    }
}

/// Interest provider that sleeps before answering from a fixed set of pairs.
#[derive(Debug, Clone)]
pub struct SlowInterestProvider {
    delay: Duration,
    inner: StaticInterestProvider,
}

impl SlowInterestProvider {
    pub fn new(delay: Duration, inner: StaticInterestProvider) -> Self {
        Self { delay, inner }
    }
}

#[async_trait]
impl InterestSignalProvider for SlowInterestProvider {
    async fn has_explicit_interest(
        &self,
        juror_id: &JurorId,
        startup_id: &StartupId,
        round_name: &str,
    ) -> Result<bool, ProviderError> {
        tokio::time::sleep(self.delay).await;
        self.inner
            .has_explicit_interest(juror_id, startup_id, round_name)
            .await
    }
}
