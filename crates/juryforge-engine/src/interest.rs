//! Explicit-interest lookups.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use juryforge_core::{InterestSignalProvider, Juror, JurorId, ProviderError, Startup};
use tracing::warn;

/// Jurors who flagged interest in one startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestSignals {
    pub interested: HashSet<JurorId>,
    /// Lookups that failed and were treated as no interest.
    pub failures: usize,
}

impl InterestSignals {
    pub fn has_interest(&self, juror_id: &JurorId) -> bool {
        self.interested.contains(juror_id)
    }
}

/// Queries an optional [`InterestSignalProvider`] for each candidate,
/// bounding every call by a timeout.
#[derive(Clone, Default)]
pub struct InterestLookup {
    provider: Option<Arc<dyn InterestSignalProvider>>,
    timeout: Duration,
}

impl fmt::Debug for InterestLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterestLookup")
            .field("enabled", &self.provider.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl InterestLookup {
    pub fn new(provider: Option<Arc<dyn InterestSignalProvider>>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Collects interest signals for `jurors`. A failed or timed out lookup
    /// counts as no interest and is logged.
    pub async fn collect(&self, startup: &Startup, jurors: &[&Juror], round_name: &str) -> InterestSignals {
        let mut signals = InterestSignals::default();
        let Some(provider) = &self.provider else {
            return signals;
        };

        for juror in jurors {
            let lookup = provider.has_explicit_interest(&juror.id, &startup.id, round_name);
            let result = match tokio::time::timeout(self.timeout, lookup).await {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(self.timeout.as_millis() as u64)),
            };
            match result {
                Ok(true) => {
                    signals.interested.insert(juror.id.clone());
                }
                Ok(false) => {}
                Err(error) => {
                    signals.failures += 1;
                    warn!(
                        event = "interest_unavailable",
                        startup = %startup.id,
                        juror = %juror.id,
                        error = %error,
                    );
                }
            }
        }
        signals
    }
}
