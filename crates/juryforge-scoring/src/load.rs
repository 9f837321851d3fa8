//! Workload context and the load penalty.
//!
//! The penalty has two parts. The base part grows linearly with the juror's
//! load relative to their effective limit. The capacity part applies only
//! when one more reservation would take the juror past that limit, and is
//! large enough to outweigh every achievable positive credit.

use juryforge_config::ScoringTuning;
use serde::{Deserialize, Serialize};

/// A juror's workload at the moment a candidate is scored.
///
/// `load()` counts reservations already held; the candidate being scored
/// is not included.
///
/// # Examples
///
/// ```
/// use juryforge_scoring::LoadContext;
///
/// let shared = LoadContext::new(1, 0, 2, None);
/// assert_eq!(shared.load(), 1);
/// assert_eq!(shared.effective_limit(), 2);
/// assert_eq!(shared.violation_if_reserved(), 0);
/// // At the shared target the next reservation violates
/// assert_eq!(shared.reserved().violation_if_reserved(), 1);
///
/// let custom = LoadContext::new(0, 2, 5, Some(2));
/// assert_eq!(custom.effective_limit(), 2);
/// assert_eq!(custom.violation_if_reserved(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadContext {
    /// Confirmed assignments.
    pub current: u32,
    /// Tentative reservations made in this run or session.
    pub proposed: u32,
    /// Shared target for jurors without a custom limit.
    pub target: u32,
    /// The juror's own evaluation limit, if any.
    pub custom_limit: Option<u32>,
}

impl LoadContext {
    pub fn new(current: u32, proposed: u32, target: u32, custom_limit: Option<u32>) -> Self {
        Self {
            current,
            proposed,
            target,
            custom_limit,
        }
    }

    #[inline]
    pub fn load(&self) -> u32 {
        self.current + self.proposed
    }

    /// The custom limit when set, the shared target otherwise.
    ///
    /// A shared target of zero (fewer open slots than jurors) counts as one.
    #[inline]
    pub fn effective_limit(&self) -> u32 {
        self.custom_limit.unwrap_or(self.target.max(1))
    }

    #[inline]
    pub fn is_custom_limit(&self) -> bool {
        self.custom_limit.is_some()
    }

    /// Units by which one more reservation would exceed the effective limit.
    ///
    /// Custom limits and the shared target are both enforced here.
    /// `overload_tolerance` only feeds the workload snapshot's
    /// `is_overloaded` flag.
    pub fn violation_if_reserved(&self) -> u32 {
        (self.load() + 1).saturating_sub(self.effective_limit())
    }

    /// Returns the context after one more reservation.
    pub fn reserved(self) -> Self {
        Self {
            proposed: self.proposed + 1,
            ..self
        }
    }
}

/// The load penalty for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadPenalty {
    /// Linear part, `-load_penalty_weight * load / max(limit, 1)`.
    pub base: f64,
    /// Units of capacity violation the reservation would cause.
    pub violation: u32,
    /// Capacity part, `-limit_violation_penalty * violation`.
    pub capacity: f64,
}

impl LoadPenalty {
    pub fn compute(context: &LoadContext, load_penalty_weight: f64, tuning: &ScoringTuning) -> Self {
        let limit = context.effective_limit().max(1);
        let base = -load_penalty_weight * f64::from(context.load()) / f64::from(limit);
        let violation = context.violation_if_reserved();
        let capacity = -tuning.limit_violation_penalty * f64::from(violation);
        Self {
            base,
            violation,
            capacity,
        }
    }

    /// Sum of both parts.
    #[inline]
    pub fn total(&self) -> f64 {
        self.base + self.capacity
    }
}
