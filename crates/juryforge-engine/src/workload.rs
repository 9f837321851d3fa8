//! Per-juror workload ledger.
//!
//! The tracker counts confirmed assignments (`current`) and tentative
//! reservations (`proposed`) for every juror of a run. It has a single
//! writer: the generator while proposals are built, then the review
//! session. Scoring workers only ever see `&WorkloadTracker`.

use std::collections::BTreeMap;

use juryforge_core::{Assignment, Juror, JurorId};
use juryforge_scoring::LoadContext;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Ledger {
    current: u32,
    proposed: u32,
    custom_limit: Option<u32>,
}

/// Read-only view of one juror's workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadEntry {
    pub juror_id: JurorId,
    pub current_assignments: u32,
    pub proposed_assignments: u32,
    pub target_assignments: u32,
    pub effective_limit: u32,
    pub is_custom_limit: bool,
    /// Total load is above the shared target plus tolerance.
    pub is_overloaded: bool,
    /// Total load is above the effective limit.
    pub exceeds_limit: bool,
}

impl WorkloadEntry {
    /// Confirmed plus tentative assignments.
    pub fn total_assignments(&self) -> u32 {
        self.current_assignments + self.proposed_assignments
    }
}

/// Mutable ledger of per-juror assignment counts for one run.
///
/// # Examples
///
/// ```
/// use juryforge_core::{Juror, JurorId};
/// use juryforge_engine::WorkloadTracker;
///
/// let jurors = vec![Juror::new("J1", "Ada"), Juror::new("J2", "Grace").with_evaluation_limit(1)];
/// // 3 startups needing 2 jurors each, shared by 2 jurors
/// let mut tracker = WorkloadTracker::new(&jurors, 6, 1);
/// assert_eq!(tracker.target(), 3);
///
/// let j2 = JurorId::new("J2");
/// tracker.reserve(&j2);
/// tracker.reserve(&j2);
/// let entry = tracker.entry(&j2).unwrap();
/// assert_eq!(entry.proposed_assignments, 2);
/// assert!(entry.exceeds_limit);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadTracker {
    ledgers: BTreeMap<JurorId, Ledger>,
    target: u32,
    overload_tolerance: u32,
}

impl WorkloadTracker {
    /// Creates a tracker for `jurors` sharing `total_required` assignments.
    pub fn new(jurors: &[Juror], total_required: usize, overload_tolerance: u32) -> Self {
        let ledgers = jurors
            .iter()
            .map(|j| {
                (
                    j.id.clone(),
                    Ledger {
                        custom_limit: j.evaluation_limit,
                        ..Ledger::default()
                    },
                )
            })
            .collect();
        Self {
            ledgers,
            target: Self::compute_target(total_required, jurors.len()),
            overload_tolerance,
        }
    }

    /// `floor(total_required / juror_count)`, or 0 without jurors.
    pub fn compute_target(total_required: usize, juror_count: usize) -> u32 {
        if juror_count == 0 {
            return 0;
        }
        u32::try_from(total_required / juror_count).unwrap_or(u32::MAX)
    }

    /// Counts persisted assignments as confirmed load.
    ///
    /// Jurors missing from the pool are tracked with the shared target.
    pub fn seed<'a>(&mut self, assignments: impl IntoIterator<Item = &'a Assignment>) {
        for assignment in assignments {
            self.ledgers
                .entry(assignment.juror_id.clone())
                .or_default()
                .current += 1;
        }
    }

    /// Starts tracking `juror` if it is not tracked yet.
    pub fn track(&mut self, juror: &Juror) {
        self.ledgers.entry(juror.id.clone()).or_insert(Ledger {
            custom_limit: juror.evaluation_limit,
            ..Ledger::default()
        });
    }

    /// Adds one tentative assignment. Never fails, even above the limit.
    pub fn reserve(&mut self, juror_id: &JurorId) {
        self.ledgers.entry(juror_id.clone()).or_default().proposed += 1;
    }

    /// Removes one tentative assignment.
    ///
    /// # Panics
    ///
    /// Panics if the juror holds no tentative assignment. Releasing more
    /// than was reserved is a bookkeeping bug in the caller.
    pub fn release(&mut self, juror_id: &JurorId) {
        match self.ledgers.get_mut(juror_id) {
            Some(ledger) if ledger.proposed > 0 => ledger.proposed -= 1,
            _ => panic!("released juror {} below zero proposed assignments", juror_id),
        }
    }

    /// Drops every tentative assignment.
    pub fn release_all(&mut self) {
        for ledger in self.ledgers.values_mut() {
            ledger.proposed = 0;
        }
    }

    /// Shared target for jurors without a custom limit.
    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn overload_tolerance(&self) -> u32 {
        self.overload_tolerance
    }

    /// Number of tracked jurors.
    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }

    pub fn proposed(&self, juror_id: &JurorId) -> u32 {
        self.ledgers.get(juror_id).map_or(0, |l| l.proposed)
    }

    /// Sum of tentative assignments over all jurors.
    pub fn total_proposed(&self) -> u32 {
        self.ledgers.values().map(|l| l.proposed).sum()
    }

    /// Workload as seen by the score model. Untracked jurors have no load.
    pub fn load_context(&self, juror_id: &JurorId) -> LoadContext {
        let ledger = self.ledgers.get(juror_id).copied().unwrap_or_default();
        LoadContext::new(ledger.current, ledger.proposed, self.target, ledger.custom_limit)
    }

    pub fn entry(&self, juror_id: &JurorId) -> Option<WorkloadEntry> {
        self.ledgers
            .get(juror_id)
            .map(|ledger| self.make_entry(juror_id, ledger))
    }

    /// One entry per tracked juror, ordered by juror id.
    pub fn snapshot(&self) -> Vec<WorkloadEntry> {
        self.ledgers
            .iter()
            .map(|(id, ledger)| self.make_entry(id, ledger))
            .collect()
    }

    fn make_entry(&self, juror_id: &JurorId, ledger: &Ledger) -> WorkloadEntry {
        let context =
            LoadContext::new(ledger.current, ledger.proposed, self.target, ledger.custom_limit);
        let total = context.load();
        WorkloadEntry {
            juror_id: juror_id.clone(),
            current_assignments: ledger.current,
            proposed_assignments: ledger.proposed,
            target_assignments: self.target,
            effective_limit: context.effective_limit(),
            is_custom_limit: context.is_custom_limit(),
            is_overloaded: total > self.target.saturating_add(self.overload_tolerance),
            exceeds_limit: total > context.effective_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jurors() -> Vec<Juror> {
        vec![
            Juror::new("J1", "Ada"),
            Juror::new("J2", "Grace"),
            Juror::new("J3", "Linus").with_evaluation_limit(5),
        ]
    }

    #[test]
    fn test_target_is_floor() {
        assert_eq!(WorkloadTracker::compute_target(4, 3), 1);
        assert_eq!(WorkloadTracker::compute_target(9, 3), 3);
        assert_eq!(WorkloadTracker::compute_target(9, 0), 0);
    }

    #[test]
    fn test_effective_limit() {
        let tracker = WorkloadTracker::new(&jurors(), 6, 1);
        let j1 = tracker.entry(&JurorId::new("J1")).unwrap();
        assert_eq!(j1.effective_limit, 2);
        assert!(!j1.is_custom_limit);
        let j3 = tracker.entry(&JurorId::new("J3")).unwrap();
        assert_eq!(j3.effective_limit, 5);
        assert!(j3.is_custom_limit);
    }

    #[test]
    fn test_seed_counts_current() {
        let mut tracker = WorkloadTracker::new(&jurors(), 6, 1);
        let history = vec![
            Assignment::new("S1", "J1", "screening"),
            Assignment::new("S2", "J1", "screening"),
            Assignment::new("S1", "J9", "screening"),
        ];
        tracker.seed(&history);

        let j1 = tracker.load_context(&JurorId::new("J1"));
        assert_eq!(j1.current, 2);
        assert_eq!(j1.proposed, 0);
        // Unknown jurors are tracked rather than dropped
        assert_eq!(tracker.len(), 4);
        assert_eq!(tracker.load_context(&JurorId::new("J9")).current, 1);
    }

    #[test]
    fn test_reserve_and_release() {
        let mut tracker = WorkloadTracker::new(&jurors(), 6, 1);
        let j2 = JurorId::new("J2");
        tracker.reserve(&j2);
        tracker.reserve(&j2);
        assert_eq!(tracker.proposed(&j2), 2);
        tracker.release(&j2);
        assert_eq!(tracker.proposed(&j2), 1);
        assert_eq!(tracker.total_proposed(), 1);
    }

    #[test]
    #[should_panic(expected = "below zero")]
    fn test_release_below_zero_panics() {
        let mut tracker = WorkloadTracker::new(&jurors(), 6, 1);
        tracker.release(&JurorId::new("J1"));
    }

    #[test]
    fn test_snapshot_flags() {
        let mut tracker = WorkloadTracker::new(&jurors(), 3, 1);
        let j1 = JurorId::new("J1");
        for _ in 0..3 {
            tracker.reserve(&j1);
        }
        let snapshot = tracker.snapshot();
        let ids: Vec<&str> = snapshot.iter().map(|e| e.juror_id.as_str()).collect();
        assert_eq!(ids, vec!["J1", "J2", "J3"]);

        let entry = &snapshot[0];
        assert_eq!(entry.target_assignments, 1);
        assert!(entry.exceeds_limit);
        assert!(entry.is_overloaded);
        assert_eq!(entry.total_assignments(), 3);
    }

    #[test]
    fn test_release_all() {
        let mut tracker = WorkloadTracker::new(&jurors(), 6, 1);
        tracker.reserve(&JurorId::new("J1"));
        tracker.reserve(&JurorId::new("J3"));
        tracker.release_all();
        assert_eq!(tracker.total_proposed(), 0);
    }
}
