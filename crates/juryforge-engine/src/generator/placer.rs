//! Startup placement: processing order and open slots.
//!
//! Later startups see the reservations made for earlier ones, so the
//! processing order is part of the result and must be reproducible.

use std::collections::{HashMap, HashSet};

use juryforge_config::StartupOrder;
use juryforge_core::{Assignment, JurorId, Startup, StartupId};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Returns `startups` in the order they should be processed.
///
/// `SeededShuffle` without a seed keeps input order; configuration
/// validation rules that combination out.
pub fn order_startups(startups: &[Startup], order: StartupOrder, seed: Option<u64>) -> Vec<&Startup> {
    let mut ordered: Vec<&Startup> = startups.iter().collect();
    match order {
        StartupOrder::Input => {}
        StartupOrder::ById => ordered.sort_by(|a, b| a.id.cmp(&b.id)),
        StartupOrder::SeededShuffle => {
            if let Some(seed) = seed {
                // Shuffle a canonical order so the result ignores input order
                ordered.sort_by(|a, b| a.id.cmp(&b.id));
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                ordered.shuffle(&mut rng);
            }
        }
    }
    ordered
}

/// Jurors already paired with each startup by persisted assignments.
#[derive(Debug, Clone, Default)]
pub struct ExistingPairs {
    by_startup: HashMap<StartupId, HashSet<JurorId>>,
}

impl ExistingPairs {
    pub fn new<'a>(assignments: impl IntoIterator<Item = &'a Assignment>) -> Self {
        let mut by_startup: HashMap<StartupId, HashSet<JurorId>> = HashMap::new();
        for a in assignments {
            by_startup
                .entry(a.startup_id.clone())
                .or_default()
                .insert(a.juror_id.clone());
        }
        Self { by_startup }
    }

    pub fn contains(&self, startup_id: &StartupId, juror_id: &JurorId) -> bool {
        self.by_startup
            .get(startup_id)
            .is_some_and(|jurors| jurors.contains(juror_id))
    }

    pub fn count(&self, startup_id: &StartupId) -> usize {
        self.by_startup.get(startup_id).map_or(0, HashSet::len)
    }

    /// Slots `startup_id` still needs to reach `target`.
    pub fn slots_needed(&self, startup_id: &StartupId, target: usize) -> usize {
        target.saturating_sub(self.count(startup_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn startups() -> Vec<Startup> {
        ["S3", "S1", "S4", "S2", "S5"]
            .iter()
            .map(|id| Startup::new(*id, *id))
            .collect()
    }

    fn ids(ordered: &[&Startup]) -> Vec<String> {
        ordered.iter().map(|s| s.id.to_string()).collect()
    }

    #[test]
    fn test_input_order() {
        let startups = startups();
        let ordered = order_startups(&startups, StartupOrder::Input, None);
        assert_eq!(ids(&ordered), vec!["S3", "S1", "S4", "S2", "S5"]);
    }

    #[test]
    fn test_by_id() {
        let startups = startups();
        let ordered = order_startups(&startups, StartupOrder::ById, None);
        assert_eq!(ids(&ordered), vec!["S1", "S2", "S3", "S4", "S5"]);
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let startups = startups();
        let a = ids(&order_startups(&startups, StartupOrder::SeededShuffle, Some(7)));
        let b = ids(&order_startups(&startups, StartupOrder::SeededShuffle, Some(7)));
        assert_eq!(a, b);

        let mut reversed = startups.clone();
        reversed.reverse();
        let c = ids(&order_startups(&reversed, StartupOrder::SeededShuffle, Some(7)));
        assert_eq!(a, c);

        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["S1", "S2", "S3", "S4", "S5"]);
    }

    #[test]
    fn test_slots_needed() {
        let history = vec![
            Assignment::new("S1", "J1", "screening"),
            Assignment::new("S1", "J2", "screening"),
            Assignment::new("S2", "J1", "screening"),
        ];
        let pairs = ExistingPairs::new(&history);
        assert_eq!(pairs.slots_needed(&StartupId::new("S1"), 2), 0);
        assert_eq!(pairs.slots_needed(&StartupId::new("S2"), 2), 1);
        assert_eq!(pairs.slots_needed(&StartupId::new("S3"), 2), 2);
        assert!(pairs.contains(&StartupId::new("S1"), &JurorId::new("J2")));
        assert!(!pairs.contains(&StartupId::new("S2"), &JurorId::new("J2")));
    }
}
