//! ReviewSession - human review of generated proposals

use std::collections::BTreeMap;

use juryforge_core::{Assignment, Juror, JurorId, Startup, StartupId};
use juryforge_scoring::{rank_candidates, CandidateSignals, ScoreBreakdown, ScoreModel, ScoredCandidate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::generator::{ExistingPairs, GenerationOutcome};
use crate::workload::{WorkloadEntry, WorkloadTracker};

use super::{ReviewError, ReviewState};

/// How an entry got into a review row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrigin {
    /// Selected by the generator.
    Generated,
    /// Ranked just below the selection by the generator.
    Alternate,
    /// Added by the reviewer.
    Manual,
}

/// One juror in a review row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    pub juror_id: JurorId,
    pub juror_name: String,
    pub breakdown: ScoreBreakdown,
    pub selected: bool,
    pub origin: EntryOrigin,
}

/// The reviewable proposal of one startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRow {
    pub startup_id: StartupId,
    pub startup_name: String,
    pub entries: Vec<ReviewEntry>,
    accepted: bool,
}

impl ReviewRow {
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn entry(&self, juror_id: &JurorId) -> Option<&ReviewEntry> {
        self.entries.iter().find(|e| &e.juror_id == juror_id)
    }

    pub fn selected(&self) -> impl Iterator<Item = &ReviewEntry> {
        self.entries.iter().filter(|e| e.selected)
    }

    pub fn is_selected(&self, juror_id: &JurorId) -> bool {
        self.entry(juror_id).is_some_and(|e| e.selected)
    }

    fn push_manual(&mut self, juror: &Juror, breakdown: ScoreBreakdown) {
        self.entries.retain(|e| e.juror_id != juror.id);
        self.entries.push(ReviewEntry {
            juror_id: juror.id.clone(),
            juror_name: juror.name.clone(),
            breakdown,
            selected: true,
            origin: EntryOrigin::Manual,
        });
    }
}

/// A juror's tentative load compared with the generated plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadDelta {
    pub juror_id: JurorId,
    /// Tentative assignments right after generation.
    pub baseline: u32,
    /// Tentative assignments now.
    pub proposed: u32,
}

impl WorkloadDelta {
    pub fn delta(&self) -> i64 {
        i64::from(self.proposed) - i64::from(self.baseline)
    }
}

/// A startup found by [`ReviewSession::search_startups`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupMatch {
    pub startup_id: StartupId,
    pub startup_name: String,
    pub breakdown: ScoreBreakdown,
}

/// Interactive editing of generated proposals.
///
/// The session owns the run's workload tracker: every selection change
/// reserves or releases load immediately so scores shown for replacements
/// reflect the current plan. Nothing is persisted here; see
/// [`AssignmentCommitter`](crate::AssignmentCommitter).
///
/// Replacement candidates are scored by rules alone, without interest
/// signals or AI estimates.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    round_name: String,
    state: ReviewState,
    rows: Vec<ReviewRow>,
    tracker: WorkloadTracker,
    baseline: BTreeMap<JurorId, u32>,
    startups: Vec<Startup>,
    jurors: Vec<Juror>,
    existing: ExistingPairs,
    model: ScoreModel,
}

impl ReviewSession {
    /// Opens a session in `Draft` over a generation outcome.
    ///
    /// Each row holds the selected jurors followed by the proposal's
    /// alternates.
    pub fn new(outcome: GenerationOutcome) -> Self {
        let rows = outcome
            .proposals
            .iter()
            .map(|proposal| {
                let selected = proposal.candidates.iter().map(|c| ReviewEntry {
                    juror_id: c.juror_id.clone(),
                    juror_name: c.juror_name.clone(),
                    breakdown: c.breakdown.clone(),
                    selected: true,
                    origin: EntryOrigin::Generated,
                });
                let alternates = proposal.alternates().into_iter().map(|e| ReviewEntry {
                    juror_id: e.juror_id.clone(),
                    juror_name: e.juror_name.clone(),
                    breakdown: e.breakdown.clone(),
                    selected: false,
                    origin: EntryOrigin::Alternate,
                });
                ReviewRow {
                    startup_id: proposal.startup_id.clone(),
                    startup_name: proposal.explanation.startup_name.clone(),
                    entries: selected.chain(alternates).collect(),
                    accepted: false,
                }
            })
            .collect();

        let baseline = outcome
            .workload
            .snapshot()
            .into_iter()
            .map(|e| (e.juror_id, e.proposed_assignments))
            .collect();

        Self {
            round_name: outcome.round_name,
            state: ReviewState::Draft,
            rows,
            tracker: outcome.workload,
            baseline,
            existing: ExistingPairs::new(&outcome.pool.existing),
            startups: outcome.pool.startups,
            jurors: outcome.pool.jurors,
            model: outcome.model,
        }
    }

    pub fn round_name(&self) -> &str {
        &self.round_name
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn rows(&self) -> &[ReviewRow] {
        &self.rows
    }

    pub fn row(&self, startup_id: &StartupId) -> Option<&ReviewRow> {
        self.rows.iter().find(|r| &r.startup_id == startup_id)
    }

    pub fn workload(&self) -> &WorkloadTracker {
        &self.tracker
    }

    /// Flips the selection of a candidate already listed in the row.
    ///
    /// Returns whether the juror is now selected.
    pub fn toggle_candidate(
        &mut self,
        startup_id: &StartupId,
        juror_id: &JurorId,
    ) -> Result<bool, ReviewError> {
        let idx = self.editable_row("toggle a candidate", startup_id)?;
        let entry = self.rows[idx]
            .entries
            .iter_mut()
            .find(|e| &e.juror_id == juror_id)
            .ok_or_else(|| ReviewError::NotACandidate {
                startup_id: startup_id.clone(),
                juror_id: juror_id.clone(),
            })?;

        if entry.selected {
            self.tracker.release(juror_id);
        } else {
            self.tracker.reserve(juror_id);
        }
        entry.selected = !entry.selected;
        let selected = entry.selected;
        self.state = ReviewState::Edited;

        debug!(
            event = "candidate_toggled",
            startup = %startup_id,
            juror = %juror_id,
            selected,
        );
        Ok(selected)
    }

    /// Swaps a selected juror for another one, releasing before reserving.
    ///
    /// Returns the new juror's breakdown, scored after the release.
    pub fn replace_candidate(
        &mut self,
        startup_id: &StartupId,
        old_juror_id: &JurorId,
        new_juror_id: &JurorId,
    ) -> Result<ScoreBreakdown, ReviewError> {
        let idx = self.editable_row("replace a candidate", startup_id)?;
        if !self.rows[idx].is_selected(old_juror_id) {
            return Err(ReviewError::NotSelected {
                startup_id: startup_id.clone(),
                juror_id: old_juror_id.clone(),
            });
        }
        if self.is_paired(startup_id, new_juror_id) {
            return Err(ReviewError::AlreadyPaired {
                startup_id: startup_id.clone(),
                juror_id: new_juror_id.clone(),
            });
        }
        let juror = self.juror(new_juror_id)?.clone();
        let startup = self.startup(startup_id)?.clone();

        self.deselect(idx, old_juror_id);
        let breakdown = self.score(&juror, &startup);
        self.tracker.track(&juror);
        self.tracker.reserve(&juror.id);
        self.rows[idx].push_manual(&juror, breakdown.clone());
        self.state = ReviewState::Edited;

        debug!(
            event = "candidate_replaced",
            startup = %startup_id,
            old = %old_juror_id,
            new = %new_juror_id,
            score = %breakdown.rank_score(),
        );
        Ok(breakdown)
    }

    /// Moves a juror's selection from one startup to another.
    ///
    /// A row is created for `new_startup_id` if the generator produced none.
    /// Returns the juror's breakdown for the new startup.
    pub fn replace_startup(
        &mut self,
        startup_id: &StartupId,
        juror_id: &JurorId,
        new_startup_id: &StartupId,
    ) -> Result<ScoreBreakdown, ReviewError> {
        let from = self.editable_row("move a juror", startup_id)?;
        if !self.rows[from].is_selected(juror_id) {
            return Err(ReviewError::NotSelected {
                startup_id: startup_id.clone(),
                juror_id: juror_id.clone(),
            });
        }
        let startup = self.startup(new_startup_id)?.clone();
        if self.is_paired(new_startup_id, juror_id) {
            return Err(ReviewError::AlreadyPaired {
                startup_id: new_startup_id.clone(),
                juror_id: juror_id.clone(),
            });
        }
        if self.row(new_startup_id).is_some_and(ReviewRow::is_accepted) {
            return Err(ReviewError::RowLocked(new_startup_id.clone()));
        }
        let juror = self.juror(juror_id)?.clone();

        self.deselect(from, juror_id);
        let breakdown = self.score(&juror, &startup);
        self.tracker.reserve(juror_id);
        let to = match self.rows.iter().position(|r| &r.startup_id == new_startup_id) {
            Some(to) => to,
            None => {
                self.rows.push(ReviewRow {
                    startup_id: startup.id.clone(),
                    startup_name: startup.name.clone(),
                    entries: Vec::new(),
                    accepted: false,
                });
                self.rows.len() - 1
            }
        };
        self.rows[to].push_manual(&juror, breakdown.clone());
        self.state = ReviewState::Edited;

        debug!(
            event = "juror_moved",
            juror = %juror_id,
            from = %startup_id,
            to = %new_startup_id,
            score = %breakdown.rank_score(),
        );
        Ok(breakdown)
    }

    /// Jurors that could be paired with `startup_id`, best first.
    ///
    /// Jurors already selected for the startup or persisted with it are
    /// left out. `query` matches id, name, company or target vertical,
    /// case-insensitively; an empty query matches everyone.
    pub fn search_jurors(
        &self,
        startup_id: &StartupId,
        query: &str,
    ) -> Result<Vec<ScoredCandidate>, ReviewError> {
        let startup = self.startup(startup_id)?;
        let query = query.trim().to_lowercase();
        let mut found: Vec<ScoredCandidate> = self
            .jurors
            .iter()
            .filter(|j| !self.is_paired(startup_id, &j.id))
            .filter(|j| {
                query.is_empty()
                    || contains_query(&query, [j.id.as_str(), j.name.as_str(), j.company.as_str()])
                    || j.target_verticals.iter().any(|v| v.to_lowercase().contains(&query))
            })
            .map(|j| ScoredCandidate::new(j.id.clone(), j.name.clone(), self.score(j, startup)))
            .collect();
        rank_candidates(&mut found);
        Ok(found)
    }

    /// Startups `juror_id` could be moved to, best first.
    ///
    /// `query` matches id, name, stage or vertical.
    pub fn search_startups(
        &self,
        juror_id: &JurorId,
        query: &str,
    ) -> Result<Vec<StartupMatch>, ReviewError> {
        let juror = self.juror(juror_id)?;
        let query = query.trim().to_lowercase();
        let mut found: Vec<StartupMatch> = self
            .startups
            .iter()
            .filter(|s| !self.is_paired(&s.id, juror_id))
            .filter(|s| {
                query.is_empty()
                    || contains_query(&query, [s.id.as_str(), s.name.as_str(), s.stage.as_str()])
                    || s.verticals.iter().any(|v| v.to_lowercase().contains(&query))
            })
            .map(|s| StartupMatch {
                startup_id: s.id.clone(),
                startup_name: s.name.clone(),
                breakdown: self.score(juror, s),
            })
            .collect();
        found.sort_by(|a, b| {
            b.breakdown
                .rank_score()
                .cmp(&a.breakdown.rank_score())
                .then_with(|| a.startup_id.cmp(&b.startup_id))
        });
        Ok(found)
    }

    /// Locks a row's current selection into the approved set.
    ///
    /// The session becomes `Approved` once every row is accepted.
    pub fn accept_row(&mut self, startup_id: &StartupId) -> Result<(), ReviewError> {
        self.require_editable("accept a row")?;
        let row = self
            .rows
            .iter_mut()
            .find(|r| &r.startup_id == startup_id)
            .ok_or_else(|| ReviewError::UnknownStartup(startup_id.clone()))?;
        row.accepted = true;

        self.state = if self.rows.iter().all(ReviewRow::is_accepted) {
            ReviewState::Approved
        } else {
            ReviewState::Edited
        };
        debug!(event = "row_accepted", startup = %startup_id, state = %self.state);
        Ok(())
    }

    /// Accepts every row and approves the session.
    pub fn accept_all(&mut self) -> Result<(), ReviewError> {
        self.require_editable("accept all rows")?;
        for row in &mut self.rows {
            row.accepted = true;
        }
        self.state = ReviewState::Approved;
        debug!(event = "all_rows_accepted", rows = self.rows.len());
        Ok(())
    }

    /// Approves the rows accepted so far. Rows left open are not committed.
    pub fn approve(&mut self) -> Result<(), ReviewError> {
        self.require_editable("approve")?;
        if !self.rows.iter().any(ReviewRow::is_accepted) {
            return Err(ReviewError::NothingApproved);
        }
        self.state = ReviewState::Approved;
        Ok(())
    }

    /// Returns an accepted row to editing.
    pub fn reopen_row(&mut self, startup_id: &StartupId) -> Result<(), ReviewError> {
        if self.state.is_terminal() {
            return Err(ReviewError::InvalidState {
                operation: "reopen a row",
                state: self.state,
            });
        }
        let row = self
            .rows
            .iter_mut()
            .find(|r| &r.startup_id == startup_id)
            .ok_or_else(|| ReviewError::UnknownStartup(startup_id.clone()))?;
        row.accepted = false;
        self.state = ReviewState::Edited;
        debug!(event = "row_reopened", startup = %startup_id);
        Ok(())
    }

    /// Releases every tentative reservation and ends the session.
    pub fn cancel(&mut self) -> Result<(), ReviewError> {
        if self.state.is_terminal() {
            return Err(ReviewError::InvalidState {
                operation: "cancel",
                state: self.state,
            });
        }
        let released = self.tracker.total_proposed();
        self.tracker.release_all();
        for row in &mut self.rows {
            row.accepted = false;
            for entry in &mut row.entries {
                entry.selected = false;
            }
        }
        self.state = ReviewState::Cancelled;
        info!(event = "review_cancelled", round = %self.round_name, released);
        Ok(())
    }

    pub fn workload_snapshot(&self) -> Vec<WorkloadEntry> {
        self.tracker.snapshot()
    }

    /// Jurors whose tentative load differs from the generated plan.
    pub fn workload_deltas(&self) -> Vec<WorkloadDelta> {
        self.tracker
            .snapshot()
            .into_iter()
            .filter_map(|entry| {
                let baseline = self.baseline.get(&entry.juror_id).copied().unwrap_or(0);
                (baseline != entry.proposed_assignments).then(|| WorkloadDelta {
                    juror_id: entry.juror_id,
                    baseline,
                    proposed: entry.proposed_assignments,
                })
            })
            .collect()
    }

    /// Selected pairings of accepted rows, in row order.
    pub fn approved_assignments(&self) -> Vec<Assignment> {
        self.rows
            .iter()
            .filter(|r| r.accepted)
            .flat_map(|r| {
                r.selected().map(move |e| Assignment {
                    startup_id: r.startup_id.clone(),
                    juror_id: e.juror_id.clone(),
                    round_name: self.round_name.clone(),
                })
            })
            .collect()
    }

    pub(crate) fn mark_committed(&mut self) {
        self.state = ReviewState::Committed;
    }

    fn require_editable(&self, operation: &'static str) -> Result<(), ReviewError> {
        if self.state.is_editable() {
            Ok(())
        } else {
            Err(ReviewError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn editable_row(
        &self,
        operation: &'static str,
        startup_id: &StartupId,
    ) -> Result<usize, ReviewError> {
        self.require_editable(operation)?;
        let idx = self
            .rows
            .iter()
            .position(|r| &r.startup_id == startup_id)
            .ok_or_else(|| ReviewError::UnknownStartup(startup_id.clone()))?;
        if self.rows[idx].accepted {
            return Err(ReviewError::RowLocked(startup_id.clone()));
        }
        Ok(idx)
    }

    fn deselect(&mut self, idx: usize, juror_id: &JurorId) {
        if let Some(entry) = self.rows[idx]
            .entries
            .iter_mut()
            .find(|e| &e.juror_id == juror_id && e.selected)
        {
            entry.selected = false;
            self.tracker.release(juror_id);
        }
    }

    fn is_paired(&self, startup_id: &StartupId, juror_id: &JurorId) -> bool {
        self.existing.contains(startup_id, juror_id)
            || self.row(startup_id).is_some_and(|r| r.is_selected(juror_id))
    }

    fn startup(&self, startup_id: &StartupId) -> Result<&Startup, ReviewError> {
        self.startups
            .iter()
            .find(|s| &s.id == startup_id)
            .ok_or_else(|| ReviewError::UnknownStartup(startup_id.clone()))
    }

    fn juror(&self, juror_id: &JurorId) -> Result<&Juror, ReviewError> {
        self.jurors
            .iter()
            .find(|j| &j.id == juror_id)
            .ok_or_else(|| ReviewError::UnknownJuror(juror_id.clone()))
    }

    fn score(&self, juror: &Juror, startup: &Startup) -> ScoreBreakdown {
        let load = self.tracker.load_context(&juror.id);
        self.model.score(juror, startup, &load, CandidateSignals::NONE)
    }
}

fn contains_query<'a>(query: &str, fields: impl IntoIterator<Item = &'a str>) -> bool {
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(query))
}
