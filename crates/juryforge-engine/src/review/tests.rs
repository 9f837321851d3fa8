use juryforge_core::{Assignment, JurorId, StartupId};
use juryforge_test::scenario::{two_startup_scenario, ROUND};

use super::*;
use crate::generator::ProposalGenerator;

async fn draft() -> ReviewSession {
    let scenario = two_startup_scenario();
    let outcome = ProposalGenerator::new(scenario.config)
        .generate(scenario.startups, scenario.jurors, Vec::new())
        .await
        .unwrap();
    ReviewSession::new(outcome)
}

fn s(id: &str) -> StartupId {
    StartupId::new(id)
}

fn j(id: &str) -> JurorId {
    JurorId::new(id)
}

fn selected(session: &ReviewSession, startup: &str) -> Vec<String> {
    session
        .row(&s(startup))
        .unwrap()
        .selected()
        .map(|e| e.juror_id.to_string())
        .collect()
}

#[tokio::test]
async fn test_session_opens_in_draft_with_alternates() {
    let session = draft().await;

    assert_eq!(session.state(), ReviewState::Draft);
    assert_eq!(session.round_name(), ROUND);
    assert_eq!(session.rows().len(), 2);

    let row = session.row(&s("S1")).unwrap();
    let entries: Vec<_> = row
        .entries
        .iter()
        .map(|e| (e.juror_id.as_str(), e.selected, e.origin))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("J1", true, EntryOrigin::Generated),
            ("J2", true, EntryOrigin::Generated),
            ("J3", false, EntryOrigin::Alternate),
        ]
    );
    assert!(!row.is_accepted());
    assert!(session.workload_deltas().is_empty());
}

#[tokio::test]
async fn test_toggle_reserves_and_releases() {
    let mut session = draft().await;

    assert!(session.toggle_candidate(&s("S1"), &j("J3")).unwrap());
    assert_eq!(session.state(), ReviewState::Edited);
    assert_eq!(session.workload().proposed(&j("J3")), 2);
    assert_eq!(
        session.workload_deltas(),
        vec![WorkloadDelta {
            juror_id: j("J3"),
            baseline: 1,
            proposed: 2,
        }]
    );

    assert!(!session.toggle_candidate(&s("S1"), &j("J3")).unwrap());
    assert_eq!(session.workload().proposed(&j("J3")), 1);
    assert!(session.workload_deltas().is_empty());
}

#[tokio::test]
async fn test_toggle_unlisted_juror_is_rejected() {
    let mut session = draft().await;

    let err = session.toggle_candidate(&s("S1"), &j("J9")).unwrap_err();
    assert_eq!(
        err,
        ReviewError::NotACandidate {
            startup_id: s("S1"),
            juror_id: j("J9"),
        }
    );
    assert_eq!(session.state(), ReviewState::Draft);

    let err = session.toggle_candidate(&s("S9"), &j("J1")).unwrap_err();
    assert_eq!(err, ReviewError::UnknownStartup(s("S9")));
}

#[tokio::test]
async fn test_replace_candidate_rescores_after_release() {
    let mut session = draft().await;

    let breakdown = session.replace_candidate(&s("S1"), &j("J2"), &j("J3")).unwrap();

    // J3 already holds S2, so S1 takes it past the shared target of 1
    assert_eq!(breakdown.total(), -1010.0);
    assert_eq!(breakdown.capacity_violation(), 1);
    assert_eq!(selected(&session, "S1"), vec!["J1", "J3"]);
    assert_eq!(session.workload().proposed(&j("J2")), 1);
    assert_eq!(session.workload().proposed(&j("J3")), 2);

    let row = session.row(&s("S1")).unwrap();
    assert_eq!(row.entry(&j("J3")).unwrap().origin, EntryOrigin::Manual);
    assert_eq!(row.entries.len(), 3);
}

#[tokio::test]
async fn test_replace_candidate_validation() {
    let mut session = draft().await;

    assert_eq!(
        session.replace_candidate(&s("S1"), &j("J2"), &j("J1")),
        Err(ReviewError::AlreadyPaired {
            startup_id: s("S1"),
            juror_id: j("J1"),
        })
    );
    assert_eq!(
        session.replace_candidate(&s("S1"), &j("J3"), &j("J2")),
        Err(ReviewError::NotSelected {
            startup_id: s("S1"),
            juror_id: j("J3"),
        })
    );
    assert_eq!(
        session.replace_candidate(&s("S1"), &j("J2"), &j("J9")),
        Err(ReviewError::UnknownJuror(j("J9")))
    );

    // Failed edits leave selections and load untouched
    assert_eq!(selected(&session, "S1"), vec!["J1", "J2"]);
    assert_eq!(session.workload().total_proposed(), 4);
    assert_eq!(session.state(), ReviewState::Draft);
}

#[tokio::test]
async fn test_replace_startup_moves_selection() {
    let mut session = draft().await;

    let breakdown = session.replace_startup(&s("S1"), &j("J1"), &s("S2")).unwrap();

    assert_eq!(breakdown.total(), 0.0);
    assert_eq!(selected(&session, "S1"), vec!["J2"]);
    assert_eq!(selected(&session, "S2"), vec!["J3", "J2", "J1"]);
    assert_eq!(session.workload().proposed(&j("J1")), 1);
    assert!(session.workload_deltas().is_empty());
}

#[tokio::test]
async fn test_replace_startup_creates_missing_row() {
    let scenario = two_startup_scenario();
    let existing = vec![
        Assignment::new("S2", "J2", ROUND),
        Assignment::new("S2", "J3", ROUND),
    ];
    let outcome = ProposalGenerator::new(scenario.config)
        .generate(scenario.startups, scenario.jurors, existing)
        .await
        .unwrap();
    let mut session = ReviewSession::new(outcome);
    assert!(session.row(&s("S2")).is_none());

    // J2 already evaluates S2 in storage
    assert_eq!(
        session.replace_startup(&s("S1"), &j("J2"), &s("S2")),
        Err(ReviewError::AlreadyPaired {
            startup_id: s("S2"),
            juror_id: j("J2"),
        })
    );

    session.replace_startup(&s("S1"), &j("J1"), &s("S2")).unwrap();
    assert_eq!(selected(&session, "S2"), vec!["J1"]);
    assert_eq!(session.rows().len(), 2);
}

#[tokio::test]
async fn test_search_jurors_excludes_paired() {
    let session = draft().await;

    let all: Vec<_> = session
        .search_jurors(&s("S1"), "")
        .unwrap()
        .into_iter()
        .map(|c| c.juror_id.to_string())
        .collect();
    assert_eq!(all, vec!["J3"]);

    let by_name = session.search_jurors(&s("S2"), "ADA").unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].juror_id, j("J1"));

    assert!(session.search_jurors(&s("S2"), "grace").unwrap().is_empty());
    assert_eq!(
        session.search_jurors(&s("S9"), "").unwrap_err(),
        ReviewError::UnknownStartup(s("S9"))
    );
}

#[tokio::test]
async fn test_search_startups_for_juror() {
    let session = draft().await;

    let found = session.search_startups(&j("J3"), "").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].startup_id, s("S1"));

    assert_eq!(session.search_startups(&j("J1"), "pulse").unwrap().len(), 1);
    assert!(session.search_startups(&j("J1"), "ledger").unwrap().is_empty());
    assert_eq!(
        session.search_startups(&j("J9"), "").unwrap_err(),
        ReviewError::UnknownJuror(j("J9"))
    );
}

#[tokio::test]
async fn test_accepting_rows_locks_and_approves() {
    let mut session = draft().await;

    session.accept_row(&s("S1")).unwrap();
    assert_eq!(session.state(), ReviewState::Edited);
    assert_eq!(
        session.toggle_candidate(&s("S1"), &j("J3")),
        Err(ReviewError::RowLocked(s("S1")))
    );

    session.accept_row(&s("S2")).unwrap();
    assert_eq!(session.state(), ReviewState::Approved);
    assert!(matches!(
        session.toggle_candidate(&s("S2"), &j("J1")),
        Err(ReviewError::InvalidState {
            state: ReviewState::Approved,
            ..
        })
    ));

    session.reopen_row(&s("S1")).unwrap();
    assert_eq!(session.state(), ReviewState::Edited);
    assert!(session.toggle_candidate(&s("S1"), &j("J3")).unwrap());
}

#[tokio::test]
async fn test_partial_approval() {
    let mut session = draft().await;

    assert_eq!(session.approve(), Err(ReviewError::NothingApproved));

    session.accept_row(&s("S1")).unwrap();
    session.approve().unwrap();
    assert_eq!(session.state(), ReviewState::Approved);
    assert_eq!(
        session.approved_assignments(),
        vec![
            Assignment::new("S1", "J1", ROUND),
            Assignment::new("S1", "J2", ROUND),
        ]
    );
}

#[tokio::test]
async fn test_accept_all() {
    let mut session = draft().await;

    session.accept_all().unwrap();

    assert_eq!(session.state(), ReviewState::Approved);
    assert_eq!(session.approved_assignments().len(), 4);
    assert!(session.rows().iter().all(ReviewRow::is_accepted));
}

#[tokio::test]
async fn test_cancel_releases_everything() {
    let mut session = draft().await;
    session.toggle_candidate(&s("S1"), &j("J3")).unwrap();

    session.cancel().unwrap();

    assert_eq!(session.state(), ReviewState::Cancelled);
    assert_eq!(session.workload().total_proposed(), 0);
    assert!(session.approved_assignments().is_empty());
    assert!(matches!(
        session.toggle_candidate(&s("S1"), &j("J3")),
        Err(ReviewError::InvalidState { .. })
    ));
    assert!(session.cancel().is_err());
    assert!(session.reopen_row(&s("S1")).is_err());
}

#[test]
fn test_state_flags() {
    assert!(ReviewState::Draft.is_editable());
    assert!(ReviewState::Edited.is_editable());
    assert!(!ReviewState::Approved.is_editable());
    assert!(ReviewState::Committed.is_terminal());
    assert!(ReviewState::Cancelled.is_terminal());
    assert_eq!(ReviewState::Approved.to_string(), "approved");
}
