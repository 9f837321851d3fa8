//! Generate, review and commit through the engine facade.

use std::sync::Arc;

use juryforge_config::{ConfigError, StaticRoundConfigStore};
use juryforge_core::{Assignment, AssignmentRepository, RepositoryError, StartupFilter};
use juryforge_engine::{
    AssignmentEngine, CommitError, EngineError, GenerateError, InMemoryRepository, ReviewState,
};
use juryforge_test::repository::{FailingAssignmentRepository, UnavailableRepository};
use juryforge_test::scenario::{two_startup_scenario, ROUND};

fn seeded_repo() -> Arc<InMemoryRepository> {
    let scenario = two_startup_scenario();
    Arc::new(
        InMemoryRepository::new()
            .with_startups(scenario.startups)
            .with_jurors(scenario.jurors),
    )
}

fn engine_over(repo: &Arc<InMemoryRepository>) -> AssignmentEngine {
    let store = StaticRoundConfigStore::new().with_config(two_startup_scenario().config);
    AssignmentEngine::new(repo.clone(), repo.clone(), repo.clone(), Arc::new(store))
}

#[tokio::test]
async fn test_full_lifecycle_commits_approved_rows() {
    let repo = seeded_repo();
    let engine = engine_over(&repo);

    let outcome = engine.generate_proposals(ROUND, None).await.unwrap();
    assert_eq!(outcome.proposals.len(), 2);
    // Nothing is written before commit
    assert!(repo.assignments().is_empty());

    let mut session = engine.review(outcome);
    session.accept_all().unwrap();
    let result = engine.commit(&mut session).await.unwrap();

    assert_eq!(result.round_name, ROUND);
    assert_eq!(result.len(), 4);
    assert_eq!(session.state(), ReviewState::Committed);
    assert_eq!(repo.list_assignments(ROUND).await.unwrap().len(), 4);

    let again = engine.commit(&mut session).await.unwrap_err();
    assert!(matches!(
        again,
        EngineError::Commit(CommitError::InvalidState(ReviewState::Committed))
    ));
}

#[tokio::test]
async fn test_committed_pairs_fill_later_runs() {
    let repo = seeded_repo();
    let engine = engine_over(&repo);

    let mut session = engine.review(engine.generate_proposals(ROUND, None).await.unwrap());
    session.accept_all().unwrap();
    engine.commit(&mut session).await.unwrap();

    let rerun = engine.generate_proposals(ROUND, None).await.unwrap();
    assert!(rerun.proposals.is_empty());
    assert_eq!(rerun.stats.startups_skipped, 2);
}

#[tokio::test]
async fn test_partial_approval_commits_accepted_rows_only() {
    let repo = seeded_repo();
    let engine = engine_over(&repo);

    let mut session = engine.review(engine.generate_proposals(ROUND, None).await.unwrap());
    session.accept_row(&"S2".into()).unwrap();
    session.approve().unwrap();
    engine.commit(&mut session).await.unwrap();

    assert_eq!(
        repo.assignments(),
        vec![
            Assignment::new("S2", "J3", ROUND),
            Assignment::new("S2", "J2", ROUND),
        ]
    );
}

#[tokio::test]
async fn test_conflicting_pair_rejects_whole_batch() {
    let repo = seeded_repo();
    let engine = engine_over(&repo);

    let mut session = engine.review(engine.generate_proposals(ROUND, None).await.unwrap());
    // Someone else stores S1/J1 while the session is open
    repo.insert_assignments(&[Assignment::new("S1", "J1", ROUND)])
        .await
        .unwrap();
    session.accept_all().unwrap();

    let err = engine.commit(&mut session).await.unwrap_err();
    match err {
        EngineError::Commit(CommitError::Conflict { duplicates }) => {
            assert_eq!(duplicates, vec![Assignment::new("S1", "J1", ROUND)]);
        }
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(repo.assignments().len(), 1);
    assert_eq!(session.state(), ReviewState::Approved);
}

#[tokio::test]
async fn test_persistence_failure_is_not_retried() {
    let repo = seeded_repo();
    let failing = Arc::new(FailingAssignmentRepository::new());
    let store = StaticRoundConfigStore::new().with_config(two_startup_scenario().config);
    let engine = AssignmentEngine::new(repo.clone(), repo.clone(), failing.clone(), Arc::new(store));

    let mut session = engine.review(engine.generate_proposals(ROUND, None).await.unwrap());
    session.accept_all().unwrap();
    let err = engine.commit(&mut session).await.unwrap_err();

    assert!(matches!(
        err,
        EngineError::Commit(CommitError::Persistence(RepositoryError::Write(_)))
    ));
    assert_eq!(failing.attempts().len(), 1);
    assert_eq!(session.state(), ReviewState::Approved);
}

#[tokio::test]
async fn test_cancelled_session_cannot_commit() {
    let repo = seeded_repo();
    let engine = engine_over(&repo);

    let mut session = engine.review(engine.generate_proposals(ROUND, None).await.unwrap());
    session.cancel().unwrap();

    let err = engine.commit(&mut session).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Commit(CommitError::InvalidState(ReviewState::Cancelled))
    ));
    assert!(repo.assignments().is_empty());
}

#[tokio::test]
async fn test_unknown_round_fails_before_loading() {
    let repo = seeded_repo();
    let engine = engine_over(&repo);

    let err = engine.generate_proposals("finals", None).await.unwrap_err();
    assert!(matches!(err, EngineError::Config(ConfigError::UnknownRound(ref r)) if r == "finals"));
}

#[tokio::test]
async fn test_unavailable_repository_surfaces() {
    let store = StaticRoundConfigStore::new().with_config(two_startup_scenario().config);
    let down = Arc::new(UnavailableRepository);
    let engine = AssignmentEngine::new(down.clone(), down.clone(), down, Arc::new(store));

    let err = engine.generate_proposals(ROUND, None).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Repository(RepositoryError::Unavailable(_))
    ));
}

#[tokio::test]
async fn test_cancel_request_stops_generation() {
    let repo = seeded_repo();
    let engine = engine_over(&repo);

    engine.cancel();
    let err = engine.generate_proposals(ROUND, None).await.unwrap_err();
    assert!(matches!(err, EngineError::Generate(GenerateError::Cancelled)));

    engine.reset_cancel();
    assert!(engine.generate_proposals(ROUND, None).await.is_ok());
    assert!(repo.assignments().is_empty());
}

#[tokio::test]
async fn test_stage_filter_limits_startups() {
    let repo = seeded_repo();
    let engine = engine_over(&repo);

    let filter = StartupFilter::for_round(ROUND).with_stages(["seed"]);
    let outcome = engine.generate_proposals(ROUND, Some(filter)).await.unwrap();

    assert_eq!(outcome.proposals.len(), 1);
    assert_eq!(outcome.proposals[0].startup_id.as_str(), "S1");
}
