//! Screening round demo: generate, auto-approve, commit to memory.
//!
//! Run with `RUST_LOG=juryforge_engine=debug` to see one line per startup.

mod data;
mod providers;

use std::path::PathBuf;
use std::sync::Arc;

use juryforge::{AssignmentEngine, EngineError, FileRoundConfigStore, InMemoryRepository};

use providers::{FlaggedInterest, KeywordEstimator};

const ROUND: &str = "screening";

#[tokio::main]
async fn main() -> Result<(), EngineError> {
    juryforge::console::init();

    let rounds = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("rounds");
    let repo = Arc::new(
        InMemoryRepository::new()
            .with_startups(data::startups())
            .with_jurors(data::jurors()),
    );

    let engine = AssignmentEngine::new(
        repo.clone(),
        repo.clone(),
        repo.clone(),
        Arc::new(FileRoundConfigStore::new(rounds)),
    )
    .with_ai_provider(Arc::new(KeywordEstimator))
    .with_interest_provider(Arc::new(FlaggedInterest::new(&[
        ("J06", "S04"),
        ("J04", "S03"),
    ])));

    let outcome = engine.generate_proposals(ROUND, None).await?;
    for warning in &outcome.warnings {
        println!("warning: {}", warning);
    }
    for proposal in &outcome.proposals {
        println!("{}", proposal.explanation.describe());
    }

    let mut session = engine.review(outcome);
    println!("Workload after generation:");
    for entry in session.workload_snapshot() {
        println!(
            "  {} {}/{}{}",
            entry.juror_id,
            entry.total_assignments(),
            entry.effective_limit,
            if entry.exceeds_limit { "  over limit" } else { "" }
        );
    }

    session.accept_all()?;
    let result = engine.commit(&mut session).await?;
    println!(
        "\nCommitted {} assignments for {}",
        result.len(),
        result.round_name
    );

    Ok(())
}
