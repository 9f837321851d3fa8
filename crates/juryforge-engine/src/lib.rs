//! JuryForge Engine
//!
//! This crate turns a round's startups and juror pool into reviewed,
//! persisted assignments:
//! - Workload tracking with confirmed and tentative load
//! - Greedy, explained proposal generation with optional AI and interest signals
//! - Review sessions for editing, accepting and cancelling proposals
//! - All-or-nothing commit of the approved subset
//! - The [`AssignmentEngine`] facade and in-memory repositories

pub mod ai;
pub mod commit;
pub mod engine;
pub mod generator;
pub mod interest;
pub mod memory;
pub mod review;
pub mod stats;
pub mod workload;

pub use ai::{AiEnhancer, AiOutcome};
pub use commit::{AssignmentCommitter, CommitError, CommitResult};
pub use engine::{AssignmentEngine, EngineError};
pub use generator::{
    CandidatePool, GenerateError, GenerationOutcome, GenerationWarning, Proposal,
    ProposalGenerator, ProposedCandidate,
};
pub use interest::{InterestLookup, InterestSignals};
pub use memory::InMemoryRepository;
pub use review::{
    EntryOrigin, ReviewEntry, ReviewError, ReviewRow, ReviewSession, ReviewState, StartupMatch,
    WorkloadDelta,
};
pub use stats::GenerationStats;
pub use workload::{WorkloadEntry, WorkloadTracker};
