//! JuryForge Core - Core types and traits for juror assignment
//!
//! This crate provides the fundamental abstractions for JuryForge:
//! - Domain entities (startups, jurors, persisted assignments)
//! - The lexicographic [`MatchScore`] used to rank candidates
//! - Port traits for the external collaborators the engine consumes
//! - Collaborator error types

pub mod domain;
pub mod error;
pub mod ports;
pub mod score;

pub use domain::{Assignment, Juror, JurorId, Startup, StartupFilter, StartupId};
pub use error::{ProviderError, RepositoryError};
pub use ports::{
    AiScore, AiScoringProvider, AssignmentRepository, InterestSignalProvider, JurorRepository,
    StartupRepository,
};
pub use score::{MatchScore, ScoreLevel, ScoreParseError};
