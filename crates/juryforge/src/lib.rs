//! JuryForge - Explainable Juror Assignment in Rust
//!
//! Generate proposals, review them, commit the approved subset.
//!
//! # Example
//!
//! ```rust
//! use juryforge::prelude::*;
//!
//! // Scores rank capacity first, then credit
//! let within = MatchScore::from_credit(0, 12.5);
//! let over = MatchScore::from_credit(1, 95.0);
//! assert!(within > over);
//! ```

// Domain
pub use juryforge_core::{
    Assignment, Juror, JurorId, MatchScore, ProviderError, RepositoryError, Startup,
    StartupFilter, StartupId,
};

// Collaborator ports
pub use juryforge_core::{
    AiScore, AiScoringProvider, AssignmentRepository, InterestSignalProvider, JurorRepository,
    StartupRepository,
};

// Configuration
pub use juryforge_config::{
    ConfigError, CriterionWeights, FileRoundConfigStore, RoundConfig, RoundConfigSpec,
    RoundConfigStore, ScoringThreads, ScoringTuning, StartupOrder, StaticRoundConfigStore,
};

// Scoring and explanations
pub use juryforge_scoring::{
    CandidateOutcome, KeywordOverlapMatcher, ProposalExplanation, RejectionReason,
    ScoreBreakdown, ScoreModel, ThesisMatcher,
};

// Generation, review and commit
pub use juryforge_engine::{
    AssignmentEngine, CommitError, CommitResult, EngineError, GenerateError, GenerationOutcome,
    GenerationStats, GenerationWarning, InMemoryRepository, Proposal, ReviewError, ReviewSession,
    ReviewState, WorkloadDelta, WorkloadEntry,
};

/// Colored console output for engine events.
#[cfg(feature = "console")]
pub use juryforge_console as console;

pub mod prelude {
    pub use super::{Assignment, Juror, JurorId, MatchScore, Startup, StartupFilter, StartupId};
    pub use super::{RoundConfig, RoundConfigSpec, RoundConfigStore, StaticRoundConfigStore};
    pub use super::{ScoreBreakdown, ThesisMatcher};
    pub use super::{
        AssignmentEngine, EngineError, GenerationOutcome, InMemoryRepository, ReviewSession,
        ReviewState,
    };
}
