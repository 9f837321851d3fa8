//! Score types for ranking candidate jurors
//!
//! A [`MatchScore`] orders candidates lexicographically: capacity
//! violations first, weighted credit second. A juror whose reservation
//! would breach capacity therefore never outranks one that would not,
//! whatever their raw credit.

mod match_score;

#[cfg(test)]
mod tests;

pub use match_score::{MatchScore, ScoreParseError};

/// Score level representing different ranking priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreLevel {
    /// Capacity level - a reservation would breach a workload limit
    Hard,
    /// Credit level - weighted compatibility minus load penalty
    Soft,
}
