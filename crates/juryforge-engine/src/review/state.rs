//! Review session lifecycle.

use std::fmt;

use serde::{Deserialize, Serialize};

/// State of a [`ReviewSession`](super::ReviewSession).
///
/// ```text
/// Draft -> Edited -> Approved -> Committed
///   |        |  ^        |
///   |        |  +--------+  (reopen)
///   +--------+-----------+-> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    /// Proposals as generated, untouched.
    Draft,
    /// At least one selection or row changed.
    Edited,
    /// An approved subset is ready to commit.
    Approved,
    /// The approved subset was persisted.
    Committed,
    /// Reservations were released without persisting anything.
    Cancelled,
}

impl ReviewState {
    /// Selections may change.
    pub fn is_editable(self) -> bool {
        matches!(self, ReviewState::Draft | ReviewState::Edited)
    }

    /// No further operation is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, ReviewState::Committed | ReviewState::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReviewState::Draft => "draft",
            ReviewState::Edited => "edited",
            ReviewState::Approved => "approved",
            ReviewState::Committed => "committed",
            ReviewState::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReviewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
