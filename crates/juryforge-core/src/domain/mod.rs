//! Domain model for juror assignment.
//!
//! Startups and jurors are read-only inputs for the duration of a run.
//! [`Assignment`] is the only entity the engine ever asks to persist.

mod assignment;
mod ids;
mod juror;
mod startup;


pub use assignment::Assignment;
pub use ids::{JurorId, StartupId};
pub use juror::Juror;
pub use startup::{Startup, StartupFilter};

/// Returns the first entry of `left` that also appears in `right`,
/// compared case-insensitively and ignoring surrounding whitespace.
///
/// # Examples
///
/// ```
/// use juryforge_core::domain::first_overlap;
///
/// let startup = vec!["Fintech".to_string(), "AI".to_string()];
/// let juror = vec!["ai ".to_string()];
/// assert_eq!(first_overlap(&startup, &juror), Some("AI"));
/// ```
pub fn first_overlap<'a>(left: &'a [String], right: &[String]) -> Option<&'a str> {
    left.iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty() && right.iter().any(|r| r.trim().eq_ignore_ascii_case(l)))
}
