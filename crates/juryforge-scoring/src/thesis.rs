//! Thesis similarity between a juror and a startup.

use std::collections::HashSet;
use std::fmt::Debug;

use juryforge_core::{Juror, Startup};

/// Estimates how well a startup fits a juror's investment thesis.
///
/// Implementations return a similarity in `0.0..=1.0`; the score model
/// clamps anything outside that range.
pub trait ThesisMatcher: Send + Sync + Debug {
    fn similarity(&self, juror: &Juror, startup: &Startup) -> f64;
}

/// Fraction of the juror's thesis keywords found in the startup's
/// description.
///
/// A multi-word keyword matches when all of its words appear. Matching is
/// case-insensitive; duplicate and blank keywords are ignored.
///
/// # Examples
///
/// ```
/// use juryforge_core::{Juror, Startup};
/// use juryforge_scoring::{KeywordOverlapMatcher, ThesisMatcher};
///
/// let juror = Juror::new("J1", "Ada").with_thesis_keywords(["payments", "open banking", "B2B"]);
/// let startup = Startup::new("S1", "Ledgerly")
///     .with_description("Open-banking payments rails for B2B marketplaces");
///
/// let similarity = KeywordOverlapMatcher.similarity(&juror, &startup);
/// assert_eq!(similarity, 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordOverlapMatcher;

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

impl ThesisMatcher for KeywordOverlapMatcher {
    fn similarity(&self, juror: &Juror, startup: &Startup) -> f64 {
        let mut keywords: Vec<Vec<String>> = juror
            .thesis_keywords
            .iter()
            .map(|k| words(k).collect::<Vec<_>>())
            .filter(|k| !k.is_empty())
            .collect();
        keywords.sort();
        keywords.dedup();
        if keywords.is_empty() {
            return 0.0;
        }

        let description: HashSet<String> = words(&startup.description).collect();
        let matched = keywords
            .iter()
            .filter(|k| k.iter().all(|w| description.contains(w)))
            .count();

        matched as f64 / keywords.len() as f64
    }
}
