//! MatchScore - Two-level ranking key with capacity and credit levels

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::ScoreLevel;

/// Fixed-point scale of the soft level (hundredths of a credit point).
const SOFT_SCALE: f64 = 100.0;

/// A ranking key with separate hard (capacity) and soft (credit) levels.
///
/// When comparing scores:
/// 1. Hard scores are compared first
/// 2. Soft scores are only compared when hard scores are equal
///
/// The soft level is stored in hundredths so that equal credit compares
/// equal regardless of floating-point noise below that resolution.
///
/// # Examples
///
/// ```
/// use juryforge_core::MatchScore;
///
/// let over_limit = MatchScore::from_credit(1, 95.0);   // would breach capacity
/// let within = MatchScore::from_credit(0, 12.5);       // fits, weak match
///
/// // Fitting within capacity always ranks higher
/// assert!(within > over_limit);
///
/// let better = MatchScore::from_credit(0, 40.0);
/// assert!(better > within);
/// assert_eq!(better.to_string(), "0hard/40.00soft");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MatchScore {
    hard: i64,
    soft: i64,
}

impl MatchScore {
    /// The zero score.
    pub const ZERO: MatchScore = MatchScore { hard: 0, soft: 0 };

    /// Creates a score from raw level values (soft in hundredths).
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        MatchScore { hard, soft }
    }

    /// Creates a score from a capacity violation count and a credit total.
    pub fn from_credit(capacity_violation: u32, credit: f64) -> Self {
        let soft = if credit.is_finite() {
            (credit * SOFT_SCALE).round() as i64
        } else {
            i64::MIN
        };
        MatchScore {
            hard: -i64::from(capacity_violation),
            soft,
        }
    }

    /// Returns the hard (capacity) level.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the soft level in hundredths.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Returns the soft level as credit points.
    pub fn credit(&self) -> f64 {
        self.soft as f64 / SOFT_SCALE
    }

    /// Returns true if taking this candidate keeps the juror within capacity.
    #[inline]
    pub const fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    /// Returns the level values, highest priority first.
    pub fn to_level_numbers(&self) -> [i64; 2] {
        [self.hard, self.soft]
    }

    /// Returns the semantic label for the level at `index`.
    ///
    /// # Panics
    /// Panics if `index >= 2`.
    pub fn level_label(index: usize) -> ScoreLevel {
        match index {
            0 => ScoreLevel::Hard,
            1 => ScoreLevel::Soft,
            _ => panic!("MatchScore has 2 levels, got index {}", index),
        }
    }

    /// Parses the `"<hard>hard/<soft>soft"` form produced by `Display`.
    pub fn parse(s: &str) -> Result<Self, ScoreParseError> {
        let s = s.trim();
        let (hard_part, soft_part) = s.split_once('/').ok_or_else(|| ScoreParseError {
            message: format!("Invalid MatchScore format '{}': expected 'Xhard/Ysoft'", s),
        })?;

        let hard_str = hard_part
            .trim()
            .strip_suffix("hard")
            .ok_or_else(|| ScoreParseError {
                message: format!("hard part '{}' must end with 'hard'", hard_part),
            })?;
        let soft_str = soft_part
            .trim()
            .strip_suffix("soft")
            .ok_or_else(|| ScoreParseError {
                message: format!("soft part '{}' must end with 'soft'", soft_part),
            })?;

        let hard = hard_str.parse::<i64>().map_err(|e| ScoreParseError {
            message: format!("Invalid hard score '{}': {}", hard_str, e),
        })?;
        let credit = soft_str.parse::<f64>().map_err(|e| ScoreParseError {
            message: format!("Invalid soft score '{}': {}", soft_str, e),
        })?;

        Ok(MatchScore::of(hard, (credit * SOFT_SCALE).round() as i64))
    }
}

impl Ord for MatchScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.cmp(&other.hard) {
            Ordering::Equal => self.soft.cmp(&other.soft),
            other => other,
        }
    }
}

impl PartialOrd for MatchScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for MatchScore {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        MatchScore::of(self.hard + other.hard, self.soft + other.soft)
    }
}

impl Sub for MatchScore {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        MatchScore::of(self.hard - other.hard, self.soft - other.soft)
    }
}

impl Neg for MatchScore {
    type Output = Self;

    fn neg(self) -> Self {
        MatchScore::of(-self.hard, -self.soft)
    }
}

impl fmt::Debug for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{:.2}soft", self.hard, self.credit())
    }
}

/// Error when parsing a score from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreParseError {
    pub message: String,
}

impl fmt::Display for ScoreParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score parse error: {}", self.message)
    }
}

impl std::error::Error for ScoreParseError {}
