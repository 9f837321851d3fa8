//! Generation statistics.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Counters for one generation run.
///
/// # Example
///
/// ```
/// use juryforge_engine::GenerationStats;
///
/// let mut stats = GenerationStats::default();
/// stats.start();
/// stats.record_startup(4, 2);
/// stats.record_skip();
/// stats.record_ai_fallback();
///
/// assert_eq!(stats.startups_processed, 1);
/// assert_eq!(stats.candidates_scored, 4);
/// assert_eq!(stats.reservations, 2);
/// assert_eq!(stats.startups_skipped, 1);
/// assert_eq!(stats.ai_fallbacks, 1);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationStats {
    #[serde(skip)]
    start_time: Option<Instant>,
    #[serde(skip)]
    end_time: Option<Instant>,
    /// Startups for which a proposal was built.
    pub startups_processed: u64,
    /// Startups already fully staffed by persisted assignments.
    pub startups_skipped: u64,
    /// Score model evaluations.
    pub candidates_scored: u64,
    /// Tentative reservations made.
    pub reservations: u64,
    /// AI batch calls issued.
    pub ai_calls: u64,
    /// AI batch calls that failed or timed out.
    pub ai_fallbacks: u64,
    /// Breakdowns that used an AI estimate.
    pub ai_estimates_used: u64,
    /// Interest lookups that failed and counted as no interest.
    pub interest_failures: u64,
    /// Candidates left out because they would breach capacity.
    pub workload_rejections: u64,
}

impl GenerationStats {
    /// Marks the start of generation.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.end_time = None;
    }

    /// Marks the end of generation; `elapsed` stops advancing.
    pub fn finish(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Time from `start` to `finish`, or to now while running.
    pub fn elapsed(&self) -> Duration {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::default(),
        }
    }

    /// Records a processed startup.
    pub fn record_startup(&mut self, candidates: usize, reservations: usize) {
        self.startups_processed += 1;
        self.candidates_scored += candidates as u64;
        self.reservations += reservations as u64;
    }

    pub fn record_skip(&mut self) {
        self.startups_skipped += 1;
    }

    pub fn record_ai_call(&mut self) {
        self.ai_calls += 1;
    }

    pub fn record_ai_fallback(&mut self) {
        self.ai_fallbacks += 1;
    }

    pub fn record_ai_estimates(&mut self, used: usize) {
        self.ai_estimates_used += used as u64;
    }

    pub fn record_interest_failures(&mut self, failures: usize) {
        self.interest_failures += failures as u64;
    }

    pub fn record_workload_rejections(&mut self, rejections: usize) {
        self.workload_rejections += rejections as u64;
    }

    /// Candidates scored per second.
    pub fn candidates_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.candidates_scored as f64 / secs
        } else {
            0.0
        }
    }
}
