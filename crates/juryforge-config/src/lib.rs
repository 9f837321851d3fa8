//! Configuration system for JuryForge.
//!
//! Load round configuration from TOML or YAML to control criterion weights,
//! proposal sizes and scoring heuristics without code changes. Every
//! [`RoundConfig`] is validated on construction: the five criterion weights
//! must sum to 100 (±0.01) before any scoring may use them.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use juryforge_config::RoundConfig;
//! use std::time::Duration;
//!
//! let config = RoundConfig::from_toml_str(r#"
//!     round_name = "screening"
//!     vertical_weight = 35
//!     stage_weight = 20
//!     region_weight = 15
//!     thesis_weight = 20
//!     load_penalty_weight = 10
//!     target_jurors_per_startup = 2
//!
//!     [tuning]
//!     ai_timeout_ms = 1500
//! "#).unwrap();
//!
//! assert_eq!(config.round_name(), "screening");
//! assert_eq!(config.target_jurors_per_startup(), 2);
//! assert_eq!(config.tuning().ai_timeout(), Duration::from_millis(1500));
//! ```
//!
//! Weights that do not sum to 100 are rejected:
//!
//! ```
//! use juryforge_config::{ConfigError, RoundConfigSpec};
//!
//! let err = RoundConfigSpec::new("screening")
//!     .with_weights(50.0, 20.0, 20.0, 20.0, 10.0)
//!     .build()
//!     .unwrap_err();
//! assert!(matches!(err, ConfigError::WeightSum { .. }));
//! ```

mod store;


use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use store::{FileRoundConfigStore, RoundConfigStore, StaticRoundConfigStore};

/// Required sum of the five criterion weights.
pub const WEIGHT_TOTAL: f64 = 100.0;

/// Accepted deviation from [`WEIGHT_TOTAL`].
pub const WEIGHT_TOLERANCE: f64 = 0.01;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("criterion weights sum to {sum}, expected 100")]
    WeightSum { sum: f64 },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No configuration for round '{0}'")]
    UnknownRound(String),
}

/// Unvalidated round configuration, as written in configuration files.
///
/// Turn it into a [`RoundConfig`] with [`build`](Self::build) or `TryFrom`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RoundConfigSpec {
    /// Round this configuration applies to.
    #[serde(default)]
    pub round_name: String,

    /// Credit for a vertical match.
    #[serde(default = "defaults::vertical_weight")]
    pub vertical_weight: f64,

    /// Credit for a stage match.
    #[serde(default = "defaults::stage_weight")]
    pub stage_weight: f64,

    /// Credit for a region match.
    #[serde(default = "defaults::region_weight")]
    pub region_weight: f64,

    /// Credit for a full thesis keyword match.
    #[serde(default = "defaults::thesis_weight")]
    pub thesis_weight: f64,

    /// Penalty for a juror loaded up to their limit.
    #[serde(default = "defaults::load_penalty_weight")]
    pub load_penalty_weight: f64,

    /// Number of jurors each startup should receive.
    #[serde(default = "defaults::target_jurors_per_startup")]
    pub target_jurors_per_startup: usize,

    /// Number of non-selected alternates exposed per proposal.
    #[serde(default = "defaults::top_k_per_juror")]
    pub top_k_per_juror: usize,

    /// Whether to consult the AI scoring provider.
    #[serde(default)]
    pub use_ai_enhancement: bool,

    /// Seed for reproducible runs.
    #[serde(default)]
    pub deterministic_seed: Option<u64>,

    /// Order in which startups are processed.
    #[serde(default)]
    pub startup_order: StartupOrder,

    /// Parallelism of candidate scoring within one startup.
    #[serde(default)]
    pub scoring_threads: ScoringThreads,

    /// Heuristic constants.
    #[serde(default)]
    pub tuning: ScoringTuning,
}

mod defaults {
    pub(super) fn vertical_weight() -> f64 {
        30.0
    }
    pub(super) fn stage_weight() -> f64 {
        20.0
    }
    pub(super) fn region_weight() -> f64 {
        20.0
    }
    pub(super) fn thesis_weight() -> f64 {
        20.0
    }
    pub(super) fn load_penalty_weight() -> f64 {
        10.0
    }
    pub(super) fn target_jurors_per_startup() -> usize {
        3
    }
    pub(super) fn top_k_per_juror() -> usize {
        5
    }
    pub(super) fn ai_blend_ratio() -> f64 {
        0.7
    }
    pub(super) fn ai_timeout_ms() -> u64 {
        5_000
    }
    pub(super) fn interest_bonus() -> f64 {
        10.0
    }
    pub(super) fn interest_timeout_ms() -> u64 {
        1_000
    }
    pub(super) fn overload_tolerance() -> u32 {
        1
    }
    pub(super) fn limit_violation_penalty() -> f64 {
        1_000.0
    }
}

impl Default for RoundConfigSpec {
    fn default() -> Self {
        Self {
            round_name: String::new(),
            vertical_weight: defaults::vertical_weight(),
            stage_weight: defaults::stage_weight(),
            region_weight: defaults::region_weight(),
            thesis_weight: defaults::thesis_weight(),
            load_penalty_weight: defaults::load_penalty_weight(),
            target_jurors_per_startup: defaults::target_jurors_per_startup(),
            top_k_per_juror: defaults::top_k_per_juror(),
            use_ai_enhancement: false,
            deterministic_seed: None,
            startup_order: StartupOrder::default(),
            scoring_threads: ScoringThreads::default(),
            tuning: ScoringTuning::default(),
        }
    }
}

impl RoundConfigSpec {
    /// Creates a default configuration for `round_name`.
    pub fn new(round_name: impl Into<String>) -> Self {
        Self {
            round_name: round_name.into(),
            ..Self::default()
        }
    }

    /// Sets the five criterion weights.
    pub fn with_weights(
        mut self,
        vertical: f64,
        stage: f64,
        region: f64,
        thesis: f64,
        load_penalty: f64,
    ) -> Self {
        self.vertical_weight = vertical;
        self.stage_weight = stage;
        self.region_weight = region;
        self.thesis_weight = thesis;
        self.load_penalty_weight = load_penalty;
        self
    }

    pub fn with_target_jurors_per_startup(mut self, target: usize) -> Self {
        self.target_jurors_per_startup = target;
        self
    }

    pub fn with_top_k_per_juror(mut self, top_k: usize) -> Self {
        self.top_k_per_juror = top_k;
        self
    }

    pub fn with_ai_enhancement(mut self, enabled: bool) -> Self {
        self.use_ai_enhancement = enabled;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.deterministic_seed = Some(seed);
        self
    }

    pub fn with_startup_order(mut self, order: StartupOrder) -> Self {
        self.startup_order = order;
        self
    }

    pub fn with_scoring_threads(mut self, threads: ScoringThreads) -> Self {
        self.scoring_threads = threads;
        self
    }

    pub fn with_tuning(mut self, tuning: ScoringTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Returns the sum of the five criterion weights.
    pub fn weight_sum(&self) -> f64 {
        self.vertical_weight
            + self.stage_weight
            + self.region_weight
            + self.thesis_weight
            + self.load_penalty_weight
    }

    /// Validates and freezes this configuration.
    pub fn build(self) -> Result<RoundConfig, ConfigError> {
        RoundConfig::try_from(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.round_name.trim().is_empty() {
            return Err(ConfigError::Invalid("round_name must not be empty".into()));
        }

        let weights = [
            ("vertical_weight", self.vertical_weight),
            ("stage_weight", self.stage_weight),
            ("region_weight", self.region_weight),
            ("thesis_weight", self.thesis_weight),
            ("load_penalty_weight", self.load_penalty_weight),
        ];
        for (name, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        let sum = self.weight_sum();
        if (sum - WEIGHT_TOTAL).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }

        if self.target_jurors_per_startup == 0 {
            return Err(ConfigError::Invalid(
                "target_jurors_per_startup must be at least 1".into(),
            ));
        }

        if self.startup_order == StartupOrder::SeededShuffle && self.deterministic_seed.is_none() {
            return Err(ConfigError::Invalid(
                "startup_order = \"seeded_shuffle\" requires deterministic_seed".into(),
            ));
        }

        if self.scoring_threads == ScoringThreads::Count(0) {
            return Err(ConfigError::Invalid(
                "scoring_threads count must be at least 1".into(),
            ));
        }

        self.tuning.validate()
    }
}

/// Validated round configuration.
///
/// Read-only once constructed; the only way to obtain one is through
/// validation, so the weight-sum invariant holds for every instance.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "RoundConfigSpec", into = "RoundConfigSpec")]
pub struct RoundConfig {
    spec: RoundConfigSpec,
}

impl TryFrom<RoundConfigSpec> for RoundConfig {
    type Error = ConfigError;

    fn try_from(spec: RoundConfigSpec) -> Result<Self, Self::Error> {
        spec.validate()?;
        Ok(Self { spec })
    }
}

impl From<RoundConfig> for RoundConfigSpec {
    fn from(config: RoundConfig) -> Self {
        config.spec
    }
}

impl RoundConfig {
    /// Loads configuration from a file, choosing YAML for `.yaml`/`.yml`
    /// extensions and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read, doesn't parse, or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let spec: RoundConfigSpec = toml::from_str(s)?;
        spec.build()
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let spec: RoundConfigSpec = serde_yaml::from_str(s)?;
        spec.build()
    }

    /// Returns the unvalidated form.
    pub fn spec(&self) -> &RoundConfigSpec {
        &self.spec
    }

    pub fn round_name(&self) -> &str {
        &self.spec.round_name
    }

    /// Returns the criterion weights.
    pub fn weights(&self) -> CriterionWeights {
        CriterionWeights {
            vertical: self.spec.vertical_weight,
            stage: self.spec.stage_weight,
            region: self.spec.region_weight,
            thesis: self.spec.thesis_weight,
            load_penalty: self.spec.load_penalty_weight,
        }
    }

    pub fn target_jurors_per_startup(&self) -> usize {
        self.spec.target_jurors_per_startup
    }

    pub fn top_k_per_juror(&self) -> usize {
        self.spec.top_k_per_juror
    }

    pub fn use_ai_enhancement(&self) -> bool {
        self.spec.use_ai_enhancement
    }

    pub fn deterministic_seed(&self) -> Option<u64> {
        self.spec.deterministic_seed
    }

    pub fn startup_order(&self) -> StartupOrder {
        self.spec.startup_order
    }

    pub fn scoring_threads(&self) -> ScoringThreads {
        self.spec.scoring_threads
    }

    pub fn tuning(&self) -> &ScoringTuning {
        &self.spec.tuning
    }
}

/// The five criterion weights of a validated configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionWeights {
    pub vertical: f64,
    pub stage: f64,
    pub region: f64,
    pub thesis: f64,
    pub load_penalty: f64,
}

impl CriterionWeights {
    /// Returns the largest credit the rule-based criteria can award.
    pub fn max_credit(&self) -> f64 {
        self.vertical + self.stage + self.region + self.thesis
    }
}

/// Order in which startups are processed.
///
/// Later startups see the reservations made for earlier ones, so the
/// order shapes the plan; every variant is reproducible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupOrder {
    /// Order returned by the startup repository.
    #[default]
    Input,

    /// Ascending startup id.
    ById,

    /// Shuffled with `deterministic_seed`.
    SeededShuffle,
}

/// Candidate scoring thread count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringThreads {
    /// Use the global rayon pool.
    #[default]
    Auto,

    /// Score candidates on the calling thread.
    None,

    /// Dedicated pool with a specific number of threads.
    Count(usize),
}

/// Heuristic constants used by the score model.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoringTuning {
    /// Share of the blended credit taken from the AI estimate.
    #[serde(default = "defaults::ai_blend_ratio")]
    pub ai_blend_ratio: f64,

    /// Upper bound on one AI batch call.
    #[serde(default = "defaults::ai_timeout_ms")]
    pub ai_timeout_ms: u64,

    /// AI estimates below this confidence are ignored.
    #[serde(default)]
    pub ai_min_confidence: f64,

    /// Credit added when a juror flagged explicit interest.
    #[serde(default = "defaults::interest_bonus")]
    pub interest_bonus: f64,

    /// Upper bound on one interest lookup.
    #[serde(default = "defaults::interest_timeout_ms")]
    pub interest_timeout_ms: u64,

    /// Assignments above the shared target tolerated before a juror
    /// without a custom limit counts as overloaded.
    #[serde(default = "defaults::overload_tolerance")]
    pub overload_tolerance: u32,

    /// Penalty per unit of capacity violation.
    #[serde(default = "defaults::limit_violation_penalty")]
    pub limit_violation_penalty: f64,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            ai_blend_ratio: defaults::ai_blend_ratio(),
            ai_timeout_ms: defaults::ai_timeout_ms(),
            ai_min_confidence: 0.0,
            interest_bonus: defaults::interest_bonus(),
            interest_timeout_ms: defaults::interest_timeout_ms(),
            overload_tolerance: defaults::overload_tolerance(),
            limit_violation_penalty: defaults::limit_violation_penalty(),
        }
    }
}

impl ScoringTuning {
    /// Returns the AI call timeout as a Duration.
    pub fn ai_timeout(&self) -> Duration {
        Duration::from_millis(self.ai_timeout_ms)
    }

    pub fn interest_timeout(&self) -> Duration {
        Duration::from_millis(self.interest_timeout_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.ai_blend_ratio) {
            return Err(ConfigError::Invalid(format!(
                "tuning.ai_blend_ratio must be within 0..=1, got {}",
                self.ai_blend_ratio
            )));
        }
        if self.ai_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "tuning.ai_timeout_ms must be positive".into(),
            ));
        }
        if self.interest_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "tuning.interest_timeout_ms must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.ai_min_confidence) {
            return Err(ConfigError::Invalid(format!(
                "tuning.ai_min_confidence must be within 0..=1, got {}",
                self.ai_min_confidence
            )));
        }
        if !self.interest_bonus.is_finite() || self.interest_bonus < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tuning.interest_bonus must be a non-negative number, got {}",
                self.interest_bonus
            )));
        }
        // Blended credit is bounded by max(rule credit, AI credit) <= WEIGHT_TOTAL + bonus.
        let ceiling = WEIGHT_TOTAL + self.interest_bonus;
        if !self.limit_violation_penalty.is_finite() || self.limit_violation_penalty <= ceiling {
            return Err(ConfigError::Invalid(format!(
                "tuning.limit_violation_penalty must exceed {}, got {}",
                ceiling, self.limit_violation_penalty
            )));
        }
        Ok(())
    }
}
