//! Configuration stores resolving a round name to its [`RoundConfig`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{ConfigError, RoundConfig, RoundConfigSpec};

/// Source of validated round configurations.
#[async_trait]
pub trait RoundConfigStore: Send + Sync {
    async fn round_config(&self, round_name: &str) -> Result<RoundConfig, ConfigError>;
}

/// Reads `<dir>/<round>.toml`, falling back to `<round>.yaml` and `<round>.yml`.
///
/// A file that omits `round_name` takes the name it was looked up by; a file
/// naming a different round is rejected.
#[derive(Debug, Clone)]
pub struct FileRoundConfigStore {
    dir: PathBuf,
}

impl FileRoundConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_spec(&self, round_name: &str) -> Result<RoundConfigSpec, ConfigError> {
        for ext in ["toml", "yaml", "yml"] {
            let path = self.dir.join(format!("{}.{}", round_name, ext));
            let contents = match tokio::fs::read_to_string(&path).await {
                Ok(contents) => contents,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            return if ext == "toml" {
                Ok(toml::from_str(&contents)?)
            } else {
                Ok(serde_yaml::from_str(&contents)?)
            };
        }
        Err(ConfigError::UnknownRound(round_name.to_string()))
    }
}

#[async_trait]
impl RoundConfigStore for FileRoundConfigStore {
    async fn round_config(&self, round_name: &str) -> Result<RoundConfig, ConfigError> {
        if round_name.is_empty() || round_name.contains(['/', '\\']) || round_name.contains("..") {
            return Err(ConfigError::Invalid(format!(
                "'{}' is not a valid round name",
                round_name
            )));
        }

        let mut spec = self.read_spec(round_name).await?;
        if spec.round_name.is_empty() {
            spec.round_name = round_name.to_string();
        } else if spec.round_name != round_name {
            return Err(ConfigError::Invalid(format!(
                "file for round '{}' declares round_name '{}'",
                round_name, spec.round_name
            )));
        }
        spec.build()
    }
}

/// In-memory store of already validated configurations.
#[derive(Debug, Clone, Default)]
pub struct StaticRoundConfigStore {
    configs: HashMap<String, RoundConfig>,
}

impl StaticRoundConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a configuration under its own round name.
    pub fn with_config(mut self, config: RoundConfig) -> Self {
        self.insert(config);
        self
    }

    pub fn insert(&mut self, config: RoundConfig) {
        self.configs.insert(config.round_name().to_string(), config);
    }
}

#[async_trait]
impl RoundConfigStore for StaticRoundConfigStore {
    async fn round_config(&self, round_name: &str) -> Result<RoundConfig, ConfigError> {
        self.configs
            .get(round_name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownRound(round_name.to_string()))
    }
}
