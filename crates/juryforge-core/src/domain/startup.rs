use serde::{Deserialize, Serialize};

use super::StartupId;

/// An applicant under review in a round.
///
/// # Examples
///
/// ```
/// use juryforge_core::Startup;
///
/// let s = Startup::new("S1", "Ledgerly")
///     .with_stage("Seed")
///     .with_verticals(["Fintech"])
///     .with_regions(["Europe"]);
/// assert_eq!(s.stage, "Seed");
/// assert_eq!(s.verticals, vec!["Fintech".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Startup {
    pub id: StartupId,
    pub name: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub verticals: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub description: String,
}

impl Startup {
    pub fn new(id: impl Into<StartupId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    pub fn with_verticals<I, T>(mut self, verticals: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.verticals = verticals.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_regions<I, T>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Selects the startups that take part in a round.
///
/// An empty `stages` list admits every stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StartupFilter {
    pub round_name: String,
    #[serde(default)]
    pub stages: Vec<String>,
}

impl StartupFilter {
    /// Creates a filter admitting every startup of `round_name`.
    pub fn for_round(round_name: impl Into<String>) -> Self {
        Self {
            round_name: round_name.into(),
            stages: Vec::new(),
        }
    }

    pub fn with_stages<I, T>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.stages = stages.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if `startup` passes this filter.
    pub fn admits(&self, startup: &Startup) -> bool {
        self.stages.is_empty()
            || self
                .stages
                .iter()
                .any(|s| s.trim().eq_ignore_ascii_case(startup.stage.trim()))
    }
}
