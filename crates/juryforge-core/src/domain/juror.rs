use serde::{Deserialize, Serialize};

use super::JurorId;

/// An evaluator who reviews startups.
///
/// `evaluation_limit` overrides the round's shared workload target. When it is
/// `None` the juror is held to the dynamically computed target instead.
///
/// # Examples
///
/// ```
/// use juryforge_core::Juror;
///
/// let j = Juror::new("J1", "Ada")
///     .with_target_verticals(["Fintech"])
///     .with_evaluation_limit(4);
/// assert_eq!(j.evaluation_limit, Some(4));
/// assert!(j.preferred_regions.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Juror {
    pub id: JurorId,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub preferred_regions: Vec<String>,
    #[serde(default)]
    pub target_verticals: Vec<String>,
    #[serde(default)]
    pub preferred_stages: Vec<String>,
    /// Free-text investment thesis, reduced to keywords.
    #[serde(default)]
    pub thesis_keywords: Vec<String>,
    #[serde(default)]
    pub evaluation_limit: Option<u32>,
}

impl Juror {
    pub fn new(id: impl Into<JurorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_preferred_regions<I, T>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.preferred_regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_target_verticals<I, T>(mut self, verticals: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.target_verticals = verticals.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_preferred_stages<I, T>(mut self, stages: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.preferred_stages = stages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_thesis_keywords<I, T>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.thesis_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_evaluation_limit(mut self, limit: u32) -> Self {
        self.evaluation_limit = Some(limit);
        self
    }

    /// Returns true if the juror declares a stage preference that includes `stage`.
    pub fn prefers_stage(&self, stage: &str) -> bool {
        let stage = stage.trim();
        !stage.is_empty()
            && self
                .preferred_stages
                .iter()
                .any(|s| s.trim().eq_ignore_ascii_case(stage))
    }
}
