//! Startup and juror pools for assignment tests.
//!
//! # Example
//!
//! ```
//! use juryforge_test::scenario::two_startup_scenario;
//!
//! let scenario = two_startup_scenario();
//! assert_eq!(scenario.startups.len(), 2);
//! assert_eq!(scenario.jurors.len(), 3);
//! assert_eq!(scenario.config.target_jurors_per_startup(), 2);
//! ```

use juryforge_config::{RoundConfig, RoundConfigSpec};
use juryforge_core::{Juror, Startup};

/// Round name shared by every fixture.
pub const ROUND: &str = "screening";

const VERTICALS: [&str; 4] = ["Fintech", "HealthTech", "Climate", "AI"];
const STAGES: [&str; 3] = ["Seed", "Series A", "Series B"];
const REGIONS: [&str; 3] = ["Europe", "US", "Asia"];

/// Inputs for one generation run.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub startups: Vec<Startup>,
    pub jurors: Vec<Juror>,
    pub config: RoundConfig,
}

/// Two startups and three jurors with default weights and two jurors per
/// startup.
///
/// `J1` matches `S1` on vertical, stage and region. `J2` matches `S2` on
/// vertical only. `J3` declares no preferences.
pub fn two_startup_scenario() -> Scenario {
    let startups = vec![
        Startup::new("S1", "Ledgerly")
            .with_verticals(["Fintech"])
            .with_stage("Seed")
            .with_regions(["Europe"]),
        Startup::new("S2", "Pulsewise")
            .with_verticals(["HealthTech"])
            .with_stage("Series A")
            .with_regions(["US"]),
    ];
    let jurors = vec![
        Juror::new("J1", "Ada")
            .with_target_verticals(["Fintech"])
            .with_preferred_stages(["Seed"])
            .with_preferred_regions(["Europe"]),
        Juror::new("J2", "Grace").with_target_verticals(["HealthTech"]),
        Juror::new("J3", "Linus"),
    ];
    Scenario {
        startups,
        jurors,
        config: round_config(2),
    }
}

/// Default-weighted configuration for [`ROUND`].
pub fn round_config(target_jurors_per_startup: usize) -> RoundConfig {
    RoundConfigSpec::new(ROUND)
        .with_target_jurors_per_startup(target_jurors_per_startup)
        .build()
        .expect("fixture configuration is valid")
}

/// Creates `n` startups `S00`, `S01`, ... cycling through verticals,
/// stages and regions.
pub fn startup_pool(n: usize) -> Vec<Startup> {
    (0..n)
        .map(|i| {
            Startup::new(format!("S{:02}", i), format!("Startup {}", i))
                .with_verticals([VERTICALS[i % VERTICALS.len()]])
                .with_stage(STAGES[i % STAGES.len()])
                .with_regions([REGIONS[i % REGIONS.len()]])
                .with_description(format!(
                    "{} platform for {} customers",
                    VERTICALS[i % VERTICALS.len()],
                    REGIONS[i % REGIONS.len()]
                ))
        })
        .collect()
}

/// Creates `n` jurors `J00`, `J01`, ... with preferences offset from
/// [`startup_pool`] so matches are spread across the pool.
pub fn juror_pool(n: usize) -> Vec<Juror> {
    (0..n)
        .map(|i| {
            Juror::new(format!("J{:02}", i), format!("Juror {}", i))
                .with_company(format!("Fund {}", i % 5))
                .with_target_verticals([VERTICALS[(i + 1) % VERTICALS.len()]])
                .with_preferred_stages([STAGES[i % STAGES.len()]])
                .with_preferred_regions([REGIONS[(i + 2) % REGIONS.len()]])
                .with_thesis_keywords(["platform", VERTICALS[i % VERTICALS.len()]])
        })
        .collect()
}
