//! Shared test fixtures for JuryForge crates.
//!
//! This crate provides scenario data and stub collaborators for testing.
//! It does NOT depend on `juryforge-engine` so the engine can use it as a
//! dev-dependency without a cycle.
//!
//! - [`scenario`] - Startup and juror pools, round configurations
//! - [`providers`] - Stub AI scoring and interest-signal providers
//! - [`repository`] - Repositories that fail on demand
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! juryforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use juryforge_test::scenario::{two_startup_scenario, Scenario};
//! use juryforge_test::providers::FailingAiProvider;
//! ```

pub mod providers;
pub mod repository;
pub mod scenario;

pub use providers::{
    FailingAiProvider, FailingInterestProvider, FixedAiProvider, SlowAiProvider,
    SlowInterestProvider, StaticInterestProvider,
};
pub use repository::{FailingAssignmentRepository, UnavailableRepository};
pub use scenario::{juror_pool, round_config, startup_pool, two_startup_scenario, Scenario};
