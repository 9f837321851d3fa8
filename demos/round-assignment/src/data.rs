//! Screening round participants.

use juryforge::{Juror, Startup};

pub fn startups() -> Vec<Startup> {
    vec![
        Startup::new("S01", "Ledgerly")
            .with_stage("Seed")
            .with_verticals(["Fintech"])
            .with_regions(["Europe"])
            .with_description("Embedded lending platform for European marketplaces"),
        Startup::new("S02", "Pulsewise")
            .with_stage("Series A")
            .with_verticals(["HealthTech", "AI"])
            .with_regions(["US"])
            .with_description("AI triage assistant for outpatient clinics"),
        Startup::new("S03", "Gridlet")
            .with_stage("Seed")
            .with_verticals(["Climate"])
            .with_regions(["Europe", "Asia"])
            .with_description("Battery storage marketplace for community solar grids"),
        Startup::new("S04", "Cartographer")
            .with_stage("Pre-seed")
            .with_verticals(["AI"])
            .with_regions(["US"])
            .with_description("Geospatial foundation models for logistics planning"),
        Startup::new("S05", "Coinroute")
            .with_stage("Series A")
            .with_verticals(["Fintech"])
            .with_regions(["Asia"])
            .with_description("Cross-border payments infrastructure for small exporters"),
    ]
}

pub fn jurors() -> Vec<Juror> {
    vec![
        Juror::new("J01", "Ada Lovelace")
            .with_company("Analytical Ventures")
            .with_target_verticals(["Fintech"])
            .with_preferred_stages(["Seed", "Series A"])
            .with_preferred_regions(["Europe"])
            .with_thesis_keywords(["lending", "payments", "marketplaces"]),
        Juror::new("J02", "Grace Hopper")
            .with_company("Compiler Capital")
            .with_target_verticals(["AI", "HealthTech"])
            .with_preferred_stages(["Series A"])
            .with_preferred_regions(["US"])
            .with_thesis_keywords(["clinics", "models", "assistant"]),
        Juror::new("J03", "Wangari Maathai")
            .with_company("Greenbelt Partners")
            .with_target_verticals(["Climate"])
            .with_preferred_stages(["Seed"])
            .with_preferred_regions(["Asia", "Europe"])
            .with_thesis_keywords(["solar", "storage", "grids"])
            .with_evaluation_limit(2),
        Juror::new("J04", "Katherine Johnson")
            .with_company("Orbit Angels")
            .with_target_verticals(["AI", "Climate"])
            .with_preferred_stages(["Pre-seed", "Seed"])
            .with_preferred_regions(["US"])
            .with_thesis_keywords(["geospatial", "logistics"]),
        Juror::new("J05", "Muhammad Yunus")
            .with_company("Microfinance Fund")
            .with_target_verticals(["Fintech"])
            .with_preferred_stages(["Series A"])
            .with_preferred_regions(["Asia"])
            .with_thesis_keywords(["payments", "exporters", "lending"]),
        Juror::new("J06", "Tim Berners-Lee")
            .with_company("Open Web Syndicate"),
    ]
}
