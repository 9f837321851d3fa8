//! Tests for the score model.

use std::sync::Arc;

use juryforge_config::{RoundConfigSpec, ScoringTuning};
use juryforge_core::{Juror, Startup};
use juryforge_test::scenario::{round_config, two_startup_scenario};

use crate::*;

fn fintech_startup() -> Startup {
    Startup::new("S1", "Ledgerly")
        .with_verticals(["Fintech"])
        .with_stage("Seed")
        .with_regions(["Europe"])
        .with_description("Payments infrastructure for European merchants")
}

fn idle() -> LoadContext {
    LoadContext::new(0, 0, 2, None)
}

#[test]
fn test_all_criteria_match() {
    let model = ScoreModel::new(&round_config(2));
    let juror = Juror::new("J1", "Ada")
        .with_target_verticals(["FINTECH"])
        .with_preferred_stages(["seed"])
        .with_preferred_regions(["europe"])
        .with_thesis_keywords(["payments", "merchants"]);

    let breakdown = model.score(&juror, &fintech_startup(), &idle(), CandidateSignals::NONE);

    assert_eq!(breakdown.vertical(), 30.0);
    assert_eq!(breakdown.stage(), 20.0);
    assert_eq!(breakdown.region(), 20.0);
    assert_eq!(breakdown.thesis(), 20.0);
    assert_eq!(breakdown.load_penalty(), 0.0);
    assert_eq!(breakdown.total(), 90.0);
    assert_eq!(
        breakdown.reasoning(),
        "Region match (Europe), Vertical match (Fintech), Stage match (Seed), \
         Thesis match 100% (+20.00), Load 0/2 (0.00)"
    );
}

#[test]
fn test_no_preferences_scores_zero() {
    let model = ScoreModel::new(&round_config(2));
    let breakdown = model.score(&Juror::new("J3", "Linus"), &fintech_startup(), &idle(), CandidateSignals::NONE);
    assert_eq!(breakdown.total(), 0.0);
    assert_eq!(breakdown.reasoning(), "No criteria matched, Load 0/2 (0.00)");
    assert!(breakdown.ai_component().is_none());
}

#[test]
fn test_scoring_is_deterministic() {
    let scenario = two_startup_scenario();
    let model = ScoreModel::new(&scenario.config);
    let load = LoadContext::new(1, 1, 1, None);
    for juror in &scenario.jurors {
        for startup in &scenario.startups {
            let a = model.score(juror, startup, &load, CandidateSignals::NONE);
            let b = model.score(juror, startup, &load, CandidateSignals::NONE);
            assert_eq!(a, b);
        }
    }
}

#[test]
fn test_interest_bonus() {
    let model = ScoreModel::new(&round_config(2));
    let juror = Juror::new("J3", "Linus");
    let signals = CandidateSignals::default().with_interest(true);
    let breakdown = model.score(&juror, &fintech_startup(), &idle(), signals);
    assert_eq!(breakdown.interest(), 10.0);
    assert_eq!(breakdown.total(), 10.0);
    assert!(breakdown.reasoning().starts_with("Explicit interest (+10.00)"));
}

#[test]
fn test_ai_blend_applies_before_load_penalty() {
    let model = ScoreModel::new(&round_config(2));
    let juror = Juror::new("J2", "Grace").with_target_verticals(["Fintech"]);
    let ai = AiAssessment::new(9.0, 0.8, "Strong payments background");
    let load = LoadContext::new(0, 1, 2, None);

    let breakdown = model.score(&juror, &fintech_startup(), &load, CandidateSignals::default().with_ai(Some(&ai)));

    let component = breakdown.ai_component().unwrap();
    assert_eq!(component.rule_credit, 30.0);
    // 0.3 * 30 + 0.7 * 90
    assert!((component.blended_credit - 72.0).abs() < 1e-9);
    assert!((breakdown.total() - (72.0 - 5.0)).abs() < 1e-9);
    assert!(breakdown
        .reasoning()
        .contains("AI 9.0/10 (confidence 0.80): Strong payments background"));
}

#[test]
fn test_low_confidence_ai_is_ignored() {
    let config = RoundConfigSpec::new("screening")
        .with_tuning(ScoringTuning {
            ai_min_confidence: 0.5,
            ..ScoringTuning::default()
        })
        .build()
        .unwrap();
    let model = ScoreModel::new(&config);
    let ai = AiAssessment::new(10.0, 0.2, "unsure");

    let breakdown = model.score(
        &Juror::new("J3", "Linus"),
        &fintech_startup(),
        &idle(),
        CandidateSignals::default().with_ai(Some(&ai)),
    );

    assert!(breakdown.ai_component().is_none());
    assert_eq!(breakdown.total(), 0.0);
    assert!(!breakdown.reasoning().contains("AI"));
}

#[test]
fn test_capacity_violation_dominates_credit() {
    let model = ScoreModel::new(&round_config(2));
    let startup = fintech_startup();
    let perfect = Juror::new("J1", "Ada")
        .with_target_verticals(["Fintech"])
        .with_preferred_stages(["Seed"])
        .with_preferred_regions(["Europe"])
        .with_thesis_keywords(["payments"])
        .with_evaluation_limit(1);
    let blank = Juror::new("J9", "Zed");

    let full = model.score(
        &perfect,
        &startup,
        &LoadContext::new(1, 0, 2, Some(1)),
        CandidateSignals::default().with_interest(true),
    );
    let free = model.score(&blank, &startup, &LoadContext::new(0, 1, 2, None), CandidateSignals::NONE);

    assert_eq!(full.capacity_violation(), 1);
    assert!(!free.exceeds_capacity());
    assert!((full.total() - (100.0 - 10.0 - 1000.0)).abs() < 1e-9);
    assert_eq!(free.total(), -5.0);
    assert!(free.rank_score() > full.rank_score());
    assert!(full.reasoning().contains("Exceeds limit 1 by 1 (-1000.00)"));
}

#[test]
fn test_custom_limit_penalty_dominates_any_positive_credit() {
    let model = ScoreModel::new(&round_config(3));
    let startup = fintech_startup();
    let perfect = Juror::new("J1", "Ada")
        .with_target_verticals(["Fintech"])
        .with_preferred_stages(["Seed"])
        .with_preferred_regions(["Europe"])
        .with_thesis_keywords(["payments"])
        .with_evaluation_limit(2);
    let ai = AiAssessment::new(10.0, 1.0, "");
    let signals = CandidateSignals::default().with_interest(true).with_ai(Some(&ai));

    let at_limit = model.score(&perfect, &startup, &LoadContext::new(0, 2, 3, Some(2)), signals);
    let idle_blank = model.score(&Juror::new("J2", "Bo"), &startup, &LoadContext::new(0, 2, 3, None), CandidateSignals::NONE);

    assert!(at_limit.exceeds_capacity());
    assert!(!idle_blank.exceeds_capacity());
    assert!(idle_blank.total() > at_limit.total());
    assert!(idle_blank.rank_score() > at_limit.rank_score());
}

#[derive(Debug)]
struct Wild;

impl ThesisMatcher for Wild {
    fn similarity(&self, _juror: &Juror, _startup: &Startup) -> f64 {
        3.5
    }
}

#[test]
fn test_custom_thesis_matcher_is_clamped() {
    let model = ScoreModel::new(&round_config(2)).with_thesis_matcher(Arc::new(Wild));
    let breakdown = model.score(&Juror::new("J3", "Linus"), &fintech_startup(), &idle(), CandidateSignals::NONE);
    assert_eq!(breakdown.thesis(), 20.0);
}

#[test]
fn test_scenario_rankings() {
    let scenario = two_startup_scenario();
    let model = ScoreModel::new(&scenario.config);
    let target = 1; // floor(2 startups * 2 jurors / 3 jurors)

    let rank = |startup: &Startup, loads: &[u32]| {
        let mut candidates: Vec<ScoredCandidate> = scenario
            .jurors
            .iter()
            .zip(loads)
            .map(|(j, &proposed)| {
                let load = LoadContext::new(0, proposed, target, j.evaluation_limit);
                ScoredCandidate::new(j.id.clone(), j.name.clone(), model.score(j, startup, &load, CandidateSignals::NONE))
            })
            .collect();
        rank_candidates(&mut candidates);
        candidates
            .into_iter()
            .map(|c| (c.juror_id.to_string(), c.breakdown.total()))
            .collect::<Vec<_>>()
    };

    let s1 = rank(&scenario.startups[0], &[0, 0, 0]);
    assert_eq!(
        s1,
        vec![("J1".to_string(), 70.0), ("J2".to_string(), 0.0), ("J3".to_string(), 0.0)]
    );

    // J1 and J2 were reserved for S1 and sit at the shared target, so
    // J2's vertical match cannot outweigh its limit violation
    let s2 = rank(&scenario.startups[1], &[1, 1, 0]);
    assert_eq!(
        s2,
        vec![("J3".to_string(), 0.0), ("J2".to_string(), -980.0), ("J1".to_string(), -1010.0)]
    );
}
