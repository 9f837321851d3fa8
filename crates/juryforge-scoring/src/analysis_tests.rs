//! Tests for proposal explanations.

use juryforge_core::{Juror, JurorId, Startup};
use juryforge_test::scenario::round_config;

use crate::*;

fn startup() -> Startup {
    Startup::new("S1", "Ledgerly")
        .with_verticals(["Fintech"])
        .with_regions(["Europe"])
}

/// Ranks four jurors: J1 strong, J2 medium, J3 blank, J4 strong but at its limit.
fn ranked() -> Vec<ScoredCandidate> {
    let model = ScoreModel::new(&round_config(2));
    let startup = startup();
    let jurors = [
        (
            Juror::new("J1", "Ada").with_target_verticals(["Fintech"]).with_preferred_regions(["Europe"]),
            LoadContext::new(0, 0, 2, None),
        ),
        (
            Juror::new("J2", "Grace").with_preferred_regions(["Europe"]),
            LoadContext::new(0, 0, 2, None),
        ),
        (Juror::new("J3", "Linus"), LoadContext::new(0, 0, 2, None)),
        (
            Juror::new("J4", "Barbara")
                .with_target_verticals(["Fintech"])
                .with_preferred_regions(["Europe"])
                .with_evaluation_limit(1),
            LoadContext::new(1, 0, 2, Some(1)),
        ),
    ];
    let mut candidates: Vec<ScoredCandidate> = jurors
        .iter()
        .map(|(j, load)| {
            ScoredCandidate::new(
                j.id.clone(),
                j.name.clone(),
                model.score(j, &startup, load, CandidateSignals::NONE),
            )
        })
        .collect();
    rank_candidates(&mut candidates);
    candidates
}

#[test]
fn test_ranking_order() {
    let ids: Vec<String> = ranked().iter().map(|c| c.juror_id.to_string()).collect();
    assert_eq!(ids, vec!["J1", "J2", "J3", "J4"]);
}

#[test]
fn test_ranking_ignores_input_order() {
    let mut reversed = ranked();
    reversed.reverse();
    rank_candidates(&mut reversed);
    assert_eq!(reversed, ranked());
}

#[test]
fn test_record_marks_outcomes() {
    let mut recorder = ExplainabilityRecorder::new();
    let explanation = recorder.record(&startup(), 2, ranked(), 2);

    assert_eq!(explanation.needed, 2);
    assert_eq!(explanation.evaluations.len(), 4);
    let selected: Vec<&str> = explanation.selected().map(|e| e.juror_id.as_str()).collect();
    assert_eq!(selected, vec!["J1", "J2"]);

    let j3 = explanation.evaluation(&JurorId::new("J3")).unwrap();
    assert_eq!(j3.rank, 3);
    assert_eq!(j3.rejection_reason(), Some(RejectionReason::LowerScore));

    let j4 = explanation.evaluation(&JurorId::new("J4")).unwrap();
    assert_eq!(j4.rejection_reason(), Some(RejectionReason::WorkloadExceeded));

    assert_eq!(recorder.candidates_recorded(), 4);
    assert_eq!(recorder.workload_rejections(), 1);
    assert_eq!(recorder.lower_score_rejections(), 1);
}

#[test]
fn test_alternates_and_shortfall() {
    let mut recorder = ExplainabilityRecorder::new();
    let explanation = recorder.record(&startup(), 2, ranked(), 2);

    let alternates: Vec<&str> = explanation.alternates(1).iter().map(|e| e.juror_id.as_str()).collect();
    assert_eq!(alternates, vec!["J3"]);
    assert_eq!(explanation.alternates(10).len(), 2);
    assert_eq!(explanation.shortfall(), 0);

    let short = recorder.record(&startup(), 3, ranked().into_iter().take(2).collect(), 2);
    assert_eq!(short.shortfall(), 1);
}

#[test]
fn test_why_not() {
    let mut recorder = ExplainabilityRecorder::new();
    let explanation = recorder.record(&startup(), 2, ranked(), 2);

    let j3 = explanation.why_not(&JurorId::new("J3")).unwrap();
    assert!(j3.starts_with("J3 ranked 3 for S1 (0.00), below the last selected juror J2 (20.00)"));

    let j4 = explanation.why_not(&JurorId::new("J4")).unwrap();
    assert!(j4.contains("would exceed their workload limit by 1"));

    let j1 = explanation.why_not(&JurorId::new("J1")).unwrap();
    assert!(j1.contains("was selected"));

    assert!(explanation.why_not(&JurorId::new("J9")).is_none());
}

#[test]
fn test_describe() {
    let mut recorder = ExplainabilityRecorder::new();
    let text = recorder.record(&startup(), 2, ranked(), 2).describe();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "S1 (Ledgerly): 2 of 2 selected from 4 candidates");
    assert_eq!(lines.len(), 5);
    assert!(lines[1].contains("J1") && lines[1].contains("[selected]"));
    assert!(lines[4].contains("[rejected: workload_exceeded]"));
}

#[test]
fn test_rejection_reason_serializes_snake_case() {
    let json = serde_json::to_string(&RejectionReason::WorkloadExceeded).unwrap();
    assert_eq!(json, "\"workload_exceeded\"");

    let outcome = CandidateOutcome::Rejected {
        reason: RejectionReason::LowerScore,
    };
    let json = serde_json::to_string(&outcome).unwrap();
    assert_eq!(json, r#"{"status":"rejected","reason":"lower_score"}"#);
}
