use std::cmp::Ordering;

use crate::score::*;

#[test]
fn test_creation() {
    let score = MatchScore::of(-2, -1050);
    assert_eq!(score.hard(), -2);
    assert_eq!(score.soft(), -1050);
    assert!((score.credit() + 10.5).abs() < f64::EPSILON);
    assert_eq!(score.to_level_numbers(), [-2, -1050]);
}

#[test]
fn test_from_credit_rounds_to_hundredths() {
    let a = MatchScore::from_credit(0, 33.333_333);
    let b = MatchScore::from_credit(0, 33.329_9);
    assert_eq!(a, b);
    assert_eq!(a.soft(), 3333);
}

#[test]
fn test_non_finite_credit_sorts_last_within_level() {
    let nan = MatchScore::from_credit(0, f64::NAN);
    let low = MatchScore::from_credit(0, -1_000_000.0);
    assert!(low > nan);
}

#[test]
fn test_feasibility() {
    assert!(MatchScore::from_credit(0, -50.0).is_feasible());
    assert!(!MatchScore::from_credit(2, 90.0).is_feasible());
}

#[test]
fn test_comparison() {
    // Capacity violation dominates credit
    let violating = MatchScore::from_credit(1, 100.0);
    let fitting = MatchScore::from_credit(0, -10.0);
    assert!(fitting > violating);

    // Same hard, different soft
    let s1 = MatchScore::from_credit(0, 10.0);
    let s2 = MatchScore::from_credit(0, 20.0);
    assert_eq!(s2.cmp(&s1), Ordering::Greater);

    // Fewer violations rank higher
    let v2 = MatchScore::from_credit(2, 50.0);
    let v1 = MatchScore::from_credit(1, 0.0);
    assert!(v1 > v2);
}

#[test]
fn test_arithmetic() {
    let s1 = MatchScore::of(-1, 100);
    let s2 = MatchScore::of(-1, 50);

    assert_eq!(s1 + s2, MatchScore::of(-2, 150));
    assert_eq!(s1 - s2, MatchScore::of(0, 50));
    assert_eq!(-s1, MatchScore::of(1, -100));
}

#[test]
fn test_display_and_parse() {
    let score = MatchScore::from_credit(1, -7.25);
    let text = score.to_string();
    assert_eq!(text, "-1hard/-7.25soft");
    assert_eq!(MatchScore::parse(&text).unwrap(), score);
    assert_eq!(MatchScore::parse(" 0hard/40soft ").unwrap(), MatchScore::of(0, 4000));
}

#[test]
fn test_parse_errors() {
    assert!(MatchScore::parse("0hard").is_err());
    assert!(MatchScore::parse("0/1soft").is_err());
    assert!(MatchScore::parse("xhard/1soft").is_err());
    let err = MatchScore::parse("0hard/abcsoft").unwrap_err();
    assert!(err.to_string().contains("Invalid soft score"));
}

#[test]
fn test_level_labels() {
    assert_eq!(MatchScore::level_label(0), ScoreLevel::Hard);
    assert_eq!(MatchScore::level_label(1), ScoreLevel::Soft);
}

#[test]
#[should_panic(expected = "MatchScore has 2 levels")]
fn test_level_label_out_of_range() {
    MatchScore::level_label(2);
}
