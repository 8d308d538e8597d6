use std::fs;

use super::*;
use crate::fixtures::{abc_dataset, make_temp_dir, single_player_dataset};
use crate::pipeline::style::DEFAULT_STYLE_AXES;

#[test]
fn test_report_defaults_partner_to_best_match() {
    let ds = abc_dataset();
    let report = build_player_report(&ds, "A", 10, None, &DEFAULT_STYLE_AXES).unwrap();
    assert_eq!(report.profile.player_id, "A");
    assert_eq!(report.neighbors.len(), 2);
    assert_eq!(report.best_match.as_deref(), Some("B"));
    let cmp = report.comparison.unwrap();
    assert_eq!(cmp.player_b, "B");
    assert_eq!(report.league.players, 3);
    assert_eq!(report.league.score_median, 20.0);
}

#[test]
fn test_report_explicit_partner_errors_propagate() {
    let ds = abc_dataset();
    let err = build_player_report(&ds, "A", 10, Some("C"), &DEFAULT_STYLE_AXES).unwrap_err();
    assert!(matches!(err, QueryError::MissingFeature { .. }));
    let err = build_player_report(&ds, "A", 0, None, &DEFAULT_STYLE_AXES).unwrap_err();
    assert_eq!(err, QueryError::InvalidTopN(0));
}

#[test]
fn test_single_player_report_has_no_comparison() {
    let ds = single_player_dataset();
    let report = build_player_report(&ds, "solo", 10, None, &DEFAULT_STYLE_AXES).unwrap();
    assert!(report.neighbors.is_empty());
    assert!(report.best_match.is_none());
    assert!(report.comparison.is_none());
    assert_eq!(report.profile.tier, QualityTier::Elite);
}

#[test]
fn test_league_summary_fractions() {
    let ds = abc_dataset();
    let league = league_summary(&ds);
    let total: f64 = league.tiers.iter().map(|t| t.fraction).sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert_eq!(league.features, 5);
}

#[test]
fn test_write_reports() {
    let ds = abc_dataset();
    let report = build_player_report(&ds, "B", 10, Some("A"), &DEFAULT_STYLE_AXES).unwrap();
    let out = make_temp_dir().join("out");
    write_reports(&report, &out).unwrap();

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["profile"]["player_id"], "B");
    assert_eq!(summary["profile"]["tier"], "above_average");
    assert_eq!(summary["best_match"], "A");
    assert_eq!(summary["neighbors"].as_array().unwrap().len(), 2);
    assert_eq!(summary["comparison"]["labels"].as_array().unwrap().len(), 6);

    let text = fs::read_to_string(out.join("report.txt")).unwrap();
    assert!(text.contains("Above average"));
    assert!(text.contains("Best match: A"));

    let tsv = fs::read_to_string(out.join("neighbors.tsv")).unwrap();
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("1\tA\t0.900000\t90.000000\t"));
}
