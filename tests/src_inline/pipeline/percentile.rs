use super::*;
use crate::fixtures::{STYLE_COLUMNS, abc_dataset, dataset, record};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_percentile_three_players() {
    let ds = abc_dataset();
    assert!(approx(percentile(&ds.players, "A").unwrap(), 100.0 / 3.0));
    assert!(approx(percentile(&ds.players, "B").unwrap(), 200.0 / 3.0));
    assert!(approx(percentile(&ds.players, "C").unwrap(), 100.0));
}

#[test]
fn test_average_rank_ties() {
    let values = [10.0, 20.0, 20.0, 30.0];
    assert!(approx(average_rank_percentile(&values, 1), 62.5));
    assert!(approx(average_rank_percentile(&values, 2), 62.5));
    assert!(approx(average_rank_percentile(&values, 0), 25.0));
    assert!(approx(average_rank_percentile(&values, 3), 100.0));
}

#[test]
fn test_bulk_percentiles_match_single() {
    let values = [3.0, -1.5, 3.0, 0.0, 7.25, -1.5, 3.0];
    let bulk = average_rank_percentiles(&values);
    for (idx, pct) in bulk.iter().enumerate() {
        assert!(approx(*pct, average_rank_percentile(&values, idx)));
    }
}

#[test]
fn test_percentile_monotone_in_score() {
    let base = |score_b: f64| {
        dataset(
            &STYLE_COLUMNS,
            vec![
                record("A", 10.0, 900, &[0.0; 5]),
                record("B", score_b, 900, &[0.0; 5]),
                record("C", 30.0, 900, &[0.0; 5]),
            ],
            &[&[1.0, 0.5, 0.5], &[0.5, 1.0, 0.5], &[0.5, 0.5, 1.0]],
        )
    };
    let mut last = 0.0;
    for score in [-5.0, 10.0, 15.0, 30.0, 35.0] {
        let ds = base(score);
        let pct = percentile(&ds.players, "B").unwrap();
        assert!(pct >= last, "percentile dropped at score {score}");
        last = pct;
    }
    assert!(approx(last, 100.0));
}

#[test]
fn test_percentile_unknown_player() {
    let ds = abc_dataset();
    assert_eq!(
        percentile(&ds.players, "Z"),
        Err(QueryError::UnknownPlayer("Z".to_string()))
    );
}

#[test]
fn test_profile() {
    let ds = abc_dataset();
    let p = profile(&ds.players, "B").unwrap();
    assert_eq!(p.player_id, "B");
    assert_eq!(p.score, 20.0);
    assert_eq!(p.tier, QualityTier::AboveAverage);
    assert!(approx(p.top_percent, 100.0 / 3.0));
    assert_eq!(p.minutes_played, 1800);
    assert_eq!(classify(p.percentile), p.tier);
}

#[test]
fn test_score_distribution_sorted_with_selection() {
    let ds = dataset(
        &STYLE_COLUMNS,
        vec![
            record("b", 2.0, 90, &[0.0; 5]),
            record("a", 2.0, 90, &[0.0; 5]),
            record("c", -1.0, 90, &[0.0; 5]),
        ],
        &[&[1.0, 0.1, 0.2], &[0.1, 1.0, 0.3], &[0.2, 0.3, 1.0]],
    );
    let entries = score_distribution(&ds.players, Some("a")).unwrap();
    let ids: Vec<&str> = entries.iter().map(|e| e.player_id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
    assert_eq!(entries.iter().filter(|e| e.selected).count(), 1);
    assert!(entries[1].selected);

    assert!(matches!(
        score_distribution(&ds.players, Some("zz")),
        Err(QueryError::UnknownPlayer(_))
    ));
}

#[test]
fn test_score_distribution_signed_zero_ties_by_identifier() {
    let ds = dataset(
        &STYLE_COLUMNS,
        vec![
            record("b", 0.0, 90, &[0.0; 5]),
            record("a", -0.0, 90, &[0.0; 5]),
            record("c", -1.0, 90, &[0.0; 5]),
        ],
        &[&[1.0, 0.1, 0.2], &[0.1, 1.0, 0.3], &[0.2, 0.3, 1.0]],
    );
    let entries = score_distribution(&ds.players, None).unwrap();
    let ids: Vec<&str> = entries.iter().map(|e| e.player_id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
    assert!(approx(percentile(&ds.players, "a").unwrap(), percentile(&ds.players, "b").unwrap()));
}

#[test]
fn test_tier_counts() {
    let ds = abc_dataset();
    let counts = tier_counts(&ds.players);
    assert_eq!(
        counts,
        vec![
            (QualityTier::Elite, 1),
            (QualityTier::AboveAverage, 1),
            (QualityTier::LeagueAverage, 0),
            (QualityTier::BelowAverage, 1),
        ]
    );
}
