use super::*;
use crate::fixtures::{STYLE_COLUMNS, abc_dataset, dataset, record, single_player_dataset};

fn ids(neighbors: &[Neighbor]) -> Vec<&str> {
    neighbors.iter().map(|n| n.player_id.as_str()).collect()
}

#[test]
fn test_top_one_and_best_match() {
    let ds = abc_dataset();
    let top = top_neighbors(&ds, "A", 1).unwrap();
    assert_eq!(ids(&top), vec!["B"]);
    assert_eq!(top[0].similarity, 0.9);
    assert_eq!(best_match(&ds, "A").unwrap(), "B");
}

#[test]
fn test_length_is_capped_by_player_count() {
    let ds = abc_dataset();
    let top = top_neighbors(&ds, "A", 10).unwrap();
    assert_eq!(ids(&top), vec!["B", "C"]);
    for id in ["A", "B", "C"] {
        for n in 1..5usize {
            assert_eq!(top_neighbors(&ds, id, n).unwrap().len(), n.min(2));
        }
    }
}

#[test]
fn test_self_excluded_and_sorted() {
    let ds = abc_dataset();
    for id in ["A", "B", "C"] {
        let top = top_neighbors(&ds, id, 10).unwrap();
        assert!(top.iter().all(|n| n.player_id != id));
        assert!(top.windows(2).all(|w| w[0].similarity >= w[1].similarity));
        assert_ne!(best_match(&ds, id).unwrap(), id);
    }
}

#[test]
fn test_neighbors_joined_with_player_table() {
    let ds = abc_dataset();
    let top = top_neighbors(&ds, "B", 2).unwrap();
    assert_eq!(ids(&top), vec!["A", "C"]);
    assert_eq!(top[0].score, 10.0);
    assert_eq!(top[0].minutes_played, 900);
    assert_eq!(top[1].score, 30.0);
    assert_eq!(top[1].minutes_played, 450);
    assert!((top[1].similarity_percent() - 40.0).abs() < 1e-9);
}

#[test]
fn test_ties_break_by_identifier() {
    let ds = dataset(
        &STYLE_COLUMNS,
        vec![
            record("x", 0.0, 90, &[0.0; 5]),
            record("d", 0.0, 90, &[0.0; 5]),
            record("c", 0.0, 90, &[0.0; 5]),
            record("b", 0.0, 90, &[0.0; 5]),
            record("a", 0.0, 90, &[0.0; 5]),
        ],
        &[
            &[1.0, 0.5, 0.5, 0.5, 0.1],
            &[0.5, 1.0, 0.0, 0.0, 0.0],
            &[0.5, 0.0, 1.0, 0.0, 0.0],
            &[0.5, 0.0, 0.0, 1.0, 0.0],
            &[0.1, 0.0, 0.0, 0.0, 1.0],
        ],
    );
    assert_eq!(ids(&top_neighbors(&ds, "x", 4).unwrap()), vec!["b", "c", "d", "a"]);
    assert_eq!(ids(&top_neighbors(&ds, "x", 2).unwrap()), vec!["b", "c"]);
    assert_eq!(best_match(&ds, "x").unwrap(), "b");
}

#[test]
fn test_signed_zero_similarities_tie_by_identifier() {
    let ds = dataset(
        &STYLE_COLUMNS,
        vec![
            record("x", 0.0, 90, &[0.0; 5]),
            record("b", 0.0, 90, &[0.0; 5]),
            record("a", 0.0, 90, &[0.0; 5]),
        ],
        &[&[1.0, 0.0, -0.0], &[0.0, 1.0, 0.0], &[-0.0, 0.0, 1.0]],
    );
    assert_eq!(ids(&top_neighbors(&ds, "x", 2).unwrap()), vec!["a", "b"]);
    assert_eq!(ids(&top_neighbors(&ds, "x", 1).unwrap()), vec!["a"]);
    assert_eq!(best_match(&ds, "x").unwrap(), "a");
}

#[test]
fn test_negative_similarities_rank_last() {
    let ds = dataset(
        &STYLE_COLUMNS,
        vec![
            record("p", 0.0, 90, &[0.0; 5]),
            record("q", 0.0, 90, &[0.0; 5]),
            record("r", 0.0, 90, &[0.0; 5]),
        ],
        &[&[1.0, -0.7, -0.2], &[-0.7, 1.0, 0.3], &[-0.2, 0.3, 1.0]],
    );
    assert_eq!(ids(&top_neighbors(&ds, "p", 2).unwrap()), vec!["r", "q"]);
}

#[test]
fn test_invalid_requests() {
    let ds = abc_dataset();
    assert_eq!(top_neighbors(&ds, "A", 0), Err(QueryError::InvalidTopN(0)));
    assert_eq!(
        top_neighbors(&ds, "Z", 3),
        Err(QueryError::UnknownPlayer("Z".to_string()))
    );
    assert_eq!(
        best_match(&ds, "Z"),
        Err(QueryError::UnknownPlayer("Z".to_string()))
    );
}

#[test]
fn test_top_n_from() {
    assert_eq!(top_n_from(5), Ok(5));
    assert_eq!(top_n_from(0), Err(QueryError::InvalidTopN(0)));
    assert_eq!(top_n_from(-3), Err(QueryError::InvalidTopN(-3)));
}

#[test]
fn test_single_player_dataset() {
    let ds = single_player_dataset();
    assert!(top_neighbors(&ds, "solo", 5).unwrap().is_empty());
    assert_eq!(
        best_match(&ds, "solo"),
        Err(QueryError::NoCandidates("solo".to_string()))
    );
}

#[test]
fn test_repeated_queries_identical() {
    let ds = abc_dataset();
    let first = top_neighbors(&ds, "C", 2).unwrap();
    for _ in 0..5 {
        assert_eq!(top_neighbors(&ds, "C", 2).unwrap(), first);
    }
}
