use std::cmp::Ordering;

use serde::Serialize;

use crate::error::QueryError;
use crate::model::Dataset;

pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Neighbor {
    pub player_id: String,
    pub similarity: f64,
    pub score: f64,
    pub minutes_played: u32,
}

impl Neighbor {
    pub fn similarity_percent(&self) -> f64 {
        self.similarity * 100.0
    }
}

/// Validates a caller-supplied neighbor count.
pub fn top_n_from(n: i64) -> Result<usize, QueryError> {
    if n <= 0 {
        return Err(QueryError::InvalidTopN(n));
    }
    usize::try_from(n).map_err(|_| QueryError::InvalidTopN(n))
}

/// Similarity descending; exactly equal similarities (including `0.0` and
/// `-0.0`) fall back to identifier ascending so the order never depends on
/// sort stability. Off-diagonal NaN is rejected at load.
fn rank_order(a: &(f64, &str), b: &(f64, &str)) -> Ordering {
    b.0.partial_cmp(&a.0)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.1.cmp(b.1))
}

/// The `min(n, players - 1)` most similar players to `player_id`, excluding
/// the player itself, joined with score and minutes from the player table.
pub fn top_neighbors(
    dataset: &Dataset,
    player_id: &str,
    n: usize,
) -> Result<Vec<Neighbor>, QueryError> {
    if n == 0 {
        return Err(QueryError::InvalidTopN(0));
    }
    let matrix = &dataset.similarity;
    let self_idx = matrix
        .position(player_id)
        .ok_or_else(|| QueryError::UnknownPlayer(player_id.to_string()))?;
    let row = matrix.row_at(self_idx);

    let mut candidates: Vec<(f64, &str)> = matrix
        .ids()
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != self_idx)
        .map(|(j, id)| (row[j], id.as_str()))
        .collect();

    let keep = n.min(candidates.len());
    if keep == 0 {
        return Ok(Vec::new());
    }
    if keep < candidates.len() {
        candidates.select_nth_unstable_by(keep - 1, rank_order);
        candidates.truncate(keep);
    }
    candidates.sort_unstable_by(rank_order);

    let mut out = Vec::with_capacity(keep);
    for (similarity, id) in candidates {
        let record = dataset
            .players
            .get(id)
            .ok_or_else(|| QueryError::UnknownPlayer(id.to_string()))?;
        out.push(Neighbor {
            player_id: record.id.clone(),
            similarity,
            score: record.score,
            minutes_played: record.minutes_played,
        });
    }

    tracing::debug!(player = player_id, requested = n, returned = out.len(), "neighbors ranked");
    Ok(out)
}

pub fn best_match(dataset: &Dataset, player_id: &str) -> Result<String, QueryError> {
    top_neighbors(dataset, player_id, 1)?
        .into_iter()
        .next()
        .map(|n| n.player_id)
        .ok_or_else(|| QueryError::NoCandidates(player_id.to_string()))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/neighbors.rs"]
mod tests;
