use std::cmp::Ordering;

use serde::Serialize;

use crate::error::QueryError;
use crate::model::tiers::tier_order;
use crate::model::{PlayerTable, QualityTier};

/// Average-rank percentile of `values[idx]` among all of `values`, in (0, 100].
///
/// Tied values share the mean of the ranks they occupy, so the rank of a value
/// is `below + (ties + 1) / 2` where `ties` counts equal values including itself.
pub fn average_rank_percentile(values: &[f64], idx: usize) -> f64 {
    let target = values[idx];
    let mut below = 0usize;
    let mut equal = 0usize;
    for &v in values {
        if v < target {
            below += 1;
        } else if v == target {
            equal += 1;
        }
    }
    let rank = below as f64 + (equal as f64 + 1.0) / 2.0;
    rank / values.len() as f64 * 100.0
}

/// Percentiles of every value at once, same convention as
/// `average_rank_percentile`, in O(n log n).
pub fn average_rank_percentiles(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut out = vec![0.0f64; n];
    let mut start = 0usize;
    while start < n {
        let mut end = start + 1;
        while end < n && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // 1-based ranks start+1..=end share their mean.
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            out[idx] = rank / n as f64 * 100.0;
        }
        start = end;
    }
    out
}

pub fn percentile(players: &PlayerTable, player_id: &str) -> Result<f64, QueryError> {
    let idx = players
        .position(player_id)
        .ok_or_else(|| QueryError::UnknownPlayer(player_id.to_string()))?;
    let scores: Vec<f64> = players.records().iter().map(|r| r.score).collect();
    Ok(average_rank_percentile(&scores, idx))
}

pub fn classify(percentile: f64) -> QualityTier {
    QualityTier::classify(percentile)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub player_id: String,
    pub score: f64,
    pub percentile: f64,
    pub tier: QualityTier,
    /// Share of the league at or above this player, `100 - percentile`.
    pub top_percent: f64,
    pub matches_played: u32,
    pub minutes_played: u32,
}

pub fn profile(players: &PlayerTable, player_id: &str) -> Result<PlayerProfile, QueryError> {
    let record = players
        .get(player_id)
        .ok_or_else(|| QueryError::UnknownPlayer(player_id.to_string()))?;
    let pct = percentile(players, player_id)?;
    Ok(PlayerProfile {
        player_id: record.id.clone(),
        score: record.score,
        percentile: pct,
        tier: classify(pct),
        top_percent: 100.0 - pct,
        matches_played: record.matches_played,
        minutes_played: record.minutes_played,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    pub player_id: String,
    pub score: f64,
    pub selected: bool,
}

/// All players ordered by score ascending, ties by identifier. `selected`
/// marks the highlighted player, if any.
pub fn score_distribution(
    players: &PlayerTable,
    selected: Option<&str>,
) -> Result<Vec<DistributionEntry>, QueryError> {
    if let Some(id) = selected {
        if !players.contains(id) {
            return Err(QueryError::UnknownPlayer(id.to_string()));
        }
    }
    let mut records: Vec<_> = players.records().iter().collect();
    // Scores are finite; `-0.0` and `0.0` compare equal and fall to the id.
    records.sort_by(|a, b| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    Ok(records
        .into_iter()
        .map(|r| DistributionEntry {
            player_id: r.id.clone(),
            score: r.score,
            selected: selected == Some(r.id.as_str()),
        })
        .collect())
}

/// Number of players in each tier, in `tier_order`.
pub fn tier_counts(players: &PlayerTable) -> Vec<(QualityTier, usize)> {
    let scores: Vec<f64> = players.records().iter().map(|r| r.score).collect();
    let mut counts = tier_order()
        .iter()
        .map(|&t| (t, 0usize))
        .collect::<Vec<_>>();
    for pct in average_rank_percentiles(&scores) {
        let tier = classify(pct);
        if let Some(slot) = counts.iter_mut().find(|(t, _)| *t == tier) {
            slot.1 += 1;
        }
    }
    counts
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/percentile.rs"]
mod tests;
