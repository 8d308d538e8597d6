use serde::Serialize;

use crate::error::QueryError;
use crate::model::{PlayerRecord, PlayerTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleAxis<'a> {
    pub column: &'a str,
    pub label: &'a str,
}

pub const DEFAULT_STYLE_AXES: [StyleAxis<'static>; 5] = [
    StyleAxis {
        column: "progression_raw_per90_z",
        label: "Progression",
    },
    StyleAxis {
        column: "xg_per90_z",
        label: "Threat (xG)",
    },
    StyleAxis {
        column: "shot_assists_per90_z",
        label: "Shot Assists",
    },
    StyleAxis {
        column: "goal_assists_per90_z",
        label: "Goal Assists",
    },
    StyleAxis {
        column: "defensive_raw_per90_z",
        label: "Defensive Impact",
    },
];

/// Two feature sequences and their labels, each closed by repeating the first
/// element at the end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedVectors {
    pub player_a: String,
    pub player_b: String,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
    pub labels: Vec<String>,
}

pub fn build_closed_vectors(
    players: &PlayerTable,
    player_a: &str,
    player_b: &str,
    feature_names: &[&str],
) -> Result<ClosedVectors, QueryError> {
    let axes: Vec<StyleAxis<'_>> = feature_names
        .iter()
        .map(|&name| StyleAxis {
            column: name,
            label: name,
        })
        .collect();
    build_closed_axes(players, player_a, player_b, &axes)
}

pub fn build_closed_axes(
    players: &PlayerTable,
    player_a: &str,
    player_b: &str,
    axes: &[StyleAxis<'_>],
) -> Result<ClosedVectors, QueryError> {
    let record_a = lookup(players, player_a)?;
    let record_b = lookup(players, player_b)?;
    if axes.is_empty() {
        return Err(QueryError::EmptyFeatureList);
    }

    let mut a = extract(players, record_a, axes)?;
    let mut b = extract(players, record_b, axes)?;
    let mut labels: Vec<String> = axes.iter().map(|axis| axis.label.to_string()).collect();

    close_loop(&mut a);
    close_loop(&mut b);
    close_loop(&mut labels);

    Ok(ClosedVectors {
        player_a: record_a.id.clone(),
        player_b: record_b.id.clone(),
        a,
        b,
        labels,
    })
}

fn lookup<'t>(players: &'t PlayerTable, player_id: &str) -> Result<&'t PlayerRecord, QueryError> {
    players
        .get(player_id)
        .ok_or_else(|| QueryError::UnknownPlayer(player_id.to_string()))
}

fn extract(
    players: &PlayerTable,
    record: &PlayerRecord,
    axes: &[StyleAxis<'_>],
) -> Result<Vec<f64>, QueryError> {
    axes.iter()
        .map(|axis| {
            players
                .feature(record, axis.column)
                .ok_or_else(|| QueryError::MissingFeature {
                    player: record.id.clone(),
                    feature: axis.column.to_string(),
                })
        })
        .collect()
}

fn close_loop<T: Clone>(seq: &mut Vec<T>) {
    if let Some(first) = seq.first().cloned() {
        seq.push(first);
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/style.rs"]
mod tests;
