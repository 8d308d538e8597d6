use std::path::Path;

use crate::input::reader::{parse_count, read_table};
use crate::input::{DataLoadError, PlayerColumns};
use crate::model::{PlayerRecord, PlayerTable};

const TABLE: &str = "player table";

pub fn parse_player_table(
    path: &Path,
    columns: &PlayerColumns,
) -> Result<PlayerTable, DataLoadError> {
    let raw = read_table(path)?;

    let find = |name: &str| raw.header.iter().position(|c| c == name);
    let require = |name: &str| {
        find(name).ok_or_else(|| DataLoadError::MissingColumn {
            table: TABLE,
            column: name.to_string(),
        })
    };

    let id_col = require(columns.id.as_str())?;
    let score_col = require(columns.score.as_str())?;
    let minutes_col = require(columns.minutes_played.as_str())?;
    let matches_col = find(columns.matches_played.as_str());

    let reserved = [Some(id_col), Some(score_col), Some(minutes_col), matches_col];
    let mut feature_cols = Vec::new();
    for (idx, name) in raw.header.iter().enumerate() {
        if reserved.contains(&Some(idx)) {
            continue;
        }
        let numeric = raw
            .rows
            .iter()
            .all(|(_, fields)| fields[idx].is_empty() || fields[idx].parse::<f64>().is_ok());
        if numeric {
            feature_cols.push(idx);
        } else {
            tracing::warn!(column = %name, "skipping non-numeric column in player table");
        }
    }
    let feature_names: Vec<String> = feature_cols
        .iter()
        .map(|&idx| raw.header[idx].clone())
        .collect();

    let mut records = Vec::with_capacity(raw.rows.len());
    for (line_no, fields) in &raw.rows {
        let id = fields[id_col].clone();
        if id.is_empty() {
            return Err(DataLoadError::Parse(format!(
                "{TABLE} line {line_no} has an empty player identifier"
            )));
        }

        let score = fields[score_col]
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                DataLoadError::Parse(format!(
                    "{TABLE} line {line_no}: invalid {} value '{}' for {id}",
                    columns.score, fields[score_col]
                ))
            })?;

        let minutes_played = parse_count(&fields[minutes_col]).ok_or_else(|| {
            DataLoadError::Parse(format!(
                "{TABLE} line {line_no}: invalid {} value '{}' for {id}",
                columns.minutes_played, fields[minutes_col]
            ))
        })?;

        let matches_played = match matches_col {
            Some(col) if !fields[col].is_empty() => parse_count(&fields[col]).ok_or_else(|| {
                DataLoadError::Parse(format!(
                    "{TABLE} line {line_no}: invalid {} value '{}' for {id}",
                    columns.matches_played, fields[col]
                ))
            })?,
            _ => 0,
        };

        let features = feature_cols
            .iter()
            .map(|&idx| fields[idx].parse::<f64>().unwrap_or(f64::NAN))
            .collect();

        records.push(PlayerRecord {
            id,
            features,
            score,
            minutes_played,
            matches_played,
        });
    }

    if matches_col.is_none() {
        tracing::debug!(
            column = %columns.matches_played,
            "optional column absent; matches default to 0"
        );
    }

    PlayerTable::new(feature_names, records)
}
