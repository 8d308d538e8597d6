use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod players;
pub mod reader;
pub mod similarity;
pub mod store;

use players::parse_player_table;
use similarity::parse_similarity_matrix;

use crate::model::{Dataset, PlayerTable, SimilarityMatrix};

pub use store::TableStore;

/// Tolerance used when auditing the similarity matrix for symmetry.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

const MISMATCH_SAMPLE: usize = 5;

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("empty input: {0}")]
    Empty(String),

    #[error("{table} is missing required column '{column}'")]
    MissingColumn { table: &'static str, column: String },

    #[error("duplicate player identifier: {0}")]
    DuplicatePlayer(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error(
        "player identifiers differ between tables: {only_players} only in player table, \
         {only_similarity} only in similarity table (e.g. {sample})"
    )]
    IdMismatch {
        only_players: usize,
        only_similarity: usize,
        sample: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerColumns {
    pub id: String,
    pub score: String,
    pub minutes_played: String,
    pub matches_played: String,
}

impl Default for PlayerColumns {
    fn default() -> Self {
        Self {
            id: "player".to_string(),
            score: "GPIS".to_string(),
            minutes_played: "minutes_played".to_string(),
            matches_played: "matches_played".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableSources {
    pub players_path: PathBuf,
    pub similarity_path: PathBuf,
    pub columns: PlayerColumns,
}

impl TableSources {
    pub fn new(players_path: impl Into<PathBuf>, similarity_path: impl Into<PathBuf>) -> Self {
        Self {
            players_path: players_path.into(),
            similarity_path: similarity_path.into(),
            columns: PlayerColumns::default(),
        }
    }
}

pub fn load_tables(sources: &TableSources) -> Result<Dataset, DataLoadError> {
    let players = load_players(&sources.players_path, &sources.columns)?;
    let similarity = load_similarity(&sources.similarity_path)?;
    validate_id_sets(&players, &similarity)?;

    tracing::info!(
        players = players.len(),
        features = players.feature_names().len(),
        "tables loaded and validated"
    );

    Ok(Dataset {
        players,
        similarity,
    })
}

fn load_players(path: &Path, columns: &PlayerColumns) -> Result<PlayerTable, DataLoadError> {
    tracing::info!(path = %path.display(), "reading player table");
    parse_player_table(path, columns)
}

fn load_similarity(path: &Path) -> Result<SimilarityMatrix, DataLoadError> {
    tracing::info!(path = %path.display(), "reading similarity table");
    let matrix = parse_similarity_matrix(path)?;
    let asymmetric = matrix.asymmetric_pairs(SYMMETRY_TOLERANCE);
    if asymmetric > 0 {
        tracing::warn!(
            pairs = asymmetric,
            "similarity table is not symmetric; neighbors are read row-wise"
        );
    }
    Ok(matrix)
}

pub fn validate_id_sets(
    players: &PlayerTable,
    similarity: &SimilarityMatrix,
) -> Result<(), DataLoadError> {
    let only_players: BTreeSet<&str> = players
        .ids()
        .filter(|id| !similarity.contains(id))
        .collect();
    let only_similarity: BTreeSet<&str> = similarity
        .ids()
        .iter()
        .map(String::as_str)
        .filter(|id| !players.contains(id))
        .collect();

    if only_players.is_empty() && only_similarity.is_empty() {
        return Ok(());
    }

    let sample = only_players
        .iter()
        .chain(only_similarity.iter())
        .take(MISMATCH_SAMPLE)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");

    Err(DataLoadError::IdMismatch {
        only_players: only_players.len(),
        only_similarity: only_similarity.len(),
        sample,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
