use thiserror::Error;

use crate::input::DataLoadError;

pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable failures of a single query against loaded tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    #[error("invalid neighbor count {0}: must be positive")]
    InvalidTopN(i64),

    #[error("feature {feature} is missing for player {player}")]
    MissingFeature { player: String, feature: String },

    #[error("at least one feature is required to build style vectors")]
    EmptyFeatureList,

    #[error("player {0} has no other players to compare against")]
    NoCandidates(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] DataLoadError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
