pub mod player;
pub mod similarity;
pub mod tiers;

pub use player::{PlayerRecord, PlayerTable};
pub use similarity::SimilarityMatrix;
pub use tiers::QualityTier;

/// Both source tables, validated against each other. Immutable after load.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub players: PlayerTable,
    pub similarity: SimilarityMatrix,
}
