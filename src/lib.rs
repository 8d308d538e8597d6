//! GPIS percentile grading and style-similarity retrieval over two
//! precomputed, read-only tables: a per-player feature table and a square
//! player similarity matrix.

pub mod cli;
pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;

pub use error::{Error, QueryError, Result};
pub use input::{DataLoadError, TableSources, TableStore};
pub use model::{Dataset, PlayerRecord, PlayerTable, QualityTier, SimilarityMatrix};

#[cfg(test)]
#[path = "../tests/src_inline/fixtures.rs"]
pub(crate) mod fixtures;
