pub mod neighbors;
pub mod percentile;
pub mod report;
pub mod style;
