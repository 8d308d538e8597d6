use serde::Serialize;

pub const ELITE_MIN_PERCENTILE: f64 = 85.0;
pub const ABOVE_AVERAGE_MIN_PERCENTILE: f64 = 60.0;
pub const LEAGUE_AVERAGE_MIN_PERCENTILE: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Elite,
    AboveAverage,
    LeagueAverage,
    BelowAverage,
}

impl QualityTier {
    /// Lower bounds are inclusive. NaN falls through to `BelowAverage`.
    pub fn classify(percentile: f64) -> Self {
        if percentile >= ELITE_MIN_PERCENTILE {
            QualityTier::Elite
        } else if percentile >= ABOVE_AVERAGE_MIN_PERCENTILE {
            QualityTier::AboveAverage
        } else if percentile >= LEAGUE_AVERAGE_MIN_PERCENTILE {
            QualityTier::LeagueAverage
        } else {
            QualityTier::BelowAverage
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QualityTier::Elite => "Elite impact",
            QualityTier::AboveAverage => "Above average",
            QualityTier::LeagueAverage => "League average",
            QualityTier::BelowAverage => "Below average",
        }
    }
}

pub fn tier_order() -> &'static [QualityTier] {
    &[
        QualityTier::Elite,
        QualityTier::AboveAverage,
        QualityTier::LeagueAverage,
        QualityTier::BelowAverage,
    ]
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/tiers.rs"]
mod tests;
