use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{QueryError, Result};
use crate::model::{Dataset, QualityTier};
use crate::pipeline::neighbors::{Neighbor, best_match, top_neighbors};
use crate::pipeline::percentile::{PlayerProfile, profile, tier_counts};
use crate::pipeline::style::{ClosedVectors, StyleAxis, build_closed_axes};
use crate::report::json::render_json;
use crate::report::text::render_report_text;
use crate::report::{format_f64_6, quantile};

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

impl Default for ToolMeta {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TierStat {
    pub tier: QualityTier,
    pub label: &'static str,
    pub count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeagueSummary {
    pub players: usize,
    pub features: usize,
    pub score_p10: f64,
    pub score_median: f64,
    pub score_p90: f64,
    pub tiers: Vec<TierStat>,
}

/// Everything derived for one selected player. This is the pure
/// `player -> views` step; nothing here depends on selection state.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    pub tool: ToolMeta,
    pub profile: PlayerProfile,
    pub neighbors: Vec<Neighbor>,
    pub best_match: Option<String>,
    pub comparison: Option<ClosedVectors>,
    pub league: LeagueSummary,
}

pub fn league_summary(dataset: &Dataset) -> LeagueSummary {
    let players = &dataset.players;
    let scores: Vec<f64> = players.records().iter().map(|r| r.score).collect();
    let n = players.len();
    let tiers = tier_counts(players)
        .into_iter()
        .map(|(tier, count)| TierStat {
            tier,
            label: tier.label(),
            count,
            fraction: if n > 0 { count as f64 / n as f64 } else { 0.0 },
        })
        .collect();
    LeagueSummary {
        players: n,
        features: players.feature_names().len(),
        score_p10: quantile(&scores, 0.10),
        score_median: quantile(&scores, 0.50),
        score_p90: quantile(&scores, 0.90),
        tiers,
    }
}

/// The comparison partner defaults to the best match. A single-player dataset
/// has neither neighbors nor a comparison.
pub fn build_player_report(
    dataset: &Dataset,
    player_id: &str,
    top_n: usize,
    partner: Option<&str>,
    axes: &[StyleAxis<'_>],
) -> std::result::Result<PlayerReport, QueryError> {
    let profile = profile(&dataset.players, player_id)?;
    let neighbors = top_neighbors(dataset, player_id, top_n)?;
    let best = match best_match(dataset, player_id) {
        Ok(id) => Some(id),
        Err(QueryError::NoCandidates(_)) => None,
        Err(e) => return Err(e),
    };

    let partner = partner.map(str::to_string).or_else(|| best.clone());
    let comparison = match partner {
        Some(other) => Some(build_closed_axes(&dataset.players, player_id, &other, axes)?),
        None => None,
    };

    Ok(PlayerReport {
        tool: ToolMeta::default(),
        profile,
        neighbors,
        best_match: best,
        comparison,
        league: league_summary(dataset),
    })
}

pub fn write_reports(report: &PlayerReport, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    let summary_path = out_dir.join("summary.json");
    write_text(&summary_path, &render_json(report)?)?;

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &render_report_text(report))?;

    let neighbors_path = out_dir.join("neighbors.tsv");
    write_neighbors_tsv(&report.neighbors, &neighbors_path)?;

    tracing::info!(
        out_dir = %out_dir.display(),
        player = %report.profile.player_id,
        "reports written"
    );
    Ok(())
}

fn write_neighbors_tsv(neighbors: &[Neighbor], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "rank\tplayer\tsimilarity\tsimilarity_pct\tscore\tminutes_played")?;
    for (i, n) in neighbors.iter().enumerate() {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            i + 1,
            n.player_id,
            format_f64_6(n.similarity),
            format_f64_6(n.similarity_percent()),
            format_f64_6(n.score),
            n.minutes_played
        )?;
    }
    w.flush()
}

fn write_text(path: &Path, content: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(content.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/report.rs"]
mod tests;
