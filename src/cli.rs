use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::error::Result;
use crate::input::{PlayerColumns, TableSources, TableStore};
use crate::pipeline::neighbors::{DEFAULT_TOP_N, Neighbor, best_match, top_n_from, top_neighbors};
use crate::pipeline::percentile::{profile, score_distribution};
use crate::pipeline::report::{build_player_report, write_reports};
use crate::pipeline::style::{DEFAULT_STYLE_AXES, StyleAxis, build_closed_axes};
use crate::report::json::render_json;
use crate::report::text::{
    render_comparison, render_distribution, render_neighbors, render_profile,
};

#[derive(Debug, Parser)]
#[command(
    name = "gpis-scout",
    version,
    about = "GPIS percentile grading and player style similarity"
)]
pub struct Cli {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct DataArgs {
    /// Player table (.parquet, or TSV optionally .gz)
    #[arg(long, env = "GPIS_PLAYERS", default_value = "player_metrics.tsv", global = true)]
    pub players: PathBuf,

    /// Similarity table (.parquet, or TSV optionally .gz)
    #[arg(long, env = "GPIS_SIMILARITY", default_value = "similarity_matrix.tsv", global = true)]
    pub similarity: PathBuf,

    #[arg(long, default_value = "player", global = true)]
    pub id_column: String,

    #[arg(long, default_value = "GPIS", global = true)]
    pub score_column: String,
}

impl DataArgs {
    pub fn sources(&self) -> TableSources {
        TableSources {
            players_path: self.players.clone(),
            similarity_path: self.similarity.clone(),
            columns: PlayerColumns {
                id: self.id_column.clone(),
                score: self.score_column.clone(),
                ..PlayerColumns::default()
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score, percentile and quality tier of one player
    Profile {
        #[arg(long)]
        player: String,
    },
    /// Nearest neighbors by precomputed similarity
    Similar {
        #[arg(long)]
        player: String,
        #[arg(long, default_value_t = DEFAULT_TOP_N as i64, allow_negative_numbers = true)]
        top: i64,
    },
    /// Closed-loop style vectors for two players
    Compare {
        #[arg(long)]
        player: String,
        /// Second player; defaults to the best match
        #[arg(long = "with")]
        partner: Option<String>,
        /// Feature columns as `column` or `column=Label`, comma separated
        #[arg(long, value_delimiter = ',')]
        features: Vec<String>,
    },
    /// All players sorted by score
    Distribution {
        #[arg(long)]
        player: Option<String>,
    },
    /// Write summary.json, report.txt and neighbors.tsv for a player
    Report {
        #[arg(long)]
        player: String,
        #[arg(long, default_value_t = DEFAULT_TOP_N as i64, allow_negative_numbers = true)]
        top: i64,
        #[arg(long = "with")]
        partner: Option<String>,
        #[arg(long, value_delimiter = ',')]
        features: Vec<String>,
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct SimilarOutput<'a> {
    player: &'a str,
    neighbors: Vec<Neighbor>,
    best_match: Option<String>,
}

/// Splits `column=Label` specs; a bare column is its own label.
pub fn parse_feature_specs(specs: &[String]) -> Vec<(String, String)> {
    specs
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| match s.split_once('=') {
            Some((col, label)) => (col.trim().to_string(), label.trim().to_string()),
            None => (s.to_string(), s.to_string()),
        })
        .collect()
}

fn axes_from<'a>(specs: &'a [(String, String)]) -> Vec<StyleAxis<'a>> {
    if specs.is_empty() {
        return DEFAULT_STYLE_AXES.to_vec();
    }
    specs
        .iter()
        .map(|(column, label)| StyleAxis {
            column: column.as_str(),
            label: label.as_str(),
        })
        .collect()
}

/// Runs one command against the store and returns what should be printed.
pub fn execute(cli: &Cli, store: &TableStore) -> Result<String> {
    let dataset = store.get()?;
    let json = cli.format == OutputFormat::Json;

    let output = match &cli.command {
        Command::Profile { player } => {
            let p = profile(&dataset.players, player)?;
            if json { render_json(&p)? } else { render_profile(&p) }
        }
        Command::Similar { player, top } => {
            let n = top_n_from(*top)?;
            let neighbors = top_neighbors(dataset, player, n)?;
            let best = neighbors.first().map(|n| n.player_id.clone());
            if json {
                render_json(&SimilarOutput {
                    player: player.as_str(),
                    neighbors,
                    best_match: best,
                })?
            } else {
                render_neighbors(player, &neighbors, best.as_deref())
            }
        }
        Command::Compare {
            player,
            partner,
            features,
        } => {
            let other = match partner {
                Some(p) => p.clone(),
                None => best_match(dataset, player)?,
            };
            let specs = parse_feature_specs(features);
            let cmp = build_closed_axes(&dataset.players, player, &other, &axes_from(&specs))?;
            if json { render_json(&cmp)? } else { render_comparison(&cmp) }
        }
        Command::Distribution { player } => {
            let entries = score_distribution(&dataset.players, player.as_deref())?;
            if json { render_json(&entries)? } else { render_distribution(&entries) }
        }
        Command::Report {
            player,
            top,
            partner,
            features,
            out,
        } => {
            let n = top_n_from(*top)?;
            let specs = parse_feature_specs(features);
            let report =
                build_player_report(dataset, player, n, partner.as_deref(), &axes_from(&specs))?;
            write_reports(&report, out)?;
            if json {
                render_json(&report)?
            } else {
                format!("reports written to {}\n", out.display())
            }
        }
    };

    Ok(output)
}

#[cfg(test)]
#[path = "../tests/src_inline/cli.rs"]
mod tests;
