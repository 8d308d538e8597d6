use crate::pipeline::neighbors::Neighbor;
use crate::pipeline::percentile::{DistributionEntry, PlayerProfile};
use crate::pipeline::report::{LeagueSummary, PlayerReport};
use crate::pipeline::style::ClosedVectors;
use crate::report::format_f64_6;

pub fn render_profile(profile: &PlayerProfile) -> String {
    let mut out = String::new();
    out.push_str(&format!("Player: {}\n", profile.player_id));
    out.push_str(&format!("GPIS: {:.2}\n", profile.score));
    out.push_str(&format!(
        "{} · Percentile {:.1} (Top {:.0}%)\n",
        profile.tier.label(),
        profile.percentile,
        profile.top_percent
    ));
    out.push_str(&format!("Matches: {}\n", profile.matches_played));
    out.push_str(&format!("Minutes: {}\n", profile.minutes_played));
    out
}

pub fn render_neighbors(player_id: &str, neighbors: &[Neighbor], best: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Most similar players to {}\n", player_id));
    if neighbors.is_empty() {
        out.push_str("(no other players)\n");
        return out;
    }
    out.push_str("rank\tplayer\tsimilarity_pct\tGPIS\tminutes\n");
    for (i, n) in neighbors.iter().enumerate() {
        let marker = if best == Some(n.player_id.as_str()) { " *" } else { "" };
        out.push_str(&format!(
            "{}\t{}{}\t{:.1}\t{:.2}\t{}\n",
            i + 1,
            n.player_id,
            marker,
            n.similarity_percent(),
            n.score,
            n.minutes_played
        ));
    }
    if let Some(best) = best {
        out.push_str(&format!("Best match: {}\n", best));
    }
    out
}

pub fn render_comparison(cmp: &ClosedVectors) -> String {
    let mut out = String::new();
    out.push_str(&format!("Style comparison: {} vs. {}\n", cmp.player_a, cmp.player_b));
    // Skip the closing element; it repeats the first axis.
    let k = cmp.labels.len().saturating_sub(1);
    for i in 0..k {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            cmp.labels[i],
            format_f64_6(cmp.a[i]),
            format_f64_6(cmp.b[i])
        ));
    }
    out
}

pub fn render_distribution(entries: &[DistributionEntry]) -> String {
    let mut out = String::new();
    out.push_str("rank\tplayer\tGPIS\n");
    for (i, e) in entries.iter().enumerate() {
        let marker = if e.selected { " <" } else { "" };
        out.push_str(&format!(
            "{}\t{}\t{}{}\n",
            i + 1,
            e.player_id,
            format_f64_6(e.score),
            marker
        ));
    }
    out
}

pub fn render_league(league: &LeagueSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Players: {}\nFeatures: {}\n",
        league.players, league.features
    ));
    out.push_str(&format!(
        "GPIS p10 / median / p90: {} / {} / {}\n",
        format_f64_6(league.score_p10),
        format_f64_6(league.score_median),
        format_f64_6(league.score_p90)
    ));
    for t in &league.tiers {
        out.push_str(&format!(
            "{}: {} ({})\n",
            t.label,
            t.count,
            format_f64_6(t.fraction)
        ));
    }
    out
}

pub fn render_report_text(report: &PlayerReport) -> String {
    let mut out = String::new();

    out.push_str("General Player Impact Score Report\n");
    out.push_str("==================================\n\n");

    out.push_str("1. Player overview\n");
    out.push_str(&render_profile(&report.profile));
    out.push('\n');

    out.push_str("2. League context\n");
    out.push_str(&render_league(&report.league));
    out.push('\n');

    out.push_str("3. Similarity\n");
    out.push_str(&render_neighbors(
        &report.profile.player_id,
        &report.neighbors,
        report.best_match.as_deref(),
    ));
    out.push('\n');

    out.push_str("4. Style comparison\n");
    match &report.comparison {
        Some(cmp) => out.push_str(&render_comparison(cmp)),
        None => out.push_str("(no comparison partner)\n"),
    }
    out.push('\n');

    out.push_str(&format!(
        "Generated by {} {}. GPIS and similarity are decision-support signals, not absolute rankings.\n",
        report.tool.name, report.tool.version
    ));
    out
}
