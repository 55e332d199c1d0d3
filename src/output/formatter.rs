use std::io::IsTerminal;
use chrono::Duration;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::leaderboard::{LeaderboardRow, PredictionBreakdown};
use crate::recalc::RecalcReport;
use crate::scoring::{MatchResult, MatchScore, PodiumScore};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format leaderboard rows as a table: rank, score, name, correct/finished, accuracy
/// Rank column: 3 chars (fits "99."), right-aligned
/// Score column: 5 chars, right-aligned
pub fn format_leaderboard_table(rows: &[LeaderboardRow], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No players yet.".to_string();
    }

    let score_width = 5;
    let separator = "  ";
    // "12/20" and "100%"
    let tail_width = 7 + separator.len() + 4;
    let fixed_width = 3 + 1 + score_width + separator.len() * 2 + tail_width;

    let longest = rows.iter().map(|r| r.name.chars().count()).max().unwrap_or(0);
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest.min(width - fixed_width),
        Some(_) => longest.min(20),
        None => longest,
    };

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let rank_str = format!("{:>2}.", idx + 1);
            let score_padded = format!("{:>width$}", row.total_score, width = score_width);
            let name = truncate_name(&row.name, name_width);
            let name_padded = format!("{:<width$}", name, width = name_width);
            let record = format!(
                "{:>7}",
                format!(
                    "{}/{}",
                    row.correct_predictions_count, row.finished_predictions_count
                )
            );
            let accuracy = format!("{:>4}", format!("{}%", row.accuracy_percentage));

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    rank_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    name_padded.cyan(),
                    separator,
                    record,
                    separator,
                    accuracy.yellow()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    rank_str, score_padded, separator, name_padded, separator, record, separator, accuracy
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format leaderboard rows as tab-separated values for scripting
/// Columns: rank, name, total, all, finished, correct, accuracy (no headers, no colors)
pub fn format_tsv(rows: &[LeaderboardRow]) -> String {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                idx + 1,
                row.name,
                row.total_score,
                row.all_predictions_count,
                row.finished_predictions_count,
                row.correct_predictions_count,
                row.accuracy_percentage
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line summary of how a user's finished predictions scored
pub fn format_breakdown(name: &str, breakdown: &PredictionBreakdown, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let header = format!("{}: {} finished predictions", name, breakdown.total_finished);
    lines.push(if use_colors {
        header.bold().to_string()
    } else {
        header
    });
    for (points, count) in breakdown.by_points.iter().rev() {
        lines.push(format!("  {:>2} pts: {}", points, count));
    }
    lines.push(format!(
        "  Correct: {} ({}%)",
        breakdown.correct_predictions, breakdown.accuracy_percentage
    ));
    lines.join("\n")
}

pub fn format_match_score(predicted: &MatchResult, actual: &MatchResult, score: &MatchScore) -> String {
    format!(
        "{} vs {}: {} pts ({})",
        predicted,
        actual,
        score.points,
        score.rule.label()
    )
}

pub fn format_podium_score(score: &PodiumScore) -> String {
    if score.components.is_empty() {
        return "0 pts (no medalists)".to_string();
    }
    let parts = score
        .components
        .iter()
        .map(|c| format!("{} +{}", c.label, c.points))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} pts ({})", score.points, parts)
}

pub fn format_recalc_report(report: &RecalcReport) -> String {
    let mut lines = vec![format!(
        "Scored {}, pending {}, failed {}",
        report.scored,
        report.pending,
        report.failures.len()
    )];
    for failure in &report.failures {
        lines.push(format!("  {}: {}", failure.item, failure.error));
    }
    lines.join("\n")
}

/// Format time remaining before a deadline
/// "2h" for hours, "3d" for days, "1w" for weeks, "closed" once passed
pub fn format_time_left(duration: Duration) -> String {
    if duration <= Duration::zero() {
        return "closed".to_string();
    }
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "<1m".to_string()
        }
    }
}
