pub mod formatter;

pub use formatter::{
    format_breakdown, format_leaderboard_table, format_match_score, format_podium_score,
    format_recalc_report, format_time_left, format_tsv, should_use_colors,
};
