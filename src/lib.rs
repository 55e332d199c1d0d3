//! Scoring and ranking for volleyball prediction games.
//!
//! Match predictions are scored by an ordered rule list ([`scoring::MatchRules`]),
//! podium predictions by additive checks ([`scoring::PodiumRules`]), and the
//! [`leaderboard`] turns scored predictions into ranked rows.

pub mod config;
pub mod error;
pub mod leaderboard;
pub mod logging;
pub mod output;
pub mod recalc;
pub mod scoring;
pub mod store;

pub use error::{InvalidPodiumError, InvalidResultError, RecalcError, SubmissionError};
pub use leaderboard::{build_leaderboard, LeaderboardRow};
pub use scoring::{score_match, score_tournament, validate_match_result};
