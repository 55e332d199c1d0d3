pub mod aggregate;
pub mod breakdown;

pub use aggregate::{
    accuracy_percentage, build_leaderboard, build_row, compare_rows, LeaderboardRow,
    PredictionEntry, UserPredictions,
};
pub use breakdown::{prediction_breakdown, PredictionBreakdown};
