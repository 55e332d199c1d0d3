use super::aggregate::{accuracy_percentage, UserPredictions};
use serde::Serialize;
use std::collections::BTreeMap;

/// How a user's decided predictions are spread over point values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PredictionBreakdown {
    pub total_finished: usize,
    /// Point value -> number of predictions that earned it
    pub by_points: BTreeMap<u32, usize>,
    pub correct_predictions: usize,
    pub accuracy_percentage: u32,
}

impl PredictionBreakdown {
    pub fn count(&self, points: u32) -> usize {
        self.by_points.get(&points).copied().unwrap_or(0)
    }
}

pub fn prediction_breakdown(user: &UserPredictions) -> PredictionBreakdown {
    let mut breakdown = PredictionBreakdown::default();
    for entry in user.matches.iter().filter(|m| m.is_decided()) {
        breakdown.total_finished += 1;
        if let Some(points) = entry.points {
            *breakdown.by_points.entry(points).or_insert(0) += 1;
        }
        if entry.is_correct() {
            breakdown.correct_predictions += 1;
        }
    }
    breakdown.accuracy_percentage =
        accuracy_percentage(breakdown.correct_predictions, breakdown.total_finished);
    breakdown
}
