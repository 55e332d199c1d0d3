use crate::scoring::CORRECT_PREDICTION_POINTS;
use serde::Serialize;
use std::cmp::Ordering;

/// One stored match prediction as the aggregator sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PredictionEntry {
    pub team1_score: Option<u8>,
    pub team2_score: Option<u8>,
    pub match_finished: bool,
    /// Cached score; `None` while the match is pending
    pub points: Option<u32>,
}

impl PredictionEntry {
    pub fn is_filled(&self) -> bool {
        self.team1_score.is_some() && self.team2_score.is_some()
    }

    /// Counts toward the accuracy denominator.
    pub fn is_decided(&self) -> bool {
        self.match_finished && self.points.is_some()
    }

    pub fn is_correct(&self) -> bool {
        self.is_decided() && self.points.is_some_and(|p| p >= CORRECT_PREDICTION_POINTS)
    }
}

/// Everything one user has predicted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPredictions {
    pub user_id: u32,
    pub name: String,
    pub matches: Vec<PredictionEntry>,
    /// Podium points, `None` without a podium prediction or before finalization
    pub podium_points: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub user_id: u32,
    pub name: String,
    pub total_score: u32,
    pub all_predictions_count: usize,
    pub finished_predictions_count: usize,
    pub correct_predictions_count: usize,
    /// Whole percent, rounded half up
    pub accuracy_percentage: u32,
}

/// Share of `correct` in `finished` as a whole percent, rounded half up.
/// Zero when nothing is finished.
pub fn accuracy_percentage(correct: usize, finished: usize) -> u32 {
    if finished == 0 {
        return 0;
    }
    let rounded = (correct * 200 + finished) / (finished * 2);
    rounded as u32
}

pub fn build_row(user: &UserPredictions) -> LeaderboardRow {
    let match_points = user
        .matches
        .iter()
        .filter_map(|m| m.points)
        .fold(0u32, u32::saturating_add);
    let all = user.matches.iter().filter(|m| m.is_filled()).count();
    let finished = user.matches.iter().filter(|m| m.is_decided()).count();
    let correct = user.matches.iter().filter(|m| m.is_correct()).count();

    LeaderboardRow {
        user_id: user.user_id,
        name: user.name.clone(),
        total_score: match_points.saturating_add(user.podium_points.unwrap_or(0)),
        all_predictions_count: all,
        finished_predictions_count: finished,
        correct_predictions_count: correct,
        accuracy_percentage: accuracy_percentage(correct, finished),
    }
}

/// Ranking order: total score descending, then accuracy descending, then
/// name and id ascending so equal rows always come out the same way.
pub fn compare_rows(a: &LeaderboardRow, b: &LeaderboardRow) -> Ordering {
    b.total_score
        .cmp(&a.total_score)
        .then_with(|| b.accuracy_percentage.cmp(&a.accuracy_percentage))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.user_id.cmp(&b.user_id))
}

pub fn build_leaderboard(users: &[UserPredictions]) -> Vec<LeaderboardRow> {
    let mut rows: Vec<LeaderboardRow> = users.iter().map(build_row).collect();
    rows.sort_by(compare_rows);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(points: u32) -> PredictionEntry {
        PredictionEntry {
            team1_score: Some(3),
            team2_score: Some(0),
            match_finished: true,
            points: Some(points),
        }
    }

    fn pending() -> PredictionEntry {
        PredictionEntry {
            team1_score: Some(3),
            team2_score: Some(1),
            match_finished: false,
            points: None,
        }
    }

    fn user(user_id: u32, name: &str, matches: Vec<PredictionEntry>) -> UserPredictions {
        UserPredictions {
            user_id,
            name: name.to_string(),
            matches,
            podium_points: None,
        }
    }

    #[test]
    fn test_row_counts_only_winner_picks_as_correct() {
        let row = build_row(&user(1, "ana", vec![finished(6), finished(1), finished(0)]));
        assert_eq!(row.total_score, 7);
        assert_eq!(row.all_predictions_count, 3);
        assert_eq!(row.finished_predictions_count, 3);
        assert_eq!(row.correct_predictions_count, 1);
        assert_eq!(row.accuracy_percentage, 33);
    }

    #[test]
    fn test_pending_predictions_excluded_from_accuracy() {
        let row = build_row(&user(1, "ana", vec![finished(2), pending(), pending()]));
        assert_eq!(row.all_predictions_count, 3);
        assert_eq!(row.finished_predictions_count, 1);
        assert_eq!(row.correct_predictions_count, 1);
        assert_eq!(row.accuracy_percentage, 100);
    }

    #[test]
    fn test_unfilled_prediction_not_counted() {
        let blank = PredictionEntry {
            team1_score: Some(3),
            team2_score: None,
            match_finished: false,
            points: None,
        };
        let row = build_row(&user(1, "ana", vec![blank]));
        assert_eq!(row.all_predictions_count, 0);
    }

    #[test]
    fn test_podium_points_added() {
        let mut u = user(1, "ana", vec![finished(4)]);
        u.podium_points = Some(35);
        assert_eq!(build_row(&u).total_score, 39);
    }

    #[test]
    fn test_total_score_saturates() {
        let mut u = user(1, "ana", vec![finished(u32::MAX), finished(6)]);
        u.podium_points = Some(70);
        assert_eq!(build_row(&u).total_score, u32::MAX);
    }

    #[test]
    fn test_empty_user_is_zero_row() {
        let row = build_row(&user(7, "nobody", vec![]));
        assert_eq!(row.total_score, 0);
        assert_eq!(row.all_predictions_count, 0);
        assert_eq!(row.finished_predictions_count, 0);
        assert_eq!(row.correct_predictions_count, 0);
        assert_eq!(row.accuracy_percentage, 0);
    }

    #[test]
    fn test_accuracy_rounds_half_up() {
        assert_eq!(accuracy_percentage(1, 3), 33);
        assert_eq!(accuracy_percentage(2, 3), 67);
        assert_eq!(accuracy_percentage(1, 8), 13); // 12.5
        assert_eq!(accuracy_percentage(1, 200), 1); // 0.5
        assert_eq!(accuracy_percentage(0, 5), 0);
        assert_eq!(accuracy_percentage(0, 0), 0);
    }

    #[test]
    fn test_ranking_by_score_then_accuracy_then_name() {
        let users = vec![
            user(1, "carl", vec![finished(2), finished(2)]),          // 4 pts, 100%
            user(2, "bea", vec![finished(4), finished(0)]),           // 4 pts, 50%
            user(3, "dan", vec![finished(6)]),                        // 6 pts
            user(4, "abe", vec![finished(1), finished(1), finished(2)]), // 4 pts, 33%
            user(5, "ann", vec![finished(2), finished(2)]),           // 4 pts, 100%
        ];
        let names: Vec<String> = build_leaderboard(&users)
            .into_iter()
            .map(|row| row.name)
            .collect();
        assert_eq!(names, vec!["dan", "ann", "carl", "bea", "abe"]);
    }

    #[test]
    fn test_build_leaderboard_empty() {
        assert!(build_leaderboard(&[]).is_empty());
    }
}
