use crate::scoring::{MatchResult, Podium};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const LEDGER_VERSION: u32 = 1;

/// Raw predictions and results. Stored `points` fields are a cache derived
/// from these and can always be rebuilt with [`crate::recalc::recalculate_all`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ledger {
    pub version: u32,
    #[serde(default)]
    pub users: Vec<User>,
    /// Registered team roster
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub matches: Vec<Fixture>,
    #[serde(default)]
    pub predictions: Vec<MatchPrediction>,
    #[serde(default)]
    pub podium_predictions: Vec<PodiumPrediction>,
    #[serde(default)]
    pub tournament: TournamentState,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub name: String,
}

/// A scheduled match. Predictions close when it starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Fixture {
    pub id: u32,
    pub team1: String,
    pub team2: String,
    pub starts_at: DateTime<Utc>,
    #[serde(default)]
    pub round: Option<String>,
    #[serde(default)]
    pub result: Option<MatchResult>,
    #[serde(default)]
    pub finished: bool,
}

impl Fixture {
    pub fn accepts_predictions(&self, now: DateTime<Utc>) -> bool {
        !self.finished && now < self.starts_at
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchPrediction {
    pub user_id: u32,
    pub match_id: u32,
    pub team1_score: Option<u8>,
    pub team2_score: Option<u8>,
    #[serde(default)]
    pub points: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl MatchPrediction {
    /// The predicted score, if both sides were filled in.
    pub fn predicted(&self) -> Option<MatchResult> {
        match (self.team1_score, self.team2_score) {
            (Some(team1), Some(team2)) => Some(MatchResult { team1, team2 }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PodiumPrediction {
    pub user_id: u32,
    pub podium: Podium,
    #[serde(default)]
    pub points_earned: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentState {
    /// Podium predictions close at this time; open indefinitely when unset
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub result: Option<Podium>,
    #[serde(default)]
    pub finalized: bool,
}

impl TournamentState {
    pub fn accepts_predictions(&self, now: DateTime<Utc>) -> bool {
        !self.finalized && self.deadline.map_or(true, |deadline| now < deadline)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            version: LEDGER_VERSION,
            users: Vec::new(),
            teams: Vec::new(),
            matches: Vec::new(),
            predictions: Vec::new(),
            podium_predictions: Vec::new(),
            tournament: TournamentState::default(),
        }
    }

    pub fn user(&self, user_id: u32) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn user_by_name(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.name.eq_ignore_ascii_case(name))
    }

    pub fn fixture(&self, match_id: u32) -> Option<&Fixture> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn prediction(&self, user_id: u32, match_id: u32) -> Option<&MatchPrediction> {
        self.predictions
            .iter()
            .find(|p| p.user_id == user_id && p.match_id == match_id)
    }

    pub fn podium_prediction(&self, user_id: u32) -> Option<&PodiumPrediction> {
        self.podium_predictions.iter().find(|p| p.user_id == user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fixture(starts_in_hours: i64) -> Fixture {
        Fixture {
            id: 1,
            team1: "Poland".to_string(),
            team2: "Italy".to_string(),
            starts_at: Utc::now() + Duration::hours(starts_in_hours),
            round: None,
            result: None,
            finished: false,
        }
    }

    #[test]
    fn test_new_ledger_empty() {
        let ledger = Ledger::new();
        assert_eq!(ledger.version, LEDGER_VERSION);
        assert!(ledger.users.is_empty());
        assert!(!ledger.tournament.finalized);
    }

    #[test]
    fn test_fixture_closes_at_start() {
        let now = Utc::now();
        assert!(fixture(2).accepts_predictions(now));
        assert!(!fixture(-2).accepts_predictions(now));

        let mut finished = fixture(2);
        finished.finished = true;
        assert!(!finished.accepts_predictions(now));
    }

    #[test]
    fn test_prediction_requires_both_scores() {
        let mut prediction = MatchPrediction {
            user_id: 1,
            match_id: 1,
            team1_score: Some(3),
            team2_score: None,
            points: None,
            created_at: Utc::now(),
        };
        assert!(prediction.predicted().is_none());
        prediction.team2_score = Some(1);
        assert_eq!(prediction.predicted(), Some(MatchResult { team1: 3, team2: 1 }));
    }

    #[test]
    fn test_tournament_deadline() {
        let now = Utc::now();
        let mut state = TournamentState::default();
        assert!(state.accepts_predictions(now));

        state.deadline = Some(now - Duration::minutes(1));
        assert!(!state.accepts_predictions(now));

        state.deadline = Some(now + Duration::days(1));
        state.finalized = true;
        assert!(!state.accepts_predictions(now));
    }

    #[test]
    fn test_ledger_parses_minimal_json() {
        let json = r#"{"version": 1, "users": [{"id": 1, "name": "ana"}]}"#;
        let ledger: Ledger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.user(1).unwrap().name, "ana");
        assert_eq!(ledger.user_by_name("ANA").unwrap().id, 1);
        assert!(ledger.matches.is_empty());
    }
}
