use super::types::{Fixture, Ledger, MatchPrediction, PodiumPrediction, User};
use crate::error::SubmissionError;
use crate::leaderboard::{build_leaderboard, LeaderboardRow, PredictionEntry, UserPredictions};
use crate::recalc::{recalculate_match, recalculate_podiums, RecalcReport};
use crate::scoring::{MatchResult, MatchRules, Podium, PodiumRules};
use chrono::{DateTime, Utc};

impl Ledger {
    /// Register a user; names are unique ignoring ASCII case.
    pub fn add_user(&mut self, name: &str) -> Result<u32, SubmissionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SubmissionError::EmptyUserName);
        }
        if self.user_by_name(name).is_some() {
            return Err(SubmissionError::DuplicateUser(name.to_string()));
        }
        let id = self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        self.users.push(User {
            id,
            name: name.to_string(),
        });
        Ok(id)
    }

    /// Add a team to the podium roster; names are unique ignoring ASCII case.
    pub fn add_team(&mut self, name: &str) -> Result<(), SubmissionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SubmissionError::EmptyTeamName);
        }
        if self.teams.iter().any(|t| t.eq_ignore_ascii_case(name)) {
            return Err(SubmissionError::DuplicateTeam(name.to_string()));
        }
        self.teams.push(name.to_string());
        Ok(())
    }

    /// Schedule a match; predictions for it close at `starts_at`.
    pub fn add_fixture(
        &mut self,
        team1: &str,
        team2: &str,
        starts_at: DateTime<Utc>,
        round: Option<String>,
    ) -> Result<u32, SubmissionError> {
        let (team1, team2) = (team1.trim(), team2.trim());
        if team1.is_empty() || team2.is_empty() {
            return Err(SubmissionError::EmptyTeamName);
        }
        if team1.eq_ignore_ascii_case(team2) {
            return Err(SubmissionError::SameTeams(team1.to_string()));
        }
        let id = self.matches.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        self.matches.push(Fixture {
            id,
            team1: team1.to_string(),
            team2: team2.to_string(),
            starts_at,
            round,
            result: None,
            finished: false,
        });
        tracing::debug!("Added match {}: {} vs {}", id, team1, team2);
        Ok(id)
    }

    /// Set or clear the podium prediction deadline. Locked once finalized.
    pub fn set_tournament_deadline(
        &mut self,
        deadline: Option<DateTime<Utc>>,
    ) -> Result<(), SubmissionError> {
        if self.tournament.finalized {
            return Err(SubmissionError::TournamentFinalized);
        }
        self.tournament.deadline = deadline;
        Ok(())
    }

    /// Store a user's prediction for a match, replacing any earlier one.
    ///
    /// Rejected once the match has started or finished.
    pub fn submit_prediction(
        &mut self,
        user_id: u32,
        match_id: u32,
        predicted: MatchResult,
        now: DateTime<Utc>,
    ) -> Result<(), SubmissionError> {
        predicted.validate()?;
        if self.user(user_id).is_none() {
            return Err(SubmissionError::UnknownUser(user_id.to_string()));
        }
        let fixture = self
            .fixture(match_id)
            .ok_or(SubmissionError::UnknownMatch(match_id))?;
        if fixture.finished {
            return Err(SubmissionError::MatchFinished(match_id));
        }
        if !fixture.accepts_predictions(now) {
            return Err(SubmissionError::MatchDeadlinePassed(match_id));
        }

        match self
            .predictions
            .iter_mut()
            .find(|p| p.user_id == user_id && p.match_id == match_id)
        {
            Some(existing) => {
                existing.team1_score = Some(predicted.team1);
                existing.team2_score = Some(predicted.team2);
                existing.points = None;
            }
            None => self.predictions.push(MatchPrediction {
                user_id,
                match_id,
                team1_score: Some(predicted.team1),
                team2_score: Some(predicted.team2),
                points: None,
                created_at: now,
            }),
        }
        tracing::debug!("User {} predicted {} for match {}", user_id, predicted, match_id);
        Ok(())
    }

    /// Enter or correct a match result and rescore every prediction for it.
    pub fn record_result(
        &mut self,
        match_id: u32,
        actual: MatchResult,
        rules: &MatchRules,
    ) -> Result<RecalcReport, SubmissionError> {
        actual.validate()?;
        let fixture = self
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(SubmissionError::UnknownMatch(match_id))?;
        if fixture.finished && fixture.result != Some(actual) {
            tracing::info!(
                "Correcting match {} result {} -> {}",
                match_id,
                fixture
                    .result
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "none".to_string()),
                actual
            );
        }
        fixture.result = Some(actual);
        fixture.finished = true;

        let report = recalculate_match(self, match_id, rules);
        tracing::info!("Match {} finished {}: {} predictions scored", match_id, actual, report.scored);
        Ok(report)
    }

    /// Store a user's podium prediction, replacing any earlier one.
    pub fn submit_podium(
        &mut self,
        user_id: u32,
        podium: Podium,
        now: DateTime<Utc>,
    ) -> Result<(), SubmissionError> {
        podium.validate(&self.teams)?;
        if self.user(user_id).is_none() {
            return Err(SubmissionError::UnknownUser(user_id.to_string()));
        }
        if self.tournament.finalized {
            return Err(SubmissionError::TournamentFinalized);
        }
        if !self.tournament.accepts_predictions(now) {
            return Err(SubmissionError::TournamentDeadlinePassed);
        }

        match self
            .podium_predictions
            .iter_mut()
            .find(|p| p.user_id == user_id)
        {
            Some(existing) => {
                existing.podium = podium;
                existing.points_earned = None;
            }
            None => self.podium_predictions.push(PodiumPrediction {
                user_id,
                podium,
                points_earned: None,
                created_at: now,
            }),
        }
        Ok(())
    }

    /// Lock in the final podium and score every podium prediction.
    ///
    /// Finalization happens once; a second call is rejected.
    pub fn finalize_tournament(
        &mut self,
        actual: Podium,
        rules: &PodiumRules,
    ) -> Result<RecalcReport, SubmissionError> {
        if self.tournament.finalized {
            return Err(SubmissionError::TournamentFinalized);
        }
        actual.validate(&self.teams)?;
        self.tournament.result = Some(actual);
        self.tournament.finalized = true;

        let report = recalculate_podiums(self, rules);
        tracing::info!("Tournament finalized: {} podium predictions scored", report.scored);
        Ok(report)
    }

    /// Aggregator input for every registered user, in registration order.
    pub fn user_predictions(&self) -> Vec<UserPredictions> {
        self.users
            .iter()
            .map(|user| UserPredictions {
                user_id: user.id,
                name: user.name.clone(),
                matches: self
                    .predictions
                    .iter()
                    .filter(|p| p.user_id == user.id)
                    .map(|p| PredictionEntry {
                        team1_score: p.team1_score,
                        team2_score: p.team2_score,
                        match_finished: self.fixture(p.match_id).is_some_and(|m| m.finished),
                        points: p.points,
                    })
                    .collect(),
                podium_points: self
                    .podium_prediction(user.id)
                    .and_then(|p| p.points_earned),
            })
            .collect()
    }

    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        build_leaderboard(&self.user_predictions())
    }
}
