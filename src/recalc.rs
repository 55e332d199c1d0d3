use crate::error::RecalcError;
use crate::scoring::{MatchRules, PodiumRules, ScoringRules};
use crate::store::{Fixture, Ledger, MatchPrediction, PodiumPrediction, TournamentState};
use std::fmt;

/// Which stored prediction a recalculation outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecalcItem {
    Match { user_id: u32, match_id: u32 },
    Podium { user_id: u32 },
}

impl fmt::Display for RecalcItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecalcItem::Match { user_id, match_id } => {
                write!(f, "user {} / match {}", user_id, match_id)
            }
            RecalcItem::Podium { user_id } => write!(f, "user {} / podium", user_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecalcFailure {
    pub item: RecalcItem,
    pub error: RecalcError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecalcReport {
    /// Predictions that now carry points
    pub scored: usize,
    /// Predictions left without points (match pending or score not filled in)
    pub pending: usize,
    pub failures: Vec<RecalcFailure>,
}

impl RecalcReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, item: RecalcItem, outcome: &Result<Option<u32>, RecalcError>) {
        match outcome {
            Ok(Some(_)) => self.scored += 1,
            Ok(None) => self.pending += 1,
            Err(error) => {
                tracing::warn!("Skipping {}: {}", item, error);
                self.failures.push(RecalcFailure {
                    item,
                    error: error.clone(),
                });
            }
        }
    }
}

/// Points for one match prediction, or `None` while the match is still open.
///
/// Depends only on its arguments, so any number of these can run in any order.
pub fn rescore_prediction(
    prediction: &MatchPrediction,
    fixture: Option<&Fixture>,
    rules: &MatchRules,
) -> Result<Option<u32>, RecalcError> {
    let fixture = fixture.ok_or(RecalcError::UnknownMatch(prediction.match_id))?;
    if !fixture.finished {
        return Ok(None);
    }
    let actual = fixture.result.ok_or(RecalcError::MissingResult(fixture.id))?;
    let predicted = prediction
        .predicted()
        .ok_or(RecalcError::MissingPrediction(fixture.id))?;
    Ok(Some(rules.evaluate(&predicted, &actual)?.points))
}

/// Points for one podium prediction, or `None` until the tournament is finalized.
///
/// Both podiums must name distinct teams from `roster`.
pub fn rescore_podium(
    prediction: &PodiumPrediction,
    tournament: &TournamentState,
    roster: &[String],
    rules: &PodiumRules,
) -> Result<Option<u32>, RecalcError> {
    if !tournament.finalized {
        return Ok(None);
    }
    let actual = tournament.result.as_ref().ok_or(RecalcError::MissingPodium)?;
    prediction.podium.validate(roster)?;
    actual.validate(roster)?;
    Ok(Some(rules.evaluate(&prediction.podium, actual)?.points))
}

/// Recompute the cached points of every prediction for one match.
pub fn recalculate_match(ledger: &mut Ledger, match_id: u32, rules: &MatchRules) -> RecalcReport {
    let mut report = RecalcReport::default();
    let fixture = ledger.matches.iter().find(|m| m.id == match_id);
    for prediction in ledger
        .predictions
        .iter_mut()
        .filter(|p| p.match_id == match_id)
    {
        let item = RecalcItem::Match {
            user_id: prediction.user_id,
            match_id,
        };
        let outcome = rescore_prediction(prediction, fixture, rules);
        report.record(item, &outcome);
        prediction.points = outcome.unwrap_or(None);
    }
    report
}

/// Recompute the cached points of every podium prediction.
pub fn recalculate_podiums(ledger: &mut Ledger, rules: &PodiumRules) -> RecalcReport {
    let mut report = RecalcReport::default();
    let tournament = &ledger.tournament;
    let roster = &ledger.teams;
    for prediction in ledger.podium_predictions.iter_mut() {
        let item = RecalcItem::Podium {
            user_id: prediction.user_id,
        };
        let outcome = rescore_podium(prediction, tournament, roster, rules);
        report.record(item, &outcome);
        prediction.points_earned = outcome.unwrap_or(None);
    }
    report
}

/// Rebuild every cached point value from raw predictions and results.
///
/// Items that cannot be scored lose their cached points and are listed in
/// the report; the rest of the batch still runs.
pub fn recalculate_all(ledger: &mut Ledger, rules: &ScoringRules) -> RecalcReport {
    let mut report = RecalcReport::default();
    let matches = &ledger.matches;
    for prediction in ledger.predictions.iter_mut() {
        let item = RecalcItem::Match {
            user_id: prediction.user_id,
            match_id: prediction.match_id,
        };
        let fixture = matches.iter().find(|m| m.id == prediction.match_id);
        let outcome = rescore_prediction(prediction, fixture, &rules.matches);
        report.record(item, &outcome);
        prediction.points = outcome.unwrap_or(None);
    }

    let podiums = recalculate_podiums(ledger, &rules.podium);
    report.scored += podiums.scored;
    report.pending += podiums.pending;
    report.failures.extend(podiums.failures);

    tracing::debug!(
        "Recalculated: {} scored, {} pending, {} failed",
        report.scored,
        report.pending,
        report.failures.len()
    );
    report
}
