use super::config::ScoringConfig;
use super::result::MatchResult;
use super::rules::{MatchRules, RuleKind};
use super::tournament::PodiumRules;
use crate::error::InvalidResultError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchScore {
    pub points: u32,
    pub rule: RuleKind,
}

impl MatchRules {
    /// Score a prediction against a finished result.
    ///
    /// Both pairs are validated first; a malformed pair is an error, never a
    /// zero-point score.
    pub fn evaluate(
        &self,
        predicted: &MatchResult,
        actual: &MatchResult,
    ) -> Result<MatchScore, InvalidResultError> {
        predicted.validate()?;
        actual.validate()?;
        let (rule, points) = self.first_match(predicted, actual);
        Ok(MatchScore { points, rule })
    }
}

/// Score a match prediction with the standard 6/4/2/1/1/0 table.
pub fn score_match(predicted: &MatchResult, actual: &MatchResult) -> Result<u32, InvalidResultError> {
    MatchRules::default()
        .evaluate(predicted, actual)
        .map(|score| score.points)
}

/// Both rule sets, built once from configuration and shared by every scoring call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringRules {
    pub matches: MatchRules,
    pub podium: PodiumRules,
}

impl ScoringRules {
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            matches: MatchRules::from_points(&config.match_points()),
            podium: PodiumRules::new(config.tournament_points()),
        }
    }
}
