use thiserror::Error;

/// A score pair that is not a finished best-of-five volleyball result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid volleyball result {team1}-{team2}: one side must have 3 sets and the other 0 to 2")]
pub struct InvalidResultError {
    pub team1: u8,
    pub team2: u8,
}

/// Podium entries that are repeated or not on the team roster.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidPodiumError {
    #[error("team '{0}' appears more than once on the podium")]
    Duplicate(String),
    #[error("team '{0}' is not a registered team")]
    UnknownTeam(String),
}

/// Rejections raised when storing predictions or results.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error(transparent)]
    InvalidResult(#[from] InvalidResultError),
    #[error(transparent)]
    InvalidPodium(#[from] InvalidPodiumError),
    #[error("unknown user '{0}'")]
    UnknownUser(String),
    #[error("user '{0}' already exists")]
    DuplicateUser(String),
    #[error("user name cannot be empty")]
    EmptyUserName,
    #[error("team name cannot be empty")]
    EmptyTeamName,
    #[error("team '{0}' is already registered")]
    DuplicateTeam(String),
    #[error("'{0}' cannot play against itself")]
    SameTeams(String),
    #[error("unknown match {0}")]
    UnknownMatch(u32),
    #[error("predictions for match {0} are closed")]
    MatchDeadlinePassed(u32),
    #[error("match {0} is already finished")]
    MatchFinished(u32),
    #[error("podium predictions are closed")]
    TournamentDeadlinePassed,
    #[error("tournament results are already finalized")]
    TournamentFinalized,
}

/// Reasons a stored prediction could not be rescored during recalculation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecalcError {
    #[error("prediction refers to unknown match {0}")]
    UnknownMatch(u32),
    #[error("match {0} is finished but has no result")]
    MissingResult(u32),
    #[error("prediction for finished match {0} is missing a score")]
    MissingPrediction(u32),
    #[error("tournament is finalized but has no result")]
    MissingPodium,
    #[error(transparent)]
    InvalidResult(#[from] InvalidResultError),
    #[error(transparent)]
    InvalidPodium(#[from] InvalidPodiumError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_result_message() {
        let err = InvalidResultError { team1: 3, team2: 3 };
        assert!(err.to_string().contains("3-3"));
    }

    #[test]
    fn test_submission_error_wraps_result_error() {
        let err: SubmissionError = InvalidResultError { team1: 4, team2: 2 }.into();
        assert_eq!(
            err,
            SubmissionError::InvalidResult(InvalidResultError { team1: 4, team2: 2 })
        );
        assert!(err.to_string().contains("4-2"));
    }

    #[test]
    fn test_podium_error_names_team() {
        let err = InvalidPodiumError::UnknownTeam("Atlantis".to_string());
        assert!(err.to_string().contains("Atlantis"));
    }
}
