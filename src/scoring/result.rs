use crate::error::InvalidResultError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sets needed to win a best-of-five match.
pub const SETS_TO_WIN: u8 = 3;

/// Which side of a fixture a score belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Team1,
    Team2,
}

/// Final set count of a match, either predicted or actual.
///
/// Construct through [`MatchResult::new`] to get a validated value. The fields
/// stay public so stored data can be carried around before it is checked;
/// every scoring entry point re-validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult {
    pub team1: u8,
    pub team2: u8,
}

/// True iff exactly one side has 3 sets and the other has 0, 1 or 2.
pub fn validate_match_result(team1: u8, team2: u8) -> bool {
    (team1 == SETS_TO_WIN && team2 < SETS_TO_WIN) || (team2 == SETS_TO_WIN && team1 < SETS_TO_WIN)
}

impl MatchResult {
    pub fn new(team1: u8, team2: u8) -> Result<Self, InvalidResultError> {
        let result = Self { team1, team2 };
        result.validate()?;
        Ok(result)
    }

    pub fn validate(&self) -> Result<(), InvalidResultError> {
        if validate_match_result(self.team1, self.team2) {
            Ok(())
        } else {
            Err(InvalidResultError {
                team1: self.team1,
                team2: self.team2,
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        validate_match_result(self.team1, self.team2)
    }

    pub fn winner(&self) -> Side {
        if self.team1 > self.team2 {
            Side::Team1
        } else {
            Side::Team2
        }
    }

    pub fn total_sets(&self) -> u16 {
        u16::from(self.team1) + u16::from(self.team2)
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.team1, self.team2)
    }
}

/// Parse `"3-1"` or `"3:1"` into a validated result.
impl FromStr for MatchResult {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let s = s.trim();
        let (left, right) = s
            .split_once(['-', ':'])
            .ok_or_else(|| anyhow::anyhow!("Score must look like 3-1: {}", s))?;
        let team1: u8 = left.trim().parse()?;
        let team2: u8 = right.trim().parse()?;
        Ok(MatchResult::new(team1, team2)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_results() {
        for (t1, t2) in [(3, 0), (3, 1), (3, 2), (0, 3), (1, 3), (2, 3)] {
            assert!(validate_match_result(t1, t2), "{}-{} should be valid", t1, t2);
        }
    }

    #[test]
    fn test_invalid_results() {
        for (t1, t2) in [(3, 3), (2, 1), (4, 2), (0, 0), (2, 4), (5, 3)] {
            assert!(!validate_match_result(t1, t2), "{}-{} should be invalid", t1, t2);
        }
    }

    #[test]
    fn test_new_rejects_invalid() {
        let err = MatchResult::new(3, 3).unwrap_err();
        assert_eq!(err, InvalidResultError { team1: 3, team2: 3 });
    }

    #[test]
    fn test_winner_and_total_sets() {
        let result = MatchResult::new(1, 3).unwrap();
        assert_eq!(result.winner(), Side::Team2);
        assert_eq!(result.total_sets(), 4);

        let result = MatchResult::new(3, 2).unwrap();
        assert_eq!(result.winner(), Side::Team1);
        assert_eq!(result.total_sets(), 5);
    }

    #[test]
    fn test_parse_dash_and_colon() {
        assert_eq!("3-1".parse::<MatchResult>().unwrap(), MatchResult { team1: 3, team2: 1 });
        assert_eq!(" 2:3 ".parse::<MatchResult>().unwrap(), MatchResult { team1: 2, team2: 3 });
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("31".parse::<MatchResult>().is_err());
        assert!("3-x".parse::<MatchResult>().is_err());
        assert!("3-3".parse::<MatchResult>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(MatchResult { team1: 0, team2: 3 }.to_string(), "0-3");
    }
}
