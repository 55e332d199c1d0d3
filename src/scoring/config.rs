use serde::{Deserialize, Serialize};

/// Point tables for match and podium predictions.
///
/// Both sections are optional; anything left out falls back to the standard
/// table (6/4/2/1/1/0 for matches, 30/15/5 for the podium).
///
/// Example YAML:
/// ```yaml
/// scoring:
///   match_points:
///     perfect: 6
///     winner_off_by_one: 4
///   tournament_points:
///     first_exact: 30
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub match_points: Option<MatchPoints>,

    #[serde(default)]
    pub tournament_points: Option<TournamentPoints>,
}

/// Points per match outcome, listed in evaluation priority order.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct MatchPoints {
    /// Both set counts exact
    pub perfect: u32,
    /// Right winner, set margin missed by exactly one
    pub winner_off_by_one: u32,
    /// Right winner only
    pub winner: u32,
    /// Wrong winner, one side's set count exact
    pub one_score: u32,
    /// Total number of sets played exact
    pub total_sets: u32,
    pub miss: u32,
}

impl Default for MatchPoints {
    fn default() -> Self {
        Self {
            perfect: 6,
            winner_off_by_one: 4,
            winner: 2,
            one_score: 1,
            total_sets: 1,
            miss: 0,
        }
    }
}

/// Additive podium components.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TournamentPoints {
    /// Predicted champion is the actual champion
    pub first_exact: u32,
    /// Predicted second or third place finished anywhere on the podium
    pub medalist: u32,
    /// Bonus when predicted second or third is in the exact slot
    pub exact_position: u32,
}

impl Default for TournamentPoints {
    fn default() -> Self {
        Self {
            first_exact: 30,
            medalist: 15,
            exact_position: 5,
        }
    }
}

impl ScoringConfig {
    pub fn match_points(&self) -> MatchPoints {
        self.match_points.unwrap_or_default()
    }

    pub fn tournament_points(&self) -> TournamentPoints {
        self.tournament_points.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();
        assert!(config.match_points.is_none());
        assert_eq!(config.match_points().perfect, 6);
        assert_eq!(config.match_points().total_sets, 1);
        assert_eq!(config.tournament_points().first_exact, 30);
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig {
            match_points: Some(MatchPoints::default()),
            tournament_points: Some(TournamentPoints::default()),
        };
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_match_points_fill_defaults() {
        let yaml = r#"
match_points:
  perfect: 10
"#;
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let points = config.match_points();
        assert_eq!(points.perfect, 10);
        assert_eq!(points.winner_off_by_one, 4);
        assert_eq!(points.miss, 0);
        assert_eq!(config.tournament_points(), TournamentPoints::default());
    }

    #[test]
    fn test_empty_scoring_config_parse() {
        let config: ScoringConfig = serde_saphyr::from_str("{}").unwrap();
        assert!(config.match_points.is_none());
        assert!(config.tournament_points.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
match_points:
  bogus: 3
"#;
        assert!(serde_saphyr::from_str::<ScoringConfig>(yaml).is_err());
    }
}
