use crate::scoring::ScoringConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Ledger file; defaults to ~/.config/volley-picks/ledger.json
    #[serde(default)]
    pub ledger: Option<String>,

    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
ledger: /tmp/picks.json
scoring:
  match_points:
    perfect: 8
  tournament_points:
    medalist: 10
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.ledger.as_deref(), Some("/tmp/picks.json"));
        let scoring = config.scoring.unwrap();
        assert_eq!(scoring.match_points().perfect, 8);
        assert_eq!(scoring.tournament_points().medalist, 10);
        assert_eq!(scoring.tournament_points().first_exact, 30);
    }

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
