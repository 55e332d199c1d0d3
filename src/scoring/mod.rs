pub mod config;
pub mod engine;
pub mod result;
pub mod rules;
pub mod tournament;
pub mod validation;

pub use config::*;
pub use engine::{score_match, MatchScore, ScoringRules};
pub use result::{validate_match_result, MatchResult, Side};
pub use rules::{MatchRules, RuleKind, CORRECT_PREDICTION_POINTS};
pub use tournament::{score_tournament, Podium, PodiumComponent, PodiumRules, PodiumScore};
pub use validation::{validate_scoring, MAX_RULE_POINTS};
