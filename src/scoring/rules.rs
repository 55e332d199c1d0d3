use super::config::MatchPoints;
use super::result::MatchResult;

/// Lowest match score that counts as a correct prediction (right winner).
pub const CORRECT_PREDICTION_POINTS: u32 = 2;

/// One match outcome class. Each carries its own predicate so rules can be
/// checked in isolation; [`MatchRules`] decides the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Perfect,
    WinnerOffByOne,
    Winner,
    OneScore,
    TotalSets,
    Miss,
}

impl RuleKind {
    /// Evaluation order, first match wins.
    pub const PRIORITY: [RuleKind; 6] = [
        RuleKind::Perfect,
        RuleKind::WinnerOffByOne,
        RuleKind::Winner,
        RuleKind::OneScore,
        RuleKind::TotalSets,
        RuleKind::Miss,
    ];

    pub fn matches(self, predicted: &MatchResult, actual: &MatchResult) -> bool {
        match self {
            RuleKind::Perfect => predicted == actual,
            RuleKind::WinnerOffByOne => {
                same_winner(predicted, actual) && margin(predicted).abs_diff(margin(actual)) == 1
            }
            RuleKind::Winner => same_winner(predicted, actual),
            RuleKind::OneScore => {
                predicted.team1 == actual.team1 || predicted.team2 == actual.team2
            }
            RuleKind::TotalSets => predicted.total_sets() == actual.total_sets(),
            RuleKind::Miss => true,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RuleKind::Perfect => "exact score",
            RuleKind::WinnerOffByOne => "winner, one set off",
            RuleKind::Winner => "winner",
            RuleKind::OneScore => "one score",
            RuleKind::TotalSets => "total sets",
            RuleKind::Miss => "miss",
        }
    }

    pub fn points(self, table: &MatchPoints) -> u32 {
        match self {
            RuleKind::Perfect => table.perfect,
            RuleKind::WinnerOffByOne => table.winner_off_by_one,
            RuleKind::Winner => table.winner,
            RuleKind::OneScore => table.one_score,
            RuleKind::TotalSets => table.total_sets,
            RuleKind::Miss => table.miss,
        }
    }
}

fn same_winner(predicted: &MatchResult, actual: &MatchResult) -> bool {
    predicted.winner() == actual.winner()
}

/// Signed set margin from team1's point of view.
fn margin(result: &MatchResult) -> i16 {
    i16::from(result.team1) - i16::from(result.team2)
}

/// Ordered predicate -> points list for match predictions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRules {
    rules: Vec<(RuleKind, u32)>,
}

impl MatchRules {
    pub fn from_points(table: &MatchPoints) -> Self {
        Self {
            rules: RuleKind::PRIORITY
                .iter()
                .map(|kind| (*kind, kind.points(table)))
                .collect(),
        }
    }

    /// First rule whose predicate holds. Inputs are assumed valid here.
    pub(crate) fn first_match(&self, predicted: &MatchResult, actual: &MatchResult) -> (RuleKind, u32) {
        self.rules
            .iter()
            .copied()
            .find(|(kind, _)| kind.matches(predicted, actual))
            .unwrap_or((RuleKind::Miss, 0))
    }

    pub fn iter(&self) -> impl Iterator<Item = &(RuleKind, u32)> {
        self.rules.iter()
    }
}

impl Default for MatchRules {
    fn default() -> Self {
        Self::from_points(&MatchPoints::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(team1: u8, team2: u8) -> MatchResult {
        MatchResult::new(team1, team2).unwrap()
    }

    #[test]
    fn test_perfect_predicate() {
        assert!(RuleKind::Perfect.matches(&r(3, 1), &r(3, 1)));
        assert!(!RuleKind::Perfect.matches(&r(3, 1), &r(3, 0)));
    }

    #[test]
    fn test_winner_off_by_one_predicate() {
        assert!(RuleKind::WinnerOffByOne.matches(&r(3, 1), &r(3, 0)));
        assert!(RuleKind::WinnerOffByOne.matches(&r(1, 3), &r(2, 3)));
        // Two sets off on the losing side
        assert!(!RuleKind::WinnerOffByOne.matches(&r(3, 2), &r(3, 0)));
        // Wrong winner
        assert!(!RuleKind::WinnerOffByOne.matches(&r(2, 3), &r(3, 2)));
    }

    #[test]
    fn test_winner_predicate() {
        assert!(RuleKind::Winner.matches(&r(3, 2), &r(3, 0)));
        assert!(!RuleKind::Winner.matches(&r(2, 3), &r(3, 0)));
    }

    #[test]
    fn test_one_score_predicate() {
        let predicted = MatchResult { team1: 2, team2: 1 };
        let actual = MatchResult { team1: 2, team2: 3 };
        assert!(RuleKind::OneScore.matches(&predicted, &actual));
        assert!(!RuleKind::OneScore.matches(&r(0, 3), &r(3, 0)));
    }

    #[test]
    fn test_total_sets_predicate() {
        assert!(RuleKind::TotalSets.matches(&r(0, 3), &r(3, 0)));
        assert!(!RuleKind::TotalSets.matches(&r(2, 3), &r(3, 1)));
    }

    #[test]
    fn test_miss_always_matches() {
        assert!(RuleKind::Miss.matches(&r(2, 3), &r(3, 1)));
    }

    #[test]
    fn test_default_rules_follow_priority() {
        let rules = MatchRules::default();
        let kinds: Vec<RuleKind> = rules.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, RuleKind::PRIORITY.to_vec());
        let points: Vec<u32> = rules.iter().map(|(_, p)| *p).collect();
        assert_eq!(points, vec![6, 4, 2, 1, 1, 0]);
    }

    #[test]
    fn test_winner_only_when_margin_two_off() {
        let rules = MatchRules::default();
        let (kind, points) = rules.first_match(&r(3, 2), &r(3, 0));
        assert_eq!(kind, RuleKind::Winner);
        assert_eq!(points, 2);
    }

    #[test]
    fn test_total_sets_predicate_on_out_of_range_scores() {
        let big = MatchResult { team1: 200, team2: 100 };
        let other = MatchResult { team1: 100, team2: 200 };
        assert!(RuleKind::TotalSets.matches(&big, &other));
        assert!(!RuleKind::TotalSets.matches(&big, &r(3, 0)));
    }
}
