use super::config::TournamentPoints;
use crate::error::InvalidPodiumError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered top three of a tournament, predicted or actual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Podium {
    pub first: String,
    pub second: String,
    pub third: String,
}

impl Podium {
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        third: impl Into<String>,
    ) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
            third: third.into(),
        }
    }

    pub fn slots(&self) -> [&str; 3] {
        [&self.first, &self.second, &self.third]
    }

    pub fn contains(&self, team: &str) -> bool {
        self.slots().contains(&team)
    }

    /// All three entries must name different teams.
    pub fn validate_distinct(&self) -> Result<(), InvalidPodiumError> {
        let slots = self.slots();
        for (i, team) in slots.iter().enumerate() {
            if slots[..i].contains(team) {
                return Err(InvalidPodiumError::Duplicate(team.to_string()));
            }
        }
        Ok(())
    }

    /// Distinct entries, each drawn from the registered roster.
    pub fn validate(&self, roster: &[String]) -> Result<(), InvalidPodiumError> {
        self.validate_distinct()?;
        for team in self.slots() {
            if !roster.iter().any(|known| known == team) {
                return Err(InvalidPodiumError::UnknownTeam(team.to_string()));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Podium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1. {}  2. {}  3. {}", self.first, self.second, self.third)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodiumComponent {
    pub label: String, // e.g. "1st exact", "2nd medalist"
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodiumScore {
    pub points: u32,
    pub components: Vec<PodiumComponent>,
}

/// Additive podium scoring; each check is independent of the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PodiumRules {
    pub points: TournamentPoints,
}

impl PodiumRules {
    pub fn new(points: TournamentPoints) -> Self {
        Self { points }
    }

    pub fn evaluate(
        &self,
        predicted: &Podium,
        actual: &Podium,
    ) -> Result<PodiumScore, InvalidPodiumError> {
        predicted.validate_distinct()?;
        actual.validate_distinct()?;

        let mut components = Vec::new();

        if predicted.first == actual.first {
            components.push(PodiumComponent {
                label: "1st exact".to_string(),
                points: self.points.first_exact,
            });
        }

        // Medalist credit scans the whole actual podium, the bonus only the same slot
        for (place, guess, actual_slot) in [
            ("2nd", &predicted.second, &actual.second),
            ("3rd", &predicted.third, &actual.third),
        ] {
            if actual.contains(guess) {
                components.push(PodiumComponent {
                    label: format!("{} medalist", place),
                    points: self.points.medalist,
                });
            }
            if guess == actual_slot {
                components.push(PodiumComponent {
                    label: format!("{} exact", place),
                    points: self.points.exact_position,
                });
            }
        }

        Ok(PodiumScore {
            points: components
                .iter()
                .map(|c| c.points)
                .fold(0, u32::saturating_add),
            components,
        })
    }
}

/// Score a podium prediction with the standard 30/15/5 table.
pub fn score_tournament(predicted: &Podium, actual: &Podium) -> Result<u32, InvalidPodiumError> {
    PodiumRules::default()
        .evaluate(predicted, actual)
        .map(|score| score.points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn podium(first: &str, second: &str, third: &str) -> Podium {
        Podium::new(first, second, third)
    }

    #[test]
    fn test_perfect_podium_is_max() {
        let p = podium("A", "B", "C");
        assert_eq!(score_tournament(&p, &p).unwrap(), 70);
    }

    #[test]
    fn test_first_exact_others_swapped() {
        let points = score_tournament(&podium("A", "B", "C"), &podium("A", "C", "B")).unwrap();
        assert_eq!(points, 60);
    }

    #[test]
    fn test_first_two_swapped_third_exact() {
        let points = score_tournament(&podium("A", "B", "C"), &podium("B", "A", "C")).unwrap();
        assert_eq!(points, 35);
    }

    #[test]
    fn test_champion_guessed_in_second_slot() {
        // Predicted 2nd won the tournament: medalist credit only
        let score = PodiumRules::default()
            .evaluate(&podium("X", "A", "Y"), &podium("A", "B", "C"))
            .unwrap();
        assert_eq!(score.points, 15);
        assert_eq!(score.components.len(), 1);
        assert_eq!(score.components[0].label, "2nd medalist");
    }

    #[test]
    fn test_no_overlap_scores_zero() {
        let points = score_tournament(&podium("X", "Y", "Z"), &podium("A", "B", "C")).unwrap();
        assert_eq!(points, 0);
    }

    #[test]
    fn test_first_only() {
        let points = score_tournament(&podium("A", "X", "Y"), &podium("A", "B", "C")).unwrap();
        assert_eq!(points, 30);
    }

    #[test]
    fn test_duplicate_prediction_rejected() {
        let err = score_tournament(&podium("A", "A", "C"), &podium("A", "B", "C")).unwrap_err();
        assert_eq!(err, InvalidPodiumError::Duplicate("A".to_string()));
    }

    #[test]
    fn test_validate_against_roster() {
        let roster = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert!(podium("C", "A", "B").validate(&roster).is_ok());
        assert_eq!(
            podium("A", "B", "Q").validate(&roster).unwrap_err(),
            InvalidPodiumError::UnknownTeam("Q".to_string())
        );
    }

    #[test]
    fn test_custom_points() {
        let rules = PodiumRules::new(TournamentPoints {
            first_exact: 10,
            medalist: 3,
            exact_position: 1,
        });
        let p = podium("A", "B", "C");
        assert_eq!(rules.evaluate(&p, &p).unwrap().points, 18);
    }

    #[test]
    fn test_scoring_is_repeatable() {
        let predicted = podium("A", "B", "C");
        let actual = podium("B", "A", "C");
        let first = score_tournament(&predicted, &actual).unwrap();
        let second = score_tournament(&predicted, &actual).unwrap();
        assert_eq!(first, second);
    }
}
