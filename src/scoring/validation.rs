use super::config::ScoringConfig;
use super::rules::{RuleKind, CORRECT_PREDICTION_POINTS};

/// Ceiling for any single configured point value.
pub const MAX_RULE_POINTS: u32 = 1000;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let table = config.match_points();

    for kind in RuleKind::PRIORITY {
        let points = kind.points(&table);
        if points > MAX_RULE_POINTS {
            errors.push(format!(
                "scoring.match_points.{}: {} exceeds the maximum {}",
                field_name(kind),
                points,
                MAX_RULE_POINTS
            ));
        }
    }

    // Winner-based outcomes define "correct"; partial credit must stay below it
    for kind in [RuleKind::Perfect, RuleKind::WinnerOffByOne, RuleKind::Winner] {
        let points = kind.points(&table);
        if points < CORRECT_PREDICTION_POINTS {
            errors.push(format!(
                "scoring.match_points.{}: {} is below the correct-prediction threshold {}",
                field_name(kind),
                points,
                CORRECT_PREDICTION_POINTS
            ));
        }
    }
    for kind in [RuleKind::OneScore, RuleKind::TotalSets, RuleKind::Miss] {
        let points = kind.points(&table);
        if points >= CORRECT_PREDICTION_POINTS {
            errors.push(format!(
                "scoring.match_points.{}: {} must be below the correct-prediction threshold {}",
                field_name(kind),
                points,
                CORRECT_PREDICTION_POINTS
            ));
        }
    }

    // Points may not increase along the priority order
    for pair in RuleKind::PRIORITY.windows(2) {
        let (higher, lower) = (pair[0], pair[1]);
        if lower.points(&table) > higher.points(&table) {
            errors.push(format!(
                "scoring.match_points.{}: {} outranks earlier rule {} ({})",
                field_name(lower),
                lower.points(&table),
                field_name(higher),
                higher.points(&table)
            ));
        }
    }

    let podium = config.tournament_points();
    for (field, points) in [
        ("first_exact", podium.first_exact),
        ("medalist", podium.medalist),
        ("exact_position", podium.exact_position),
    ] {
        if points > MAX_RULE_POINTS {
            errors.push(format!(
                "scoring.tournament_points.{}: {} exceeds the maximum {}",
                field, points, MAX_RULE_POINTS
            ));
        }
    }
    if podium.first_exact == 0 {
        errors.push("scoring.tournament_points.first_exact: must be positive".to_string());
    }
    let exact_slot = podium.medalist.saturating_add(podium.exact_position);
    if podium.first_exact < exact_slot {
        errors.push(format!(
            "scoring.tournament_points.first_exact: {} is worth less than an exact 2nd or 3rd ({})",
            podium.first_exact, exact_slot
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn field_name(kind: RuleKind) -> &'static str {
    match kind {
        RuleKind::Perfect => "perfect",
        RuleKind::WinnerOffByOne => "winner_off_by_one",
        RuleKind::Winner => "winner",
        RuleKind::OneScore => "one_score",
        RuleKind::TotalSets => "total_sets",
        RuleKind::Miss => "miss",
    }
}
