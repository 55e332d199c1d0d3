use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use volley_picks::scoring::{MatchResult, Podium, ScoringRules};
use volley_picks::store::Ledger;

const EXIT_SUCCESS: i32 = 0;
const EXIT_REJECTED: i32 = 1;
const EXIT_STORAGE: i32 = 2;
const EXIT_PARTIAL: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the leaderboard (default if no subcommand)
    Leaderboard {
        /// Tab-separated output for scripting
        #[arg(long)]
        tsv: bool,
    },
    /// Show how a user's finished predictions scored
    Breakdown {
        user: String,
    },
    /// Score a single prediction against a result, e.g. `score 3-1 3-0`
    Score {
        predicted: String,
        actual: String,
    },
    /// Score a podium guess, e.g. `podium A,B,C --actual B,A,C`
    Podium {
        #[arg(value_delimiter = ',')]
        predicted: Vec<String>,
        #[arg(long, value_delimiter = ',', required = true)]
        actual: Vec<String>,
    },
    /// Register a player
    AddUser {
        name: String,
    },
    /// Register a team for podium picks
    AddTeam {
        name: String,
    },
    /// Schedule a match, e.g. `add-match Poland Italy 2026-09-12T18:00:00Z`
    AddMatch {
        team1: String,
        team2: String,
        /// Start time (RFC 3339); predictions close then
        starts_at: String,
        #[arg(long)]
        round: Option<String>,
    },
    /// Set when podium predictions close, or `--clear` to leave them open
    Deadline {
        #[arg(required_unless_present = "clear")]
        at: Option<String>,
        #[arg(long, conflicts_with = "at")]
        clear: bool,
    },
    /// Store a user's prediction for a match
    Predict {
        user: String,
        match_id: u32,
        score: String,
    },
    /// Enter or correct a match result and rescore its predictions
    Result {
        match_id: u32,
        score: String,
    },
    /// Store a user's podium prediction
    PickPodium {
        user: String,
        #[arg(value_delimiter = ',')]
        teams: Vec<String>,
    },
    /// Finalize the tournament podium (one time only)
    Finalize {
        #[arg(value_delimiter = ',')]
        teams: Vec<String>,
    },
    /// Recompute every stored point value from raw predictions
    Recalc,
}

#[derive(Parser, Debug)]
#[command(name = "volley-picks")]
#[command(about = "Volleyball prediction scoring and leaderboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/volley-picks/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to ledger file (overrides the config)
    #[arg(short, long, global = true)]
    ledger: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    volley_picks::logging::init(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Leaderboard { tsv: false });

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match volley_picks::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = volley_picks::scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    let rules = ScoringRules::from_config(&effective_scoring);

    let ledger_path = volley_picks::config::resolve_ledger_path(cli.ledger.map(PathBuf::from), &config);
    tracing::debug!("Using ledger {}", ledger_path.display());

    match command {
        Commands::Score { predicted, actual } => {
            let predicted = parse_score(&predicted);
            let actual = parse_score(&actual);
            match rules.matches.evaluate(&predicted, &actual) {
                Ok(score) => println!(
                    "{}",
                    volley_picks::output::format_match_score(&predicted, &actual, &score)
                ),
                Err(e) => reject(e),
            }
        }
        Commands::Podium { predicted, actual } => {
            let predicted = parse_podium(predicted);
            let actual = parse_podium(actual);
            match rules.podium.evaluate(&predicted, &actual) {
                Ok(score) => println!("{}", volley_picks::output::format_podium_score(&score)),
                Err(e) => reject(e),
            }
        }
        Commands::Leaderboard { tsv } => {
            let ledger = open_ledger(&ledger_path);
            let rows = ledger.leaderboard();
            if tsv {
                println!("{}", volley_picks::output::format_tsv(&rows));
            } else {
                let use_colors = volley_picks::output::should_use_colors();
                println!(
                    "{}",
                    volley_picks::output::format_leaderboard_table(&rows, use_colors)
                );
            }
        }
        Commands::Breakdown { user } => {
            let ledger = open_ledger(&ledger_path);
            let user_id = resolve_user(&ledger, &user);
            let Some(predictions) = ledger
                .user_predictions()
                .into_iter()
                .find(|u| u.user_id == user_id)
            else {
                reject(format!("unknown user '{}'", user));
            };
            let breakdown = volley_picks::leaderboard::prediction_breakdown(&predictions);
            let use_colors = volley_picks::output::should_use_colors();
            println!(
                "{}",
                volley_picks::output::format_breakdown(&predictions.name, &breakdown, use_colors)
            );
        }
        Commands::AddUser { name } => {
            let mut ledger = open_ledger(&ledger_path);
            match ledger.add_user(&name) {
                Ok(id) => {
                    persist(&ledger_path, &ledger);
                    println!("Added {} (id {})", name.trim(), id);
                }
                Err(e) => reject(e),
            }
        }
        Commands::AddTeam { name } => {
            let mut ledger = open_ledger(&ledger_path);
            if let Err(e) = ledger.add_team(&name) {
                reject(e);
            }
            persist(&ledger_path, &ledger);
            println!("Added team {}", name.trim());
        }
        Commands::AddMatch {
            team1,
            team2,
            starts_at,
            round,
        } => {
            let starts_at = parse_time(&starts_at);
            let mut ledger = open_ledger(&ledger_path);
            let id = match ledger.add_fixture(&team1, &team2, starts_at, round) {
                Ok(id) => id,
                Err(e) => reject(e),
            };
            persist(&ledger_path, &ledger);
            println!("Added match {}: {} vs {}", id, team1.trim(), team2.trim());
        }
        Commands::Deadline { at, clear } => {
            let deadline = if clear {
                None
            } else {
                at.as_deref().map(parse_time)
            };
            let mut ledger = open_ledger(&ledger_path);
            if let Err(e) = ledger.set_tournament_deadline(deadline) {
                reject(e);
            }
            persist(&ledger_path, &ledger);
            match deadline {
                Some(deadline) => println!("Podium predictions close at {}", deadline.to_rfc3339()),
                None => println!("Podium predictions have no deadline"),
            }
        }
        Commands::Predict {
            user,
            match_id,
            score,
        } => {
            let predicted = parse_score(&score);
            let mut ledger = open_ledger(&ledger_path);
            let user_id = resolve_user(&ledger, &user);
            let now = Utc::now();
            if let Err(e) = ledger.submit_prediction(user_id, match_id, predicted, now) {
                reject(e);
            }
            persist(&ledger_path, &ledger);
            let closes = ledger
                .fixture(match_id)
                .map(|m| volley_picks::output::format_time_left(m.starts_at - now))
                .unwrap_or_default();
            println!(
                "Saved {} for match {} ({} until predictions close)",
                predicted, match_id, closes
            );
        }
        Commands::Result { match_id, score } => {
            let actual = parse_score(&score);
            let mut ledger = open_ledger(&ledger_path);
            let report = match ledger.record_result(match_id, actual, &rules.matches) {
                Ok(report) => report,
                Err(e) => reject(e),
            };
            persist(&ledger_path, &ledger);
            println!("Match {} finished {}", match_id, actual);
            println!("{}", volley_picks::output::format_recalc_report(&report));
            if !report.is_clean() {
                std::process::exit(EXIT_PARTIAL);
            }
        }
        Commands::PickPodium { user, teams } => {
            let podium = parse_podium(teams);
            let mut ledger = open_ledger(&ledger_path);
            let user_id = resolve_user(&ledger, &user);
            if let Err(e) = ledger.submit_podium(user_id, podium.clone(), Utc::now()) {
                reject(e);
            }
            persist(&ledger_path, &ledger);
            println!("Saved podium {}", podium);
        }
        Commands::Finalize { teams } => {
            let podium = parse_podium(teams);
            let mut ledger = open_ledger(&ledger_path);
            let report = match ledger.finalize_tournament(podium.clone(), &rules.podium) {
                Ok(report) => report,
                Err(e) => reject(e),
            };
            persist(&ledger_path, &ledger);
            println!("Final podium {}", podium);
            println!("{}", volley_picks::output::format_recalc_report(&report));
            if !report.is_clean() {
                std::process::exit(EXIT_PARTIAL);
            }
        }
        Commands::Recalc => {
            let mut ledger = open_ledger(&ledger_path);
            let report = volley_picks::recalc::recalculate_all(&mut ledger, &rules);
            persist(&ledger_path, &ledger);
            println!("{}", volley_picks::output::format_recalc_report(&report));
            if !report.is_clean() {
                std::process::exit(EXIT_PARTIAL);
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn reject(message: impl std::fmt::Display) -> ! {
    eprintln!("Rejected: {}", message);
    std::process::exit(EXIT_REJECTED);
}

fn parse_score(raw: &str) -> MatchResult {
    match raw.parse() {
        Ok(result) => result,
        Err(e) => reject(e),
    }
}

fn parse_time(raw: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(time) => time.with_timezone(&Utc),
        Err(e) => reject(format!("invalid time '{}': {}", raw, e)),
    }
}

fn parse_podium(teams: Vec<String>) -> Podium {
    match <[String; 3]>::try_from(teams) {
        Ok([first, second, third]) => Podium::new(first.trim(), second.trim(), third.trim()),
        Err(teams) => reject(format!(
            "a podium needs exactly 3 teams, got {}",
            teams.len()
        )),
    }
}

fn resolve_user(ledger: &Ledger, name: &str) -> u32 {
    match ledger.user_by_name(name) {
        Some(user) => user.id,
        None => reject(format!("unknown user '{}'", name)),
    }
}

fn open_ledger(path: &Path) -> Ledger {
    match volley_picks::store::load_ledger(path) {
        Ok(ledger) => ledger,
        Err(e) => {
            eprintln!("Ledger error: {:#}", e);
            std::process::exit(EXIT_STORAGE);
        }
    }
}

fn persist(path: &Path, ledger: &Ledger) {
    if let Err(e) = volley_picks::store::save_ledger(path, ledger) {
        eprintln!("Failed to save ledger: {:#}", e);
        std::process::exit(EXIT_STORAGE);
    }
}
