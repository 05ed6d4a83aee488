//! Main entry point for the locker-room CLI
//!
//! Balances a roster of rated players into two teams and optionally
//! records a match result, printing the resulting events as JSON.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use locker_room::balance::{GreedyTeamBalancer, TeamBalancer};
use locker_room::config::{validate_config, AppConfig};
use locker_room::matchup::MatchInstance;
use locker_room::rating::elo;
use locker_room::rating::EloRatingCalculator;
use locker_room::types::{MatchCompleted, MatchOutcome, RatedPlayer, TeamsFormed};
use locker_room::utils::current_timestamp;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Locker Room - team balancing and ELO rating engine for five-a-side squads
#[derive(Parser)]
#[command(
    name = "locker-room",
    version,
    about = "Balance a roster of rated players into two teams and compute ELO rating changes",
    long_about = "Locker Room splits an even-sized roster of rated players into two teams with a \
                 minimized rating gap, using a deterministic greedy algorithm, and computes \
                 zero-sum ELO rating deltas when a match outcome is recorded."
)]
struct Args {
    /// Roster file: JSON array of objects with "id" (UUID) and "rating" (integer)
    #[arg(short, long, value_name = "FILE")]
    roster: PathBuf,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (TOML format)")]
    config: Option<PathBuf>,

    /// Players per side override
    #[arg(short, long, value_name = "N")]
    team_size: Option<usize>,

    /// K-factor override
    #[arg(short, long, value_name = "K")]
    k_factor: Option<i32>,

    /// Record this outcome after balancing and print the rating deltas
    #[arg(short, long, value_enum)]
    outcome: Option<OutcomeArg>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Validate the roster and configuration and exit
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutcomeArg {
    HomeWin,
    AwayWin,
    Draw,
}

impl From<OutcomeArg> for MatchOutcome {
    fn from(outcome: OutcomeArg) -> Self {
        match outcome {
            OutcomeArg::HomeWin => MatchOutcome::HomeWin,
            OutcomeArg::AwayWin => MatchOutcome::AwayWin,
            OutcomeArg::Draw => MatchOutcome::Draw,
        }
    }
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration and apply command line overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if let Some(team_size) = args.team_size {
        config.matchup.team_size = team_size;
    }
    if let Some(k_factor) = args.k_factor {
        config.rating.k_factor = k_factor;
    }

    validate_config(&config)?;
    Ok(config)
}

fn load_roster(path: &Path) -> Result<Vec<RatedPlayer>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
    let players: Vec<RatedPlayer> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse roster file: {}", path.display()))?;
    Ok(players)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args)?;
    init_logging(&config.service.log_level)?;

    info!(
        service = %config.service.name,
        version = locker_room::VERSION,
        "starting up"
    );

    let players = load_roster(&args.roster)?;
    debug!(roster_size = players.len(), "roster loaded");

    let balancer = GreedyTeamBalancer::new();
    let calculator = EloRatingCalculator::new(config.elo_config())?;

    if args.dry_run {
        balancer.generate_balanced_teams(&players, config.matchup.team_size)?;
        info!("dry run: roster and configuration are valid");
        return Ok(());
    }

    let (home, away) = balancer.generate_balanced_teams(&players, config.matchup.team_size)?;
    let mut matchup = MatchInstance::new(home.clone(), away.clone());

    info!(
        match_id = %matchup.id(),
        rating_gap = matchup.rating_gap(),
        quality = elo::match_quality(&home, &away),
        "teams formed"
    );

    let formed = TeamsFormed {
        match_id: matchup.id(),
        home,
        away,
        rating_gap: matchup.rating_gap(),
        timestamp: current_timestamp(),
    };
    println!("{}", serde_json::to_string_pretty(&formed)?);

    if let Some(outcome) = args.outcome {
        let outcome: MatchOutcome = outcome.into();
        let deltas = matchup.record_result(outcome, &calculator)?.clone();

        let completed = MatchCompleted {
            match_id: matchup.id(),
            outcome,
            deltas,
            timestamp: current_timestamp(),
        };
        println!("{}", serde_json::to_string_pretty(&completed)?);
    }

    Ok(())
}
