//! bb_sim CLI
//!
//! 단일 경기 / 배치 시뮬레이션 실행 도구
//! - `simulate`: one game, optional play-by-play dump
//! - `batch`: many seeds of one matchup, run in parallel
//! - `dump-config`: print a baseline config preset as YAML or JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bb_core::data::{self, DataFormat};
use bb_core::engine::{seeded_plans, BatchSummary};
use bb_core::{simulate_batch, BaselineConfig, GameEngine, GamePlan, Rules, Team};

#[derive(Parser)]
#[command(name = "bb_sim")]
#[command(about = "Pitch-by-pitch baseball simulation", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Inputs shared by `simulate` and `batch`
#[derive(clap::Args)]
struct MatchupArgs {
    /// Home team file (YAML/JSON). Demo roster when omitted.
    #[arg(long)]
    home: Option<PathBuf>,

    /// Away team file (YAML/JSON). Demo roster when omitted.
    #[arg(long)]
    away: Option<PathBuf>,

    /// Baseline config file (YAML/JSON); missing keys use the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Config preset used when no file is given
    #[arg(long, value_enum, default_value_t = Preset::Baseline)]
    preset: Preset,

    /// Rules file (YAML/JSON)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Regulation innings (overrides the rules file)
    #[arg(long)]
    innings: Option<u8>,

    /// End the game as soon as the home side leads late
    #[arg(long, default_value = "false")]
    walk_off: bool,

    /// RNG seed
    #[arg(long, default_value = "42")]
    seed: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one game
    Simulate {
        #[command(flatten)]
        matchup: MatchupArgs,

        /// Print every play as a JSON line
        #[arg(long, default_value = "false")]
        plays: bool,

        /// Write the result and play log to this JSON file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Simulate many seeds of the same matchup in parallel
    Batch {
        #[command(flatten)]
        matchup: MatchupArgs,

        /// Number of games
        #[arg(long, default_value = "100")]
        games: usize,

        /// Print per-game outcomes as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print a config preset
    DumpConfig {
        #[arg(long, value_enum, default_value_t = Preset::Baseline)]
        preset: Preset,

        #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    Baseline,
    HighOffense,
    StationToStation,
}

impl Preset {
    fn build(self) -> BaselineConfig {
        match self {
            Preset::Baseline => BaselineConfig::default(),
            Preset::HighOffense => BaselineConfig::high_offense(),
            Preset::StationToStation => BaselineConfig::station_to_station(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Serialize)]
struct GameReport<'a> {
    seed: u64,
    result: &'a bb_core::GameResult,
    plays: &'a [bb_core::PlayRecord],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { matchup, plays, out } => {
            let plan = build_plan(&matchup)?;
            let seed = plan.seed;
            let mut engine = GameEngine::new(plan).context("invalid game setup")?;
            let result = engine.run_to_completion().context("simulation failed")?;

            if plays {
                for play in engine.plays() {
                    println!("{}", serde_json::to_string(play)?);
                }
            }

            println!(
                "{} {} - {} {} ({} innings, seed {})",
                result.away.id, result.away.score, result.home.score, result.home.id, result.innings, seed
            );
            println!("Winner: {}", result.winner);

            if let Some(path) = out {
                let report = GameReport { seed, result: &result, plays: engine.plays() };
                let json = serde_json::to_string_pretty(&report)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "game report written");
            }
        }

        Commands::Batch { matchup, games, json } => {
            let template = build_plan(&matchup)?;
            let plans = seeded_plans(
                &template.home,
                &template.away,
                &template.rules,
                template.config.clone(),
                template.seed,
                games,
            );
            let outcomes = simulate_batch(plans);
            let summary = BatchSummary::from_outcomes(&outcomes, template.rules.innings);

            if json {
                println!("{}", serde_json::to_string_pretty(&outcomes)?);
            }
            println!("Games:        {}", summary.games);
            println!("Failed:       {}", summary.failed);
            println!(
                "Wins:         {} {} / {} {}",
                template.home.id, summary.home_wins, template.away.id, summary.away_wins
            );
            println!(
                "Avg runs:     {} {:.2} / {} {:.2}",
                template.home.id, summary.avg_home_runs, template.away.id, summary.avg_away_runs
            );
            println!("Extra innings: {}", summary.extra_inning_games);

            for failed in outcomes.iter().filter(|o| !o.is_ok()) {
                eprintln!("seed {}: {}", failed.seed, failed.error.as_deref().unwrap_or("unknown error"));
            }
        }

        Commands::DumpConfig { preset, format } => {
            let format = match format {
                OutputFormat::Yaml => DataFormat::Yaml,
                OutputFormat::Json => DataFormat::Json,
            };
            print!("{}", data::config_to_string(&preset.build(), format)?);
        }
    }

    Ok(())
}

fn load_team(path: Option<&Path>, fallback: Team) -> Result<Team> {
    match path {
        Some(path) => data::load_team_file(path)
            .with_context(|| format!("failed to load team {}", path.display())),
        None => Ok(fallback),
    }
}

fn build_plan(args: &MatchupArgs) -> Result<GamePlan> {
    let (demo_away, demo_home) = data::demo_matchup();
    let home = load_team(args.home.as_deref(), demo_home)?;
    let away = load_team(args.away.as_deref(), demo_away)?;

    let config = match &args.config {
        Some(path) => data::load_config_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => args.preset.build(),
    };

    let mut rules = match &args.rules {
        Some(path) => data::load_rules_file(path)
            .with_context(|| format!("failed to load rules {}", path.display()))?,
        None => Rules::default(),
    };
    if let Some(innings) = args.innings {
        rules.innings = innings;
    }
    rules.walk_off |= args.walk_off;

    info!(home = %home.id, away = %away.id, seed = args.seed, innings = rules.innings, "matchup ready");
    Ok(GamePlan { home, away, rules, config: Arc::new(config), seed: args.seed })
}
