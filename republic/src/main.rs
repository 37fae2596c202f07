use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use republic_core::profiling::{self, TraceLevel};
use republic_core::{
    create_initial_state, Artifact, ConsoleObserver, Constitution, EventLogObserver,
    FirstOptionStrategy, GreedyStrategy, ObserverRegistry, RandomStrategy, SimConfig, Strategy,
};
use republic_data::Catalog;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

mod leaderboard;
mod prompt;
mod session;
mod store;

use leaderboard::{Leaderboard, LeaderboardEntry};
use prompt::PromptStrategy;
use session::{RunSummary, Session};
use store::FileStore;

#[derive(Parser, Debug)]
#[command(name = "republic")]
#[command(author, version, about = "Govern a developing republic from 1960 to 2030", long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Directory with artifacts.json and events.json (defaults to the built-in catalogs)
    #[arg(long, global = true)]
    catalog_dir: Option<PathBuf>,

    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Forward engine spans to Tracy at this level (needs the `tracy` feature)
    #[arg(long, global = true, value_enum)]
    trace_level: Option<TraceArg>,

    /// Leaderboard storage directory (defaults to the platform data directory)
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the starting artifacts
    Artifacts,
    /// List the policy events and their gates
    Events,
    /// Play a run with an automatic strategy
    Run {
        /// Comma-separated artifact ids
        #[arg(long, value_delimiter = ',', required = true)]
        artifacts: Vec<String>,
        #[arg(long)]
        country_name: Option<String>,
        /// Seed for event selection and the random strategy
        #[arg(long, default_value_t = 12345)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = StrategyKind::Greedy)]
        strategy: StrategyKind,
        /// Write one JSON line per year to this file
        #[arg(long)]
        event_log: Option<PathBuf>,
        /// Do not add the result to the leaderboard
        #[arg(long)]
        no_record: bool,
    },
    /// Play a run interactively, answering each event from stdin
    Play {
        /// Comma-separated artifact ids (asked for when omitted)
        #[arg(long, value_delimiter = ',')]
        artifacts: Vec<String>,
        #[arg(long)]
        country_name: Option<String>,
        #[arg(long, default_value_t = 12345)]
        seed: u64,
        #[arg(long)]
        no_record: bool,
    },
    /// Show the hall of fame
    Leaderboard {
        /// Remove all recorded runs
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum TraceArg {
    Info,
    Debug,
    Trace,
}

impl From<TraceArg> for TraceLevel {
    fn from(arg: TraceArg) -> Self {
        match arg {
            TraceArg::Info => TraceLevel::Info,
            TraceArg::Debug => TraceLevel::Debug,
            TraceArg::Trace => TraceLevel::Trace,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyKind {
    Random,
    Greedy,
    First,
}

impl StrategyKind {
    fn build(self, seed: u64) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy::new(seed)),
            StrategyKind::Greedy => Box::new(GreedyStrategy::new()),
            StrategyKind::First => Box::new(FirstOptionStrategy),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = std::str::FromStr::from_str(&cli.log_level).unwrap_or(log::LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
    if let Some(level) = cli.trace_level {
        profiling::init_tracy(level.into());
    }

    let config = load_config(cli.config.as_deref())?;
    let catalog = match &cli.catalog_dir {
        Some(dir) => Catalog::load_dir(dir)?,
        None => Catalog::embedded()?,
    };
    let mut store = FileStore::new(cli.store_dir.clone().unwrap_or_else(FileStore::default_dir));

    match cli.command {
        Commands::Artifacts => print_artifacts(&catalog, &config),
        Commands::Events => print_events(&catalog),
        Commands::Run {
            artifacts,
            country_name,
            seed,
            strategy,
            event_log,
            no_record,
        } => {
            let constitution = Constitution::ratify(catalog.select_artifacts(&artifacts)?, &config)?;
            let name = country_name.unwrap_or_else(|| config.default_country_name.clone());

            let mut observers = ObserverRegistry::new();
            observers.register(Box::new(ConsoleObserver::new()));
            if let Some(path) = &event_log {
                let observer = EventLogObserver::file(path)
                    .with_context(|| format!("failed to open event log {}", path.display()))?;
                observers.register(Box::new(observer));
            }

            let state = create_initial_state(constitution.artifacts(), name);
            let mut strategy = strategy.build(seed);
            let summary = Session::new(state, &catalog.events, seed)
                .with_observers(observers)
                .run(strategy.as_mut());

            print_summary(&summary);
            if !no_record {
                record(&mut store, &config, &summary)?;
            }
        }
        Commands::Play {
            artifacts,
            country_name,
            seed,
            no_record,
        } => {
            let stdin = std::io::stdin();
            let mut input = stdin.lock();

            let artifacts = if artifacts.is_empty() {
                ask_artifacts(&catalog, &config, &mut input)?
            } else {
                artifacts
            };
            let constitution = Constitution::ratify(catalog.select_artifacts(&artifacts)?, &config)?;
            let name = country_name.unwrap_or_else(|| config.default_country_name.clone());
            println!(
                "Ratified: {} ({} / {} points)",
                constitution
                    .artifacts()
                    .iter()
                    .map(|a| a.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                constitution.points_spent(),
                config.points_budget
            );

            let state = create_initial_state(constitution.artifacts(), name);
            let mut player = PromptStrategy::new(input, std::io::stdout());
            let summary = Session::new(state, &catalog.events, seed).run(&mut player);

            print_summary(&summary);
            if !no_record {
                record(&mut store, &config, &summary)?;
            }
        }
        Commands::Leaderboard { clear } => {
            if clear {
                Leaderboard::clear(&mut store)?;
                println!("Leaderboard cleared.");
            } else {
                print_leaderboard(&Leaderboard::load(&store, config.leaderboard_capacity)?);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: SimConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    log::debug!("Loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}

fn describe_effects(artifact_effects: &republic_core::Effects) -> String {
    artifact_effects
        .iter()
        .map(|(key, delta)| format!("{} {:+}", key, delta))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_artifacts(catalog: &Catalog, config: &SimConfig) {
    println!("Budget: {} points", config.points_budget);
    for artifact in &catalog.artifacts {
        print_artifact(artifact);
    }
}

fn print_artifact(artifact: &Artifact) {
    println!(
        "{:<22} {:>2} pts  {}",
        artifact.id, artifact.point_cost, artifact.name
    );
    println!("    {}", describe_effects(&artifact.effects));
    if !artifact.tags.is_empty() {
        println!("    tags: {}", artifact.tags.join(", "));
    }
}

fn print_events(catalog: &Catalog) {
    for event in &catalog.events {
        let window = match (event.min_year, event.max_year) {
            (None, None) => "any year".to_string(),
            (Some(min), None) => format!("from {}", min),
            (None, Some(max)) => format!("until {}", max),
            (Some(min), Some(max)) => format!("{}-{}", min, max),
        };
        println!("{:<26} {} ({})", event.id, event.title, window);
        if !event.req_flags.is_empty() {
            println!("    requires: {}", event.req_flags.join(", "));
        }
        if !event.tags.is_empty() {
            println!("    tags: {}", event.tags.join(", "));
        }
        for (i, option) in event.options.iter().enumerate() {
            println!("    [{}] {}", i + 1, option.text);
        }
    }
}

fn ask_artifacts(catalog: &Catalog, config: &SimConfig, input: &mut impl BufRead) -> Result<Vec<String>> {
    print_artifacts(catalog, config);
    print!("Artifacts (comma-separated ids): ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read artifact selection")?;
    Ok(line
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect())
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!(
        "{} ({} strategy, seed {})",
        summary.country_name, summary.strategy, summary.seed
    );
    if let Some(reason) = summary.reason {
        println!("Ended in {} after {} turns: {}", summary.final_year, summary.turns, reason);
    }
    println!("Decisions: {}", summary.decisions.len());
    for decision in &summary.decisions {
        log::debug!(
            "{}: {} -> option {}",
            decision.year,
            decision.event_id,
            decision.option + 1
        );
    }
    println!("Legacy Score: {}", summary.score);
    println!("Checksum: {:016x}", summary.checksum);
}

fn record(store: &mut FileStore, config: &SimConfig, summary: &RunSummary) -> Result<()> {
    let mut board = Leaderboard::load(&*store, config.leaderboard_capacity)?;
    let date = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default();
    let entry = LeaderboardEntry {
        name: summary.country_name.clone(),
        score: summary.score,
        year: summary.final_year,
        reason: summary
            .reason
            .map(|r| r.to_string())
            .unwrap_or_default(),
        date,
    };

    match board.record(entry) {
        Some(rank) => println!("Leaderboard rank: #{}", rank),
        None => println!("Did not place on the leaderboard."),
    }
    board.save(store)?;
    log::info!("Saved leaderboard to {}", store.dir().display());
    Ok(())
}

fn print_leaderboard(board: &Leaderboard) {
    if board.is_empty() {
        println!("No runs recorded yet.");
        return;
    }
    for (i, entry) in board.entries().iter().enumerate() {
        println!(
            "{:>2}. {:<20} {:>6}  {}  {}",
            i + 1,
            entry.name,
            entry.score,
            entry.year,
            entry.reason
        );
    }
}
