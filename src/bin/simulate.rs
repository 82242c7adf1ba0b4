//! Game balance simulator CLI.
//!
//! Run Monte Carlo simulations to analyze game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                          # 200 runs per hero
//!   cargo run --bin simulate -- -n 500 --hero mage    # 500 mage runs
//!   cargo run --bin simulate -- --seed 42 --json      # Reproducible, save JSON

use clap::Parser;
use gemcrawl::board::BoardRules;
use gemcrawl::config::balance::MAX_COMBAT_TURNS;
use gemcrawl::simulator::{run_simulation, SimConfig};
use gemcrawl::BalanceConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Gemcrawl balance simulator")]
struct Args {
    /// Runs per hero
    #[arg(short = 'n', long, default_value_t = 200)]
    runs: u32,

    /// Base RNG seed (run i uses seed + i). Omit for entropy.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Hero key to simulate; repeat for several. Default: every hero.
    #[arg(long = "hero", value_name = "KEY")]
    heroes: Vec<String>,

    /// Hero turns per fight before it counts as a loss
    #[arg(long, default_value_t = MAX_COMBAT_TURNS)]
    max_turns: u32,

    /// Chance (0..=1) that a normal floor rolls an elite
    #[arg(long, default_value_t = 0.0)]
    elite_chance: f64,

    /// Equipment every hero starts with; repeat for several
    #[arg(long = "equip", value_name = "NAME")]
    equipment: Vec<String>,

    /// Use hero skills whenever they are charged
    #[arg(long)]
    skills: bool,

    /// Special tiles caught in a clear detonate
    #[arg(long)]
    detonate_specials: bool,

    /// Balance tables as JSON instead of the built-in ones
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Save a JSON report, to FILE or a timestamped name
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    json: Option<Option<PathBuf>>,

    /// Debug logging and per-run lines
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> gemcrawl::Result<()> {
    let balance = match &args.config {
        Some(path) => BalanceConfig::load(path)?,
        None => BalanceConfig::default(),
    };

    let config = SimConfig {
        runs_per_hero: args.runs,
        seed: args.seed,
        heroes: args.heroes,
        max_turns: args.max_turns,
        use_skills: args.skills,
        elite_chance: args.elite_chance,
        equipment: args.equipment,
        rules: BoardRules {
            detonate_specials: args.detonate_specials,
        },
        verbosity: if args.verbose { 2 } else { 1 },
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              GEMCRAWL BALANCE SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs per hero:  {}", config.runs_per_hero);
    if config.heroes.is_empty() {
        println!("  Heroes:         all");
    } else {
        println!("  Heroes:         {}", config.heroes.join(", "));
    }
    println!("  Max Turns:      {}", config.max_turns);
    if config.elite_chance > 0.0 {
        println!("  Elite Chance:   {:.0}%", config.elite_chance * 100.0);
    }
    if !config.equipment.is_empty() {
        println!("  Equipment:      {}", config.equipment.join(", "));
    }
    if config.use_skills {
        println!("  Skills:         enabled");
    }
    if config.rules.detonate_specials {
        println!("  Specials:       detonate");
    }
    if let Some(path) = &args.config {
        println!("  Tables:         {}", path.display());
    }
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config, &balance)?;

    println!("{}", report.to_text());

    if let Some(target) = args.json {
        let filename = target.unwrap_or_else(|| {
            PathBuf::from(format!(
                "sim_report_{}.json",
                chrono::Utc::now().format("%Y%m%d_%H%M%S")
            ))
        });
        std::fs::write(&filename, report.to_json()?)?;
        println!("JSON report saved to: {}", filename.display());
    }

    Ok(())
}
