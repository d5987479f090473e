use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::{HarnessError, Result};
use crate::runner::Runner;
use crate::script::Scenario;
use crate::trace::Trace;

#[derive(Debug, Parser)]
#[command(
    name = "gestura-harness",
    about = "Replay scripted pointer and touch input through gesture recognizers",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a scenario and print its transition trace as JSONL.
    Replay(ReplayArgs),

    /// Replay a scenario and compare the trace against a golden JSONL file.
    Check(CheckArgs),

    /// Parse a scenario and build its recognizers without replaying.
    Validate(ValidateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Scenario JSON file.
    pub scenario: PathBuf,

    /// Write the trace here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Scenario JSON file.
    pub scenario: PathBuf,

    /// Golden trace to compare against.
    #[arg(long)]
    pub golden: PathBuf,

    /// Rewrite the golden file with the current trace instead of comparing.
    #[arg(long)]
    pub update: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Scenario JSON file.
    pub scenario: PathBuf,
}

pub fn run_from_env() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Replay(args) => run_replay(&args),
        Commands::Check(args) => run_check(&args),
        Commands::Validate(args) => run_validate(&args),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A global subscriber may already be installed by an embedding process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    if !path.exists() {
        return Err(HarnessError::MissingScenario {
            path: path.to_path_buf(),
        });
    }
    Scenario::from_json(&fs::read_to_string(path)?)
}

/// Replay `scenario` from a fresh runner and return its trace.
pub fn replay(scenario: &Scenario) -> Result<Trace> {
    let mut runner = Runner::from_scenario(scenario)?;
    runner.run(&scenario.script());
    info!(
        scenario = %scenario.name,
        steps = scenario.steps.len(),
        transitions = runner.trace().len(),
        "scenario replayed"
    );
    Ok(runner.into_trace())
}

pub fn run_replay(args: &ReplayArgs) -> Result<()> {
    let scenario = load_scenario(&args.scenario)?;
    let jsonl = replay(&scenario)?.to_jsonl()?;
    match &args.out {
        Some(path) => fs::write(path, jsonl)?,
        None => std::io::stdout().lock().write_all(jsonl.as_bytes())?,
    }
    Ok(())
}

pub fn run_check(args: &CheckArgs) -> Result<()> {
    let scenario = load_scenario(&args.scenario)?;
    let trace = replay(&scenario)?;

    if args.update {
        fs::write(&args.golden, trace.to_jsonl()?)?;
        info!(golden = %args.golden.display(), "golden trace updated");
        return Ok(());
    }

    let golden = Trace::from_jsonl(&fs::read_to_string(&args.golden)?)?;
    match golden.first_divergence(&trace) {
        None => {
            println!(
                "{}: {} transitions match {}",
                scenario.name,
                trace.len(),
                args.golden.display()
            );
            Ok(())
        }
        Some(index) => Err(HarnessError::GoldenMismatch { index }),
    }
}

pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    let scenario = load_scenario(&args.scenario)?;
    if scenario.recognizers.is_empty() {
        return Err(HarnessError::invalid(format!(
            "scenario {} declares no recognizers",
            scenario.name
        )));
    }
    let runner = Runner::from_scenario(&scenario)?;
    let script = scenario.script();
    println!(
        "{}: {} recognizers ({}), {} steps over {}ms",
        scenario.name,
        runner.labels().len(),
        runner.labels().join(", "),
        script.len(),
        script.duration_ms()
    );
    Ok(())
}
