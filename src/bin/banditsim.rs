//! `banditsim` command-line front end.
//!
//! # Commands
//!
//! - `run` - Run UCB1 and epsilon-greedy against one random environment
//! - `generate` - Write random three-line input files

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use banditsim::{
    InputGenerator, Settings, Simulation, SimulationConfig, SimulationInput, SimulationReport,
    TracingObserver,
};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "banditsim")]
#[command(version)]
#[command(about = "Multi-armed bandit simulation: UCB1 vs epsilon-greedy", long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation and print the per-round metrics
    Run {
        /// Three-line input file (arm count, iterations, exploration rate)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Number of arms
        #[arg(short, long)]
        arms: Option<usize>,

        /// Number of rounds
        #[arg(short, long)]
        rounds: Option<usize>,

        /// Exploration rate for epsilon-greedy (0.0 - 1.0)
        #[arg(short, long)]
        epsilon: Option<f64>,

        /// RNG seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "summary")]
        format: OutputFormat,
    },

    /// Generate random input files
    Generate {
        /// Number of files
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Output directory
        #[arg(short, long, default_value = "input")]
        dir: PathBuf,

        /// RNG seed
        #[arg(short, long, default_value = "0")]
        seed: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Final metric and pull counts per strategy
    Summary,
    /// One line per round
    Csv,
    /// Full report as JSON
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;

    let log_level = if cli.verbose {
        "debug"
    } else {
        settings.logging.level.as_str()
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Run {
            input,
            arms,
            rounds,
            epsilon,
            seed,
            format,
        } => {
            let mut cfg = settings.simulation;
            if let Some(v) = arms {
                cfg.arm_count = v;
            }
            if let Some(v) = rounds {
                cfg.round_count = v;
            }
            if let Some(v) = epsilon {
                cfg.exploration_rate = v;
            }
            if let Some(v) = seed {
                cfg.seed = v;
            }
            if let Some(path) = input {
                let parsed = SimulationInput::from_file(&path)
                    .with_context(|| format!("failed to read input file {}", path.display()))?;
                tracing::info!(path = %path.display(), "loaded input file");
                cfg = parsed.to_config(cfg.seed);
            }
            cmd_run(cfg, format)
        }
        Commands::Generate { count, dir, seed } => cmd_generate(count, dir, seed),
    }
}

fn cmd_run(cfg: SimulationConfig, format: OutputFormat) -> anyhow::Result<()> {
    let report = Simulation::with_observer(cfg, Arc::new(TracingObserver))
        .context("invalid simulation parameters")?
        .run()
        .context("simulation failed")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Summary => print_summary(&mut out, &report)?,
        OutputFormat::Csv => print_csv(&mut out, &report)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_summary(out: &mut impl Write, report: &SimulationReport) -> io::Result<()> {
    writeln!(out, "Rounds:     {}", report.round_count)?;
    writeln!(out, "Best arm:   {}", report.best_arm)?;
    let means: Vec<String> = report.true_means.iter().map(|m| format!("{m:.3}")).collect();
    writeln!(out, "True means: [{}]", means.join(", "))?;
    writeln!(out, "Elapsed:    {:.2}ms", report.elapsed_ms)?;
    writeln!(out)?;
    for t in &report.traces {
        let best_share = t.pulls.get(report.best_arm).copied().unwrap_or(0) as f64
            / report.round_count.max(1) as f64;
        writeln!(out, "{}", t.name)?;
        writeln!(
            out,
            "  final average reward: {:.4}",
            t.metrics.last().copied().unwrap_or(0.0)
        )?;
        writeln!(out, "  pulls per arm:        {:?}", t.pulls)?;
        writeln!(out, "  best-arm share:       {:.1}%", best_share * 100.0)?;
    }
    Ok(())
}

fn print_csv(out: &mut impl Write, report: &SimulationReport) -> io::Result<()> {
    let header: Vec<&str> = report.traces.iter().map(|t| t.name.as_str()).collect();
    writeln!(out, "round,{}", header.join(","))?;
    for round in 0..report.round_count {
        let row: Vec<String> = report
            .traces
            .iter()
            .map(|t| t.metrics.get(round).map_or_else(String::new, |m| m.to_string()))
            .collect();
        writeln!(out, "{},{}", round + 1, row.join(","))?;
    }
    Ok(())
}

fn cmd_generate(count: usize, dir: PathBuf, seed: u64) -> anyhow::Result<()> {
    let paths = InputGenerator::new(count, seed)
        .generate(&dir)
        .with_context(|| format!("failed to write input files to {}", dir.display()))?;
    for p in &paths {
        println!("{}", p.display());
    }
    tracing::info!(count = paths.len(), dir = %dir.display(), "generated input files");
    Ok(())
}
