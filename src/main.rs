//! MemoryPoW Prover CLI
//!
//! Computes and checks memory-hard proof-of-work nonces.
//!
//! # Usage
//!
//! - `mempow <HEX> [DIFFICULTY]` - Find the nonce for a hex-encoded message
//! - `verify` - Check a nonce for a message
//! - `benchmark` - Time searches over random messages

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use mempow::bench;
use mempow::config::{PowConfig, Preset};
use mempow::message::Challenge;
use mempow::report::{SearchReport, VerifyReport};

#[derive(Parser)]
#[command(name = "mempow")]
#[command(version)]
#[command(about = "Memory-hard proof-of-work nonce search")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Hex-encoded message to find a nonce for
    message: Option<String>,

    /// Required leading zero bits (default: 12)
    difficulty: Option<u32>,

    /// Work buffer size in bytes (default: 8388608)
    #[arg(long, global = true)]
    buffer_size: Option<usize>,

    /// Named buffer size and difficulty
    #[arg(long, global = true, value_enum)]
    preset: Option<Preset>,

    /// JSON config file with `work_buffer_size` and `difficulty`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a nonce for a hex-encoded message
    Verify {
        /// Hex-encoded message
        message: String,

        /// The nonce to check
        nonce: u32,

        /// Required leading zero bits (default: 12)
        difficulty: Option<u32>,
    },

    /// Time searches over random 256-byte messages
    Benchmark {
        /// Number of searches to run
        #[arg(short, long, default_value = "100")]
        samples: u32,

        /// Required leading zero bits (default: 12)
        #[arg(short, long)]
        difficulty: Option<u32>,
    },
}

impl Cli {
    /// Usage error for the default command without a message
    fn check(&self) -> Result<(), clap::Error> {
        if self.command.is_none() && self.message.is_none() {
            return Err(Cli::command().error(
                ErrorKind::MissingRequiredArgument,
                "a hex-encoded message is required\n\nusage: mempow <HEX> [DIFFICULTY]",
            ));
        }
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.check() {
        e.exit();
    }

    init_logging(cli.verbose);

    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || {
        stop_clone.store(true, Ordering::SeqCst);
    }) {
        log::warn!("Could not install Ctrl-C handler: {}", e);
    }

    let mut out = io::stdout().lock();
    match run(&cli, &stop, &mut out) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", error_line(&e));
            std::process::exit(1);
        }
    }
}

/// Top-level error only; our error types already embed their cause
fn error_line(e: &anyhow::Error) -> String {
    format!("Error: {}", e)
}

/// Dispatch a parsed command line; `Ok(false)` means a nonce failed verification
fn run(cli: &Cli, stop: &AtomicBool, out: &mut impl Write) -> anyhow::Result<bool> {
    match &cli.command {
        Some(Commands::Verify {
            message,
            nonce,
            difficulty,
        }) => {
            let config = build_pow_config(cli, *difficulty)?;
            cmd_verify(message, *nonce, &config, cli.json, out)
        }
        Some(Commands::Benchmark {
            samples,
            difficulty,
        }) => {
            let config = build_pow_config(cli, *difficulty)?;
            cmd_benchmark(*samples, &config, stop, cli.json, out)
        }
        None => {
            let message = cli
                .message
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("A hex-encoded message is required"))?;
            let config = build_pow_config(cli, cli.difficulty)?;
            cmd_compute(message, &config, stop, cli.json, out)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Build the search config: file, then preset, then explicit flags
fn build_pow_config(cli: &Cli, difficulty: Option<u32>) -> anyhow::Result<PowConfig> {
    let mut config = match &cli.config {
        Some(path) => PowConfig::load(path)?,
        None => PowConfig::default(),
    };
    if let Some(preset) = cli.preset {
        config = PowConfig::from_preset(preset);
    }
    Ok(config.with_overrides(cli.buffer_size, difficulty))
}

fn cmd_compute(
    message_hex: &str,
    config: &PowConfig,
    stop: &AtomicBool,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let challenge = Challenge::from_hex(message_hex)?;
    let mut pow = config.solver()?;

    if !json {
        writeln!(out, "Using difficulty: {}", config.difficulty)?;
    }

    let start = Instant::now();
    let solution = pow
        .solve_until(challenge.digest(), config.difficulty, |_| {
            stop.load(Ordering::Relaxed)
        })
        .ok_or_else(|| anyhow::anyhow!("Search cancelled"))?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if json {
        let report = SearchReport::new(&challenge, config, &solution, elapsed_ms);
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "nonce: {}", solution.nonce)?;
    }

    Ok(true)
}

fn cmd_verify(
    message_hex: &str,
    nonce: u32,
    config: &PowConfig,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let challenge = Challenge::from_hex(message_hex)?;
    let mut pow = config.solver()?;

    let result = pow.attempt(challenge.digest(), nonce);
    let report = VerifyReport::new(&challenge, config, nonce, result);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else if report.valid {
        writeln!(out, "valid")?;
    } else {
        writeln!(
            out,
            "invalid ({} leading zero bits, {} required)",
            report.leading_zeros, config.difficulty
        )?;
    }

    Ok(report.valid)
}

fn cmd_benchmark(
    samples: u32,
    config: &PowConfig,
    stop: &AtomicBool,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    if !json {
        writeln!(
            out,
            "Running benchmark with {} samples (buffer: {} KB, difficulty: {})...",
            samples,
            config.work_buffer_size / 1024,
            config.difficulty
        )?;
        out.flush()?;
    }

    let report = bench::run(config, samples, || stop.load(Ordering::Relaxed))?
        .ok_or_else(|| anyhow::anyhow!("Benchmark cancelled"))?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(true);
    }

    writeln!(out, "\nResults:")?;
    writeln!(
        out,
        "  Difficulty: {}, {} timings, mean: {:.0} ms, stddev: {:.2} ms, max nonce: {}",
        report.difficulty,
        report.timing.samples,
        report.timing.mean_ms,
        report.timing.stddev_ms,
        report.max_nonce
    )?;
    writeln!(out, "  Total attempts: {}", report.total_attempts)?;

    writeln!(out, "\nAlgorithm parameters:")?;
    writeln!(out, "  Work buffer: {} KB", config.work_buffer_size / 1024)?;
    writeln!(out, "  Bounce rounds: {}", mempow::algorithm::BOUNCE_ROUNDS)?;

    Ok(true)
}
