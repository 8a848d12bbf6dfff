mod bench;
mod check;
mod generator;
mod stats;
mod throughput;

use anyhow::Result;
use checkid_common::limits::{DEFAULT_LENGTH, DEFAULT_MAX_DEPTH};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Issue, check and correct self-checking identifiers.
#[derive(Parser)]
#[command(name = "checkid", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a batch file of freshly issued identifiers.
    Gen {
        #[arg(long, default_value = "ids.txt")]
        out: String,
        #[arg(long, default_value_t = DEFAULT_LENGTH)]
        length: usize,
        #[arg(long, default_value_t = 1_000)]
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
        /// Write identifiers in dash-grouped display form.
        #[arg(long)]
        grouped: bool,
        /// Per-symbol substitution probability applied after issuing.
        #[arg(long, default_value_t = 0.0)]
        noise: f64,
    },
    /// Check one identifier as typed.
    Check {
        id: String,
        #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
        depth: usize,
    },
    /// Check every identifier in a batch file.
    Run {
        #[arg(short, long)]
        input: String,
        #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
        depth: usize,
    },
    /// Measure correction quality under a fixed number of substitutions.
    Bench {
        #[arg(long, default_value_t = DEFAULT_LENGTH)]
        length: usize,
        #[arg(long, default_value_t = 10_000)]
        count: usize,
        #[arg(long, default_value_t = 1)]
        errors: usize,
        #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH)]
        depth: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Gen {
            out,
            length,
            count,
            seed,
            grouped,
            noise,
        } => {
            generator::generate_ids(&out, length, count, seed, grouped, noise)?;
        }
        Commands::Check { id, depth } => {
            check::run_check(&id, depth)?;
        }
        Commands::Run { input, depth } => {
            throughput::run_batch(&input, depth)?;
        }
        Commands::Bench {
            length,
            count,
            errors,
            depth,
            seed,
        } => {
            bench::run_bench(length, count, errors, depth, seed)?;
        }
    }
    Ok(())
}
