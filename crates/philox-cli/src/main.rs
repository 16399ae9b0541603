//! Philox CLI - generate, inspect and checkpoint counter-based random streams.
//!
//! # Commands
//!
//! - `philox generate` - Print samples from a stream
//! - `philox inspect` - Show counter, key and position of a stream
//! - `philox checkpoint` - Save a stream position to a file
//! - `philox resume <file>` - Continue generating from a saved position
//!
//! # Examples
//!
//! ```bash
//! # Eight standard normals from seed 42
//! philox generate --seed 42 -n 8 -d normal-f32
//!
//! # Raw blocks in hex, starting 1000 blocks into the stream
//! philox generate --seed 42 --skip 1000 -n 4 --format hex
//!
//! # Save a position and pick it up later
//! philox checkpoint --seed 42 --skip 1000 -o stream.json
//! philox resume stream.json -n 16 --save stream.json
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use philox_core::config::GeneratorConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::{checkpoint, generate, inspect, OutputFormat, StreamArgs};
use error::CliResult;

/// Default configuration file looked up in the current directory.
const DEFAULT_CONFIG_FILE: &str = "philox.toml";

/// Philox CLI - counter-based deterministic random streams
#[derive(Parser)]
#[command(name = "philox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (default: ./philox.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print samples from a stream
    Generate {
        #[command(flatten)]
        stream: StreamArgs,

        /// Number of samples (blocks for hex output)
        #[arg(short = 'n', long, default_value_t = 16)]
        count: usize,

        /// Distribution, e.g. uniform-f32, normal-f64, uniform-int:0,10
        #[arg(short, long)]
        distribution: Option<String>,

        /// Output format (text, json, hex)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show counter, key and position of a stream
    Inspect {
        #[command(flatten)]
        stream: StreamArgs,

        /// Generate and print this many blocks after the initial position
        #[arg(long, default_value_t = 0)]
        steps: u64,
    },

    /// Save a stream position to a file
    Checkpoint {
        #[command(flatten)]
        stream: StreamArgs,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Write raw native-endian bytes instead of JSON
        #[arg(long)]
        binary: bool,
    },

    /// Continue generating from a saved position
    Resume {
        /// Checkpoint file (JSON or raw bytes)
        state: PathBuf,

        /// Number of samples (blocks for hex output)
        #[arg(short = 'n', long, default_value_t = 16)]
        count: usize,

        /// Distribution, e.g. uniform-f32, normal-f64, uniform-int:0,10
        #[arg(short, long)]
        distribution: Option<String>,

        /// Output format (text, json, hex)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Write the position after generation to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    // Samples go to stdout, so logs stay on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn load_config(path: Option<&Path>) -> CliResult<GeneratorConfig> {
    match path {
        Some(path) => Ok(GeneratorConfig::load(path)?),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Ok(GeneratorConfig::load(DEFAULT_CONFIG_FILE)?)
        }
        None => {
            debug!("No configuration file, using defaults");
            Ok(GeneratorConfig::default())
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = load_config(cli.config.as_deref())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Generate {
            stream,
            count,
            distribution,
            format,
        } => generate::execute(
            &mut out,
            &config,
            &stream,
            count,
            distribution.as_deref(),
            format,
        ),

        Commands::Inspect { stream, steps } => inspect::execute(&mut out, &config, &stream, steps),

        Commands::Checkpoint {
            stream,
            output,
            binary,
        } => checkpoint::execute_checkpoint(&mut out, &config, &stream, &output, binary, cli.quiet),

        Commands::Resume {
            state,
            count,
            distribution,
            format,
            save,
        } => checkpoint::execute_resume(
            &mut out,
            &config,
            &state,
            count,
            distribution.as_deref(),
            format,
            save.as_deref(),
        ),

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            clap_complete::generate(shell, &mut Cli::command(), "philox", &mut out);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);
    debug!("philox v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
