//! CLI command implementations.

pub mod checkpoint;
pub mod generate;
pub mod inspect;

use std::io::Write;
use std::str::FromStr;

use clap::Args;
use philox_core::config::{FillConfig, GeneratorConfig};
use philox_core::distributions::{generate as generate_samples, DistributionKind};
use philox_core::{PhiloxEngine, PhiloxState};
use serde::Serialize;

use crate::error::CliResult;

/// Stream selection shared by several commands.
#[derive(Args, Debug, Clone, Default)]
pub struct StreamArgs {
    /// Seed (overrides the configuration file)
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Starting offset (overrides the configuration file)
    #[arg(long)]
    pub offset: Option<u64>,

    /// Blocks to skip before starting
    #[arg(long, default_value_t = 0)]
    pub skip: u64,
}

impl StreamArgs {
    /// Resolve the seed and build the engine, already skipped ahead.
    pub fn build_engine(&self, config: &GeneratorConfig) -> (i64, PhiloxEngine) {
        let seed = self.seed.unwrap_or_else(|| config.resolved_seed());
        let offset = self.offset.unwrap_or(config.offset);
        let mut engine = PhiloxEngine::new(seed, offset);
        engine.skip_ahead(self.skip);
        (seed, engine)
    }
}

/// Sample output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One sample per line.
    Text,
    /// JSON document with samples and stream positions.
    Json,
    /// Raw blocks as hex words, one block per line.
    Hex,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "hex" | "raw" => Ok(Self::Hex),
            _ => Err(format!(
                "Unknown format '{}'. Valid options: text, json, hex",
                s
            )),
        }
    }
}

/// Distribution from the command line, falling back to the configuration.
pub fn resolve_distribution(
    config: &GeneratorConfig,
    distribution: Option<&str>,
) -> CliResult<DistributionKind> {
    match distribution {
        Some(name) => Ok(name.parse()?),
        None => Ok(config.distribution),
    }
}

#[derive(Serialize)]
struct JsonOutput<'a, T: Serialize> {
    distribution: String,
    start: PhiloxState,
    end: PhiloxState,
    samples: &'a T,
}

/// Generate `count` outputs from `engine` and write them in `format`.
pub fn write_samples<W: Write>(
    out: &mut W,
    engine: &mut PhiloxEngine,
    kind: &DistributionKind,
    count: usize,
    format: OutputFormat,
    fill: &FillConfig,
) -> CliResult<()> {
    let start = engine.state();

    match format {
        OutputFormat::Hex => {
            for block in engine.blocks().take(count) {
                writeln!(
                    out,
                    "{:08x} {:08x} {:08x} {:08x}",
                    block[0], block[1], block[2], block[3]
                )?;
            }
        }
        OutputFormat::Text => {
            let samples = generate_samples(engine, kind, count, fill)?;
            for line in samples.to_strings() {
                writeln!(out, "{}", line)?;
            }
        }
        OutputFormat::Json => {
            let samples = generate_samples(engine, kind, count, fill)?;
            let doc = JsonOutput {
                distribution: kind.to_string(),
                start,
                end: engine.state(),
                samples: &samples,
            };
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
        }
    }

    Ok(())
}
