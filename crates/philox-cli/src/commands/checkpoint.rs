//! `philox checkpoint` and `philox resume` commands.

use std::fs;
use std::io::Write;
use std::path::Path;

use colored::Colorize;
use philox_core::config::GeneratorConfig;
use philox_core::{PhiloxEngine, PhiloxState};
use tracing::{debug, info};

use super::{resolve_distribution, write_samples, OutputFormat, StreamArgs};
use crate::error::{CliError, CliResult};

/// On-disk encoding of a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointEncoding {
    /// Pretty-printed JSON.
    Json,
    /// Raw native-endian [`PhiloxState`] bytes.
    Binary,
}

/// Execute the `checkpoint` command.
pub fn execute_checkpoint<W: Write>(
    out: &mut W,
    config: &GeneratorConfig,
    stream: &StreamArgs,
    output: &Path,
    binary: bool,
    quiet: bool,
) -> CliResult<()> {
    let (seed, engine) = stream.build_engine(config);
    let encoding = if binary {
        CheckpointEncoding::Binary
    } else {
        CheckpointEncoding::Json
    };

    write_state(output, &engine.state(), encoding)?;
    info!("Saved seed {} position to {}", seed, output.display());

    if !quiet {
        writeln!(
            out,
            "{} Checkpoint written to {}",
            "✓".green(),
            output.display().to_string().bright_white()
        )?;
    }

    Ok(())
}

/// Execute the `resume` command.
pub fn execute_resume<W: Write>(
    out: &mut W,
    config: &GeneratorConfig,
    state_path: &Path,
    count: usize,
    distribution: Option<&str>,
    format: OutputFormat,
    save: Option<&Path>,
) -> CliResult<()> {
    let kind = resolve_distribution(config, distribution)?;
    let (state, encoding) = read_state(state_path)?;
    let mut engine = PhiloxEngine::from_state(state);

    debug!(
        "Resuming from {} ({:?}) at counter {:?}",
        state_path.display(),
        encoding,
        engine.counter()
    );

    write_samples(out, &mut engine, &kind, count, format, &config.fill)?;

    if let Some(path) = save {
        write_state(path, &engine.state(), encoding)?;
        info!("Saved position to {}", path.display());
    }

    Ok(())
}

fn write_state(path: &Path, state: &PhiloxState, encoding: CheckpointEncoding) -> CliResult<()> {
    match encoding {
        CheckpointEncoding::Binary => fs::write(path, state.as_bytes())?,
        CheckpointEncoding::Json => {
            let mut json = serde_json::to_string_pretty(state)?;
            json.push('\n');
            fs::write(path, json)?;
        }
    }
    Ok(())
}

/// Read a checkpoint written as JSON or as raw bytes.
///
/// A file of exactly [`PhiloxState::SIZE`] bytes is a raw state. JSON
/// checkpoints are always longer, whatever their first bytes are.
pub fn read_state(path: &Path) -> CliResult<(PhiloxState, CheckpointEncoding)> {
    let bytes = fs::read(path)?;
    let invalid = |reason: String| CliError::InvalidCheckpoint {
        path: path.display().to_string(),
        reason,
    };

    if bytes.len() == PhiloxState::SIZE {
        PhiloxState::from_bytes(&bytes)
            .map(|state| (state, CheckpointEncoding::Binary))
            .map_err(|e| invalid(e.to_string()))
    } else {
        serde_json::from_slice(&bytes)
            .map(|state| (state, CheckpointEncoding::Json))
            .map_err(|e| invalid(e.to_string()))
    }
}
