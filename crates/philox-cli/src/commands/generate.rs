//! `philox generate` command - Print samples from a stream.

use std::io::Write;

use philox_core::config::GeneratorConfig;
use tracing::debug;

use super::{resolve_distribution, write_samples, OutputFormat, StreamArgs};
use crate::error::CliResult;

/// Execute the `generate` command.
pub fn execute<W: Write>(
    out: &mut W,
    config: &GeneratorConfig,
    stream: &StreamArgs,
    count: usize,
    distribution: Option<&str>,
    format: OutputFormat,
) -> CliResult<()> {
    let kind = resolve_distribution(config, distribution)?;
    let (seed, mut engine) = stream.build_engine(config);

    debug!(
        "Generating {} x {} from seed {} at counter {:?}",
        count,
        kind,
        seed,
        engine.counter()
    );

    write_samples(out, &mut engine, &kind, count, format, &config.fill)
}
