//! `philox inspect` command - Show counter, key and position of a stream.

use std::io::Write;

use colored::Colorize;
use philox_core::config::GeneratorConfig;
use philox_core::PhiloxEngine;

use super::StreamArgs;
use crate::error::CliResult;

/// Execute the `inspect` command.
pub fn execute<W: Write>(
    out: &mut W,
    config: &GeneratorConfig,
    stream: &StreamArgs,
    steps: u64,
) -> CliResult<()> {
    let (seed, mut engine) = stream.build_engine(config);

    writeln!(out, "{} {}", "Seed:".bright_cyan(), seed)?;
    write_position(out, &engine)?;

    for step in 0..steps {
        let block = engine.next_block();
        writeln!(
            out,
            "  {} {:08x} {:08x} {:08x} {:08x}",
            format!("[{}]", step).dimmed(),
            block[0],
            block[1],
            block[2],
            block[3]
        )?;
    }

    if steps > 0 {
        write_position(out, &engine)?;
    }

    Ok(())
}

fn write_position<W: Write>(out: &mut W, engine: &PhiloxEngine) -> CliResult<()> {
    let counter = engine.counter();
    let key = engine.key();

    writeln!(
        out,
        "{} [{:#010x}, {:#010x}]",
        "Key:".bright_cyan(),
        key[0],
        key[1]
    )?;
    writeln!(
        out,
        "{} [{:#010x}, {:#010x}, {:#010x}, {:#010x}]",
        "Counter:".bright_cyan(),
        counter[0],
        counter[1],
        counter[2],
        counter[3]
    )?;
    writeln!(
        out,
        "{} {:#034x}",
        "Position:".bright_cyan(),
        engine.position()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_reports_state() {
        colored::control::set_override(false);

        let stream = StreamArgs {
            seed: Some(-1),
            offset: Some(7),
            skip: 2,
        };
        let mut out = Vec::new();
        execute(&mut out, &GeneratorConfig::default(), &stream, 1).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Seed: -1"));
        assert!(text.contains("Key: [0xffffffff, 0xffffffff]"));
        assert!(text.contains("Counter: [0x00000002, 0x00000000, 0x00000007, 0x00000000]"));
        assert!(text.contains("Counter: [0x00000003, 0x00000000, 0x00000007, 0x00000000]"));
        assert!(text.contains("[0] "));
    }
}
