//! Configuration display command.
//!
//! Prints the resolved configuration together with where each value came
//! from (default, file, or environment), so a surprising setting can be
//! traced to its source.

use std::io::Write;

use crate::config::{self, ValueSource};
use crate::error::CliError;

fn source_str(source: ValueSource) -> &'static str {
    match source {
        ValueSource::Default => "default",
        ValueSource::File => "file",
        ValueSource::Env => "env",
    }
}

/// Handle the cfg command: print the resolved configuration.
pub fn handle_cfg_command(out: &mut dyn Write, _err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources().map_err(|e| CliError::Config(e.to_string()))?;
    let cfg = &resolved.config;
    let sources = &resolved.sources;

    writeln!(out, "Configuration:")?;
    writeln!(
        out,
        "  points_to_win = {} ({})",
        cfg.points_to_win,
        source_str(sources.points_to_win)
    )?;
    writeln!(
        out,
        "  skunk = {} below {} ({})",
        cfg.skunk_enabled,
        cfg.skunk_threshold,
        source_str(sources.skunks)
    )?;
    writeln!(
        out,
        "  double_skunk = {} below {} ({})",
        cfg.double_skunk_enabled,
        cfg.double_skunk_threshold,
        source_str(sources.skunks)
    )?;
    match cfg.seed {
        Some(seed) => writeln!(out, "  seed = {} ({})", seed, source_str(sources.seed))?,
        None => writeln!(out, "  seed = random ({})", source_str(sources.seed))?,
    }
    writeln!(
        out,
        "  bot_type = {} ({})",
        cfg.bot_type,
        source_str(sources.bot_type)
    )?;
    Ok(())
}
