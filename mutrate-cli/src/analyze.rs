//! Analysis command: alignment in, mutation-rate CSV out

use std::io::Write;
use std::path::{Path, PathBuf};

use mutrate_core::{compare_all, read_alignment, render_csv};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Options resolved from the command line and configuration.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub input: PathBuf,
    pub reference: String,
    pub exclude_gaps: bool,
    pub output: Option<PathBuf>,
}

impl AnalyzeOptions {
    /// Merge CLI values over configuration defaults.
    ///
    /// `--exclude-gaps` or `compute.exclude_gaps` turn gap exclusion on;
    /// `--include-gaps` forces it off regardless of configuration.
    pub fn resolve(
        config: &Config,
        input: PathBuf,
        reference: String,
        gaps: GapFlags,
        output: Option<PathBuf>,
    ) -> Self {
        let exclude_gaps = if gaps.include {
            false
        } else {
            gaps.exclude || config.compute.exclude_gaps
        };
        if config.compute.exclude_gaps && !gaps.exclude {
            log::info!(
                "Configuration sets exclude_gaps = true; effective gap exclusion: {}",
                exclude_gaps
            );
        }

        Self {
            input,
            reference,
            exclude_gaps,
            output,
        }
    }
}

/// Gap-policy switches given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct GapFlags {
    pub exclude: bool,
    pub include: bool,
}

pub fn execute(options: &AnalyzeOptions) -> CliResult<()> {
    log::info!("Input alignment: {}", options.input.display());
    log::info!("Reference sequence: {}", options.reference);

    let sequences = read_alignment(&options.input)?;
    let records = compare_all(&sequences, &options.reference, options.exclude_gaps)?;
    log::info!("Computed mutation rates for {} sequences", records.len());

    let csv = render_csv(&records);

    match &options.output {
        Some(path) => {
            write_report(path, &csv)?;
            write_stdout(&format!("Wrote results to {}\n", path.display()))?;
        }
        None => write_stdout(&csv)?,
    }

    Ok(())
}

fn write_report(path: &Path, csv: &str) -> CliResult<()> {
    std::fs::write(path, csv).map_err(|e| CliError::output(path.to_path_buf(), e.to_string()))?;
    log::debug!("Report written to {}", path.display());
    Ok(())
}

/// Write `text` to standard output, reporting failures instead of panicking.
pub fn write_stdout(text: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| CliError::output(PathBuf::from(STDOUT_NAME), e.to_string()))
}

/// Display name used for standard output in error messages.
pub const STDOUT_NAME: &str = "<stdout>";
