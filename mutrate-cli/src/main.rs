use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

mod analyze;
mod config;
mod error;

use analyze::{AnalyzeOptions, GapFlags};
use config::Config;
use error::{format_error_with_suggestions, CliError, CliResult};

#[derive(Parser)]
#[command(name = "mutrate")]
#[command(about = "Compute per-sequence mutation rate relative to a reference from a FASTA alignment")]
#[command(version)]
#[command(long_about = "
Compute per-sequence mutation rate relative to a reference from a FASTA alignment.

Every sequence, the reference included, is compared column by column against
the reference. Results are written as CSV:
  sequence_id,mutations,comparable_positions,mutation_rate

Exit status: 0 success, 1 input read failure, 2 reference not found,
3 sequences not aligned, 4 output write failure, 5 configuration error.

Examples:
  mutrate --input aln.fa --reference ref1
  mutrate -i aln.fa.gz -r ref1 --exclude-gaps -o rates.csv
")]
pub struct Cli {
    /// Path to aligned FASTA file (.gz accepted)
    #[arg(short, long, required_unless_present = "print_config")]
    pub input: Option<PathBuf>,

    /// Reference sequence ID (header without '>')
    #[arg(short, long, required_unless_present = "print_config")]
    pub reference: Option<String>,

    /// Exclude positions where either reference or target has a gap ('-')
    #[arg(long)]
    pub exclude_gaps: bool,

    /// Compare gap columns even when the configuration excludes them
    #[arg(long, conflicts_with = "exclude_gaps")]
    pub include_gaps: bool,

    /// Output CSV file. If omitted, results are printed to stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path (defaults to ./mutrate.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print an example configuration file and exit
    #[arg(long)]
    pub print_config: bool,

    /// Number of threads to use
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    pub quiet: bool,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn setup_threads(threads: usize) -> CliResult<()> {
    if threads == 0 {
        return Ok(());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| CliError::config(format!("Failed to set thread count: {}", e)))?;
    log::debug!("Using {} worker threads", threads);
    Ok(())
}

fn run(cli: Cli) -> CliResult<()> {
    if cli.print_config {
        analyze::write_stdout(&Config::example_toml()?)?;
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref())?;
    setup_threads(cli.threads.unwrap_or(config.general.threads))?;

    let (Some(input), Some(reference)) = (cli.input, cli.reference) else {
        return Err(CliError::config("--input and --reference are required"));
    };

    let gaps = GapFlags {
        exclude: cli.exclude_gaps,
        include: cli.include_gaps,
    };
    let options = AnalyzeOptions::resolve(&config, input, reference, gaps, cli.output);
    analyze::execute(&options)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", format_error_with_suggestions(&err));
            ExitCode::from(err.exit_code())
        }
    }
}
