use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "PairSim CLI - Parallel pairwise molecular similarity scoring.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score every pair of a pair-definition file and write the annotated result.
    Run(RunArgs),
}

/// Arguments for the `run` subcommand.
///
/// Inputs, output, and worker count may also come from the configuration
/// file; a value given here always wins.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    // --- Core Arguments ---
    /// Number of parallel workers, the coordinator included.
    #[arg(short = 'n', long, value_name = "N")]
    pub workers: Option<usize>,

    /// CSV file with a `smiles` column (and an optional `name` column).
    #[arg(short, long, value_name = "PATH")]
    pub entities: Option<PathBuf>,

    /// JSON file mapping pair keys to pair definitions.
    #[arg(short, long, value_name = "PATH")]
    pub pairs: Option<PathBuf>,

    /// Destination of the annotated pair file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Output Overrides ---
    /// Decimal digits kept for each stored score.
    #[arg(long, value_name = "DIGITS")]
    pub precision: Option<u32>,

    /// Name of the field that receives the score.
    #[arg(long, value_name = "NAME")]
    pub score_field: Option<String>,

    // --- Input Overrides ---
    /// Name of the field holding the first SMILES of a pair.
    #[arg(long, value_name = "NAME")]
    pub left_field: Option<String>,

    /// Name of the field holding the second SMILES of a pair.
    #[arg(long, value_name = "NAME")]
    pub right_field: Option<String>,

    // --- Fingerprint Overrides ---
    /// Length of the hashed fingerprint bit vector.
    #[arg(long, value_name = "BITS")]
    pub fingerprint_bits: Option<usize>,

    /// Longest linear path, in bonds, folded into the fingerprint.
    #[arg(long, value_name = "BONDS")]
    pub max_path: Option<usize>,
}
