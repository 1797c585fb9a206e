//! CLI parse: clap types for dirdigest. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// dirdigest - content digests for a directory tree
#[derive(Debug, Parser)]
#[command(name = "dirdigest")]
#[command(version)]
#[command(about = "Compute a Merkle digest for every file and directory under a root")]
pub struct Cli {
    /// Directory (or file) to digest
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Print the flattened tree as JSON instead of the indented view
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Log every digested entry (raises log level to debug)
    #[arg(long)]
    pub verbose: bool,

    /// Sibling parallelism (0 = all cores, 1 = sequential)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Additional exclusion glob, matched against base names (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Do not apply the built-in exclusions (.DS_Store, @eaDir)
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Characters of digest shown in the indented view
    #[arg(long)]
    pub digest_width: Option<usize>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
