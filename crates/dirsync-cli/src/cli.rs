//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// dirsync - Keep a target directory an exact mirror of a source directory
#[derive(Parser, Debug)]
#[command(name = "dirsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source directory to mirror from
    pub source: PathBuf,

    /// Target directory to mirror into (created if missing)
    pub target: PathBuf,

    /// Run a single pass and exit, leaving scheduling to an external tool
    #[arg(short, long)]
    pub oneshot: bool,

    /// Seconds to wait between passes [default: 600]
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Log file path [default: dirsync.log]
    #[arg(short, long)]
    pub logfile: Option<PathBuf>,

    /// TOML file with default settings; command-line flags take precedence
    #[arg(short, long, env = "DIRSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
