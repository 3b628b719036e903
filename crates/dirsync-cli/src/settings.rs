//! Effective settings: command line, then config file, then defaults

use std::path::{Path, PathBuf};

use dirsync_fs::ConfigStore;
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{CliError, Result};

pub const DEFAULT_INTERVAL_SECS: u64 = 600;
pub const DEFAULT_LOGFILE: &str = "dirsync.log";

/// Keys accepted in the TOML config file. All are optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub interval: Option<u64>,
    pub oneshot: Option<bool>,
    pub logfile: Option<PathBuf>,
    pub verbose: Option<bool>,
}

impl FileSettings {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Absolute source root
    pub source: PathBuf,
    /// Absolute target root
    pub target: PathBuf,
    pub interval_secs: u64,
    pub oneshot: bool,
    pub logfile: PathBuf,
    pub verbose: bool,
}

impl Settings {
    /// Merge the command line with the config file it names, if any.
    pub fn resolve(cli: Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileSettings::load(path)?,
            None => FileSettings::default(),
        };
        Self::merge(cli, file)
    }

    /// Flags given on the command line win over file values; a boolean flag
    /// that was not given falls back to the file.
    pub fn merge(cli: Cli, file: FileSettings) -> Result<Self> {
        let interval_secs = cli
            .interval
            .or(file.interval)
            .unwrap_or(DEFAULT_INTERVAL_SECS);
        if interval_secs == 0 {
            return Err(CliError::user("interval must be at least 1 second"));
        }

        Ok(Self {
            source: std::path::absolute(&cli.source)?,
            target: std::path::absolute(&cli.target)?,
            interval_secs,
            oneshot: cli.oneshot || file.oneshot.unwrap_or(false),
            logfile: cli
                .logfile
                .or(file.logfile)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOGFILE)),
            verbose: cli.verbose || file.verbose.unwrap_or(false),
        })
    }
}
