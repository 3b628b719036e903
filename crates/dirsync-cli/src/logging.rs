//! Log setup: standard error plus a size-rotated log file

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, filter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Size at which the log file is rotated.
pub const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;
/// Number of rotated files kept next to the live one.
pub const LOG_BACKUPS: usize = 3;
/// Events with this target are written to the log file but not to stderr.
pub const FILE_ONLY_TARGET: &str = "dirsync::file_only";

/// Append-only log file that rolls over to `<path>.1` .. `<path>.N`.
///
/// The live file is reopened in append mode, so restarts continue the same
/// log. Rotation happens before a write that would take the file past
/// `max_bytes`; the oldest backup is discarded.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    file: File,
    size: u64,
    max_bytes: u64,
    backups: usize,
}

impl RotatingFile {
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, backups: usize) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = open_append(&path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            path,
            file,
            size,
            max_bytes,
            backups,
        })
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        if self.backups == 0 {
            self.file.set_len(0)?;
        } else {
            for index in (1..self.backups).rev() {
                let from = self.backup_path(index);
                if from.exists() {
                    fs::rename(&from, self.backup_path(index + 1))?;
                }
            }
            fs::rename(&self.path, self.backup_path(1))?;
            self.file = open_append(&self.path)?;
        }

        self.size = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.size > 0 && self.size + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let written = self.file.write(buf)?;
        self.size += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise `info`, or `debug`
/// when `verbose` is true.
pub fn init(logfile: &Path, verbose: bool) -> Result<()> {
    let file = RotatingFile::open(logfile, MAX_LOG_BYTES, LOG_BACKUPS)
        .map_err(|e| dirsync_fs::Error::io(logfile, e))?;

    let default_level = if verbose { "debug" } else { "info" };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(CliError::logging)?;

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(filter::filter_fn(|meta| meta.target() != FILE_ONLY_TARGET));
    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(CliError::logging)?;

    Ok(())
}
