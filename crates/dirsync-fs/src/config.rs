//! TOML configuration loading

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Loads settings files.
///
/// Only TOML is accepted; the format is checked from the file extension.
#[derive(Debug, Default)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load configuration from a `.toml` file.
    pub fn load<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if extension != "toml" {
            return Err(Error::UnsupportedFormat { extension });
        }

        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            format: "TOML".into(),
            message: e.to_string(),
        })
    }
}
