use std::path::{Path, PathBuf};

use crate::repository::StoreError;

pub const DEFAULT_STORAGE_KEY: &str = "gradeCalculatorClasses";
pub const DEFAULT_DIR_NAME: &str = ".gradebook";

/// Where the gradebook lives on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl Config {
    /// Resolves the data directory, defaulting to `~/.gradebook`.
    pub fn new(data_dir: Option<PathBuf>, storage_key: Option<String>) -> Result<Self, StoreError> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => dirs::home_dir()
                .ok_or(StoreError::NoHomeDir)?
                .join(DEFAULT_DIR_NAME),
        };
        let storage_key = storage_key
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        Ok(Self {
            data_dir,
            storage_key,
        })
    }

    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }
}
