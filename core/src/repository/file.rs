use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::model::class::Class;
use crate::repository::error::StoreError;
use crate::repository::traits::GradeBookRepository;

#[derive(Clone, Debug)]
pub struct FileGradeBookRepository {
    file_path: PathBuf,
}

impl FileGradeBookRepository {
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(FileGradeBookRepository {
            file_path: config.storage_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// First free `<file>.corrupt`, `<file>.corrupt.1`, ... so earlier copies survive.
    fn quarantine_path(&self) -> PathBuf {
        let with_suffix = |suffix: String| {
            let mut name = self.file_path.as_os_str().to_os_string();
            name.push(suffix);
            PathBuf::from(name)
        };
        let first = with_suffix(".corrupt".to_string());
        if !first.exists() {
            return first;
        }
        (1..)
            .map(|n| with_suffix(format!(".corrupt.{}", n)))
            .find(|p| !p.exists())
            .unwrap_or(first)
    }
}

impl GradeBookRepository for FileGradeBookRepository {
    fn load(&self) -> Result<Option<Vec<Class>>, StoreError> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.file_path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let classes: Vec<Class> =
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: self.file_path.clone(),
                source,
            })?;
        debug!(path = %self.file_path.display(), classes = classes.len(), "loaded gradebook");
        Ok(Some(classes))
    }

    fn save(&self, classes: &[Class]) -> Result<(), StoreError> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, classes).map_err(StoreError::Serialize)?;
        writer.flush()?;
        debug!(path = %self.file_path.display(), classes = classes.len(), "saved gradebook");
        Ok(())
    }

    fn quarantine(&self) -> Result<(), StoreError> {
        if self.file_path.exists() {
            let target = self.quarantine_path();
            fs::rename(&self.file_path, &target)?;
            warn!(from = %self.file_path.display(), to = %target.display(), "moved corrupt gradebook aside");
        }
        Ok(())
    }
}
