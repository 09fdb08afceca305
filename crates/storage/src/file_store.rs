use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::debug;

use crate::{KeyValueError, KeyValueStore};

/// Persistent store keeping each value in a separate file named after its key.
#[derive(Debug, Clone)]
pub struct FileStore {
    directory: PathBuf,
}

impl FileStore {
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self, KeyValueError> {
        let directory = directory.into();
        fs::create_dir_all(&directory)
            .with_context(|| format!("failed to create {}", directory.display()))?;
        debug!("opened file store in {}", directory.display());
        Ok(Self { directory })
    }

    /// Platform-specific data directory, or the current directory if none can be determined.
    #[must_use]
    pub fn default_directory() -> PathBuf {
        directories::ProjectDirs::from("", "", "repbook")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path(&self, key: &str) -> Result<PathBuf, KeyValueError> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(KeyValueError::InvalidKey(key.to_string()));
        }
        Ok(self.directory.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        let path = self.path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KeyValueError::Other(
                anyhow::Error::new(err).context(format!("failed to read {}", path.display())),
            )),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), KeyValueError> {
        let path = self.path(key)?;
        // Keys never contain a dot, so the temporary file cannot shadow another key.
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, value)
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("failed to replace {}", path.display()))?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), KeyValueError> {
        let path = self.path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(KeyValueError::Other(
                anyhow::Error::new(err).context(format!("failed to remove {}", path.display())),
            )),
        }
    }
}
