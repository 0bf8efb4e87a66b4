//! File-backed record store (std only).

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{BlindsConfig, WebConfig};
use crate::error::{Error, Result, StorageError};

use super::ConfigStore;

/// File name of the calibration document.
pub const BLINDS_CONFIG_FILE: &str = "blindsConfig.toml";

/// File name of the network settings document.
pub const WEB_CONFIG_FILE: &str = "webConfig.toml";

/// Stores each record as a TOML document in a directory.
///
/// # Example
///
/// ```rust,ignore
/// use blinds_stepper::store::{ConfigStore, FileConfigStore};
///
/// let mut store = FileConfigStore::new("/data");
/// let mut blinds = BlindsConfig::default();
/// store.read_blinds_config(&mut blinds)?;
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    dir: PathBuf,
}

impl FileConfigStore {
    /// Create a store rooted at `dir`. Nothing is touched until a read or save.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_document<T: DeserializeOwned>(&self, file: &'static str) -> Result<T> {
        let path = self.dir.join(file);
        let content = fs::read_to_string(&path).map_err(|e| {
            error!("failed to open {} for reading", file);
            Error::Storage(StorageError::io(e))
        })?;

        toml::from_str(&content).map_err(|e| {
            error!("failed to decode {}", file);
            Error::Storage(StorageError::deserialize(e.message()))
        })
    }

    fn write_document<T: Serialize>(&self, file: &'static str, record: &T) -> Result<()> {
        let content = toml::to_string(record).map_err(|e| {
            error!("failed to encode {}", file);
            Error::Storage(StorageError::serialize(e))
        })?;

        fs::write(self.dir.join(file), content).map_err(|e| {
            error!("failed to write {}", file);
            Error::Storage(StorageError::io(e))
        })
    }
}

impl ConfigStore for FileConfigStore {
    fn read_blinds_config(&mut self, config: &mut BlindsConfig) -> Result<()> {
        *config = self.read_document(BLINDS_CONFIG_FILE)?;
        Ok(())
    }

    fn save_blinds_config(&mut self, config: &BlindsConfig) -> Result<()> {
        self.write_document(BLINDS_CONFIG_FILE, config)
    }

    fn read_web_config(&mut self, config: &mut WebConfig) -> Result<()> {
        *config = self.read_document(WEB_CONFIG_FILE)?;
        Ok(())
    }

    fn save_web_config(&mut self, config: &WebConfig) -> Result<()> {
        self.write_document(WEB_CONFIG_FILE, config)
    }
}
