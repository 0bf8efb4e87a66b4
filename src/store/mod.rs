//! Persistence of the blind calibration and network records.
//!
//! The driver only depends on the [`ConfigStore`] trait. [`MemoryStore`]
//! works everywhere; `FileConfigStore` (std only) keeps one TOML document
//! per record on disk.

#[cfg(feature = "std")]
mod file;

#[cfg(feature = "std")]
pub use file::{FileConfigStore, BLINDS_CONFIG_FILE, WEB_CONFIG_FILE};

use crate::config::{BlindsConfig, WebConfig};
use crate::error::{Error, Result, StorageError};

/// Loads and saves the persisted records.
///
/// Reads populate the record only on success; on failure the record keeps
/// its prior value and the error is returned.
pub trait ConfigStore {
    /// Populate `config` from the stored calibration.
    fn read_blinds_config(&mut self, config: &mut BlindsConfig) -> Result<()>;

    /// Persist the calibration.
    fn save_blinds_config(&mut self, config: &BlindsConfig) -> Result<()>;

    /// Populate `config` from the stored network settings.
    fn read_web_config(&mut self, config: &mut WebConfig) -> Result<()>;

    /// Persist the network settings.
    fn save_web_config(&mut self, config: &WebConfig) -> Result<()>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for &mut S {
    fn read_blinds_config(&mut self, config: &mut BlindsConfig) -> Result<()> {
        (**self).read_blinds_config(config)
    }

    fn save_blinds_config(&mut self, config: &BlindsConfig) -> Result<()> {
        (**self).save_blinds_config(config)
    }

    fn read_web_config(&mut self, config: &mut WebConfig) -> Result<()> {
        (**self).read_web_config(config)
    }

    fn save_web_config(&mut self, config: &WebConfig) -> Result<()> {
        (**self).save_web_config(config)
    }
}

/// In-RAM store; keeps the last saved copy of each record.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blinds: Option<BlindsConfig>,
    web: Option<WebConfig>,
    blinds_saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a calibration.
    pub fn with_blinds(config: BlindsConfig) -> Self {
        Self {
            blinds: Some(config),
            ..Self::default()
        }
    }

    /// Last saved calibration.
    pub fn blinds(&self) -> Option<&BlindsConfig> {
        self.blinds.as_ref()
    }

    /// Last saved network settings.
    pub fn web(&self) -> Option<&WebConfig> {
        self.web.as_ref()
    }

    /// Number of calibration saves since creation.
    pub fn blinds_saves(&self) -> usize {
        self.blinds_saves
    }
}

impl ConfigStore for MemoryStore {
    fn read_blinds_config(&mut self, config: &mut BlindsConfig) -> Result<()> {
        match self.blinds {
            Some(stored) => {
                *config = stored;
                Ok(())
            }
            None => {
                warn!("no saved blinds config, keeping defaults");
                Err(Error::Storage(StorageError::NotFound("blinds")))
            }
        }
    }

    fn save_blinds_config(&mut self, config: &BlindsConfig) -> Result<()> {
        self.blinds = Some(*config);
        self.blinds_saves += 1;
        Ok(())
    }

    fn read_web_config(&mut self, config: &mut WebConfig) -> Result<()> {
        match &self.web {
            Some(stored) => {
                *config = stored.clone();
                Ok(())
            }
            None => {
                warn!("no saved web config, keeping defaults");
                Err(Error::Storage(StorageError::NotFound("web")))
            }
        }
    }

    fn save_web_config(&mut self, config: &WebConfig) -> Result<()> {
        self.web = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_keeps_record() {
        let mut store = MemoryStore::new();
        let mut config = BlindsConfig::new(12, 340);

        let result = store.read_blinds_config(&mut config);

        assert_eq!(
            result,
            Err(Error::Storage(StorageError::NotFound("blinds")))
        );
        assert_eq!(config, BlindsConfig::new(12, 340));
    }

    #[test]
    fn test_save_then_read() {
        let mut store = MemoryStore::new();
        store.save_blinds_config(&BlindsConfig::new(500, 1000)).unwrap();

        let mut config = BlindsConfig::default();
        store.read_blinds_config(&mut config).unwrap();

        assert_eq!(config, BlindsConfig::new(500, 1000));
        assert_eq!(store.blinds_saves(), 1);
    }

    #[test]
    fn test_web_config_is_independent() {
        let mut store = MemoryStore::with_blinds(BlindsConfig::new(1, 2));
        let mut web = WebConfig::default();

        assert!(store.read_web_config(&mut web).is_err());

        web.mqtt_port = 1883;
        store.save_web_config(&web).unwrap();
        assert_eq!(store.web().map(|w| w.mqtt_port), Some(1883));
        assert_eq!(store.blinds_saves(), 0);
    }
}
