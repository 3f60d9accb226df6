//! Configuration file loading
//!
//! ```toml
//! [port]
//! port = "/dev/ttyUSB0"
//! baud_rate = 38400
//! data_bits = "eight"
//! parity = "none"
//! stop_bits = "one"
//! timeout_ms = 1000
//!
//! [controller]
//! settle_interval_us = 5000
//! verify_replies = false
//! ```
//!
//! Every key is optional; missing keys take the controller defaults.

use std::path::{Path, PathBuf};

use duoaxis_drivers::ControllerConfig;
use duoaxis_hal_serialport::PortConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Config loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub port: PortConfig,
    pub controller: ControllerConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load `path`, or fall back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            info!(path = ?path, "Loading configuration");
            Self::load(path)
        } else {
            info!(path = ?path, "No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply command line flags on top of the file values
    ///
    /// `None` keeps the file value. `verify` can only switch verification
    /// on; a `verify_replies = true` file entry is not cleared by its absence.
    pub fn apply_overrides(
        &mut self,
        port: Option<String>,
        baud: Option<u32>,
        settle_us: Option<u32>,
        verify: bool,
    ) {
        if let Some(port) = port {
            self.port.port = port;
        }
        if let Some(baud) = baud {
            self.port.baud_rate = baud;
        }
        if let Some(settle_us) = settle_us {
            self.controller.settle_interval_us = settle_us;
        }
        if verify {
            self.controller.verify_replies = true;
        }
    }
}
