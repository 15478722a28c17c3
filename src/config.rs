//! # Configuration
//!
//! Tunables of the vein miner, persisted as a JSON file.
//!
//! Every field has a default, so a partial (or empty) file is valid. [`VeinConfig::load_or_create`]
//! writes the defaults out on first use, giving players a file to edit.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use winit::keyboard::KeyCode;

use crate::server::drops::Delivery;

/// File name used when no path is given on the command line.
pub const CONFIG_FILE_NAME: &str = "vein_miner.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("max_cells must be at least 1")]
    ZeroMaxCells,
}

/// Vein mining settings shared by the client and the authority.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeinConfig {
    /// Upper bound on the number of cells one operation may collect.
    pub max_cells: usize,
    /// Mined cells per hunger point charged; 0 disables the cost.
    pub hunger_per_blocks: u32,
    /// Deliver drops into the inventory; otherwise every batch is spawned at the actor's
    /// position.
    pub deliver_to_inventory: bool,
    /// Key that has to be held for a break to become a vein mine.
    pub activation_input: KeyCode,
}

impl Default for VeinConfig {
    fn default() -> Self {
        Self {
            max_cells: 64,
            hunger_per_blocks: 32,
            deliver_to_inventory: true,
            activation_input: KeyCode::Backquote,
        }
    }
}

impl VeinConfig {
    /// Reads and validates the configuration at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration at `path`, writing the defaults there if the file is missing.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        let config = Self::default();
        config.save(path)?;
        info!("Wrote default configuration to {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_cells == 0 {
            return Err(ConfigError::ZeroMaxCells);
        }
        Ok(())
    }

    /// Where harvested drops go.
    pub fn delivery(&self) -> Delivery {
        if self.deliver_to_inventory {
            Delivery::Inventory
        } else {
            Delivery::InPlace
        }
    }
}
