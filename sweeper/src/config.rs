#[cfg(test)]
mod config_test;

use crate::sweep::Combination;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs::File, path::Path};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigErrors {
    #[error("Config file could not be read")]
    FileNotFound(#[from] std::io::Error),
    #[error("Config file could not be parsed")]
    InvalidConfig(#[from] serde_yaml::Error),
    #[error("Batch of {0} jobs exceeds max_batch_size of {1}")]
    BatchTooLarge(usize, usize),
    #[error("Launcher not supported")]
    UnsupportedLauncher(String),
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct SweeperConfig {
    // upper bound for the number of jobs handed to the launcher at once
    #[serde(default)]
    pub max_batch_size: Option<usize>,

    // preset overrides, applied before any command line arguments
    #[serde(default)]
    pub params: BTreeMap<String, String>,

    #[serde(default)]
    pub launcher: LauncherConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct LauncherConfig {
    // Name of the selected launcher, see Launchers::load for the selection proccess
    pub name: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            name: "console".to_owned(),
        }
    }
}

impl SweeperConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigErrors> {
        let file = File::open(path)?;

        Ok(serde_yaml::from_reader(file)?)
    }

    /// render the preset params into raw `key=value` override strings
    /// ordered by key so repeated runs see the same input
    pub fn params_as_overrides(&self) -> Vec<String> {
        self.params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect()
    }

    /// reject batches the configured launcher is not allowed to take
    pub fn validate_batch(&self, batch: &[Combination]) -> Result<(), ConfigErrors> {
        match self.max_batch_size {
            Some(max) if batch.len() > max => Err(ConfigErrors::BatchTooLarge(batch.len(), max)),
            _ => Ok(()),
        }
    }
}
