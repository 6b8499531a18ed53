//! File-backed simulation settings (TOML).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    Algorithm, DEFAULT_DENSITY, DEFAULT_GRID_SIZE, Grid, LifeError, Preset, PresetInitializer,
    RuleSet,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize settings")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid settings: {0}")]
    Invalid(#[from] LifeError),
}

/// Raw rule thresholds as written in the config file.
/// Kept signed so out-of-range values reach validation instead of serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub survive_min: i64,
    pub survive_max: i64,
    pub death_above: i64,
    pub death_below: i64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        let rules = RuleSet::default();
        Self {
            survive_min: rules.survive_min().into(),
            survive_max: rules.survive_max().into(),
            death_above: rules.death_above().into(),
            death_below: rules.death_below().into(),
        }
    }
}

impl RuleConfig {
    pub fn to_rule_set(&self) -> Result<RuleSet, LifeError> {
        RuleSet::new(
            self.survive_min,
            self.survive_max,
            self.death_above,
            self.death_below,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub grid_size: usize,
    pub preset: Preset,
    pub density: f64,
    /// Fixed seed for the randomized presets
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
    pub rules: RuleConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            preset: Preset::default(),
            density: DEFAULT_DENSITY,
            seed: None,
            algorithm: Algorithm::default(),
            rules: RuleConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load settings from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: SimConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save settings to a TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), LifeError> {
        Grid::checked_volume(self.grid_size)?;
        self.rules.to_rule_set()?;
        self.initializer()?;
        Ok(())
    }

    /// Preset initializer honoring `density` and `seed`
    pub fn initializer(&self) -> Result<PresetInitializer, LifeError> {
        match self.seed {
            Some(seed) => PresetInitializer::from_seed(self.density, seed),
            None => PresetInitializer::new(self.density),
        }
    }
}
