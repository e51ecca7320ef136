//! Run configuration
//!
//! Every section is `#[serde(default)]`, so a file only needs the keys it
//! changes:
//!
//! ```toml
//! [grid]
//! points = 128
//!
//! [time]
//! dt = 1e-6
//!
//! [initial]
//! kind = "sech2"
//! width = 0.3
//! ```

use crate::physics::integrators::IntegratorRegistry;
use crate::physics::math::{Scalar, TAU};
use crate::physics::profiles::InitialProfile;
use crate::physics::{Grid, TimeParams};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Environment variables with this prefix override user configuration,
/// e.g. `WAVEDRIFT__GRID__POINTS=256`.
pub const ENV_PREFIX: &str = "WAVEDRIFT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Layered(#[from] ::config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub grid: GridConfig,
    pub time: TimeConfig,
    pub integrator: IntegratorConfig,
    pub initial: InitialProfile,
    pub output: OutputConfig,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Domain length `L`
    pub length: Scalar,
    /// Number of grid points `N`
    pub points: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            length: TAU,
            points: 64,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct TimeConfig {
    pub total_time: Scalar,
    pub dt: Scalar,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            total_time: 0.1,
            dt: 1e-5,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct IntegratorConfig {
    #[serde(rename = "type")]
    pub integrator_type: String,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            integrator_type: "explicit_euler".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Steps between snapshots handed to the renderer
    pub snapshot_every: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            snapshot_every: 1000,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file
    /// is missing or does not parse
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::Read { .. }) => {
                info!("Config file {} not found. Using defaults.", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("{e}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `config.toml` in the platform's configuration directory
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "wavedrift")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Defaults, overlaid by the user's config file when present, overlaid by
    /// `WAVEDRIFT__*` environment variables
    pub fn load_layered(user_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = user_file {
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// [`SimulationConfig::load_layered`] on the user config path, falling back
    /// to defaults on any error
    pub fn load_from_user_config() -> Self {
        let path = Self::user_config_path();
        match Self::load_layered(path.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load user configuration: {e}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks everything a run would reject, before any work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |e: crate::error::SimulationError| ConfigError::Invalid(e.to_string());

        Grid::new(self.grid.length, self.grid.points).map_err(invalid)?;
        TimeParams::new(self.time.total_time, self.time.dt).map_err(invalid)?;
        IntegratorRegistry::default()
            .create(&self.integrator.integrator_type)
            .map_err(ConfigError::Invalid)?;
        self.initial.validate().map_err(ConfigError::Invalid)?;

        if self.output.snapshot_every == 0 {
            return Err(ConfigError::Invalid(
                "output.snapshot_every must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
