//! Run configuration, read from a TOML document
//!
//! ```toml
//! [HyperParameters]
//! alpha = 0.1
//! gamma = 0.9
//! epsilon = 0.1        # omit for pure exploration
//!
//! [RunMode]
//! iterations = 300000
//! initial_x = 0        # row of the first episode's start cell
//! initial_y = 0        # column
//! run_mode = "standard"
//! seed = 7             # optional
//!
//! [FileNames]
//! map_name = "choices.map"
//! trace_name = "trace.csv"  # optional
//! ```

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::warn;
use serde::Deserialize;

use crate::{
    algo::tabular::QTableAgentConfig, ensure_interval, env::RewardTable, Error, Result,
};

/// How a training run behaves
///
/// `PositiveRewards` only swaps the reward preset, `Stochastic` only adds actuator drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    #[default]
    Standard,
    Stochastic,
    PositiveRewards,
}

impl RunMode {
    /// Parse a mode name, falling back to [`RunMode::Standard`] for anything unrecognized
    pub fn from_name(name: &str) -> Self {
        match name {
            "standard" => RunMode::Standard,
            "stochastic" => RunMode::Stochastic,
            "positive_rewards" => RunMode::PositiveRewards,
            other => {
                warn!("unrecognized run_mode `{other}`, using `standard`");
                RunMode::Standard
            }
        }
    }

    pub fn is_stochastic(self) -> bool {
        self == RunMode::Stochastic
    }

    pub fn rewards(self) -> RewardTable {
        match self {
            RunMode::Standard | RunMode::Stochastic => RewardTable::standard(),
            RunMode::PositiveRewards => RewardTable::positive(),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunMode::Standard => "standard",
            RunMode::Stochastic => "stochastic",
            RunMode::PositiveRewards => "positive_rewards",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HyperParameters {
    pub alpha: f32,
    pub gamma: f32,
    pub epsilon: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunSettings {
    pub iterations: i64,
    pub initial_x: usize,
    pub initial_y: usize,
    #[serde(default)]
    pub run_mode: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileNames {
    pub map_name: String,
    #[serde(default)]
    pub trace_name: Option<String>,
}

/// The whole configuration document
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(rename = "HyperParameters")]
    pub hyper_parameters: HyperParameters,
    #[serde(rename = "RunMode")]
    pub run: RunSettings,
    #[serde(rename = "FileNames")]
    pub files: FileNames,
}

impl Config {
    /// Read, parse and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    fn validate(&self) -> Result<()> {
        let HyperParameters {
            alpha,
            gamma,
            epsilon,
        } = self.hyper_parameters;
        ensure_interval!(alpha, 0.0, 1.0);
        ensure_interval!(gamma, 0.0, 1.0);
        if let Some(epsilon) = epsilon {
            ensure_interval!(epsilon, 0.0, 1.0);
        }
        if self.run.iterations <= 0 {
            return Err(Error::config(format!(
                "`iterations` must be positive, got {}",
                self.run.iterations
            )));
        }
        if self.files.map_name.trim().is_empty() {
            return Err(Error::config("`map_name` must not be empty"));
        }
        Ok(())
    }

    pub fn mode(&self) -> RunMode {
        self.run
            .run_mode
            .as_deref()
            .map_or(RunMode::Standard, RunMode::from_name)
    }

    pub fn seed(&self) -> Option<u64> {
        self.run.seed
    }

    /// Map file path, resolved inside `maps_dir`
    pub fn map_path(&self, maps_dir: impl AsRef<Path>) -> PathBuf {
        maps_dir.as_ref().join(&self.files.map_name)
    }

    pub fn trace_path(&self) -> Option<PathBuf> {
        self.files.trace_name.as_ref().map(PathBuf::from)
    }

    /// Settings for a [`QTableAgent`](crate::algo::tabular::QTableAgent)
    pub fn agent_config(&self) -> QTableAgentConfig {
        QTableAgentConfig {
            alpha: self.hyper_parameters.alpha,
            gamma: self.hyper_parameters.gamma,
            epsilon: self.hyper_parameters.epsilon,
            // validated positive
            iterations: self.run.iterations as u64,
            start: (self.run.initial_x, self.run.initial_y),
            mode: self.mode(),
            trace: self.files.trace_name.is_some(),
        }
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
