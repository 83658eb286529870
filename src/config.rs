//! Runtime configuration.
//!
//! Defaults, optionally overridden by a JSON file named in `FRINGE_CONFIG`,
//! then by individual environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::schedule::SchedulerConfig;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Catalog read when no path is given on the command line
    pub catalog_path: PathBuf,
    /// Where the text report is written
    pub report_path: PathBuf,
    pub max_repairs: usize,
    pub port: u16,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            catalog_path: PathBuf::from("shows.txt"),
            report_path: PathBuf::from("attendance_plan.txt"),
            max_repairs: SchedulerConfig::default().max_repairs,
            port: 8080,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("FRINGE_CONFIG") {
            Ok(path) => Self::from_json_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Applies `FRINGE_*` overrides looked up through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("FRINGE_CATALOG") {
            self.catalog_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("FRINGE_REPORT") {
            self.report_path = PathBuf::from(path);
        }
        if let Some(value) = lookup("FRINGE_MAX_REPAIRS") {
            self.max_repairs = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "FRINGE_MAX_REPAIRS",
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup("FRINGE_PORT") {
            self.port = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "FRINGE_PORT",
                value: value.clone(),
            })?;
        }
        Ok(())
    }

    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            max_repairs: self.max_repairs,
        }
    }
}
