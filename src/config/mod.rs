//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{defaults, timeouts};
use crate::core::error::{LinkProbeError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Records fetched from the backlog per batch
    pub batch_size: Option<u64>,

    /// Maximum concurrent probes within a batch
    pub max_parallelism: Option<usize>,

    /// Timeout in seconds for a single probe attempt
    pub timeout_seconds: Option<u64>,

    /// Retry attempts after the initial probe for transient failures
    pub max_retries: Option<u32>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_size: Some(defaults::BATCH_SIZE),
            max_parallelism: Some(defaults::MAX_PARALLELISM),
            timeout_seconds: Some(defaults::TIMEOUT_SECONDS),
            max_retries: Some(defaults::MAX_RETRIES),
            user_agent: None,
            verbose: Some(false),
        }
    }
}

/// Configuration values collected from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub batch_size: Option<u64>,
    pub max_parallelism: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub max_retries: Option<u32>,
    pub user_agent: Option<String>,
    pub verbose: bool,
    pub quiet: bool,
}

impl Config {
    /// Load configuration from file, falling back to defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LinkProbeError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            LinkProbeError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        // Check for .linkprobe.toml in current directory
        if let Ok(config) = Self::load_from_file(".linkprobe.toml") {
            return config;
        }

        // Check for .linkprobe.toml in parent directories (up to 3 levels)
        for i in 1..=3 {
            let path = format!("{}.linkprobe.toml", "../".repeat(i));
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(batch_size) = cli_config.batch_size {
            self.batch_size = Some(batch_size);
        }
        if let Some(max_parallelism) = cli_config.max_parallelism {
            self.max_parallelism = Some(max_parallelism);
        }
        if let Some(timeout_seconds) = cli_config.timeout_seconds {
            self.timeout_seconds = Some(timeout_seconds);
        }
        if let Some(max_retries) = cli_config.max_retries {
            self.max_retries = Some(max_retries);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(batch_size) = self.batch_size
            && batch_size == 0
        {
            return Err(LinkProbeError::Config(
                "batch_size must be greater than 0".to_string(),
            ));
        }

        if let Some(max_parallelism) = self.max_parallelism
            && max_parallelism == 0
        {
            return Err(LinkProbeError::Config(
                "max_parallelism must be greater than 0".to_string(),
            ));
        }

        if let Some(timeout) = self.timeout_seconds {
            if timeout < timeouts::MIN_TIMEOUT_SECONDS {
                return Err(LinkProbeError::Config(format!(
                    "timeout_seconds must be at least {}",
                    timeouts::MIN_TIMEOUT_SECONDS
                )));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(LinkProbeError::Config(format!(
                    "timeout_seconds must not exceed {}",
                    timeouts::MAX_TIMEOUT_SECONDS
                )));
            }
        }

        Ok(())
    }

    /// Effective batch size
    pub fn batch_size(&self) -> u64 {
        self.batch_size.unwrap_or(defaults::BATCH_SIZE)
    }

    /// Effective probe concurrency bound
    pub fn max_parallelism(&self) -> usize {
        self.max_parallelism.unwrap_or(defaults::MAX_PARALLELISM)
    }

    /// Effective per-attempt timeout
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(defaults::TIMEOUT_SECONDS))
    }

    /// Effective retry budget (attempts after the initial probe)
    pub fn max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(defaults::MAX_RETRIES)
    }
}
