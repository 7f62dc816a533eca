//! CLI configuration handling.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use verdant_probe::{Backoff, RetryPolicy, DEFAULT_ENV_VAR};

use crate::cli::{BackoffKind, CheckArgs};
use crate::error::{CliError, CliResult};

/// Default config file name (looked up in the working directory)
pub const CONFIG_FILE_NAME: &str = "verdant.toml";

/// Verdant CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the connection string comes from
    pub database: DatabaseConfig,

    /// Retry behaviour
    pub probe: ProbeConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load an explicit config file, or `verdant.toml` in `cwd` if present.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> CliResult<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = cwd.join(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Environment variable holding the connection URL
    pub env_var: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            env_var: DEFAULT_ENV_VAR.to_string(),
        }
    }
}

/// Probe configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Maximum number of connection attempts
    pub max_attempts: u32,

    /// Seconds between attempts
    pub retry_delay_secs: u64,

    /// Seconds allowed per attempt (falls back to the URL's connect_timeout)
    pub connect_timeout_secs: Option<u64>,

    /// Delay strategy
    pub backoff: BackoffKind,

    /// Growth factor for exponential backoff
    pub backoff_multiplier: f64,

    /// Cap for exponential backoff, in seconds
    pub max_delay_secs: u64,

    /// Add jitter to exponential backoff
    pub jitter: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.attempts(),
            retry_delay_secs: policy.base_delay().as_secs(),
            connect_timeout_secs: None,
            backoff: BackoffKind::Fixed,
            backoff_multiplier: 2.0,
            max_delay_secs: 30,
            jitter: true,
        }
    }
}

impl ProbeConfig {
    /// Build the retry policy described by this section.
    pub fn retry_policy(&self) -> RetryPolicy {
        let backoff = match self.backoff {
            BackoffKind::Fixed => Backoff::Fixed,
            BackoffKind::Exponential => Backoff::Exponential {
                multiplier: self.backoff_multiplier,
                max_delay: Duration::from_secs(self.max_delay_secs),
                jitter: self.jitter,
            },
        };

        let policy = RetryPolicy::new()
            .max_attempts(self.max_attempts)
            .retry_delay(Duration::from_secs(self.retry_delay_secs))
            .backoff(backoff);

        match self.connect_timeout_secs {
            Some(secs) => policy.connect_timeout(Duration::from_secs(secs)),
            None => policy,
        }
    }
}

impl CheckArgs {
    /// Overlay command-line flags on top of the file configuration.
    pub fn merge_into(&self, mut config: Config) -> Config {
        if let Some(ref var) = self.env_var {
            config.database.env_var = var.clone();
        }
        let probe = &mut config.probe;
        if let Some(n) = self.max_attempts {
            probe.max_attempts = n;
        }
        if let Some(secs) = self.retry_delay {
            probe.retry_delay_secs = secs;
        }
        if let Some(secs) = self.connect_timeout {
            probe.connect_timeout_secs = Some(secs);
        }
        if let Some(kind) = self.backoff {
            probe.backoff = kind;
        }
        config
    }
}
