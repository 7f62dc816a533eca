//! CLI command implementations.

pub mod check;
pub mod parse;
pub mod version;

use std::path::Path;

use verdant_probe::{load_config, ConfigError, ConnectionConfig, StdEnvSource};

use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Name reported in errors when the URL came from `--url`.
const URL_FLAG: &str = "--url";

/// Read `verdant.toml` from `explicit`, or from the working directory.
pub(crate) fn load_file_config(explicit: Option<&Path>) -> CliResult<Config> {
    let cwd = std::env::current_dir()?;
    Config::discover(explicit, &cwd)
}

/// Resolve the connection string: `--url` wins over the environment.
pub(crate) fn resolve_connection(url: Option<&str>, env_var: &str) -> CliResult<ConnectionConfig> {
    match url {
        Some(url) if !url.trim().is_empty() => {
            ConnectionConfig::parse(url).map_err(|source| CliError::InvalidUrl {
                var: URL_FLAG.to_string(),
                source,
            })
        }
        Some(_) => Err(ConfigError::Missing {
            var: URL_FLAG.to_string(),
        }
        .into()),
        None => Ok(load_config(&StdEnvSource, env_var)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_url_wins() {
        let config = resolve_connection(
            Some("postgres://alice@db.internal/metrics"),
            "VERDANT_TEST_UNSET_VARIABLE",
        )
        .unwrap();
        assert_eq!(config.host, "db.internal");
    }

    #[test]
    fn test_flag_errors_name_the_flag() {
        match resolve_connection(Some("  "), "DATABASE_URL") {
            Err(CliError::MissingUrl { var }) => assert_eq!(var, "--url"),
            other => panic!("expected MissingUrl, got {:?}", other),
        }
        match resolve_connection(Some("db.internal/metrics"), "DATABASE_URL") {
            Err(CliError::InvalidUrl { var, .. }) => assert_eq!(var, "--url"),
            other => panic!("expected InvalidUrl, got {:?}", other),
        }
    }

    #[test]
    fn test_unset_variable_is_missing() {
        assert!(matches!(
            resolve_connection(None, "VERDANT_TEST_UNSET_VARIABLE"),
            Err(CliError::MissingUrl { .. })
        ));
    }
}
