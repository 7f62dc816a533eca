//! Translation of a parsed connection string into a `tokio_postgres::Config`.

use std::time::Duration;

use tokio_postgres::config::SslMode;
use verdant_probe::{ConnectionConfig, Driver};

use crate::error::{PgError, PgResult};

/// Application name reported in `pg_stat_activity` unless the URL sets one.
pub const DEFAULT_APPLICATION_NAME: &str = "verdant-probe";

/// Check that `config` is a PostgreSQL connection string this crate can use,
/// returning the requested `sslmode`.
pub fn validate_config(config: &ConnectionConfig) -> PgResult<Option<SslMode>> {
    if config.driver != Driver::Postgres {
        return Err(PgError::config(format!(
            "expected a postgres connection string, got '{}'",
            config.driver
        )));
    }

    config.param("sslmode").map(parse_ssl_mode).transpose()
}

/// Build a driver config for `config`, bounding the connect by `timeout`.
pub fn to_pg_config(
    config: &ConnectionConfig,
    timeout: Duration,
) -> PgResult<tokio_postgres::Config> {
    let ssl_mode = validate_config(config)?;

    let mut pg = tokio_postgres::Config::new();
    pg.host(&config.host);
    pg.port(config.port);
    pg.dbname(&config.database);
    pg.user(&config.user);

    if let Some(ref password) = config.password {
        pg.password(password);
    }

    pg.application_name(
        config
            .param("application_name")
            .unwrap_or(DEFAULT_APPLICATION_NAME),
    );
    pg.connect_timeout(timeout);

    if let Some(mode) = ssl_mode {
        pg.ssl_mode(mode);
    }

    Ok(pg)
}

fn parse_ssl_mode(mode: &str) -> PgResult<SslMode> {
    match mode {
        "disable" => Ok(SslMode::Disable),
        "prefer" => Ok(SslMode::Prefer),
        "require" => Ok(SslMode::Require),
        other => Err(PgError::config(format!("invalid sslmode: {}", other))),
    }
}
