//! Error types for PostgreSQL probing.

use thiserror::Error;
use verdant_probe::ConnectError;

/// Result type for PostgreSQL operations.
pub type PgResult<T> = Result<T, PgError>;

/// Errors that can occur while opening a probe connection.
#[derive(Error, Debug)]
pub enum PgError {
    /// PostgreSQL error.
    #[error("postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The background connection task panicked or was cancelled.
    #[error("connection task failed: {0}")]
    Task(String),
}

impl PgError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// SQLSTATE code reported by the server, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Postgres(e) => e.code().map(|c| c.code()),
            _ => None,
        }
    }
}

impl From<PgError> for ConnectError {
    fn from(err: PgError) -> Self {
        match err {
            PgError::Postgres(e) => {
                // Server-side rejections carry a SQLSTATE (28P01 bad password,
                // 3D000 unknown database, 57P03 starting up)
                match e.as_db_error() {
                    Some(db) => ConnectError::driver(format!(
                        "{} (SQLSTATE {})",
                        db.message(),
                        db.code().code()
                    )),
                    None => ConnectError::driver(e.to_string()),
                }
            }
            PgError::Config(message) => ConnectError::config(message),
            other => ConnectError::driver(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PgError::config("sslmode 'verify-full' is not supported");
        assert!(matches!(err, PgError::Config(_)));
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_config_error_is_permanent() {
        let err: ConnectError = PgError::config("invalid sslmode: allow").into();
        assert!(err.is_permanent());
        assert_eq!(err.to_string(), "invalid connection settings: invalid sslmode: allow");
    }

    #[test]
    fn test_into_connect_error() {
        let err: ConnectError = PgError::Task("cancelled".to_string()).into();
        assert_eq!(err.to_string(), "connection task failed: cancelled");
        assert!(!err.is_timeout());
    }
}
