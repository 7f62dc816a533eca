//! Error types for MySQL probing.

use thiserror::Error;
use verdant_probe::ConnectError;

/// Result type for MySQL operations.
pub type MysqlResult<T> = Result<T, MysqlError>;

/// Errors that can occur while opening a probe connection.
#[derive(Error, Debug)]
pub enum MysqlError {
    /// MySQL driver error.
    #[error("mysql error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MysqlError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<MysqlError> for ConnectError {
    fn from(err: MysqlError) -> Self {
        match err {
            // Server errors already read well ("Access denied for user ...")
            MysqlError::MySql(e) => ConnectError::driver(e.to_string()),
            MysqlError::Config(message) => ConnectError::config(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err: ConnectError = MysqlError::config("bad driver").into();
        assert!(err.is_permanent());
        assert_eq!(err.to_string(), "invalid connection settings: bad driver");
    }
}
