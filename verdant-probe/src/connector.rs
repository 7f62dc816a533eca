//! The seam between the prober and a concrete client library.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::connection::{ConnectionConfig, Driver};

/// Errors raised while opening or closing a probe connection.
///
/// `Config` and `Unsupported` are permanent: retrying cannot fix them. All
/// other variants are transient.
#[derive(Error, Debug)]
pub enum ConnectError {
    /// Socket-level failure (refused, unreachable, reset).
    #[error("network error: {0}")]
    Io(#[from] std::io::Error),

    /// The attempt did not complete within the per-attempt timeout.
    #[error("timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// The client library rejected the connection (auth, protocol, server state).
    #[error("{0}")]
    Driver(String),

    /// The connection settings are valid URL syntax but unusable by the driver.
    #[error("invalid connection settings: {0}")]
    Config(String),

    /// No connector is available for this driver.
    #[error("no connector available for {0} connections")]
    Unsupported(Driver),
}

impl ConnectError {
    /// Create a driver error.
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Check if retrying cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Unsupported(_))
    }
}

/// Result type for connector operations.
pub type ConnectResult<T> = Result<T, ConnectError>;

/// An open connection that the prober releases as soon as it is established.
#[async_trait]
pub trait Connection: Send {
    /// Close the connection cleanly. Calling it twice is a no-op.
    async fn close(&mut self) -> ConnectResult<()>;
}

/// Opens connections for a given [`ConnectionConfig`].
#[async_trait]
pub trait Connector: Send + Sync {
    /// Open a connection. `timeout` is the per-attempt budget; the prober
    /// enforces it too, so implementations may pass it on to the driver or
    /// ignore it.
    async fn connect(
        &self,
        config: &ConnectionConfig,
        timeout: Duration,
    ) -> ConnectResult<Box<dyn Connection>>;

    /// Check once, before any attempt, that `config` is usable by this
    /// connector. Errors returned here end the probe without connecting.
    fn validate(&self, _config: &ConnectionConfig) -> ConnectResult<()> {
        Ok(())
    }

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ConnectError::driver("password authentication failed");
        assert_eq!(err.to_string(), "password authentication failed");

        let err = ConnectError::Timeout(Duration::from_millis(1500));
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "timed out after 1500ms");

        let err = ConnectError::Unsupported(Driver::MySql);
        assert_eq!(err.to_string(), "no connector available for mysql connections");
    }

    #[test]
    fn test_permanent_errors() {
        assert!(ConnectError::config("invalid sslmode: verify-full").is_permanent());
        assert!(ConnectError::Unsupported(Driver::Postgres).is_permanent());
        assert!(!ConnectError::driver("connection refused").is_permanent());
        assert!(!ConnectError::Timeout(Duration::from_secs(1)).is_permanent());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: ConnectError = io.into();
        assert!(matches!(err, ConnectError::Io(_)));
        assert!(!err.is_timeout());
    }
}
