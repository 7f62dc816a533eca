//! Connector that picks the client library from the connection string's driver.

use std::time::Duration;

use async_trait::async_trait;
use verdant_probe::{ConnectError, ConnectResult, Connection, ConnectionConfig, Connector, Driver};

/// Dispatches each attempt to the connector for `config.driver`.
///
/// Drivers whose feature is disabled fail every attempt with
/// [`ConnectError::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DriverConnector;

impl DriverConnector {
    /// Create a new dispatching connector.
    pub fn new() -> Self {
        Self
    }

    /// Check if this build can connect to `driver`.
    pub fn supports(driver: Driver) -> bool {
        match driver {
            Driver::Postgres => cfg!(feature = "postgres"),
            Driver::MySql => cfg!(feature = "mysql"),
        }
    }
}

#[async_trait]
impl Connector for DriverConnector {
    async fn connect(
        &self,
        config: &ConnectionConfig,
        timeout: Duration,
    ) -> ConnectResult<Box<dyn Connection>> {
        match config.driver {
            #[cfg(feature = "postgres")]
            Driver::Postgres => {
                verdant_postgres::PgConnector::new()
                    .connect(config, timeout)
                    .await
            }
            #[cfg(feature = "mysql")]
            Driver::MySql => {
                verdant_mysql::MySqlConnector::new()
                    .connect(config, timeout)
                    .await
            }
            #[allow(unreachable_patterns)]
            driver => {
                let _ = timeout;
                Err(ConnectError::Unsupported(driver))
            }
        }
    }

    fn validate(&self, config: &ConnectionConfig) -> ConnectResult<()> {
        match config.driver {
            #[cfg(feature = "postgres")]
            Driver::Postgres => verdant_postgres::PgConnector::new().validate(config),
            #[cfg(feature = "mysql")]
            Driver::MySql => verdant_mysql::MySqlConnector::new().validate(config),
            #[allow(unreachable_patterns)]
            driver => Err(ConnectError::Unsupported(driver)),
        }
    }

    fn name(&self) -> &'static str {
        "driver"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_enabled_drivers() {
        assert_eq!(
            DriverConnector::supports(Driver::Postgres),
            cfg!(feature = "postgres")
        );
        assert_eq!(
            DriverConnector::supports(Driver::MySql),
            cfg!(feature = "mysql")
        );
    }

    #[test]
    fn test_validate_checks_before_connecting() {
        let connector = DriverConnector::new();
        for url in ["postgres://localhost/metrics", "mysql://localhost/metrics"] {
            let config = ConnectionConfig::parse(url).unwrap();
            let result = connector.validate(&config);
            if DriverConnector::supports(config.driver) {
                assert!(result.is_ok(), "{}", url);
            } else {
                assert!(matches!(result, Err(ConnectError::Unsupported(_))), "{}", url);
            }
        }
    }

    #[cfg(feature = "postgres")]
    #[test]
    fn test_validate_rejects_bad_sslmode() {
        let config = ConnectionConfig::parse("postgres://localhost/metrics?sslmode=verify-full")
            .unwrap();
        let err = DriverConnector::new().validate(&config).unwrap_err();
        assert!(err.is_permanent());
    }

    #[cfg(feature = "postgres")]
    #[tokio::test]
    async fn test_dispatches_to_postgres() {
        let port = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };
        let config =
            ConnectionConfig::parse(&format!("postgres://alice@127.0.0.1:{}/metrics", port))
                .unwrap();

        let err = DriverConnector::new()
            .connect(&config, Duration::from_secs(2))
            .await
            .err()
            .unwrap();

        assert!(!matches!(err, ConnectError::Unsupported(_)));
    }
}
