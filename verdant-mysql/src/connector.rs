//! MySQL connector.

use std::time::Duration;

use async_trait::async_trait;
use mysql_async::Conn;
use tracing::debug;
use verdant_probe::{ConnectResult, Connection, ConnectionConfig, Connector};

use crate::config::to_opts;
use crate::error::MysqlError;

/// Opens single MySQL/MariaDB sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnector;

impl MySqlConnector {
    /// Create a new connector.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    async fn connect(
        &self,
        config: &ConnectionConfig,
        _timeout: Duration,
    ) -> ConnectResult<Box<dyn Connection>> {
        let opts = to_opts(config)?;
        let conn = Conn::new(opts).await.map_err(MysqlError::from)?;
        debug!(host = %config.host, port = config.port, "MySQL connection opened");

        Ok(Box::new(MySqlConnection { conn: Some(conn) }))
    }

    fn validate(&self, config: &ConnectionConfig) -> ConnectResult<()> {
        to_opts(config)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mysql"
    }
}

/// An open MySQL session.
pub struct MySqlConnection {
    conn: Option<Conn>,
}

#[async_trait]
impl Connection for MySqlConnection {
    async fn close(&mut self) -> ConnectResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.disconnect().await.map_err(MysqlError::from)?;
            debug!("MySQL connection closed");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_refused_connection_is_an_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };
        let config =
            ConnectionConfig::parse(&format!("mysql://root@127.0.0.1:{}/metrics", port)).unwrap();

        let result = MySqlConnector::new()
            .connect(&config, Duration::from_secs(2))
            .await;

        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_other_drivers() {
        let connector = MySqlConnector::new();
        let pg = ConnectionConfig::parse("postgres://localhost/metrics").unwrap();
        let my = ConnectionConfig::parse("mysql://root@localhost/metrics").unwrap();

        assert!(connector.validate(&pg).unwrap_err().is_permanent());
        assert!(connector.validate(&my).is_ok());
    }

    #[test]
    fn test_name() {
        assert_eq!(MySqlConnector::new().name(), "mysql");
    }
}
