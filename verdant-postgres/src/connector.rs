//! PostgreSQL connector.

use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};
use tracing::debug;
use verdant_probe::{ConnectResult, Connection, ConnectionConfig, Connector};

use crate::config::{to_pg_config, validate_config};
use crate::error::PgError;

/// Opens plain (non-TLS) PostgreSQL connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgConnector;

impl PgConnector {
    /// Create a new connector.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for PgConnector {
    async fn connect(
        &self,
        config: &ConnectionConfig,
        timeout: Duration,
    ) -> ConnectResult<Box<dyn Connection>> {
        let pg_config = to_pg_config(config, timeout)?;
        let (client, connection) = pg_config.connect(NoTls).await.map_err(PgError::from)?;

        // The connection object performs the actual I/O and must be polled
        let driver = tokio::spawn(connection);
        debug!(host = %config.host, port = config.port, "PostgreSQL connection opened");

        Ok(Box::new(PgConnection {
            client: Some(client),
            driver: Some(driver),
        }))
    }

    fn validate(&self, config: &ConnectionConfig) -> ConnectResult<()> {
        validate_config(config)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

/// An open PostgreSQL session.
pub struct PgConnection {
    client: Option<Client>,
    driver: Option<JoinHandle<Result<(), tokio_postgres::Error>>>,
}

#[async_trait]
impl Connection for PgConnection {
    async fn close(&mut self) -> ConnectResult<()> {
        // Dropping the client sends Terminate; the driver task then finishes
        drop(self.client.take());

        let Some(driver) = self.driver.take() else {
            return Ok(());
        };

        match driver.await {
            Ok(result) => {
                result.map_err(PgError::from)?;
                debug!("PostgreSQL connection closed");
                Ok(())
            }
            Err(e) => Err(PgError::Task(e.to_string()).into()),
        }
    }
}

impl Drop for PgConnection {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}
