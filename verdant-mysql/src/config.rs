//! MySQL connection options.

use mysql_async::{Opts, OptsBuilder};
use verdant_probe::{ConnectionConfig, Driver};

use crate::error::{MysqlError, MysqlResult};

/// Convert a parsed connection string to `mysql_async` options.
///
/// `mysql_async` has no connect timeout of its own; the prober's per-attempt
/// timeout bounds the handshake instead.
pub fn to_opts(config: &ConnectionConfig) -> MysqlResult<Opts> {
    if config.driver != Driver::MySql {
        return Err(MysqlError::config(format!(
            "expected a mysql connection string, got '{}'",
            config.driver
        )));
    }

    let builder = OptsBuilder::default()
        .ip_or_hostname(&config.host)
        .tcp_port(config.port)
        .db_name(Some(&config.database))
        .user(Some(&config.user))
        .pass(config.password.as_ref())
        // Probe the TCP endpoint that was configured, not a local socket
        .prefer_socket(false);

    Ok(Opts::from(builder))
}
