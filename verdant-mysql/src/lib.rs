//! # verdant-mysql
//!
//! MySQL/MariaDB connector for the Verdant connectivity prober, built on
//! `mysql_async`.

pub mod config;
pub mod connector;
pub mod error;

pub use config::to_opts;
pub use connector::{MySqlConnection, MySqlConnector};
pub use error::{MysqlError, MysqlResult};
