//! Verdant CLI - database readiness check for the sustainability dashboard.
//!
//! Running `verdant` with no arguments reads `DATABASE_URL`, tries to open a
//! connection a bounded number of times, and exits 0 if the database is
//! reachable or 1 otherwise.

pub mod cli;
pub mod commands;
pub mod config;
pub mod connector;
pub mod error;
pub mod output;
