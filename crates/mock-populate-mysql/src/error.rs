//! Error types for the MySQL record store.

use thiserror::Error;

/// Errors that can occur while talking to MySQL.
#[derive(Error, Debug)]
pub enum MySQLPopulatorError {
    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// The connection was already handed back.
    #[error("MySQL connection has been released")]
    Released,
}
