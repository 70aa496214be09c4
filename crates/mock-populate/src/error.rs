//! Error types for population runs.

use mock_generator::GeneratorError;
use thiserror::Error;

/// Errors that can occur while populating the target tables.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// The record store rejected an operation.
    #[error("Store error: {0}")]
    Store(Box<dyn std::error::Error + Send + Sync>),

    /// Record generation failed, e.g. the key domain is exhausted.
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PopulateError {
    pub(crate) fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PopulateError::Store(Box::new(err))
    }
}
