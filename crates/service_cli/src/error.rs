//! CLI error types

use optimiser_core::types::SolverError;
use optimiser_expr::ExpressionError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `statopt` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid function: {0}")]
    Expression(#[from] ExpressionError),

    #[error("Solver failed: {0}")]
    Solver(#[from] SolverError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
