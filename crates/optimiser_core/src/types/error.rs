//! Error types for structured error handling.
//!
//! This module provides:
//! - `OracleError`: Failures of a derivative oracle (fatal for a run)
//! - `SolverError`: Errors returned by the stationary-point solvers
//!
//! Algorithmic singularities (a vanishing second derivative, a flat secant)
//! and exhausted iteration budgets are *not* errors: they are terminal
//! outcomes reported through [`OptimizationResult`](super::OptimizationResult).

use thiserror::Error;

/// Derivative oracle errors.
///
/// Raised when the oracle cannot produce a derivative value, either because
/// the expression cannot be differentiated or because evaluation at the
/// requested point hits a singularity or domain violation.
///
/// # Examples
/// ```
/// use optimiser_core::types::OracleError;
///
/// let err = OracleError::Evaluation { x: -1.0, reason: "log of non-positive value".to_string() };
/// assert_eq!(format!("{}", err), "Evaluation failed at x = -1: log of non-positive value");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// The expression cannot be differentiated.
    #[error("Cannot differentiate expression: {0}")]
    Differentiation(String),

    /// Evaluation at a point failed (singularity, domain violation, non-finite value).
    #[error("Evaluation failed at x = {x}: {reason}")]
    Evaluation {
        /// The point at which evaluation was requested
        x: f64,
        /// Human-readable cause
        reason: String,
    },
}

/// Stationary-point solver errors.
///
/// # Variants
/// - `InvalidConfig`: Tolerance or iteration limit out of range
/// - `NonFiniteStart`: A start point is NaN or infinite
/// - `Oracle`: The derivative oracle failed; the run is abandoned
///
/// # Examples
/// ```
/// use optimiser_core::types::SolverError;
///
/// let err = SolverError::NonFiniteStart { x: f64::INFINITY };
/// assert!(format!("{}", err).contains("must be finite"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver configuration out of range.
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),

    /// Start point is not a finite number.
    #[error("Start point must be finite, got {x}")]
    NonFiniteStart {
        /// The offending start point
        x: f64,
    },

    /// Derivative oracle failure.
    #[error("Derivative oracle failed: {0}")]
    Oracle(#[from] OracleError),
}
