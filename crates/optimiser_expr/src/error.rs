//! Expression errors.
//!
//! Parse errors carry the byte offset of the offending input. Evaluation
//! errors carry the point at which evaluation was requested.

use optimiser_core::types::OracleError;
use thiserror::Error;

/// Cause of a failed evaluation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationErrorKind {
    /// Denominator evaluated to exactly zero.
    #[error("division by zero")]
    DivisionByZero,

    /// `log`/`ln` of a value `<= 0`.
    #[error("log of non-positive value")]
    LogOfNonPositive,

    /// `sqrt` of a negative value.
    #[error("sqrt of negative value")]
    SqrtOfNegative,

    /// Non-integer power of a negative base.
    #[error("non-integer power of negative base")]
    FractionalPowerOfNegative,

    /// Variable exponent with a base `<= 0`.
    #[error("variable exponent requires a positive base")]
    NonPositiveBase,

    /// `abs` at its kink while derivatives are being carried.
    #[error("not differentiable at this point")]
    NonDifferentiable,

    /// Result (or one of its derivatives) is NaN or infinite.
    #[error("non-finite result")]
    NonFinite,
}

/// Errors from parsing or evaluating an expression.
///
/// # Examples
/// ```
/// use optimiser_expr::{Expression, ExpressionError};
///
/// let err = Expression::parse("x ** ").unwrap_err();
/// assert!(matches!(err, ExpressionError::UnexpectedEnd { .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// Input contains no tokens.
    #[error("Expression is empty")]
    Empty,

    /// Character that cannot start any token.
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter {
        /// The character
        ch: char,
        /// Byte offset
        position: usize,
    },

    /// Numeric literal that does not parse as `f64`.
    #[error("Invalid number '{text}' at position {position}")]
    InvalidNumber {
        /// Literal text
        text: String,
        /// Byte offset
        position: usize,
    },

    /// Token that does not fit the grammar at this point.
    #[error("Unexpected '{found}' at position {position}, expected {expected}")]
    UnexpectedToken {
        /// Token text
        found: String,
        /// What the parser was looking for
        expected: &'static str,
        /// Byte offset
        position: usize,
    },

    /// Input ended early.
    #[error("Unexpected end of expression, expected {expected}")]
    UnexpectedEnd {
        /// What the parser was looking for
        expected: &'static str,
    },

    /// Identifier that is neither the variable nor a known constant.
    #[error("Unknown identifier '{name}' at position {position}")]
    UnknownIdentifier {
        /// Identifier text
        name: String,
        /// Byte offset
        position: usize,
    },

    /// Call to a function outside the supported set.
    #[error("Unknown function '{name}' at position {position}")]
    UnknownFunction {
        /// Function name
        name: String,
        /// Byte offset
        position: usize,
    },

    /// Variable name that is not an identifier or collides with a function.
    #[error("Invalid variable name '{0}'")]
    InvalidVariable(String),

    /// Evaluation failed at a point.
    #[error("Evaluation failed at x = {x}: {kind}")]
    Evaluation {
        /// The evaluation point
        x: f64,
        /// Cause
        kind: EvaluationErrorKind,
    },
}

impl From<ExpressionError> for OracleError {
    fn from(err: ExpressionError) -> Self {
        match err {
            ExpressionError::Evaluation { x, kind } => OracleError::Evaluation {
                x,
                reason: kind.to_string(),
            },
            other => OracleError::Differentiation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ExpressionError::UnexpectedCharacter {
            ch: '$',
            position: 3,
        };
        assert_eq!(format!("{}", err), "Unexpected character '$' at position 3");

        let err = ExpressionError::Evaluation {
            x: -1.0,
            kind: EvaluationErrorKind::LogOfNonPositive,
        };
        assert_eq!(
            format!("{}", err),
            "Evaluation failed at x = -1: log of non-positive value"
        );
    }

    #[test]
    fn test_into_oracle_error() {
        let err: OracleError = ExpressionError::Evaluation {
            x: 0.0,
            kind: EvaluationErrorKind::DivisionByZero,
        }
        .into();
        assert_eq!(
            err,
            OracleError::Evaluation {
                x: 0.0,
                reason: "division by zero".to_string()
            }
        );

        let err: OracleError = ExpressionError::Empty.into();
        assert!(matches!(err, OracleError::Differentiation(_)));
    }
}
