//! Parsed expressions and their dual-number oracle.

use std::fmt;
use std::str::FromStr;

use num_dual::{Dual2_64, Dual64};
use optimiser_core::traits::{DerivativeOracle, SecondDerivativeOracle};
use optimiser_core::types::OracleError;

use crate::ast::{Function, Node, Rendered};
use crate::derivative::differentiate;
use crate::error::{EvaluationErrorKind, ExpressionError};
use crate::eval::{evaluate, Domain};
use crate::parser::parse;

/// Default variable symbol.
pub const DEFAULT_VARIABLE: &str = "x";

/// An immutable function of one real variable.
///
/// The variable symbol belongs to the expression; two expressions over
/// different symbols never interfere.
///
/// As a [`DerivativeOracle`], derivatives come from forward-mode dual
/// numbers: `Dual64` for f' and `Dual2_64` for f' and f'' in one pass.
/// The oracle only needs f' and f'' to exist, so it works where f itself is
/// not real, e.g. `x**2/2 - log(x)` for negative x.
///
/// # Examples
/// ```
/// use optimiser_expr::Expression;
/// use optimiser_core::traits::SecondDerivativeOracle;
///
/// let f = Expression::parse("x**2 + 54/x").unwrap();
/// assert_eq!(f.evaluate(3.0).unwrap(), 27.0);
///
/// let (f1, f2) = f.derivatives(3.0).unwrap();
/// assert!(f1.abs() < 1e-12);
/// assert!((f2 - 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    root: Node,
    variable: String,
}

impl Expression {
    /// Parse `source` with the variable `x`.
    pub fn parse(source: &str) -> Result<Self, ExpressionError> {
        Self::parse_with_variable(source, DEFAULT_VARIABLE)
    }

    /// Parse `source` with a caller-chosen variable symbol.
    ///
    /// # Errors
    ///
    /// [`ExpressionError::InvalidVariable`] when `variable` is not an
    /// identifier or names a built-in function; any parse error otherwise.
    pub fn parse_with_variable(source: &str, variable: &str) -> Result<Self, ExpressionError> {
        if !is_identifier(variable) || Function::from_name(variable).is_some() {
            return Err(ExpressionError::InvalidVariable(variable.to_string()));
        }
        let root = parse(source, variable)?;
        Ok(Self {
            root,
            variable: variable.to_string(),
        })
    }

    /// The variable symbol.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The expression tree.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Value at `x`.
    ///
    /// # Errors
    ///
    /// [`ExpressionError::Evaluation`] on division by zero, a domain
    /// violation, or a non-finite result.
    pub fn evaluate(&self, x: f64) -> Result<f64, ExpressionError> {
        let value = evaluate(&self.root, x, Domain::Value).map_err(|kind| at(x, kind))?;
        finite(x, &[value])?;
        Ok(value)
    }

    /// `(f, f', f'')` at `x` in a single second-order dual pass.
    pub fn evaluate_with_derivatives(&self, x: f64) -> Result<(f64, f64, f64), ExpressionError> {
        let result = evaluate(&self.root, Dual2_64::new(x, 1.0, 0.0), Domain::Value)
            .map_err(|kind| at(x, kind))?;
        finite(x, &[result.re, result.v1, result.v2])?;
        Ok((result.re, result.v1, result.v2))
    }

    /// Symbolic derivative of the given order; order 0 is the expression itself.
    ///
    /// ```
    /// use optimiser_expr::Expression;
    ///
    /// let f = Expression::parse("x**3").unwrap();
    /// assert_eq!(f.derivative(1).to_string(), "3*x**2");
    /// assert_eq!(f.derivative(3).to_string(), "6");
    /// ```
    pub fn derivative(&self, order: u32) -> Expression {
        let mut root = self.root.clone();
        for _ in 0..order {
            root = differentiate(&root);
        }
        Expression {
            root,
            variable: self.variable.clone(),
        }
    }
}

impl FromStr for Expression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rendered {
            node: &self.root,
            variable: &self.variable,
        }
        .fmt(f)
    }
}

impl DerivativeOracle<f64> for Expression {
    fn first_derivative(&self, x: f64) -> Result<f64, OracleError> {
        let result = evaluate(&self.root, Dual64::new(x, 1.0), Domain::Derivatives)
            .map_err(|kind| at(x, kind))?;
        finite(x, &[result.eps])?;
        Ok(result.eps)
    }
}

impl SecondDerivativeOracle<f64> for Expression {
    fn second_derivative(&self, x: f64) -> Result<f64, OracleError> {
        Ok(self.derivatives(x)?.1)
    }

    fn derivatives(&self, x: f64) -> Result<(f64, f64), OracleError> {
        let result = evaluate(&self.root, Dual2_64::new(x, 1.0, 0.0), Domain::Derivatives)
            .map_err(|kind| at(x, kind))?;
        finite(x, &[result.v1, result.v2])?;
        Ok((result.v1, result.v2))
    }
}

fn at(x: f64, kind: EvaluationErrorKind) -> ExpressionError {
    ExpressionError::Evaluation { x, kind }
}

fn finite(x: f64, values: &[f64]) -> Result<(), ExpressionError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(at(x, EvaluationErrorKind::NonFinite))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_and_display() {
        let f: Expression = "x**2 + 54/x".parse().unwrap();
        assert_eq!(f.variable(), "x");
        assert_eq!(f.to_string(), "x**2 + 54/x");
    }

    #[test]
    fn test_custom_variable_display() {
        let f = Expression::parse_with_variable("t^2 - 3*t", "t").unwrap();
        assert_eq!(f.to_string(), "t**2 - 3*t");
        assert_eq!(f.derivative(1).to_string(), "2*t - 3");
        assert_eq!(f.derivative(1).variable(), "t");
    }

    #[test]
    fn test_invalid_variable() {
        assert_eq!(
            Expression::parse_with_variable("x", "sin"),
            Err(ExpressionError::InvalidVariable("sin".to_string()))
        );
        assert_eq!(
            Expression::parse_with_variable("x", "2x"),
            Err(ExpressionError::InvalidVariable("2x".to_string()))
        );
        assert!(Expression::parse_with_variable("x", "").is_err());
    }

    #[test]
    fn test_evaluate_errors_carry_point() {
        let f = Expression::parse("1/(x - 2)").unwrap();
        assert_eq!(
            f.evaluate(2.0),
            Err(ExpressionError::Evaluation {
                x: 2.0,
                kind: EvaluationErrorKind::DivisionByZero
            })
        );

        let g = Expression::parse("exp(x)").unwrap();
        assert_eq!(
            g.evaluate(1000.0),
            Err(ExpressionError::Evaluation {
                x: 1000.0,
                kind: EvaluationErrorKind::NonFinite
            })
        );
    }

    #[test]
    fn test_evaluate_with_derivatives() {
        let f = Expression::parse("x**2 + 54/x").unwrap();
        let (value, f1, f2) = f.evaluate_with_derivatives(2.0).unwrap();
        assert_relative_eq!(value, 31.0, epsilon = 1e-12);
        assert_relative_eq!(f1, 4.0 - 13.5, epsilon = 1e-12);
        assert_relative_eq!(f2, 2.0 + 13.5, epsilon = 1e-12);
    }

    #[test]
    fn test_oracle_matches_closed_form() {
        let f = Expression::parse("cos(x)").unwrap();
        let x = 1.2;
        assert_relative_eq!(f.first_derivative(x).unwrap(), -x.sin(), epsilon = 1e-12);
        assert_relative_eq!(f.second_derivative(x).unwrap(), -x.cos(), epsilon = 1e-12);
    }

    #[test]
    fn test_oracle_error_maps_to_oracle_evaluation() {
        let f = Expression::parse("log(x)").unwrap();
        let err = f.first_derivative(0.0).unwrap_err();
        assert_eq!(
            err,
            OracleError::Evaluation {
                x: 0.0,
                reason: "log of non-positive value".to_string()
            }
        );
    }

    #[test]
    fn test_oracle_needs_only_derivatives() {
        let f = Expression::parse("x**2/2 - log(x)").unwrap();
        assert!(f.evaluate(-2.0).is_err());
        assert!(f.evaluate_with_derivatives(-2.0).is_err());

        let (f1, f2) = f.derivatives(-2.0).unwrap();
        assert_relative_eq!(f1, -1.5, epsilon = 1e-12);
        assert_relative_eq!(f2, 1.25, epsilon = 1e-12);
        assert_relative_eq!(f.first_derivative(-2.0).unwrap(), -1.5, epsilon = 1e-12);

        // the log value itself is part of f'
        let g = Expression::parse("x*log(x)").unwrap();
        assert!(g.first_derivative(-2.0).is_err());
    }

    #[test]
    fn test_fractional_power_at_zero() {
        let f = Expression::parse("x**2.5").unwrap();
        assert_eq!(f.derivatives(0.0), Ok((0.0, 0.0)));
        assert_eq!(f.evaluate_with_derivatives(0.0), Ok((0.0, 0.0, 0.0)));

        let g = Expression::parse("x**1.5").unwrap();
        assert_eq!(g.first_derivative(0.0), Ok(0.0));
        assert!(g.second_derivative(0.0).is_err());
    }

    #[test]
    fn test_abs_kink_rejected() {
        let f = Expression::parse("abs(x)").unwrap();
        assert_eq!(f.evaluate(0.0), Ok(0.0));
        assert_eq!(
            f.first_derivative(0.0),
            Err(OracleError::Evaluation {
                x: 0.0,
                reason: "not differentiable at this point".to_string()
            })
        );
    }

    #[test]
    fn test_infinite_derivative_rejected() {
        // sqrt is defined at 0 but its slope is not
        let f = Expression::parse("sqrt(x)").unwrap();
        assert!(f.evaluate(0.0).is_ok());
        assert!(matches!(
            f.first_derivative(0.0),
            Err(OracleError::Evaluation { .. })
        ));
    }

    #[test]
    fn test_derivative_order_zero_is_identity() {
        let f = Expression::parse("sin(x)*x").unwrap();
        assert_eq!(f.derivative(0), f);
    }
}
