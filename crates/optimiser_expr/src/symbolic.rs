//! Oracle backed by symbolic derivatives.

use optimiser_core::traits::{DerivativeOracle, SecondDerivativeOracle};
use optimiser_core::types::OracleError;

use crate::expression::Expression;

/// f' and f'' differentiated once up front, then evaluated per call.
///
/// Agrees with the dual-number oracle on [`Expression`]: both need only f'
/// and f'' to be real, and both fail where either is undefined (for
/// example `abs(x)` at 0). Useful for showing the derivative formulas
/// alongside a run.
///
/// # Examples
/// ```
/// use optimiser_expr::{Expression, SymbolicDerivatives};
/// use optimiser_core::traits::DerivativeOracle;
///
/// let f = Expression::parse("x**2 + 54/x").unwrap();
/// let oracle = SymbolicDerivatives::new(&f);
/// assert_eq!(oracle.first().to_string(), "2*x - 54/x**2");
/// assert!(oracle.first_derivative(3.0).unwrap().abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolicDerivatives {
    first: Expression,
    second: Expression,
}

impl SymbolicDerivatives {
    /// Differentiate `expression` twice.
    pub fn new(expression: &Expression) -> Self {
        let first = expression.derivative(1);
        let second = first.derivative(1);
        Self { first, second }
    }

    /// f' as an expression.
    pub fn first(&self) -> &Expression {
        &self.first
    }

    /// f'' as an expression.
    pub fn second(&self) -> &Expression {
        &self.second
    }
}

impl DerivativeOracle<f64> for SymbolicDerivatives {
    fn first_derivative(&self, x: f64) -> Result<f64, OracleError> {
        Ok(self.first.evaluate(x)?)
    }
}

impl SecondDerivativeOracle<f64> for SymbolicDerivatives {
    fn second_derivative(&self, x: f64) -> Result<f64, OracleError> {
        Ok(self.second.evaluate(x)?)
    }
}
