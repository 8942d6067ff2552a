//! Derivative oracle traits.
//!
//! The solvers never see the objective function itself, only an oracle that
//! returns derivative values at a point. Oracles are pure: repeated calls
//! with the same point return the same value.
//!
//! - [`DerivativeOracle`]: f'(x), required by both solvers
//! - [`SecondDerivativeOracle`]: f''(x), additionally required by Newton
//!
//! Closures can be adapted with [`FirstDerivativeFn`] and [`DerivativeFns`].

use crate::types::OracleError;

/// Oracle providing the first derivative of the objective.
pub trait DerivativeOracle<T> {
    /// Evaluate f'(x).
    fn first_derivative(&self, x: T) -> Result<T, OracleError>;
}

/// Oracle additionally providing the second derivative.
pub trait SecondDerivativeOracle<T>: DerivativeOracle<T> {
    /// Evaluate f''(x).
    fn second_derivative(&self, x: T) -> Result<T, OracleError>;

    /// Evaluate `(f'(x), f''(x))`.
    ///
    /// The default calls the two methods in turn. Implementations that can
    /// produce both in one pass (e.g. second-order dual numbers) should
    /// override it.
    fn derivatives(&self, x: T) -> Result<(T, T), OracleError>
    where
        T: Copy,
    {
        Ok((self.first_derivative(x)?, self.second_derivative(x)?))
    }
}

impl<T, O: DerivativeOracle<T> + ?Sized> DerivativeOracle<T> for &O {
    fn first_derivative(&self, x: T) -> Result<T, OracleError> {
        (**self).first_derivative(x)
    }
}

impl<T, O: SecondDerivativeOracle<T> + ?Sized> SecondDerivativeOracle<T> for &O {
    fn second_derivative(&self, x: T) -> Result<T, OracleError> {
        (**self).second_derivative(x)
    }

    fn derivatives(&self, x: T) -> Result<(T, T), OracleError>
    where
        T: Copy,
    {
        (**self).derivatives(x)
    }
}

/// Wraps an infallible closure `f'(x)` as a [`DerivativeOracle`].
///
/// # Example
///
/// ```
/// use optimiser_core::traits::oracle::{DerivativeOracle, FirstDerivativeFn};
///
/// let oracle = FirstDerivativeFn::new(|x: f64| 2.0 * x);
/// assert_eq!(oracle.first_derivative(3.0).unwrap(), 6.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FirstDerivativeFn<D1> {
    df: D1,
}

impl<D1> FirstDerivativeFn<D1> {
    /// Wrap `df` as the first derivative.
    pub fn new(df: D1) -> Self {
        Self { df }
    }
}

impl<T, D1> DerivativeOracle<T> for FirstDerivativeFn<D1>
where
    D1: Fn(T) -> T,
{
    fn first_derivative(&self, x: T) -> Result<T, OracleError> {
        Ok((self.df)(x))
    }
}

/// Wraps infallible closures `f'(x)` and `f''(x)` as a [`SecondDerivativeOracle`].
///
/// # Example
///
/// ```
/// use optimiser_core::traits::oracle::{DerivativeFns, SecondDerivativeOracle};
///
/// // f(x) = x³: f'(x) = 3x², f''(x) = 6x
/// let oracle = DerivativeFns::new(|x: f64| 3.0 * x * x, |x: f64| 6.0 * x);
/// assert_eq!(oracle.derivatives(2.0).unwrap(), (12.0, 12.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DerivativeFns<D1, D2> {
    df: D1,
    d2f: D2,
}

impl<D1, D2> DerivativeFns<D1, D2> {
    /// Wrap `df` and `d2f` as the first and second derivatives.
    pub fn new(df: D1, d2f: D2) -> Self {
        Self { df, d2f }
    }
}

impl<T, D1, D2> DerivativeOracle<T> for DerivativeFns<D1, D2>
where
    D1: Fn(T) -> T,
{
    fn first_derivative(&self, x: T) -> Result<T, OracleError> {
        Ok((self.df)(x))
    }
}

impl<T, D1, D2> SecondDerivativeOracle<T> for DerivativeFns<D1, D2>
where
    D1: Fn(T) -> T,
    D2: Fn(T) -> T,
{
    fn second_derivative(&self, x: T) -> Result<T, OracleError> {
        Ok((self.d2f)(x))
    }
}
