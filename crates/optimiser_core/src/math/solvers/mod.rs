//! Stationary-point solvers for single-variable functions.
//!
//! A stationary point of f is a root of f'. Both solvers here are
//! root-finders applied to the derivative supplied by a
//! [`DerivativeOracle`](crate::traits::DerivativeOracle).
//!
//! ## Available Solvers
//!
//! - [`NewtonSolver`]: `x_{k+1} = x_k - f'(x_k) / f''(x_k)`; needs f' and f''
//! - [`SecantBracketSolver`]: secant interpolation on f' combined with a
//!   sign-change test that narrows the bracket; needs f' only
//!
//! ## Configuration
//!
//! Both solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence threshold on `|f'|` (default: 1e-5)
//! - `max_iterations`: Maximum iteration count (default: 10)
//!
//! ## Outcomes
//!
//! A run returns `Ok(report)` for every normal termination: converged,
//! diverged on a zero denominator, or exhausted. Only invalid input and
//! oracle failures produce `Err`.
//!
//! ## Examples
//!
//! ```
//! use optimiser_core::math::solvers::{SecantBracketSolver, SolverConfig};
//! use optimiser_core::traits::oracle::FirstDerivativeFn;
//!
//! // f(x) = x² - 4, f'(x) = 2x changes sign on [0, 5]
//! let oracle = FirstDerivativeFn::new(|x: f64| 2.0 * x);
//! let solver = SecantBracketSolver::new(SolverConfig::default());
//!
//! let report = solver.find_stationary_point(&oracle, 0.0, 5.0).unwrap();
//! assert!(report.outcome.is_converged());
//! assert_eq!(report.outcome.value(), Some(0.0));
//! ```

mod config;
mod newton;
mod secant_bracket;

// Re-export public types at module level
pub use config::SolverConfig;
pub use newton::NewtonSolver;
pub use secant_bracket::SecantBracketSolver;

use num_traits::Float;

/// Lossy conversion used for diagnostics and error payloads.
fn lossy<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
