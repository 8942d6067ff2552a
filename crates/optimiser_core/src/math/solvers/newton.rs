//! Newton iteration on the derivative.

use super::{lossy, SolverConfig};
use crate::traits::SecondDerivativeOracle;
use crate::types::{
    DivergenceReason, NewtonIteration, NewtonReport, OptimizationResult, SolverError, Trace,
};
use num_traits::Float;
use tracing::{debug, info, warn};

/// Newton stationary-point solver.
///
/// Applies Newton's root-finding step to f':
/// `x_{k+1} = x_k - f'(x_k) / f''(x_k)`. Near a well-conditioned stationary
/// point the number of correct digits roughly doubles each iteration; on a
/// quadratic the first step is exact.
///
/// # Termination
///
/// - `f''(x_k) == 0` (exact): `Diverged`, no record for that pass
/// - `|f'(x_k)| < tolerance`: `Converged` with value `x_{k+1}`
/// - `max_iterations` passes: `Exhausted` with the last `x_{k+1}`
///
/// The convergence test looks at f' at `x_k` while the reported value is
/// the following iterate `x_{k+1}`.
///
/// # Example
///
/// ```
/// use optimiser_core::math::solvers::{NewtonSolver, SolverConfig};
/// use optimiser_core::traits::oracle::DerivativeFns;
///
/// // f(x) = x²: f'(x) = 2x, f''(x) = 2
/// let oracle = DerivativeFns::new(|x: f64| 2.0 * x, |_x: f64| 2.0);
/// let solver = NewtonSolver::new(SolverConfig::default());
///
/// let report = solver.find_stationary_point(&oracle, 10.0).unwrap();
/// assert_eq!(report.outcome.value(), Some(0.0));
/// assert_eq!(report.trace.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> NewtonSolver<T> {
    /// Create a new Newton solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Search for a stationary point starting from `x0`.
    ///
    /// # Arguments
    ///
    /// * `oracle` - Source of f'(x) and f''(x)
    /// * `x0` - Initial guess
    ///
    /// # Returns
    ///
    /// * `Ok(report)` - Terminal outcome plus one trace record per completed pass
    /// * `Err(SolverError::InvalidConfig)` - Tolerance or iteration limit out of range
    /// * `Err(SolverError::NonFiniteStart)` - `x0` is NaN or infinite
    /// * `Err(SolverError::Oracle)` - The oracle failed; the run is abandoned
    pub fn find_stationary_point<O>(&self, oracle: &O, x0: T) -> Result<NewtonReport<T>, SolverError>
    where
        O: SecondDerivativeOracle<T> + ?Sized,
    {
        self.config.validate()?;
        if !x0.is_finite() {
            return Err(SolverError::NonFiniteStart { x: lossy(x0) });
        }

        let tolerance = self.config.tolerance;
        let mut trace = Trace::new();
        let mut xk = x0;

        for k in 0..self.config.max_iterations {
            let (f1, f2) = oracle.derivatives(xk)?;

            // Exact comparison: only a true zero makes the step undefined
            if f2 == T::zero() {
                let reason = DivergenceReason::SecondDerivativeVanished { x: lossy(xk) };
                warn!(iteration = k, %reason, "Newton step undefined");
                return Ok(NewtonReport::new(
                    OptimizationResult::Diverged {
                        reason,
                        iteration: k,
                    },
                    trace,
                ));
            }

            let x_next = xk - f1 / f2;
            let converged = f1.abs() < tolerance;

            debug!(
                iteration = k,
                xk = lossy(xk),
                f1 = lossy(f1),
                f2 = lossy(f2),
                x_next = lossy(x_next),
                converged,
                "Newton iteration"
            );

            trace.record(NewtonIteration {
                index: k,
                xk,
                f1,
                f2,
                x_next,
                converged,
            });

            if converged {
                info!(iteration = k, value = lossy(x_next), "Newton converged");
                return Ok(NewtonReport::new(
                    OptimizationResult::Converged {
                        value: x_next,
                        iteration: k,
                    },
                    trace,
                ));
            }

            xk = x_next;
        }

        info!(
            iterations = self.config.max_iterations,
            last_value = lossy(xk),
            "Newton iteration limit reached"
        );
        Ok(NewtonReport::new(
            OptimizationResult::Exhausted {
                last_value: xk,
                iterations: self.config.max_iterations,
            },
            trace,
        ))
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
