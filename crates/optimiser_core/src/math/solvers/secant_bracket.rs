//! Secant iteration on the derivative with sign-change bracketing.

use super::{lossy, SolverConfig};
use crate::traits::DerivativeOracle;
use crate::types::{
    Bracket, DivergenceReason, Endpoint, OptimizationResult, SecantIteration, SecantReport,
    SolverError, Trace,
};
use num_traits::Float;
use tracing::{debug, info, warn};

/// Secant-bracket stationary-point solver.
///
/// Each pass interpolates the secant through `(x0, f'(x0))` and
/// `(x1, f'(x1))`:
///
/// `z = x1 - f'(x1) (x1 - x0) / (f'(x1) - f'(x0))`
///
/// and then narrows the bracket with a sign test on `f'(x0) * f'(z)`:
/// a negative product keeps `(x0, z)`, anything else (including zero)
/// keeps `(z, x1)`. Only f' is required.
///
/// # Termination
///
/// - `f'(x1) - f'(x0) == 0` (exact): `Diverged`, no record for that pass
/// - `|f'(z)| < tolerance`: `Converged` with value `z`
/// - `max_iterations` passes: `Exhausted` with the last `z`
///
/// The starting bracket is expected to straddle a sign change of f'. This
/// is not checked.
///
/// # Example
///
/// ```
/// use optimiser_core::math::solvers::{SecantBracketSolver, SolverConfig};
/// use optimiser_core::traits::oracle::FirstDerivativeFn;
///
/// // f(x) = x⁴/4 - 2x: f'(x) = x³ - 2, stationary point at 2^(1/3)
/// let oracle = FirstDerivativeFn::new(|x: f64| x * x * x - 2.0);
/// let solver = SecantBracketSolver::new(SolverConfig::new(1e-8, 100));
///
/// let report = solver.find_stationary_point(&oracle, 0.0, 2.0).unwrap();
/// let value = report.outcome.value().unwrap();
/// assert!((value - 2.0_f64.cbrt()).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct SecantBracketSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> SecantBracketSolver<T> {
    /// Create a new secant-bracket solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Search for a stationary point inside the bracket `(x0, x1)`.
    ///
    /// # Arguments
    ///
    /// * `oracle` - Source of f'(x)
    /// * `x0` - First bracket endpoint
    /// * `x1` - Second bracket endpoint (either order)
    ///
    /// # Returns
    ///
    /// * `Ok(report)` - Terminal outcome plus one trace record per completed pass
    /// * `Err(SolverError::InvalidConfig)` - Tolerance or iteration limit out of range
    /// * `Err(SolverError::NonFiniteStart)` - An endpoint is NaN or infinite
    /// * `Err(SolverError::Oracle)` - The oracle failed; the run is abandoned
    pub fn find_stationary_point<O>(
        &self,
        oracle: &O,
        x0: T,
        x1: T,
    ) -> Result<SecantReport<T>, SolverError>
    where
        O: DerivativeOracle<T> + ?Sized,
    {
        self.config.validate()?;
        for x in [x0, x1] {
            if !x.is_finite() {
                return Err(SolverError::NonFiniteStart { x: lossy(x) });
            }
        }

        let tolerance = self.config.tolerance;
        let mut trace = Trace::new();
        let mut bracket = Bracket::new(x0, x1);

        // Overwritten on the first pass; validate() guarantees there is one.
        let mut last_z = x1;

        for k in 0..self.config.max_iterations {
            let f1 = oracle.first_derivative(bracket.x0)?;
            let f2 = oracle.first_derivative(bracket.x1)?;

            // Exact comparison: only a true zero makes the slope undefined
            let denominator = f2 - f1;
            if denominator == T::zero() {
                let reason = DivergenceReason::SecantSlopeUndefined {
                    x0: lossy(bracket.x0),
                    x1: lossy(bracket.x1),
                };
                warn!(iteration = k, %reason, "Secant step undefined");
                return Ok(SecantReport::new(
                    OptimizationResult::Diverged {
                        reason,
                        iteration: k,
                    },
                    trace,
                ));
            }

            let z = bracket.x1 - f2 * (bracket.x1 - bracket.x0) / denominator;
            let fz = oracle.first_derivative(z)?;

            let replaced = if f1 * fz < T::zero() {
                bracket.x1 = z;
                Endpoint::X1
            } else {
                bracket.x0 = z;
                Endpoint::X0
            };
            let converged = fz.abs() < tolerance;

            debug!(
                iteration = k,
                x0 = lossy(bracket.x0),
                x1 = lossy(bracket.x1),
                z = lossy(z),
                fz = lossy(fz),
                ?replaced,
                converged,
                "Secant iteration"
            );

            trace.record(SecantIteration {
                index: k,
                bracket,
                f1,
                f2,
                z,
                fz,
                replaced,
                converged,
            });

            if converged {
                info!(iteration = k, value = lossy(z), "Secant converged");
                return Ok(SecantReport::new(
                    OptimizationResult::Converged {
                        value: z,
                        iteration: k,
                    },
                    trace,
                ));
            }

            last_z = z;
        }

        info!(
            iterations = self.config.max_iterations,
            last_value = lossy(last_z),
            "Secant iteration limit reached"
        );
        Ok(SecantReport::new(
            OptimizationResult::Exhausted {
                last_value: last_z,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::oracle::FirstDerivativeFn;
    use crate::types::OracleError;
    use approx::assert_relative_eq;

    /// f'(x) = ln(x): fails for non-positive arguments.
    struct LogDerivative;

    impl DerivativeOracle<f64> for LogDerivative {
        fn first_derivative(&self, x: f64) -> Result<f64, OracleError> {
            if x <= 0.0 {
                return Err(OracleError::Evaluation {
                    x,
                    reason: "log of non-positive value".to_string(),
                });
            }
            Ok(x.ln())
        }
    }

    fn cubic_derivative() -> FirstDerivativeFn<fn(f64) -> f64> {
        // f(x) = x⁴/4 - 2x
        let df: fn(f64) -> f64 = |x| x * x * x - 2.0;
        FirstDerivativeFn::new(df)
    }

    // ========================================
    // Boundary Cases
    // ========================================

    #[test]
    fn test_linear_derivative_hits_root_immediately() {
        let solver = SecantBracketSolver::new(SolverConfig::default());

        // f(x) = x² - 4: f'(x) = 2x changes sign across [0, 5]
        let oracle = FirstDerivativeFn::new(|x: f64| 2.0 * x);

        let report = solver.find_stationary_point(&oracle, 0.0, 5.0).unwrap();
        assert_eq!(
            report.outcome,
            OptimizationResult::Converged {
                value: 0.0,
                iteration: 0
            }
        );

        let row = report.trace.records()[0];
        assert_eq!(row.f1, 0.0);
        assert_eq!(row.f2, 10.0);
        assert_eq!(row.z, 0.0);
        assert_eq!(row.fz, 0.0);
        // f1 * fz == 0 falls through to replacing x0
        assert_eq!(row.replaced, Endpoint::X0);
        assert_eq!(row.bracket, Bracket::new(0.0, 5.0));
        assert!(row.converged);
    }

    #[test]
    fn test_trace_records_updated_bracket() {
        let solver = SecantBracketSolver::new(SolverConfig::new(1e-8, 100));
        let oracle = cubic_derivative();

        let report = solver.find_stationary_point(&oracle, 0.0, 2.0).unwrap();
        let first = report.trace.records()[0];

        // z = 2 - 6 * 2 / 8 = 0.5, f'(z) = -1.875 has the sign of f'(0)
        assert_eq!(first.f1, -2.0);
        assert_eq!(first.f2, 6.0);
        assert_eq!(first.z, 0.5);
        assert_eq!(first.fz, -1.875);
        assert_eq!(first.replaced, Endpoint::X0);
        assert_eq!(first.bracket, Bracket::new(0.5, 2.0));

        let second = report.trace.records()[1];
        assert_eq!(second.f1, -1.875);
        assert_eq!(second.bracket.x1, 2.0);
    }

    #[test]
    fn test_converges_to_cube_root() {
        let solver = SecantBracketSolver::new(SolverConfig::new(1e-8, 100));
        let oracle = cubic_derivative();

        let report = solver.find_stationary_point(&oracle, 0.0, 2.0).unwrap();
        assert!(report.outcome.is_converged());
        assert_relative_eq!(report.outcome.value().unwrap(), 2.0_f64.cbrt(), epsilon = 1e-8);
    }

    #[test]
    fn test_reversed_bracket_replaces_x1() {
        let solver = SecantBracketSolver::new(SolverConfig::new(1e-30, 1));
        let oracle = cubic_derivative();

        let report = solver.find_stationary_point(&oracle, 2.0, 0.0).unwrap();
        let row = report.trace.records()[0];

        // f'(2) = 6 and f'(0.5) = -1.875 differ in sign
        assert_eq!(row.z, 0.5);
        assert_eq!(row.replaced, Endpoint::X1);
        assert_eq!(row.bracket, Bracket::new(2.0, 0.5));
    }

    // ========================================
    // Singularity Tests
    // ========================================

    #[test]
    fn test_equal_endpoints_diverge_immediately() {
        let solver = SecantBracketSolver::new(SolverConfig::default());
        let oracle = cubic_derivative();

        let report = solver.find_stationary_point(&oracle, 3.0, 3.0).unwrap();
        assert_eq!(
            report.outcome,
            OptimizationResult::Diverged {
                reason: DivergenceReason::SecantSlopeUndefined { x0: 3.0, x1: 3.0 },
                iteration: 0
            }
        );
        assert!(report.trace.is_empty());
    }

    #[test]
    fn test_symmetric_derivative_values_diverge() {
        let solver = SecantBracketSolver::new(SolverConfig::default());

        // f'(x) = x² - 1 takes the same value at -2 and 2
        let oracle = FirstDerivativeFn::new(|x: f64| x * x - 1.0);

        let report = solver.find_stationary_point(&oracle, -2.0, 2.0).unwrap();
        assert!(report.outcome.is_diverged());
    }

    // ========================================
    // Exhaustion Tests
    // ========================================

    #[test]
    fn test_exhausted_after_single_iteration() {
        let solver = SecantBracketSolver::new(SolverConfig::new(1e-30, 1));
        let oracle = cubic_derivative();

        let report = solver.find_stationary_point(&oracle, 0.0, 2.0).unwrap();
        assert_eq!(
            report.outcome,
            OptimizationResult::Exhausted {
                last_value: 0.5,
                iterations: 1
            }
        );
        assert_eq!(report.trace.len(), 1);
    }

    // ========================================
    // Error Handling Tests
    // ========================================

    #[test]
    fn test_oracle_error_propagates() {
        let solver = SecantBracketSolver::new(SolverConfig::default());

        // x0 = 0 lies outside the domain of ln
        let result = solver.find_stationary_point(&LogDerivative, 0.0, 4.0);
        assert!(matches!(
            result,
            Err(SolverError::Oracle(OracleError::Evaluation { .. }))
        ));
    }

    #[test]
    fn test_non_finite_endpoint_rejected() {
        let solver: SecantBracketSolver<f64> = SecantBracketSolver::with_defaults();
        let oracle = cubic_derivative();

        assert!(matches!(
            solver.find_stationary_point(&oracle, 0.0, f64::NAN),
            Err(SolverError::NonFiniteStart { .. })
        ));
        assert!(matches!(
            solver.find_stationary_point(&oracle, f64::INFINITY, 0.0),
            Err(SolverError::NonFiniteStart { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let solver = SecantBracketSolver::new(SolverConfig {
            tolerance: -1.0,
            max_iterations: 10,
        });
        let oracle = cubic_derivative();

        assert!(matches!(
            solver.find_stationary_point(&oracle, 0.0, 2.0),
            Err(SolverError::InvalidConfig(_))
        ));
    }

    // ========================================
    // Misc
    // ========================================

    #[test]
    fn test_log_derivative_converges_to_one() {
        let solver = SecantBracketSolver::new(SolverConfig::new(1e-10, 100));

        // f(x) = x ln x - x: f'(x) = ln x, stationary at x = 1
        let report = solver.find_stationary_point(&LogDerivative, 0.5, 4.0).unwrap();
        assert_relative_eq!(report.outcome.value().unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_repeatable() {
        let solver = SecantBracketSolver::new(SolverConfig::default());
        let oracle = FirstDerivativeFn::new(|x: f64| x.sin());

        let first = solver.find_stationary_point(&oracle, 2.0, 4.0).unwrap();
        let second = solver.find_stationary_point(&oracle, 2.0, 4.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_with_f32() {
        let solver: SecantBracketSolver<f32> = SecantBracketSolver::with_defaults();
        let oracle = FirstDerivativeFn::new(|x: f32| 2.0 * x - 3.0);

        let report = solver.find_stationary_point(&oracle, 0.0_f32, 4.0_f32).unwrap();
        assert!((report.outcome.value().unwrap() - 1.5).abs() < 1e-6);
    }
}
