//! Solver configuration types.

use crate::types::SolverError;
use num_traits::Float;

/// Configuration for the stationary-point solvers.
///
/// Shared by [`NewtonSolver`](super::NewtonSolver) and
/// [`SecantBracketSolver`](super::SecantBracketSolver). Both values are fixed
/// for the duration of a run.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use optimiser_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(config.max_iterations, 10);
///
/// // Custom configuration
/// let custom = SolverConfig {
///     tolerance: 1e-12,
///     max_iterations: 200,
/// };
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance on the derivative.
    ///
    /// A run converges when `|f'| < tolerance` at the tested point.
    pub tolerance: T,

    /// Maximum number of loop passes.
    ///
    /// Reaching this limit ends the run with
    /// [`OptimizationResult::Exhausted`](crate::types::OptimizationResult::Exhausted).
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Create a default configuration.
    ///
    /// Default values:
    /// - `tolerance`: 1e-5
    /// - `max_iterations`: 10
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-5).unwrap(),
            max_iterations: 10,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration with specified values.
    ///
    /// # Arguments
    ///
    /// * `tolerance` - Convergence tolerance (must be positive)
    /// * `max_iterations` - Maximum iteration count (must be > 0)
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use optimiser_core::math::solvers::SolverConfig;
    ///
    /// let config = SolverConfig::new(1e-8, 50);
    /// assert_eq!(config.max_iterations, 50);
    /// ```
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Create a configuration with tight tolerance (1e-10) and 100 iterations.
    pub fn precise() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
        }
    }

    /// Create a configuration with relaxed tolerance (1e-3) and 10 iterations.
    pub fn fast() -> Self {
        Self {
            tolerance: T::from(1e-3).unwrap(),
            max_iterations: 10,
        }
    }

    /// Check the configuration before a run.
    ///
    /// Configurations built with [`SolverConfig::new`] always pass; this
    /// catches struct literals and deserialised values.
    ///
    /// # Errors
    ///
    /// `SolverError::InvalidConfig` if the tolerance is not a positive
    /// finite number or `max_iterations` is zero.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !(self.tolerance > T::zero() && self.tolerance.is_finite()) {
            return Err(SolverError::InvalidConfig(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance.to_f64().unwrap_or(f64::NAN)
            )));
        }
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidConfig(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
