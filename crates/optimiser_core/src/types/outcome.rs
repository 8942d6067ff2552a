//! Terminal outcomes of a solver run.

use std::fmt;

use super::trace::{NewtonIteration, SecantIteration, Trace};

/// Why a run stopped without converging or exhausting its budget.
///
/// Both variants correspond to an exact-zero denominator in the update
/// formula. They are detected with literal floating-point equality.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DivergenceReason {
    /// Newton: `f''(xk) == 0`, so `xk - f'(xk) / f''(xk)` is undefined.
    SecondDerivativeVanished {
        /// Point at which f'' vanished
        x: f64,
    },

    /// Secant: `f'(x1) - f'(x0) == 0`, so the secant slope is undefined.
    SecantSlopeUndefined {
        /// Left bracket endpoint
        x0: f64,
        /// Right bracket endpoint
        x1: f64,
    },
}

impl fmt::Display for DivergenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DivergenceReason::SecondDerivativeVanished { x } => {
                write!(f, "second derivative vanished at x = {}", x)
            }
            DivergenceReason::SecantSlopeUndefined { x0, x1 } => write!(
                f,
                "derivative values equal at x0 = {}, x1 = {}, secant slope undefined",
                x0, x1
            ),
        }
    }
}

/// Terminal outcome of a stationary-point search.
///
/// Exactly one outcome is produced per run.
///
/// # Variants
/// - `Converged`: `|f'| < tolerance` was observed at iteration `iteration`
/// - `Diverged`: a zero denominator stopped the run at iteration `iteration`
/// - `Exhausted`: `iterations` passes completed without convergence
///
/// # Examples
/// ```
/// use optimiser_core::types::OptimizationResult;
///
/// let outcome = OptimizationResult::Converged { value: 3.0_f64, iteration: 4 };
/// assert!(outcome.is_converged());
/// assert_eq!(outcome.value(), Some(3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum OptimizationResult<T> {
    /// Convergence criterion met.
    Converged {
        /// Stationary-point estimate
        value: T,
        /// Zero-based index of the converging iteration
        iteration: usize,
    },

    /// Update formula undefined; run stopped cleanly.
    Diverged {
        /// Cause of the stop
        reason: DivergenceReason,
        /// Zero-based index of the pass that detected the singularity
        iteration: usize,
    },

    /// Iteration limit reached without convergence.
    Exhausted {
        /// Last computed iterate
        last_value: T,
        /// Number of passes performed (the configured limit)
        iterations: usize,
    },
}

impl<T: Copy> OptimizationResult<T> {
    /// Returns `true` for [`OptimizationResult::Converged`].
    pub fn is_converged(&self) -> bool {
        matches!(self, OptimizationResult::Converged { .. })
    }

    /// Returns `true` for [`OptimizationResult::Diverged`].
    pub fn is_diverged(&self) -> bool {
        matches!(self, OptimizationResult::Diverged { .. })
    }

    /// Returns `true` for [`OptimizationResult::Exhausted`].
    pub fn is_exhausted(&self) -> bool {
        matches!(self, OptimizationResult::Exhausted { .. })
    }

    /// The best available estimate: the converged value or the last iterate.
    ///
    /// A diverged run has no estimate.
    pub fn value(&self) -> Option<T> {
        match *self {
            OptimizationResult::Converged { value, .. } => Some(value),
            OptimizationResult::Exhausted { last_value, .. } => Some(last_value),
            OptimizationResult::Diverged { .. } => None,
        }
    }
}

/// Outcome of a run together with its full iteration trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizationReport<T, R> {
    /// Terminal outcome
    pub outcome: OptimizationResult<T>,
    /// Ordered per-iteration records
    pub trace: Trace<R>,
}

impl<T, R> OptimizationReport<T, R> {
    /// Create a report from an outcome and the trace that led to it.
    pub fn new(outcome: OptimizationResult<T>, trace: Trace<R>) -> Self {
        Self { outcome, trace }
    }
}

/// Report produced by [`NewtonSolver`](crate::math::solvers::NewtonSolver).
pub type NewtonReport<T> = OptimizationReport<T, NewtonIteration<T>>;

/// Report produced by [`SecantBracketSolver`](crate::math::solvers::SecantBracketSolver).
pub type SecantReport<T> = OptimizationReport<T, SecantIteration<T>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let converged = OptimizationResult::Converged {
            value: 1.0_f64,
            iteration: 0,
        };
        let diverged: OptimizationResult<f64> = OptimizationResult::Diverged {
            reason: DivergenceReason::SecondDerivativeVanished { x: 0.0 },
            iteration: 0,
        };
        let exhausted = OptimizationResult::Exhausted {
            last_value: 2.0_f64,
            iterations: 10,
        };

        assert!(converged.is_converged() && !converged.is_diverged());
        assert!(diverged.is_diverged() && !diverged.is_exhausted());
        assert!(exhausted.is_exhausted() && !exhausted.is_converged());
    }

    #[test]
    fn test_value() {
        let exhausted = OptimizationResult::Exhausted {
            last_value: 2.5_f64,
            iterations: 10,
        };
        assert_eq!(exhausted.value(), Some(2.5));

        let diverged: OptimizationResult<f64> = OptimizationResult::Diverged {
            reason: DivergenceReason::SecantSlopeUndefined { x0: 1.0, x1: 1.0 },
            iteration: 3,
        };
        assert_eq!(diverged.value(), None);
    }

    #[test]
    fn test_divergence_reason_display() {
        let reason = DivergenceReason::SecondDerivativeVanished { x: 1.5 };
        assert_eq!(
            format!("{}", reason),
            "second derivative vanished at x = 1.5"
        );

        let reason = DivergenceReason::SecantSlopeUndefined { x0: 2.0, x1: 2.0 };
        assert!(format!("{}", reason).contains("secant slope undefined"));
    }
}
