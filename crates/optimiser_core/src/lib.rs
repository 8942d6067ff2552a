//! # optimiser_core: Stationary-Point Solvers for Single-Variable Functions
//!
//! ## Role
//!
//! optimiser_core is the bottom layer of the workspace, providing:
//! - Newton iteration on the derivative (`math::solvers::NewtonSolver`)
//! - Secant iteration on the derivative with sign-change bracketing
//!   (`math::solvers::SecantBracketSolver`)
//! - Derivative oracle traits consumed by the solvers (`traits::oracle`)
//! - Per-iteration trace records and terminal outcomes (`types`)
//! - Error types: `SolverError`, `OracleError` (`types::error`)
//!
//! A stationary point is a zero of f'. Both solvers treat f' as the function
//! whose root is sought and never evaluate f itself.
//!
//! ## Minimal Dependencies
//!
//! - num-traits: Traits for generic floating-point computation
//! - thiserror: Error enums
//! - tracing: Per-iteration diagnostics
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use optimiser_core::math::solvers::{NewtonSolver, SolverConfig};
//! use optimiser_core::traits::oracle::DerivativeFns;
//! use optimiser_core::types::OptimizationResult;
//!
//! // f(x) = x² - 4x, f'(x) = 2x - 4, f''(x) = 2
//! let oracle = DerivativeFns::new(|x: f64| 2.0 * x - 4.0, |_x: f64| 2.0);
//!
//! let solver = NewtonSolver::new(SolverConfig::default());
//! let report = solver.find_stationary_point(&oracle, 10.0).unwrap();
//!
//! match report.outcome {
//!     OptimizationResult::Converged { value, .. } => assert!((value - 2.0).abs() < 1e-12),
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for configs, traces and outcomes

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
