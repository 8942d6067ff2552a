//! # optimiser_expr: Expressions as Derivative Oracles
//!
//! Parses single-variable expressions written in the familiar
//! `x**2 + 54/x` notation and exposes them to the solvers in
//! `optimiser_core`.
//!
//! ## Oracles
//!
//! - [`Expression`]: forward-mode dual numbers (`num_dual::Dual64` for f',
//!   `Dual2_64` for f' and f'' together).
//! - [`SymbolicDerivatives`]: f' and f'' differentiated symbolically once,
//!   then evaluated per call.
//!
//! ## Language
//!
//! Operators `+ - * /`, unary `-`, and `**` (or `^`) for powers, which
//! bind tighter than unary minus and associate to the right. Constants
//! `pi` and `E`/`e`. Functions `sin cos tan exp log ln sqrt abs`, with `log`
//! the natural logarithm.
//!
//! ## Example
//!
//! ```
//! use optimiser_core::math::solvers::{NewtonSolver, SolverConfig};
//! use optimiser_expr::Expression;
//!
//! let f = Expression::parse("x**2 + 54/x").unwrap();
//! let solver = NewtonSolver::new(SolverConfig::precise());
//! let report = solver.find_stationary_point(&f, 2.0).unwrap();
//!
//! let minimiser = report.outcome.value().unwrap();
//! assert!((minimiser - 3.0).abs() < 1e-8);
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod ast;
mod derivative;
pub mod error;
mod eval;
mod expression;
mod lexer;
mod parser;
mod symbolic;

pub use error::{EvaluationErrorKind, ExpressionError};
pub use expression::{Expression, DEFAULT_VARIABLE};
pub use symbolic::SymbolicDerivatives;
