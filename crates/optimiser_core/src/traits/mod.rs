//! Traits at the seam between solvers and their derivative source.
//!
//! - `DerivativeOracle`, `SecondDerivativeOracle`: derivative evaluation
//! - `Float`: re-export of `num_traits::Float` for generic solvers

pub mod oracle;

pub use num_traits::Float;
pub use oracle::{DerivativeFns, DerivativeOracle, FirstDerivativeFn, SecondDerivativeOracle};
