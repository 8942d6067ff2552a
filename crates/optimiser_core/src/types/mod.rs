//! Core types: trace records, terminal outcomes, and errors.

pub mod error;
pub mod outcome;
pub mod trace;

pub use error::{OracleError, SolverError};
pub use outcome::{
    DivergenceReason, NewtonReport, OptimizationReport, OptimizationResult, SecantReport,
};
pub use trace::{Bracket, Endpoint, IterationRecord, NewtonIteration, SecantIteration, Trace};
