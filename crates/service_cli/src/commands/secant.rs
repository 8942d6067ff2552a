//! Secant command implementation
//!
//! Secant steps on f' with sign-change bracketing.

use std::io::Write;

use optimiser_core::math::solvers::SecantBracketSolver;
use optimiser_core::types::SecantReport;
use optimiser_expr::{Expression, SymbolicDerivatives};
use tracing::info;

use crate::config::{OptimiserConfig, OracleKind, OutputFormat};
use crate::render::{self, Method, RunOutput};
use crate::Result;

/// Run the secant command
pub fn run<W: Write>(
    function: &str,
    x0: f64,
    x1: f64,
    config: &OptimiserConfig,
    out: &mut W,
) -> Result<()> {
    let expression = Expression::parse(function)?;
    info!(function = %expression, x0, x1, oracle = %config.oracle, "Running secant method");

    let report = solve(&expression, x0, x1, config)?;

    match config.format {
        OutputFormat::Table => writeln!(out, "{}", render::secant_table(&report))?,
        OutputFormat::Json => {
            let output = RunOutput {
                method: Method::Secant,
                function: expression.to_string(),
                oracle: config.oracle,
                config: config.solver_config(),
                report: &report,
            };
            writeln!(out, "{}", output.to_json()?)?;
        }
    }
    Ok(())
}

/// Solve with the configured oracle
pub fn solve(
    expression: &Expression,
    x0: f64,
    x1: f64,
    config: &OptimiserConfig,
) -> Result<SecantReport<f64>> {
    let solver = SecantBracketSolver::new(config.solver_config());
    let report = match config.oracle {
        OracleKind::Dual => solver.find_stationary_point(expression, x0, x1)?,
        OracleKind::Symbolic => {
            solver.find_stationary_point(&SymbolicDerivatives::new(expression), x0, x1)?
        }
    };
    Ok(report)
}
