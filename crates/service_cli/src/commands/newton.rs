//! Newton command implementation
//!
//! Newton iteration on f' of a parsed expression.

use std::io::Write;

use optimiser_core::math::solvers::NewtonSolver;
use optimiser_core::types::NewtonReport;
use optimiser_expr::{Expression, SymbolicDerivatives};
use tracing::info;

use crate::config::{OptimiserConfig, OracleKind, OutputFormat};
use crate::render::{self, Method, RunOutput};
use crate::Result;

/// Run the newton command
pub fn run<W: Write>(function: &str, x0: f64, config: &OptimiserConfig, out: &mut W) -> Result<()> {
    let expression = Expression::parse(function)?;
    info!(function = %expression, x0, oracle = %config.oracle, "Running Newton's method");

    let report = solve(&expression, x0, config)?;

    match config.format {
        OutputFormat::Table => writeln!(out, "{}", render::newton_table(&report))?,
        OutputFormat::Json => {
            let output = RunOutput {
                method: Method::Newton,
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
    config: &OptimiserConfig,
) -> Result<NewtonReport<f64>> {
    let solver = NewtonSolver::new(config.solver_config());
    let report = match config.oracle {
        OracleKind::Dual => solver.find_stationary_point(expression, x0)?,
        OracleKind::Symbolic => {
            solver.find_stationary_point(&SymbolicDerivatives::new(expression), x0)?
        }
    };
    Ok(report)
}
