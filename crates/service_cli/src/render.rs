//! Output rendering
//!
//! Tables reproduce the classic fixed-width layout: one row per iteration,
//! six decimals per value, then a one-line summary of the outcome.

use optimiser_core::math::solvers::SolverConfig;
use optimiser_core::types::{NewtonReport, OptimizationResult, SecantIteration, SecantReport};
use serde::Serialize;

use crate::config::OracleKind;
use crate::Result;

const NEWTON_RULE: usize = 90;
const SECANT_RULE: usize = 120;

/// Solver that produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Newton,
    Secant,
}

/// JSON document for one run
#[derive(Debug, Serialize)]
pub struct RunOutput<'a, R> {
    pub method: Method,
    pub function: String,
    pub oracle: OracleKind,
    pub config: SolverConfig<f64>,
    pub report: &'a R,
}

impl<R: Serialize> RunOutput<'_, R> {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Newton iteration table with summary
pub fn newton_table(report: &NewtonReport<f64>) -> String {
    let mut lines = vec![
        "Newton's Method (Table Form)".to_string(),
        row(format!(
            "{:<5}{:<15}{:<15}{:<15}{:<15}{:<20}",
            "Iter", "xk", "f'(xk)", "f''(xk)", "x(k+1)", "Check |f'(xk)|<ε"
        )),
        "-".repeat(NEWTON_RULE),
    ];

    for r in &report.trace {
        lines.push(row(format!(
            "{:<5}{:<15.6}{:<15.6}{:<15.6}{:<15.6}{:<20}",
            r.index,
            r.xk,
            r.f1,
            r.f2,
            r.x_next,
            check(r.converged)
        )));
    }

    finish(lines, &report.outcome, "x")
}

/// Secant-bracket iteration table with summary
pub fn secant_table(report: &SecantReport<f64>) -> String {
    let mut lines = vec![
        "Secant Method (Table Form)".to_string(),
        row(format!(
            "{:<5}{:<12}{:<12}{:<15}{:<15}{:<12}{:<15}{:<18}{:<15}",
            "Iter", "x1", "x2", "f'(x1)", "f'(x2)", "z", "f'(z)", "Check |f'(z)|<ε", "New Region"
        )),
        "-".repeat(SECANT_RULE),
    ];

    for r in &report.trace {
        lines.push(row(format!(
            "{:<5}{:<12.6}{:<12.6}{:<15.6}{:<15.6}{:<12.6}{:<15.6}{:<18}{:<15}",
            r.index,
            r.bracket.x0,
            r.bracket.x1,
            r.f1,
            r.f2,
            r.z,
            r.fz,
            check(r.converged),
            region(r)
        )));
    }

    finish(lines, &report.outcome, "z")
}

/// One-line outcome summary
///
/// `last` names the quantity reported on exhaustion (`x` for Newton, `z`
/// for secant).
pub fn summary(outcome: &OptimizationResult<f64>, last: &str) -> String {
    match outcome {
        OptimizationResult::Converged { value, iteration } => {
            format!("Converged at iteration {}, minimizer ≈ {:.6}", iteration, value)
        }
        OptimizationResult::Exhausted {
            last_value,
            iterations,
        } => format!(
            "Stopped after {} iterations, last {} ≈ {:.6}",
            iterations, last, last_value
        ),
        OptimizationResult::Diverged { reason, .. } => {
            format!("Division by zero. Stopping. ({})", reason)
        }
    }
}

fn finish(mut lines: Vec<String>, outcome: &OptimizationResult<f64>, last: &str) -> String {
    // Divergence is reported directly under the last row
    if !outcome.is_diverged() {
        lines.push(String::new());
    }
    lines.push(summary(outcome, last));
    lines.join("\n")
}

/// Bracket after the update, as `(x0,x1)`
fn region(r: &SecantIteration<f64>) -> String {
    format!("({:.6},{:.6})", r.bracket.x0, r.bracket.x1)
}

fn check(converged: bool) -> &'static str {
    if converged {
        "Yes"
    } else {
        "No"
    }
}

fn row(line: String) -> String {
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use optimiser_core::math::solvers::{NewtonSolver, SecantBracketSolver};
    use optimiser_core::traits::oracle::{DerivativeFns, FirstDerivativeFn};

    fn newton_quadratic() -> NewtonReport<f64> {
        let oracle = DerivativeFns::new(|x: f64| 2.0 * x, |_x: f64| 2.0);
        NewtonSolver::new(SolverConfig::default())
            .find_stationary_point(&oracle, 10.0)
            .unwrap()
    }

    #[test]
    fn test_newton_table() {
        let table = newton_table(&newton_quadratic());
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Newton's Method (Table Form)");
        assert_eq!(
            lines[1],
            "Iter xk             f'(xk)         f''(xk)        x(k+1)         Check |f'(xk)|<ε"
        );
        assert_eq!(lines[2], "-".repeat(90));
        assert_eq!(
            lines[3],
            concat!("0    ", "10.000000      ", "20.000000      ", "2.000000       ", "0.000000       ", "No")
        );
        assert!(lines[4].ends_with("Yes"));
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "Converged at iteration 1, minimizer ≈ 0.000000");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_newton_divergence_summary() {
        let oracle = DerivativeFns::new(|_x: f64| 3.0, |_x: f64| 0.0);
        let report = NewtonSolver::new(SolverConfig::default())
            .find_stationary_point(&oracle, 1.0)
            .unwrap();

        let table = newton_table(&report);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[3],
            "Division by zero. Stopping. (second derivative vanished at x = 1)"
        );
    }

    #[test]
    fn test_secant_table_row_and_exhaustion() {
        let oracle = FirstDerivativeFn::new(|x: f64| x * x * x - 2.0);
        let report = SecantBracketSolver::new(SolverConfig::new(1e-5, 1))
            .find_stationary_point(&oracle, 0.0, 2.0)
            .unwrap();

        let table = secant_table(&report);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Secant Method (Table Form)");
        assert_eq!(lines[2], "-".repeat(120));
        assert_eq!(
            lines[3],
            concat!(
                "0    ",
                "0.500000    ",
                "2.000000    ",
                "-2.000000      ",
                "6.000000       ",
                "0.500000    ",
                "-1.875000      ",
                "No                ",
                "(0.500000,2.000000)"
            )
        );
        assert_eq!(lines[5], "Stopped after 1 iterations, last z ≈ 0.500000");
    }

    #[test]
    fn test_summary_newton_exhausted_names_x() {
        let outcome = OptimizationResult::Exhausted {
            last_value: 1.5,
            iterations: 10,
        };
        assert_eq!(
            summary(&outcome, "x"),
            "Stopped after 10 iterations, last x ≈ 1.500000"
        );
    }

    #[test]
    fn test_json_output() {
        let report = newton_quadratic();
        let output = RunOutput {
            method: Method::Newton,
            function: "x**2".to_string(),
            oracle: OracleKind::Dual,
            config: SolverConfig::default(),
            report: &report,
        };

        let json: serde_json::Value = serde_json::from_str(&output.to_json().unwrap()).unwrap();

        assert_eq!(json["method"], "newton");
        assert_eq!(json["oracle"], "dual");
        assert_eq!(json["config"]["max_iterations"], 10);
        assert_eq!(json["report"]["outcome"]["status"], "converged");
        assert_eq!(json["report"]["outcome"]["iteration"], 1);
        assert_eq!(json["report"]["trace"].as_array().unwrap().len(), 2);
        assert_eq!(json["report"]["trace"][0]["xk"], 10.0);
    }
}
