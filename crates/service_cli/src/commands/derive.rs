//! Derive command implementation
//!
//! Prints symbolic derivatives of an expression.

use std::io::Write;

use optimiser_expr::Expression;
use serde::Serialize;
use tracing::info;

use crate::config::{OptimiserConfig, OutputFormat};
use crate::{CliError, Result};

/// Highest order the command will produce
pub const MAX_ORDER: u32 = 8;

#[derive(Debug, Serialize)]
struct DerivativeLine {
    order: u32,
    expression: String,
}

#[derive(Debug, Serialize)]
struct DeriveOutput {
    function: String,
    variable: String,
    derivatives: Vec<DerivativeLine>,
}

/// Run the derive command
pub fn run<W: Write>(
    function: &str,
    order: u32,
    config: &OptimiserConfig,
    out: &mut W,
) -> Result<()> {
    if order == 0 || order > MAX_ORDER {
        return Err(CliError::InvalidArgument(format!(
            "order must be between 1 and {}, got {}",
            MAX_ORDER, order
        )));
    }

    let expression = Expression::parse(function)?;
    info!(function = %expression, order, "Differentiating");

    let mut derivatives = Vec::with_capacity(order as usize);
    let mut current = expression.clone();
    for k in 1..=order {
        current = current.derivative(1);
        derivatives.push(DerivativeLine {
            order: k,
            expression: current.to_string(),
        });
    }

    match config.format {
        OutputFormat::Table => {
            let variable = expression.variable();
            writeln!(out, "f({}) = {}", variable, expression)?;
            for line in &derivatives {
                writeln!(out, "{} = {}", label(line.order, variable), line.expression)?;
            }
        }
        OutputFormat::Json => {
            let output = DeriveOutput {
                function: expression.to_string(),
                variable: expression.variable().to_string(),
                derivatives,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
        }
    }
    Ok(())
}

/// `f'(x)`, `f''(x)`, `f'''(x)`, then `f^(n)(x)`
fn label(order: u32, variable: &str) -> String {
    if order <= 3 {
        format!("f{}({})", "'".repeat(order as usize), variable)
    } else {
        format!("f^({})({})", order, variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(function: &str, order: u32, config: &OptimiserConfig) -> String {
        let mut out = Vec::new();
        run(function, order, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_table_output() {
        let text = output("x**2 + 54/x", 2, &OptimiserConfig::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "f(x) = x**2 + 54/x");
        assert_eq!(lines[1], "f'(x) = 2*x - 54/x**2");
        assert!(lines[2].starts_with("f''(x) = "));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_high_order_labels() {
        let text = output("x**5", 4, &OptimiserConfig::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[3], "f'''(x) = 60*x**2");
        assert_eq!(lines[4], "f^(4)(x) = 120*x");
    }

    #[test]
    fn test_json_output() {
        let config = OptimiserConfig {
            format: OutputFormat::Json,
            ..Default::default()
        };
        let text = output("sin(x)", 2, &config);
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["derivatives"][0]["expression"], "cos(x)");
        assert_eq!(json["derivatives"][1]["expression"], "-sin(x)");
        assert_eq!(json["derivatives"][1]["order"], 2);
    }

    #[test]
    fn test_order_bounds() {
        let mut out = Vec::new();
        let config = OptimiserConfig::default();
        assert!(matches!(
            run("x", 0, &config, &mut out),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            run("x", MAX_ORDER + 1, &config, &mut out),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
