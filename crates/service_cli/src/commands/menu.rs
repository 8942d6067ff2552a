//! Interactive menu
//!
//! Prompts for a method, a function, start points and a tolerance, then
//! prints the iteration table. Runs until the user exits or input closes.

use std::io::{BufRead, Write};

use optimiser_expr::Expression;
use tracing::debug;

use crate::commands::{newton, secant};
use crate::config::OptimiserConfig;
use crate::render;
use crate::Result;

const BANNER: &str = "\
Single Variable Optimization
Symbols you can use in function input:
  Power: x**2   (or x^2)
  Exponential: exp(x)
  Logarithm: log(x)   (natural log, also ln(x))
  Trigonometry: sin(x), cos(x), tan(x)
  Other: sqrt(x), abs(x), pi, E
Examples:  x**2 + 54/x   |   exp(x) - 2*x   |   x**2/2 - sin(x)
Press Enter at the tolerance prompt to keep the default shown in brackets.";

const MENU: &str = "
==== MENU ====
1. Newton's Method
2. Secant Method
3. Exit";

/// Run the menu loop over `input`, writing prompts and tables to `out`
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    config: &OptimiserConfig,
) -> Result<()> {
    writeln!(out, "{}", BANNER)?;

    loop {
        writeln!(out, "{}", MENU)?;
        let Some(choice) = prompt(input, out, "Enter your choice (1/2/3): ")? else {
            break;
        };

        let flow = match choice.as_str() {
            "1" => newton_session(input, out, config)?,
            "2" => secant_session(input, out, config)?,
            "3" => {
                writeln!(out, "\nExiting...")?;
                return Ok(());
            }
            other => {
                debug!(choice = other, "Invalid menu choice");
                writeln!(out, "Invalid choice. Please try again.")?;
                Some(())
            }
        };

        if flow.is_none() {
            break;
        }
    }

    debug!("Input closed");
    Ok(())
}

/// One Newton run; `None` when input closed mid-session
fn newton_session<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    config: &OptimiserConfig,
) -> Result<Option<()>> {
    let Some(expression) = prompt_function(input, out)? else {
        return Ok(None);
    };
    let Some(expression) = expression else {
        return Ok(Some(()));
    };
    let Some(x0) = prompt_number(input, out, "Enter initial guess x0: ")? else {
        return Ok(None);
    };
    let Some(tolerance) = prompt_tolerance(input, out, config.tolerance)? else {
        return Ok(None);
    };

    let run_config = OptimiserConfig {
        tolerance,
        ..config.clone()
    };
    match newton::solve(&expression, x0, &run_config) {
        Ok(report) => writeln!(out, "\n{}", render::newton_table(&report))?,
        Err(err) => writeln!(out, "{}", err)?,
    }
    Ok(Some(()))
}

/// One secant run; `None` when input closed mid-session
fn secant_session<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    config: &OptimiserConfig,
) -> Result<Option<()>> {
    let Some(expression) = prompt_function(input, out)? else {
        return Ok(None);
    };
    let Some(expression) = expression else {
        return Ok(Some(()));
    };
    let Some(x0) = prompt_number(input, out, "Enter initial guess x0: ")? else {
        return Ok(None);
    };
    let Some(x1) = prompt_number(input, out, "Enter initial guess x1: ")? else {
        return Ok(None);
    };
    let Some(tolerance) = prompt_tolerance(input, out, config.tolerance)? else {
        return Ok(None);
    };

    let run_config = OptimiserConfig {
        tolerance,
        ..config.clone()
    };
    match secant::solve(&expression, x0, x1, &run_config) {
        Ok(report) => writeln!(out, "\n{}", render::secant_table(&report))?,
        Err(err) => writeln!(out, "{}", err)?,
    }
    Ok(Some(()))
}

/// Read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Outer `None`: input closed. Inner `None`: parse failed, already reported.
fn prompt_function<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Option<Option<Expression>>> {
    let Some(source) = prompt(input, out, "\nEnter function f(x): ")? else {
        return Ok(None);
    };
    match Expression::parse(&source) {
        Ok(expression) => Ok(Some(Some(expression))),
        Err(err) => {
            writeln!(out, "Invalid function: {}", err)?;
            Ok(Some(None))
        }
    }
}

/// Reprompt until a finite number is entered
fn prompt_number<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<Option<f64>> {
    loop {
        let Some(text) = prompt(input, out, message)? else {
            return Ok(None);
        };
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => return Ok(Some(value)),
            _ => writeln!(out, "Please enter a valid number.")?,
        }
    }
}

/// Reprompt until a positive tolerance is entered; blank keeps `default`
fn prompt_tolerance<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    default: f64,
) -> Result<Option<f64>> {
    let message = format!("Enter tolerance ε [{}]: ", default);
    loop {
        let Some(text) = prompt(input, out, &message)? else {
            return Ok(None);
        };
        if text.is_empty() {
            return Ok(Some(default));
        }
        match text.parse::<f64>() {
            Ok(value) if value > 0.0 && value.is_finite() => return Ok(Some(value)),
            _ => writeln!(out, "Please enter a positive number.")?,
        }
    }
}
