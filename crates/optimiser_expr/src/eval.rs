//! Tree evaluation over plain and dual numbers.
//!
//! One walk serves `f64`, `Dual64` and `Dual2_64`: the scalar type decides
//! how many derivatives ride along. Domain checks look at the real part
//! only. With [`Domain::Derivatives`] a log of a negative value is allowed:
//! its real part is NaN but its derivatives are defined, and the NaN only
//! reaches a derivative when the log itself appears in one.

use num_dual::DualNum;

use crate::ast::{Function, Node};
use crate::error::EvaluationErrorKind;

/// Which results an evaluation has to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Domain {
    /// The function value, and any derivatives carried with it.
    Value,
    /// Only the derivatives; the value may be undefined.
    Derivatives,
}

/// Evaluate `node` with the variable bound to `x`.
pub(crate) fn evaluate<D>(node: &Node, x: D, domain: Domain) -> Result<D, EvaluationErrorKind>
where
    D: DualNum<f64> + Copy,
{
    let eval = |n: &Node| evaluate(n, x, domain);
    match node {
        Node::Constant(c) => Ok(D::from(*c)),
        Node::Variable => Ok(x),
        Node::Negate(a) => Ok(-eval(a)?),
        Node::Add(a, b) => Ok(eval(a)? + eval(b)?),
        Node::Sub(a, b) => Ok(eval(a)? - eval(b)?),
        Node::Mul(a, b) => Ok(eval(a)? * eval(b)?),
        Node::Div(a, b) => {
            let numerator = eval(a)?;
            let denominator = eval(b)?;
            if denominator.re() == 0.0 {
                return Err(EvaluationErrorKind::DivisionByZero);
            }
            Ok(numerator / denominator)
        }
        Node::Pow(a, b) => power(eval(a)?, b, x, domain),
        Node::Call(function, a) => call(*function, eval(a)?, domain),
    }
}

fn power<D>(base: D, exponent: &Node, x: D, domain: Domain) -> Result<D, EvaluationErrorKind>
where
    D: DualNum<f64> + Copy,
{
    if exponent.is_constant() {
        let n: f64 = evaluate(exponent, 0.0, Domain::Value)?;
        let b = base.re();

        if b == 0.0 && n < 0.0 {
            return Err(EvaluationErrorKind::DivisionByZero);
        }
        if n.fract() == 0.0 && n.abs() <= f64::from(i32::MAX) {
            return Ok(base.powi(n as i32));
        }
        if b < 0.0 {
            return Err(EvaluationErrorKind::FractionalPowerOfNegative);
        }
        if b == 0.0 {
            return Ok(fractional_power_at_zero(base, n));
        }
        return Ok(base.powf(n));
    }

    // u**v = exp(v ln u)
    if base.re() <= 0.0 {
        return Err(EvaluationErrorKind::NonPositiveBase);
    }
    let v = evaluate(exponent, x, domain)?;
    Ok((v * base.ln()).exp())
}

/// `u**n` for `u.re() == 0` and non-integer `n > 0`.
///
/// `powf` on a dual number goes through `0**(n - 3)` and turns exact zeros
/// into NaN. Here the power rule is applied term by term: a term whose
/// exponent is still positive is 0, a term with a negative exponent is
/// infinite. Terms multiplying a vanishing dual part are skipped.
fn fractional_power_at_zero<D>(u: D, n: f64) -> D
where
    D: DualNum<f64> + Copy,
{
    let zero = D::from(0.0);
    let mut result = zero;

    // n * 0**(n - 1)
    let first = if n > 1.0 { 0.0 } else { f64::INFINITY };
    if first != 0.0 && u != zero {
        result += u * first;
    }

    // n * (n - 1) * 0**(n - 2) / 2
    let second = if n > 2.0 {
        0.0
    } else {
        (n * (n - 1.0)).signum() * f64::INFINITY
    };
    let square = u * u;
    if second != 0.0 && square != zero {
        result += square * second;
    }

    result
}

fn call<D>(function: Function, u: D, domain: Domain) -> Result<D, EvaluationErrorKind>
where
    D: DualNum<f64> + Copy,
{
    match function {
        Function::Sin => Ok(u.sin()),
        Function::Cos => Ok(u.cos()),
        Function::Tan => Ok(u.tan()),
        Function::Exp => Ok(u.exp()),
        Function::Ln => {
            let re = u.re();
            if re == 0.0 || (re < 0.0 && domain == Domain::Value) {
                Err(EvaluationErrorKind::LogOfNonPositive)
            } else {
                Ok(u.ln())
            }
        }
        Function::Sqrt => {
            if u.re() < 0.0 {
                Err(EvaluationErrorKind::SqrtOfNegative)
            } else {
                Ok(u.sqrt())
            }
        }
        Function::Abs => {
            let re = u.re();
            if re > 0.0 {
                Ok(u)
            } else if re < 0.0 {
                Ok(-u)
            } else if re.is_nan() {
                Err(EvaluationErrorKind::NonFinite)
            } else if u == D::from(0.0) {
                // nothing to differentiate
                Ok(u)
            } else {
                Err(EvaluationErrorKind::NonDifferentiable)
            }
        }
    }
}
