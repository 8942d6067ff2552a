//! Per-iteration records and the append-only trace that collects them.
//!
//! Records are immutable once produced. A [`Trace`] holds one record per
//! completed loop pass, indexed consecutively from 0. Passes that stop on a
//! zero denominator produce no record.

use std::slice;

/// Common view of a per-iteration record.
pub trait IterationRecord {
    /// Zero-based iteration index.
    fn index(&self) -> usize;

    /// Whether the convergence check passed on this iteration.
    fn converged(&self) -> bool;
}

/// One Newton pass on f'.
///
/// `converged` reflects `|f1| < tolerance`, i.e. the derivative at `xk`,
/// while `x_next` is the point the solver reports on convergence.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewtonIteration<T> {
    /// Iteration index
    pub index: usize,
    /// Current point
    pub xk: T,
    /// f'(xk)
    pub f1: T,
    /// f''(xk)
    pub f2: T,
    /// xk - f1 / f2
    pub x_next: T,
    /// |f1| < tolerance
    pub converged: bool,
}

impl<T> IterationRecord for NewtonIteration<T> {
    fn index(&self) -> usize {
        self.index
    }

    fn converged(&self) -> bool {
        self.converged
    }
}

/// Which bracket endpoint a secant pass replaced with the interpolated point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Endpoint {
    /// `x0` replaced: no sign change between `x0` and `z`
    X0,
    /// `x1` replaced: sign change between `x0` and `z`
    X1,
}

/// Pair of points believed to straddle a sign change of f'.
///
/// Endpoint order is not normalised; `x0 > x1` is legal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bracket<T> {
    /// First endpoint
    pub x0: T,
    /// Second endpoint
    pub x1: T,
}

impl<T> Bracket<T> {
    /// Create a bracket from two endpoints.
    pub fn new(x0: T, x1: T) -> Self {
        Self { x0, x1 }
    }
}

/// One secant-bracket pass on f'.
///
/// `bracket` is the bracket *after* this pass's update, while `f1` and `f2`
/// are the derivatives at the endpoints *before* it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SecantIteration<T> {
    /// Iteration index
    pub index: usize,
    /// Updated bracket
    pub bracket: Bracket<T>,
    /// f' at the previous x0
    pub f1: T,
    /// f' at the previous x1
    pub f2: T,
    /// Secant interpolation point
    pub z: T,
    /// f'(z)
    pub fz: T,
    /// Endpoint replaced by `z`
    pub replaced: Endpoint,
    /// |fz| < tolerance
    pub converged: bool,
}

impl<T> IterationRecord for SecantIteration<T> {
    fn index(&self) -> usize {
        self.index
    }

    fn converged(&self) -> bool {
        self.converged
    }
}

/// Ordered, append-only sequence of iteration records.
///
/// # Example
///
/// ```
/// use optimiser_core::types::{NewtonIteration, Trace};
///
/// let mut trace = Trace::new();
/// trace.record(NewtonIteration { index: 0, xk: 1.0, f1: 2.0, f2: 2.0, x_next: 0.0, converged: false });
/// assert_eq!(trace.len(), 1);
/// assert_eq!(trace.last().map(|r| r.x_next), Some(0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Trace<R> {
    records: Vec<R>,
}

impl<R> Default for Trace<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R> Trace<R> {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty trace with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Number of recorded iterations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no iteration has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&R> {
        self.records.last()
    }

    /// Records in iteration order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Iterate over records in iteration order.
    pub fn iter(&self) -> slice::Iter<'_, R> {
        self.records.iter()
    }

    /// Consume the trace, returning the records.
    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

impl<R: IterationRecord> Trace<R> {
    /// Append a record.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `record.index()` is not the next
    /// consecutive index.
    pub fn record(&mut self, record: R) {
        debug_assert_eq!(
            record.index(),
            self.records.len(),
            "trace indices must be consecutive from 0"
        );
        self.records.push(record);
    }
}

impl<'a, R> IntoIterator for &'a Trace<R> {
    type Item = &'a R;
    type IntoIter = slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn newton_row(index: usize, converged: bool) -> NewtonIteration<f64> {
        NewtonIteration {
            index,
            xk: index as f64,
            f1: 1.0,
            f2: 1.0,
            x_next: index as f64 - 1.0,
            converged,
        }
    }

    #[test]
    fn test_trace_append_and_query() {
        let mut trace = Trace::new();
        assert!(trace.is_empty());

        trace.record(newton_row(0, false));
        trace.record(newton_row(1, true));

        assert_eq!(trace.len(), 2);
        assert!(trace.last().unwrap().converged());
        let indices: Vec<usize> = trace.iter().map(|r| r.index()).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    #[should_panic(expected = "trace indices must be consecutive from 0")]
    #[cfg(debug_assertions)]
    fn test_trace_rejects_gap() {
        let mut trace = Trace::new();
        trace.record(newton_row(1, false));
    }

    #[test]
    fn test_into_records() {
        let mut trace = Trace::with_capacity(4);
        trace.record(newton_row(0, false));
        let records = trace.into_records();
        assert_eq!(records, vec![newton_row(0, false)]);
    }

    #[test]
    fn test_secant_record_accessors() {
        let row = SecantIteration {
            index: 2,
            bracket: Bracket::new(0.0, 1.0),
            f1: -1.0,
            f2: 1.0,
            z: 0.5,
            fz: 0.0,
            replaced: Endpoint::X0,
            converged: true,
        };
        assert_eq!(row.index(), 2);
        assert!(row.converged());
    }

    #[test]
    fn test_borrowed_iteration() {
        let mut trace = Trace::new();
        trace.record(newton_row(0, false));
        let mut count = 0;
        for row in &trace {
            assert_eq!(row.index, 0);
            count += 1;
        }
        assert_eq!(count, 1);
    }
}
