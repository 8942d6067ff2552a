//! Criterion benchmarks for optimiser_core solvers.
//!
//! Measures a full run of each solver on closed-form derivatives so the
//! numbers reflect loop and trace overhead rather than oracle cost.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use optimiser_core::math::solvers::{NewtonSolver, SecantBracketSolver, SolverConfig};
use optimiser_core::traits::oracle::{DerivativeFns, FirstDerivativeFn};

/// Benchmark Newton on f(x) = x² + 54/x from several start points.
fn bench_newton(c: &mut Criterion) {
    let mut group = c.benchmark_group("newton");
    let solver = NewtonSolver::new(SolverConfig::precise());
    let oracle = DerivativeFns::new(
        |x: f64| 2.0 * x - 54.0 / (x * x),
        |x: f64| 2.0 + 108.0 / (x * x * x),
    );

    for x0 in [1.0, 2.5, 10.0] {
        group.bench_with_input(BenchmarkId::new("rational", x0), &x0, |b, &x0| {
            b.iter(|| solver.find_stationary_point(&oracle, black_box(x0)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark secant-bracket on f'(x) = x³ - 2 with brackets of growing width.
fn bench_secant_bracket(c: &mut Criterion) {
    let mut group = c.benchmark_group("secant_bracket");
    let solver = SecantBracketSolver::new(SolverConfig::precise());
    let oracle = FirstDerivativeFn::new(|x: f64| x * x * x - 2.0);

    for width in [2.0, 3.0, 4.0] {
        group.bench_with_input(BenchmarkId::new("cubic", width), &width, |b, &width| {
            b.iter(|| {
                solver
                    .find_stationary_point(&oracle, black_box(0.0), black_box(width))
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_newton, bench_secant_bracket);
criterion_main!(benches);
