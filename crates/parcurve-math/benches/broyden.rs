//! Benchmarks for the parcurve-math solver components.
//!
//! Run with: cargo bench -p parcurve-math

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nalgebra::{DMatrix, DVector};

use parcurve_math::linear_algebra::Decomposition;
use parcurve_math::solvers::{BroydenSolver, SolverConfig};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn node_times(n: usize) -> Vec<f64> {
    (1..=n).map(|i| i as f64 * 0.5).collect()
}

fn true_rates(n: usize) -> Vec<f64> {
    (0..n).map(|i| 0.02 + 0.001 * i as f64).collect()
}

/// Residuals of a mildly coupled discount system: each equation prices
/// its own node plus a fraction of the next one, like overlapping
/// instruments on a curve.
fn residuals(r: &DVector<f64>, times: &[f64], targets: &[f64]) -> DVector<f64> {
    let n = times.len();
    DVector::from_fn(n, |i, _| {
        let mut v = (-r[i] * times[i]).exp();
        if i + 1 < n {
            v += 0.1 * (-r[i + 1] * times[i + 1]).exp();
        }
        v - targets[i]
    })
}

fn jacobian(r: &DVector<f64>, times: &[f64]) -> DMatrix<f64> {
    let n = times.len();
    let mut m = DMatrix::zeros(n, n);
    for i in 0..n {
        m[(i, i)] = -times[i] * (-r[i] * times[i]).exp();
        if i + 1 < n {
            m[(i, i + 1)] = -0.1 * times[i + 1] * (-r[i + 1] * times[i + 1]).exp();
        }
    }
    m
}

fn targets(times: &[f64]) -> Vec<f64> {
    let rates = DVector::from_vec(true_rates(times.len()));
    let zeros = vec![0.0; times.len()];
    let base = residuals(&rates, times, &zeros);
    base.iter().copied().collect()
}

// =============================================================================
// SOLVER BENCHMARKS
// =============================================================================

fn bench_broyden_system_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("broyden_find_root");
    group.sample_size(50);

    for size in [5usize, 10, 20, 40] {
        let times = node_times(size);
        let target = targets(&times);
        let guess = DVector::from_element(size, 0.01);
        let solver = BroydenSolver::default();
        let config = SolverConfig::default();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &guess, |b, guess| {
            b.iter(|| {
                let f = |x: &DVector<f64>| Ok(residuals(x, &times, &target));
                let j = |x: &DVector<f64>| Ok(jacobian(x, &times));
                solver.find_root(f, j, black_box(guess), &config)
            })
        });
    }
    group.finish();
}

fn bench_decomposition_solve(c: &mut Criterion) {
    let times = node_times(20);
    let rates = DVector::from_vec(true_rates(20));
    let a = jacobian(&rates, &times);
    let b_vec = DVector::from_element(20, 1.0);

    let mut group = c.benchmark_group("decomposition_solve_20x20");

    group.bench_function("lu", |b| {
        b.iter(|| Decomposition::Lu.solve(black_box(&a), black_box(&b_vec)))
    });

    group.bench_function("svd", |b| {
        b.iter(|| Decomposition::Svd.solve(black_box(&a), black_box(&b_vec)))
    });

    group.finish();
}

// =============================================================================
// CRITERION GROUPS
// =============================================================================

criterion_group!(solvers, bench_broyden_system_sizes, bench_decomposition_solve,);

criterion_main!(solvers);
