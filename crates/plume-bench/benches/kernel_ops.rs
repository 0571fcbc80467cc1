//! Criterion benchmarks for the individual solver kernels.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plume_core::{BoundaryMode, Grid};
use plume_grid::Field;
use plume_solver::{advect, diffuse, project, Constant, SolverCtx};
use plume_test_utils::{impulse_field, swirl_velocity};

fn ctx(n: usize) -> SolverCtx {
    let grid = Grid::new(n).unwrap();
    SolverCtx {
        grid,
        dt: 1.0 / 60.0,
        cell_size: 1.0 / n as f32,
        steps: 20,
    }
}

fn bench_diffuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("diffuse");
    for n in [64, 128] {
        let ctx = ctx(n);
        let x0 = impulse_field(ctx.grid, n / 2, n / 2, 1.0);
        let mut x = Field::new(ctx.grid);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                diffuse(&ctx, BoundaryMode::Scalar, &mut x, &x0, &Constant(1e-4));
                black_box(&x);
            });
        });
    }
    group.finish();
}

fn bench_project(c: &mut Criterion) {
    let mut group = c.benchmark_group("project");
    for n in [64, 128] {
        let ctx = ctx(n);
        let (u0, v0) = swirl_velocity(ctx.grid);
        let mut p = Field::new(ctx.grid);
        let mut div = Field::new(ctx.grid);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let mut u = u0.clone();
                let mut v = v0.clone();
                project(&ctx, &mut u, &mut v, &mut p, &mut div);
                black_box((&u, &v));
            });
        });
    }
    group.finish();
}

fn bench_advect(c: &mut Criterion) {
    let mut group = c.benchmark_group("advect");
    for n in [64, 128] {
        let ctx = ctx(n);
        let (u, v) = swirl_velocity(ctx.grid);
        let d0 = impulse_field(ctx.grid, n / 3, n / 3, 1.0);
        let mut d = Field::new(ctx.grid);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                advect(&ctx, BoundaryMode::Open, &mut d, &d0, &u, &v);
                black_box(&d);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_diffuse, bench_project, bench_advect);
criterion_main!(benches);
