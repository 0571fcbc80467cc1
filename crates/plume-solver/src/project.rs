//! Hodge projection and divergence probes.

use plume_core::{BoundaryMode, Grid};
use plume_grid::set_boundary;

use crate::ctx::SolverCtx;

/// Remove most of the divergence from `(u, v)`.
///
/// `p` and `div` are scratch buffers of grid size; their contents on entry
/// are ignored. The Poisson solve runs `ctx.steps` Gauss-Seidel sweeps, so
/// the result is approximately, not exactly, divergence-free.
///
/// The corrected components always get reflecting walls (`u` with
/// [`BoundaryMode::XReflect`], `v` with [`BoundaryMode::YReflect`]); the
/// pressure and divergence scratch fields use zero-gradient ghosts.
pub fn project(ctx: &SolverCtx, u: &mut [f32], v: &mut [f32], p: &mut [f32], div: &mut [f32]) {
    let grid = ctx.grid;
    let stride = grid.stride();
    let h = ctx.cell_size;

    for (i, j) in grid.interior() {
        let idx = grid.idx(i, j);
        div[idx] = -0.5 * h * (u[idx + 1] - u[idx - 1] + v[idx + stride] - v[idx - stride]);
        p[idx] = 0.0;
    }
    set_boundary(grid, BoundaryMode::Scalar, div);
    set_boundary(grid, BoundaryMode::Scalar, p);

    for _ in 0..ctx.steps {
        for (i, j) in grid.interior() {
            let idx = grid.idx(i, j);
            p[idx] = (div[idx] + p[idx - 1] + p[idx + 1] + p[idx - stride] + p[idx + stride]) / 4.0;
        }
        set_boundary(grid, BoundaryMode::Scalar, p);
    }

    for (i, j) in grid.interior() {
        let idx = grid.idx(i, j);
        u[idx] -= 0.5 * (p[idx + 1] - p[idx - 1]) / h;
        v[idx] -= 0.5 * (p[idx + stride] - p[idx - stride]) / h;
    }
    set_boundary(grid, BoundaryMode::XReflect, u);
    set_boundary(grid, BoundaryMode::YReflect, v);
}

/// Central-difference divergence `∂u/∂x + ∂v/∂y` at every interior cell,
/// written into `out`. Ghost cells of `out` are zeroed.
pub fn divergence(grid: Grid, cell_size: f32, u: &[f32], v: &[f32], out: &mut [f32]) {
    let stride = grid.stride();
    let inv = 0.5 / cell_size;
    out.fill(0.0);
    for (i, j) in grid.interior() {
        let idx = grid.idx(i, j);
        out[idx] = inv * (u[idx + 1] - u[idx - 1] + v[idx + stride] - v[idx - stride]);
    }
}

/// Largest absolute interior divergence of `(u, v)`.
pub fn max_divergence(grid: Grid, cell_size: f32, u: &[f32], v: &[f32]) -> f32 {
    let stride = grid.stride();
    let inv = 0.5 / cell_size;
    grid.interior_indices()
        .map(|idx| (inv * (u[idx + 1] - u[idx - 1] + v[idx + stride] - v[idx - stride])).abs())
        .fold(0.0, f32::max)
}
