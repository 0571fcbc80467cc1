//! Implicit diffusion by Gauss-Seidel relaxation.

use plume_core::BoundaryMode;
use plume_grid::{ops, set_boundary};

use crate::coefficient::Coefficient;
use crate::ctx::SolverCtx;

/// Solve `x - a·∇²x = x0` for `x` with `ctx.steps` Gauss-Seidel sweeps.
///
/// Per interior cell, with `a = dt · coeff / cell_size²`:
///
/// ```text
/// x[i,j] = (x0[i,j] + a·(x[i-1,j] + x[i+1,j] + x[i,j-1] + x[i,j+1])) / (1 + 4a)
/// ```
///
/// `x` is seeded from `x0` and the ghost ring is refreshed with `mode`
/// after every sweep. The scheme is implicit, so any `dt` is stable; the
/// fixed sweep count bounds accuracy rather than stability.
pub fn diffuse<C: Coefficient + ?Sized>(
    ctx: &SolverCtx,
    mode: BoundaryMode,
    x: &mut [f32],
    x0: &[f32],
    coeff: &C,
) {
    let grid = ctx.grid;
    let stride = grid.stride();
    let a = ctx.dt / (ctx.cell_size * ctx.cell_size);

    ops::copy(x, x0);
    for _ in 0..ctx.steps {
        for (i, j) in grid.interior() {
            let idx = grid.idx(i, j);
            let a_t = a * coeff.at(idx);
            let neighbours = x[idx - 1] + x[idx + 1] + x[idx - stride] + x[idx + stride];
            x[idx] = (x0[idx] + a_t * neighbours) / (1.0 + 4.0 * a_t);
        }
        set_boundary(grid, mode, x);
    }
}
