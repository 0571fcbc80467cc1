//! Semi-Lagrangian advection.

use plume_core::BoundaryMode;
use plume_grid::set_boundary;

use crate::ctx::SolverCtx;

/// Transport `d0` along `(u, v)` into `d`.
///
/// Each interior cell traces back to `(i, j) - dt/cell_size · (u, v)`,
/// clamps the origin to `[0.5, N + 0.5]` on both axes, and samples `d0`
/// bilinearly there. Clamping means a trace leaving the domain reads the
/// edge value instead of wrapping to the opposite side.
pub fn advect(
    ctx: &SolverCtx,
    mode: BoundaryMode,
    d: &mut [f32],
    d0: &[f32],
    u: &[f32],
    v: &[f32],
) {
    let grid = ctx.grid;
    let n = grid.n() as f32;
    let dt0 = ctx.dt / ctx.cell_size;

    for (i, j) in grid.interior() {
        let idx = grid.idx(i, j);
        let x = (i as f32 - dt0 * u[idx]).clamp(0.5, n + 0.5);
        let y = (j as f32 - dt0 * v[idx]).clamp(0.5, n + 0.5);

        let i0 = x.floor() as usize;
        let j0 = y.floor() as usize;
        let s1 = x - i0 as f32;
        let t1 = y - j0 as f32;
        let s0 = 1.0 - s1;
        let t0 = 1.0 - t1;

        d[idx] = s0 * (t0 * d0[grid.idx(i0, j0)] + t1 * d0[grid.idx(i0, j0 + 1)])
            + s1 * (t0 * d0[grid.idx(i0 + 1, j0)] + t1 * d0[grid.idx(i0 + 1, j0 + 1)]);
    }
    set_boundary(grid, mode, d);
}
