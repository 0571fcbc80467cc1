//! Per-step solver context.

use plume_core::{Grid, SimParams};

/// Geometry and scaling shared by every kernel in one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverCtx {
    /// The grid being solved.
    pub grid: Grid,
    /// Simulated time step (s), already multiplied by the time scale.
    pub dt: f32,
    /// Physical width of one cell (m).
    pub cell_size: f32,
    /// Gauss-Seidel sweeps per relaxation, at least one.
    pub steps: u32,
}

impl SolverCtx {
    /// Context for one step of `dt` simulated seconds.
    pub fn new(grid: Grid, params: &SimParams, dt: f32) -> Self {
        Self {
            grid,
            dt,
            cell_size: grid.cell_size(params.length_scale),
            steps: params.effective_solver_steps(),
        }
    }
}
