//! Reusable grids, fields and parameter sets.
//!
//! - [`small_grid`]: a validated grid of the given size
//! - [`impulse_field`]: one hot interior cell on a zero background
//! - [`swirl_velocity`]: a smooth divergence-free pair (before boundaries)
//! - [`closed_params`] / [`open_params`]: passive smoke parameter sets

use plume_core::{Grid, SimParams};
use plume_grid::Field;

/// A grid with `n` interior cells per side.
///
/// Panics if `n == 0`; fixtures are only used with literal sizes.
pub fn small_grid(n: usize) -> Grid {
    Grid::new(n).expect("fixture grid size must be non-zero")
}

/// A zero field with `value` at `(i, j)`.
pub fn impulse_field(grid: Grid, i: usize, j: usize, value: f32) -> Field {
    let mut f = Field::new(grid);
    f.set(i, j, value);
    f
}

/// Stream-function swirl `ψ = sin(πx)·sin(πy)` sampled at cell centres,
/// returned as `(u, v) = (∂ψ/∂y, -∂ψ/∂x)`.
pub fn swirl_velocity(grid: Grid) -> (Field, Field) {
    use std::f32::consts::PI;
    let n = grid.n() as f32;
    let centre = |k: usize| (k as f32 - 0.5) / n;
    let u = Field::from_fn(grid, |i, j| {
        if !grid.is_interior(i, j) {
            return 0.0;
        }
        let (x, y) = (centre(i), centre(j));
        PI * (PI * x).sin() * (PI * y).cos()
    });
    let v = Field::from_fn(grid, |i, j| {
        if !grid.is_interior(i, j) {
            return 0.0;
        }
        let (x, y) = (centre(i), centre(j));
        -PI * (PI * x).cos() * (PI * y).sin()
    });
    (u, v)
}

/// Passive smoke in a closed 1 m box: no gravity, no temperature, no decay.
pub fn closed_params(diff: f32, solver_steps: u32) -> SimParams {
    SimParams {
        solver_steps,
        ..SimParams::basic(1.0, 1.0, diff, diff)
    }
}

/// [`closed_params`] with open walls.
pub fn open_params(diff: f32, solver_steps: u32) -> SimParams {
    SimParams {
        closed_boundaries: false,
        ..closed_params(diff, solver_steps)
    }
}
