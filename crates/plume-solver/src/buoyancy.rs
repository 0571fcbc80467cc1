//! Buoyancy from the local mixture density.

use plume_core::SimParams;

use crate::ctx::SolverCtx;
use crate::mixing::{mixed_density, mixed_density_at_air_temp};

/// Relative buoyant force of a cell, `(ρ_mix - ρ_air) / ρ_mix`.
///
/// `ρ_mix` is temperature-corrected when temperature coupling is on. A
/// vanishing mixture density yields the maximal force of 1.
#[inline]
pub fn buoyant_force(params: &SimParams, dens: f32, temp: f32) -> f32 {
    let rho = if params.temperature_on {
        mixed_density(params, temp, dens)
    } else {
        mixed_density_at_air_temp(params, dens)
    };
    if rho.abs() < 1e-12 {
        1.0
    } else {
        (rho - params.air_density) / rho
    }
}

/// Add `dt · grav · force` to the vertical velocity of every interior cell.
pub fn convect(
    ctx: &SolverCtx,
    params: &SimParams,
    v: &mut [f32],
    density: &[f32],
    temperature: &[f32],
) {
    let g = ctx.dt * params.grav;
    for idx in ctx.grid.interior_indices() {
        v[idx] += g * buoyant_force(params, density[idx], temperature[idx]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::Grid;
    use plume_grid::Field;

    fn params(temperature_on: bool) -> SimParams {
        SimParams {
            grav: -10.0,
            air_density: 1.0,
            mass_ratio: 0.5,
            air_temp: 300.0,
            gravity_on: true,
            temperature_on,
            ..SimParams::default()
        }
    }

    #[test]
    fn clear_air_feels_no_force() {
        let p = params(false);
        assert_eq!(buoyant_force(&p, 0.0, 300.0), 0.0);
        let p = params(true);
        assert!(buoyant_force(&p, 0.0, 300.0).abs() < 1e-6);
    }

    #[test]
    fn gas_heavier_than_air_sinks() {
        let p = SimParams {
            mass_ratio: -1.0,
            ..params(false)
        };
        // rho = 1 + 1·2 = 3  =>  (3 - 1)/3
        assert!((buoyant_force(&p, 1.0, 300.0) - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn heat_makes_gas_rise() {
        let p = params(true);
        assert!(buoyant_force(&p, 0.5, 900.0) < buoyant_force(&p, 0.5, 300.0));
        assert!(buoyant_force(&p, 0.5, 900.0) < 0.0);
    }

    #[test]
    fn zero_mixture_density_is_maximal() {
        let p = SimParams {
            air_density: 0.0,
            ..params(false)
        };
        assert_eq!(buoyant_force(&p, 0.0, 300.0), 1.0);
    }

    #[test]
    fn convect_touches_interior_only() {
        let grid = Grid::new(4).unwrap();
        let p = SimParams {
            air_density: 0.0,
            ..params(false)
        };
        let ctx = SolverCtx::new(grid, &p, 0.1);
        let mut v = Field::new(grid);
        let dens = Field::new(grid);
        let temp = Field::filled(grid, 300.0);
        convect(&ctx, &p, &mut v, &dens, &temp);
        assert!((v.at(2, 2) + 1.0).abs() < 1e-6);
        assert_eq!(v.at(0, 2), 0.0);
    }
}
