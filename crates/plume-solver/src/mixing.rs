//! Density and temperature of the air/gas mixture in a cell.
//!
//! `dens` is the injected gas density and `temp` the cell temperature.
//! Denominators that can vanish are guarded so these never produce NaN
//! or infinity for finite inputs.

use plume_core::SimParams;

const EPS: f32 = 1e-12;

/// Mixture density at background temperature:
/// `air_density + dens · (1 - mass_ratio)`.
#[inline]
pub fn mixed_density_at_air_temp(params: &SimParams, dens: f32) -> f32 {
    params.air_density + dens * (1.0 - params.mass_ratio)
}

/// Mixture temperature: the excess over background is diluted by the
/// gas fraction of the mixture.
///
/// Falls back to `air_temp` where the mixture density vanishes.
#[inline]
pub fn mixed_temperature(params: &SimParams, temp: f32, dens: f32) -> f32 {
    let mdat = mixed_density_at_air_temp(params, dens);
    if mdat.abs() < EPS {
        return params.air_temp;
    }
    params.air_temp + (temp - params.air_temp) * dens / mdat
}

/// Mixture density corrected for temperature:
/// `mixed_density_at_air_temp · air_temp / mixed_temperature`.
///
/// Returns 0 where the mixture temperature vanishes; callers treat a zero
/// density as maximal buoyancy.
#[inline]
pub fn mixed_density(params: &SimParams, temp: f32, dens: f32) -> f32 {
    let mixed_t = mixed_temperature(params, temp, dens);
    if mixed_t.abs() < EPS {
        return 0.0;
    }
    mixed_density_at_air_temp(params, dens) * params.air_temp / mixed_t
}
