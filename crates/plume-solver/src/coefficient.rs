//! Per-cell diffusion coefficients.
//!
//! [`diffuse`](crate::diffuse()) is generic over [`Coefficient`], so a
//! constant, a closure, and the temperature-dependent transport laws all
//! share one relaxation loop.

use plume_core::SimParams;

use crate::mixing::{mixed_density_at_air_temp, mixed_temperature};

/// Diffusion coefficient evaluated at a flat cell offset.
pub trait Coefficient {
    /// Coefficient (m²/s) at `idx`.
    fn at(&self, idx: usize) -> f32;
}

/// The same coefficient everywhere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constant(pub f32);

impl Coefficient for Constant {
    #[inline]
    fn at(&self, _idx: usize) -> f32 {
        self.0
    }
}

impl<F: Fn(usize) -> f32> Coefficient for F {
    #[inline]
    fn at(&self, idx: usize) -> f32 {
        self(idx)
    }
}

/// Which transport law a [`TransportCoefficient`] applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    /// Molecular diffusion of the gas: `diff · (T / T_air)^1.5`.
    Mass,
    /// Kinematic viscosity: `visc · sqrt(T_mix / T_air) / ρ_mix`.
    Viscosity,
    /// Thermal diffusion: `diff_temp · sqrt(T / T_air)`.
    Thermal,
}

/// Transport coefficient that follows local temperature and density
/// when advanced coefficients are enabled, and is constant otherwise.
///
/// The slices must be stable while the coefficient is in use, so callers
/// pass fields that the current relaxation does not write.
#[derive(Clone, Copy, Debug)]
pub struct TransportCoefficient<'a> {
    law: Transport,
    base: f32,
    params: &'a SimParams,
    temperature: &'a [f32],
    density: &'a [f32],
}

impl<'a> TransportCoefficient<'a> {
    /// Bind `law` to the given parameter set and fields.
    pub fn new(
        law: Transport,
        params: &'a SimParams,
        temperature: &'a [f32],
        density: &'a [f32],
    ) -> Self {
        let base = match law {
            Transport::Mass => params.diff,
            Transport::Viscosity => params.visc,
            Transport::Thermal => params.diff_temp,
        };
        Self {
            law,
            base,
            params,
            temperature,
            density,
        }
    }

    /// The unadjusted coefficient.
    #[inline]
    pub fn base(&self) -> f32 {
        self.base
    }
}

impl Coefficient for TransportCoefficient<'_> {
    fn at(&self, idx: usize) -> f32 {
        if !self.params.advanced_coefficients {
            return self.base;
        }
        let air_temp = self.params.air_temp;
        let temp = self.temperature[idx];
        match self.law {
            Transport::Mass => self.base * (temp / air_temp).max(0.0).powf(1.5),
            Transport::Thermal => self.base * (temp / air_temp).max(0.0).sqrt(),
            Transport::Viscosity => {
                let dens = self.density[idx];
                let mdat = mixed_density_at_air_temp(self.params, dens);
                if mdat.abs() < 1e-12 {
                    return self.base;
                }
                let mixed_t = mixed_temperature(self.params, temp, dens);
                self.base * (mixed_t / air_temp).max(0.0).sqrt() / mdat
            }
        }
    }
}
