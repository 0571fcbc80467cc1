//! Slider metadata for the floating-point parameters.
//!
//! Front ends iterate [`ParamInfo::all()`] to build their controls; each
//! entry carries a label, a tooltip, the allowed range and accessors into
//! [`SimParams`].

use std::fmt;

use crate::params::SimParams;

/// Grouping of parameters as presented to a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamGroup {
    /// Domain size and simulation speed.
    Scale,
    /// Transport coefficients.
    Fluid,
    /// Background medium and gravity.
    Background,
    /// Decay rates.
    Decay,
}

/// Metadata and accessors for one floating-point parameter.
#[derive(Clone, Copy)]
pub struct ParamInfo {
    /// Short display name.
    pub name: &'static str,
    /// Display unit, e.g. `"m^2/s"`.
    pub unit: &'static str,
    /// One-line description.
    pub tooltip: &'static str,
    /// Group the parameter belongs to.
    pub group: ParamGroup,
    /// Lower slider bound.
    pub min: f32,
    /// Upper slider bound.
    pub max: f32,
    get: fn(&SimParams) -> f32,
    set: fn(&mut SimParams, f32),
}

impl fmt::Debug for ParamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamInfo")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}

impl ParamInfo {
    /// Every float parameter, in display order.
    pub fn all() -> &'static [ParamInfo] {
        &PARAMS
    }

    /// Parameters belonging to `group`, in display order.
    pub fn group(group: ParamGroup) -> impl Iterator<Item = &'static ParamInfo> {
        PARAMS.iter().filter(move |p| p.group == group)
    }

    /// Look up a parameter by display name.
    pub fn by_name(name: &str) -> Option<&'static ParamInfo> {
        PARAMS.iter().find(|p| p.name == name)
    }

    /// Current value in `params`.
    #[inline]
    pub fn get(&self, params: &SimParams) -> f32 {
        (self.get)(params)
    }

    /// Write `value` into `params` unchanged.
    #[inline]
    pub fn set(&self, params: &mut SimParams, value: f32) {
        (self.set)(params, value)
    }

    /// Write `value` clamped to `[min, max]`, returning what was stored.
    pub fn set_clamped(&self, params: &mut SimParams, value: f32) -> f32 {
        let v = value.clamp(self.min, self.max);
        (self.set)(params, v);
        v
    }
}

static PARAMS: [ParamInfo; 12] = [
    ParamInfo {
        name: "Length Scale",
        unit: "m",
        tooltip: "Width of the simulation space",
        group: ParamGroup::Scale,
        min: 0.001,
        max: 100.0,
        get: |p| p.length_scale,
        set: |p, v| p.length_scale = v,
    },
    ParamInfo {
        name: "Time Scale",
        unit: "unitless",
        tooltip: "Seconds of simulation time per second of real time",
        group: ParamGroup::Scale,
        min: 0.0,
        max: 100.0,
        get: |p| p.time_scale,
        set: |p, v| p.time_scale = v,
    },
    ParamInfo {
        name: "Viscosity",
        unit: "m^2/s",
        tooltip: "Kinematic viscosity at background temperature and standard pressure",
        group: ParamGroup::Fluid,
        min: 1e-6,
        max: 1e-3,
        get: |p| p.visc,
        set: |p, v| p.visc = v,
    },
    ParamInfo {
        name: "Molecular Diffusion",
        unit: "m^2/s",
        tooltip: "Diffusivity at background temperature and standard pressure",
        group: ParamGroup::Fluid,
        min: 1e-6,
        max: 1e-3,
        get: |p| p.diff,
        set: |p, v| p.diff = v,
    },
    ParamInfo {
        name: "Thermal Diffusion",
        unit: "m^2/s",
        tooltip: "Thermal diffusivity at background temperature and standard pressure",
        group: ParamGroup::Fluid,
        min: 1e-6,
        max: 1e-3,
        get: |p| p.diff_temp,
        set: |p, v| p.diff_temp = v,
    },
    ParamInfo {
        name: "Gravitational Force",
        unit: "m/s^2",
        tooltip: "Gravitational acceleration",
        group: ParamGroup::Background,
        min: -100.0,
        max: 100.0,
        get: |p| p.grav,
        set: |p, v| p.grav = v,
    },
    ParamInfo {
        name: "Background Density",
        unit: "kg/m^3",
        tooltip: "Density of background medium",
        group: ParamGroup::Background,
        min: 0.0,
        max: 1000.0,
        get: |p| p.air_density,
        set: |p, v| p.air_density = v,
    },
    ParamInfo {
        name: "Mass Ratio",
        unit: "unitless",
        tooltip: "Molar mass of background medium divided by molar mass of fluid",
        group: ParamGroup::Background,
        min: 0.0,
        max: 1000.0,
        get: |p| p.mass_ratio,
        set: |p, v| p.mass_ratio = v,
    },
    ParamInfo {
        name: "Background Temperature",
        unit: "K",
        tooltip: "Temperature of background medium",
        group: ParamGroup::Background,
        min: 1.0,
        max: 10000.0,
        get: |p| p.air_temp,
        set: |p, v| p.air_temp = v,
    },
    ParamInfo {
        name: "Density Decay Rate",
        unit: "1/s",
        tooltip: "Rate at which fluid goes proportionally to zero",
        group: ParamGroup::Decay,
        min: 0.0,
        max: 1000.0,
        get: |p| p.dens_decay,
        set: |p, v| p.dens_decay = v,
    },
    ParamInfo {
        name: "Decay Temperature Factor",
        unit: "1/K",
        tooltip: "Reduction in density decay per degree above background temperature",
        group: ParamGroup::Decay,
        min: 0.0,
        max: 1000.0,
        get: |p| p.temp_factor,
        set: |p, v| p.temp_factor = v,
    },
    ParamInfo {
        name: "Temperature Decay Rate",
        unit: "1/s",
        tooltip: "Rate at which temperature goes proportionally to the background temperature",
        group: ParamGroup::Decay,
        min: 0.0,
        max: 1000.0,
        get: |p| p.temp_decay,
        set: |p, v| p.temp_decay = v,
    },
];
