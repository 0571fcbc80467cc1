//! Physical and solver parameters.
//!
//! [`SimParams`] is a plain struct with public fields: it is the control
//! surface that a GUI, a config loader or a test drives directly. Call
//! [`SimParams::validate()`] after mutating it to surface fatal errors and
//! non-fatal [`ParamWarning`]s.

use crate::error::{ConfigError, ParamWarning};

/// Physical constants, feature toggles and the relaxation iteration count.
///
/// All lengths are in metres, times in seconds and temperatures in kelvin.
/// Unused terms (e.g. `air_temp` while temperature coupling is off) are
/// simply ignored by the solver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimParams {
    /// Physical width of the simulated square (m).
    pub length_scale: f32,
    /// Simulated seconds per real second.
    pub time_scale: f32,
    /// Kinematic viscosity at background temperature (m²/s).
    pub visc: f32,
    /// Molecular diffusivity of the injected gas (m²/s).
    pub diff: f32,
    /// Gravitational acceleration (m/s²). Positive values push dense
    /// gas towards higher `j`.
    pub grav: f32,
    /// Density of the background medium (kg/m³).
    pub air_density: f32,
    /// Molar mass of the background medium divided by that of the gas.
    pub mass_ratio: f32,
    /// Background temperature (K).
    pub air_temp: f32,
    /// Thermal diffusivity at background temperature (m²/s).
    pub diff_temp: f32,
    /// Density decay rate (1/s).
    pub dens_decay: f32,
    /// Decay falloff per kelvin above background (1/K).
    pub temp_factor: f32,
    /// Temperature relaxation rate towards `air_temp` (1/s).
    pub temp_decay: f32,
    /// Closed walls reflect velocity and hold density; open walls drain it.
    pub closed_boundaries: bool,
    /// Scale transport coefficients with local temperature and density.
    pub advanced_coefficients: bool,
    /// Apply buoyancy to the vertical velocity.
    pub gravity_on: bool,
    /// Evolve the temperature field.
    pub temperature_on: bool,
    /// Gauss-Seidel sweeps per diffusion and projection solve.
    ///
    /// Zero is clamped to one; see [`effective_solver_steps`](Self::effective_solver_steps).
    pub solver_steps: u32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            length_scale: 1.0,
            time_scale: 1.0,
            visc: 0.0,
            diff: 0.0,
            grav: 0.0,
            air_density: 0.0,
            mass_ratio: 0.0,
            air_temp: 0.0,
            diff_temp: 0.0,
            dens_decay: 0.0,
            temp_factor: 0.0,
            temp_decay: 0.0,
            closed_boundaries: true,
            advanced_coefficients: false,
            gravity_on: false,
            temperature_on: false,
            solver_steps: 20,
        }
    }
}

impl SimParams {
    /// Passive smoke: viscosity and diffusion only.
    pub fn basic(length_scale: f32, time_scale: f32, visc: f32, diff: f32) -> Self {
        Self {
            length_scale,
            time_scale,
            visc,
            diff,
            ..Self::default()
        }
    }

    /// [`basic`](Self::basic) plus compositional buoyancy at background
    /// temperature.
    #[allow(clippy::too_many_arguments)]
    pub fn buoyant(
        length_scale: f32,
        time_scale: f32,
        visc: f32,
        diff: f32,
        grav: f32,
        air_density: f32,
        mass_ratio: f32,
    ) -> Self {
        Self {
            grav,
            air_density,
            mass_ratio,
            gravity_on: true,
            ..Self::basic(length_scale, time_scale, visc, diff)
        }
    }

    /// [`buoyant`](Self::buoyant) plus an evolving temperature field and
    /// temperature-dependent transport coefficients.
    #[allow(clippy::too_many_arguments)]
    pub fn thermal(
        length_scale: f32,
        time_scale: f32,
        visc: f32,
        diff: f32,
        grav: f32,
        air_density: f32,
        mass_ratio: f32,
        air_temp: f32,
        diff_temp: f32,
    ) -> Self {
        Self {
            air_temp,
            diff_temp,
            temperature_on: true,
            advanced_coefficients: true,
            ..Self::buoyant(
                length_scale,
                time_scale,
                visc,
                diff,
                grav,
                air_density,
                mass_ratio,
            )
        }
    }

    /// [`thermal`](Self::thermal) plus density and temperature decay.
    #[allow(clippy::too_many_arguments)]
    pub fn full(
        length_scale: f32,
        time_scale: f32,
        visc: f32,
        diff: f32,
        grav: f32,
        air_density: f32,
        mass_ratio: f32,
        air_temp: f32,
        diff_temp: f32,
        dens_decay: f32,
        temp_factor: f32,
        temp_decay: f32,
    ) -> Self {
        Self {
            dens_decay,
            temp_factor,
            temp_decay,
            ..Self::thermal(
                length_scale,
                time_scale,
                visc,
                diff,
                grav,
                air_density,
                mass_ratio,
                air_temp,
                diff_temp,
            )
        }
    }

    /// Check the parameter set.
    ///
    /// Fatal problems are returned as `Err`. On success, returns the
    /// (possibly empty) list of non-fatal warnings.
    pub fn validate(&self) -> Result<Vec<ParamWarning>, ConfigError> {
        if !self.length_scale.is_finite() || self.length_scale <= 0.0 {
            return Err(ConfigError::InvalidLengthScale {
                value: self.length_scale,
            });
        }
        if !self.time_scale.is_finite() || self.time_scale < 0.0 {
            return Err(ConfigError::InvalidTimeScale {
                value: self.time_scale,
            });
        }
        for (name, value) in self.physical_constants() {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteParameter { name, value });
            }
        }
        if (self.advanced_coefficients || self.gravity_on) && self.air_density == 0.0 {
            return Err(ConfigError::ZeroBackgroundDensity);
        }
        let thermal_buoyancy = self.gravity_on && self.temperature_on;
        if (self.advanced_coefficients || thermal_buoyancy) && self.air_temp == 0.0 {
            return Err(ConfigError::ZeroBackgroundTemperature);
        }

        let mut warnings = Vec::new();
        if self.solver_steps == 0 {
            warnings.push(ParamWarning::SolverStepsClamped {
                configured: self.solver_steps,
            });
        }
        Ok(warnings)
    }

    /// Number of Gauss-Seidel sweeps actually performed, never zero.
    #[inline]
    pub fn effective_solver_steps(&self) -> u32 {
        self.solver_steps.max(1)
    }

    /// Simulated time advanced by a real-time step of `time_step` seconds.
    #[inline]
    pub fn sim_dt(&self, time_step: f32) -> f32 {
        time_step * self.time_scale
    }

    fn physical_constants(&self) -> [(&'static str, f32); 10] {
        [
            ("visc", self.visc),
            ("diff", self.diff),
            ("grav", self.grav),
            ("air_density", self.air_density),
            ("mass_ratio", self.mass_ratio),
            ("air_temp", self.air_temp),
            ("diff_temp", self.diff_temp),
            ("dens_decay", self.dens_decay),
            ("temp_factor", self.temp_factor),
            ("temp_decay", self.temp_decay),
        ]
    }
}
