//! Serde model of a scenario document.
//!
//! ```json
//! {
//!   "params": { "lengthScale": 1.0, "visc": 1.5e-5, "gravityOn": true, ... },
//!   "sources": [
//!     { "type": "gas", "shape": "circle", "xCenter": 0.0, "yCenter": -0.6,
//!       "radius": 0.1, "flowRate": 2.0, "sourceTemp": 500.0 },
//!     { "type": "windBoundary", "speed": 0.3, "isDynamic": true, "speedVar": 0.1 }
//!   ],
//!   "windowProps": { "resolution": 128, "maxFrameRate": 60 }
//! }
//! ```
//!
//! Missing parameters take their [`SimParams::default()`] values. Keys the
//! loader does not know (e.g. window widths) are ignored.

use serde::de::{self, Deserializer};
use serde::Deserialize;

use plume_core::SimParams;
use plume_source::{EmitterSpec, Shape, Variation};

/// Grid resolution when a scenario has no `windowProps`.
pub const DEFAULT_RESOLUTION: usize = 64;

/// Frame-rate cap when a scenario has no `windowProps.maxFrameRate`.
pub const DEFAULT_MAX_FRAME_RATE: u32 = 60;

const SHAPE_NAMES: &[&str] = &["point", "square", "circle", "diamond"];

/// The `"params"` object. Fields mirror [`SimParams`].
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParamsConfig {
    pub length_scale: f32,
    pub time_scale: f32,
    pub visc: f32,
    pub diff: f32,
    pub grav: f32,
    pub air_density: f32,
    pub mass_ratio: f32,
    pub air_temp: f32,
    pub diff_temp: f32,
    pub dens_decay: f32,
    pub temp_factor: f32,
    pub temp_decay: f32,
    pub closed_boundaries: bool,
    pub advanced_coefficients: bool,
    pub gravity_on: bool,
    pub temperature_on: bool,
    pub solver_steps: u32,
}

impl Default for ParamsConfig {
    fn default() -> Self {
        let p = SimParams::default();
        Self {
            length_scale: p.length_scale,
            time_scale: p.time_scale,
            visc: p.visc,
            diff: p.diff,
            grav: p.grav,
            air_density: p.air_density,
            mass_ratio: p.mass_ratio,
            air_temp: p.air_temp,
            diff_temp: p.diff_temp,
            dens_decay: p.dens_decay,
            temp_factor: p.temp_factor,
            temp_decay: p.temp_decay,
            closed_boundaries: p.closed_boundaries,
            advanced_coefficients: p.advanced_coefficients,
            gravity_on: p.gravity_on,
            temperature_on: p.temperature_on,
            solver_steps: p.solver_steps,
        }
    }
}

impl From<ParamsConfig> for SimParams {
    fn from(c: ParamsConfig) -> Self {
        Self {
            length_scale: c.length_scale,
            time_scale: c.time_scale,
            visc: c.visc,
            diff: c.diff,
            grav: c.grav,
            air_density: c.air_density,
            mass_ratio: c.mass_ratio,
            air_temp: c.air_temp,
            diff_temp: c.diff_temp,
            dens_decay: c.dens_decay,
            temp_factor: c.temp_factor,
            temp_decay: c.temp_decay,
            closed_boundaries: c.closed_boundaries,
            advanced_coefficients: c.advanced_coefficients,
            gravity_on: c.gravity_on,
            temperature_on: c.temperature_on,
            solver_steps: c.solver_steps,
        }
    }
}

/// One entry of the `"sources"` array, tagged by `"type"`.
///
/// Deviation keys (`flowVar`, `speedVar`, ...) are read only when
/// `isDynamic` is true and default to zero.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum SourceConfig {
    /// Gas release.
    Gas {
        #[serde(default)]
        is_dynamic: bool,
        #[serde(deserialize_with = "shape_from_name")]
        shape: Shape,
        x_center: f32,
        y_center: f32,
        radius: f32,
        flow_rate: f32,
        source_temp: f32,
        #[serde(default)]
        flow_var: f32,
        #[serde(default)]
        temp_var: f32,
    },
    /// Point wind. Angle in degrees.
    Wind {
        #[serde(default)]
        is_dynamic: bool,
        x_center: f32,
        y_center: f32,
        speed: f32,
        angle: f32,
        #[serde(default)]
        speed_var: f32,
        #[serde(default)]
        angle_var: f32,
    },
    /// Side-wall breeze.
    WindBoundary {
        #[serde(default)]
        is_dynamic: bool,
        speed: f32,
        #[serde(default)]
        speed_var: f32,
    },
    /// Fixed-temperature heat source.
    Heat {
        #[serde(default)]
        is_dynamic: bool,
        #[serde(deserialize_with = "shape_from_name")]
        shape: Shape,
        x_center: f32,
        y_center: f32,
        radius: f32,
        source_temp: f32,
        #[serde(default)]
        temp_var: f32,
    },
    /// Energy flux source.
    Energy {
        #[serde(default)]
        is_dynamic: bool,
        #[serde(deserialize_with = "shape_from_name")]
        shape: Shape,
        x_center: f32,
        y_center: f32,
        radius: f32,
        flux: f32,
        reference_temp: f32,
        reference_density: f32,
        #[serde(default)]
        flux_var: f32,
    },
}

fn shape_from_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Shape, D::Error> {
    let name = String::deserialize(deserializer)?;
    Shape::from_name(&name).ok_or_else(|| de::Error::unknown_variant(&name, SHAPE_NAMES))
}

impl SourceConfig {
    /// Whether the entry asks for per-tick resampling.
    pub fn is_dynamic(&self) -> bool {
        match *self {
            Self::Gas { is_dynamic, .. }
            | Self::Wind { is_dynamic, .. }
            | Self::WindBoundary { is_dynamic, .. }
            | Self::Heat { is_dynamic, .. }
            | Self::Energy { is_dynamic, .. } => is_dynamic,
        }
    }

    /// The grid-independent emitter this entry describes.
    pub fn to_spec(&self) -> EmitterSpec {
        let (spec, variation) = match *self {
            Self::Gas {
                shape,
                x_center,
                y_center,
                radius,
                flow_rate,
                source_temp,
                flow_var,
                temp_var,
                ..
            } => (
                EmitterSpec::gas(shape, x_center, y_center, radius, flow_rate, source_temp),
                Variation {
                    flow: flow_var,
                    temperature: temp_var,
                    ..Variation::default()
                },
            ),
            Self::Wind {
                x_center,
                y_center,
                speed,
                angle,
                speed_var,
                angle_var,
                ..
            } => (
                EmitterSpec::wind(x_center, y_center, speed, angle),
                Variation {
                    speed: speed_var,
                    angle: angle_var,
                    ..Variation::default()
                },
            ),
            Self::WindBoundary {
                speed, speed_var, ..
            } => (
                EmitterSpec::wind_boundary(speed),
                Variation {
                    speed: speed_var,
                    ..Variation::default()
                },
            ),
            Self::Heat {
                shape,
                x_center,
                y_center,
                radius,
                source_temp,
                temp_var,
                ..
            } => (
                EmitterSpec::heat(shape, x_center, y_center, radius, source_temp),
                Variation {
                    temperature: temp_var,
                    ..Variation::default()
                },
            ),
            Self::Energy {
                shape,
                x_center,
                y_center,
                radius,
                flux,
                reference_temp,
                reference_density,
                flux_var,
                ..
            } => (
                EmitterSpec::energy(
                    shape,
                    x_center,
                    y_center,
                    radius,
                    flux,
                    reference_temp,
                    reference_density,
                ),
                Variation {
                    flux: flux_var,
                    ..Variation::default()
                },
            ),
        };
        if self.is_dynamic() {
            spec.with_variation(variation)
        } else {
            spec
        }
    }
}

/// The `"windowProps"` object. Only the keys that affect the simulation
/// are read.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WindowProps {
    /// Interior cells per side.
    pub resolution: usize,
    /// Frame-rate cap for realtime stepping.
    pub max_frame_rate: u32,
}

impl Default for WindowProps {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            max_frame_rate: DEFAULT_MAX_FRAME_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_source::EmitterKind;

    #[test]
    fn missing_params_take_defaults() {
        let c: ParamsConfig = serde_json::from_str(r#"{ "visc": 0.001 }"#).unwrap();
        let p = SimParams::from(c);
        assert_eq!(p.visc, 0.001);
        assert_eq!(
            p,
            SimParams {
                visc: 0.001,
                ..SimParams::default()
            }
        );
    }

    #[test]
    fn integer_literals_accepted_for_floats() {
        let c: ParamsConfig = serde_json::from_str(r#"{ "airTemp": 300, "solverSteps": 15 }"#).unwrap();
        assert_eq!(c.air_temp, 300.0);
        assert_eq!(c.solver_steps, 15);
    }

    #[test]
    fn static_source_has_no_variation() {
        let c: SourceConfig = serde_json::from_str(
            r#"{ "type": "heat", "shape": "diamond", "xCenter": 0.1, "yCenter": 0.2,
                 "radius": 0.05, "sourceTemp": 900, "tempVar": 30 }"#,
        )
        .unwrap();
        assert!(!c.is_dynamic());
        let spec = c.to_spec();
        assert_eq!(spec.footprint.shape, Shape::Diamond);
        assert_eq!(spec.kind, EmitterKind::Heat { source_temp: 900.0 });
        assert_eq!(spec.variation, None);
    }

    #[test]
    fn dynamic_wind_boundary_keeps_speed_deviation() {
        let c: SourceConfig = serde_json::from_str(
            r#"{ "type": "windBoundary", "isDynamic": true, "speed": 0.4, "speedVar": 0.1 }"#,
        )
        .unwrap();
        let spec = c.to_spec();
        assert!(spec.is_wind_boundary());
        assert_eq!(spec.variation.map(|v| v.speed), Some(0.1));
    }

    #[test]
    fn unknown_shape_rejected() {
        let err = serde_json::from_str::<SourceConfig>(
            r#"{ "type": "gas", "shape": "hexagon", "xCenter": 0, "yCenter": 0,
                 "radius": 0.1, "flowRate": 1, "sourceTemp": 300 }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("hexagon"), "{err}");
    }

    #[test]
    fn unknown_type_rejected() {
        assert!(serde_json::from_str::<SourceConfig>(r#"{ "type": "plasma" }"#).is_err());
    }
}
