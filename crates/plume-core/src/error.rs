//! Error types for the Plume simulator.
//!
//! Organized by subsystem: configuration (parameter and grid validation)
//! and sources (emitter construction and application). Non-fatal
//! diagnostics are reported as [`ParamWarning`] values rather than errors.

use std::error::Error;
use std::fmt;

/// Fatal configuration errors detected by [`SimParams::validate()`](crate::SimParams::validate)
/// or grid construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid resolution must be at least one interior cell per side.
    InvalidResolution {
        /// The rejected resolution.
        n: usize,
    },
    /// Length scale is zero, negative, or not finite.
    ///
    /// The cell size `length_scale / N` feeds both the diffusion and the
    /// advection scaling, so there is no safe fallback value.
    InvalidLengthScale {
        /// The rejected value.
        value: f32,
    },
    /// Time scale is negative or not finite.
    InvalidTimeScale {
        /// The rejected value.
        value: f32,
    },
    /// Background temperature is zero while temperature-dependent terms
    /// (advanced coefficients or thermal buoyancy) are enabled.
    ZeroBackgroundTemperature,
    /// Background density is zero while buoyancy or advanced
    /// coefficients are enabled.
    ZeroBackgroundDensity,
    /// A physical constant is NaN or infinite.
    NonFiniteParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidResolution { n } => {
                write!(f, "grid resolution must be at least 1, got {n}")
            }
            Self::InvalidLengthScale { value } => {
                write!(f, "length_scale must be finite and positive, got {value}")
            }
            Self::InvalidTimeScale { value } => {
                write!(f, "time_scale must be finite and >= 0, got {value}")
            }
            Self::ZeroBackgroundTemperature => write!(
                f,
                "air_temp must be non-zero when advanced coefficients or thermal buoyancy are enabled"
            ),
            Self::ZeroBackgroundDensity => write!(
                f,
                "air_density must be non-zero when gravity or advanced coefficients are enabled"
            ),
            Self::NonFiniteParameter { name, value } => {
                write!(f, "parameter '{name}' must be finite, got {value}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Non-fatal parameter diagnostics.
///
/// Returned alongside a successful validation. The simulation still runs,
/// but with an adjusted effective value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamWarning {
    /// `solver_steps` was 0, which would silently disable diffusion and
    /// projection. One sweep is used instead.
    SolverStepsClamped {
        /// The configured value.
        configured: u32,
    },
}

impl fmt::Display for ParamWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SolverStepsClamped { configured } => write!(
                f,
                "solver_steps {configured} disables relaxation; clamped to 1"
            ),
        }
    }
}

/// Errors from the emitter subsystem.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceError {
    /// Emitter indices were rasterized for a different grid resolution.
    ///
    /// Raised instead of writing through stale offsets after a resize.
    /// Call `EmitterSet::rebuild()` with the new grid first.
    StaleIndices {
        /// Resolution the indices were built for.
        built_for: usize,
        /// Resolution of the target buffers.
        current: usize,
    },
    /// No emitter with the given handle exists.
    UnknownEmitter {
        /// The handle that was not found.
        id: u64,
    },
    /// Emitter radius is negative or not finite.
    InvalidRadius {
        /// The rejected value.
        value: f32,
    },
    /// Emitter center is not finite.
    InvalidCenter {
        /// Rejected x coordinate.
        x: f32,
        /// Rejected y coordinate.
        y: f32,
    },
    /// Energy emitter reference density is zero, negative, or not finite.
    ///
    /// The flux-to-temperature conversion divides by it.
    InvalidReferenceDensity {
        /// The rejected value.
        value: f32,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleIndices { built_for, current } => write!(
                f,
                "emitter indices built for N={built_for} used on grid N={current}"
            ),
            Self::UnknownEmitter { id } => write!(f, "no emitter with id {id}"),
            Self::InvalidRadius { value } => {
                write!(f, "emitter radius must be finite and >= 0, got {value}")
            }
            Self::InvalidCenter { x, y } => {
                write!(f, "emitter center must be finite, got ({x}, {y})")
            }
            Self::InvalidReferenceDensity { value } => {
                write!(f, "reference density must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for SourceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display_mentions_value() {
        let msg = ConfigError::InvalidLengthScale { value: -2.0 }.to_string();
        assert!(msg.contains("length_scale"));
        assert!(msg.contains("-2"));
    }

    #[test]
    fn stale_indices_display() {
        let msg = SourceError::StaleIndices {
            built_for: 64,
            current: 32,
        }
        .to_string();
        assert!(msg.contains("N=64"));
        assert!(msg.contains("N=32"));
    }

    #[test]
    fn warning_display() {
        let msg = ParamWarning::SolverStepsClamped { configured: 0 }.to_string();
        assert!(msg.contains("clamped to 1"));
    }
}
