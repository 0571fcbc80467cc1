//! Errors surfaced by the simulation aggregate and the realtime runner.

use std::error::Error;
use std::fmt;

use plume_core::{ConfigError, FieldKind, SourceError};

/// Errors from [`Simulation`](crate::Simulation) operations.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// Parameters or grid size were rejected.
    Config(ConfigError),
    /// An emitter could not be built, found or applied.
    Source(SourceError),
    /// An external source buffer does not match the grid allocation.
    ExternalSourceLength {
        /// `(N+2)²` for the current grid.
        expected: usize,
        /// Length of the rejected buffer.
        got: usize,
    },
    /// No float parameter has this display name.
    UnknownParameter {
        /// The rejected name.
        name: String,
    },
    /// A field held NaN or infinity after a step.
    ///
    /// Only reported when finiteness checking is enabled.
    NonFiniteField {
        /// The offending field.
        field: FieldKind,
        /// Grid coordinates `(i, j)` of the first bad cell.
        cell: (usize, usize),
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Source(e) => write!(f, "source: {e}"),
            Self::ExternalSourceLength { expected, got } => write!(
                f,
                "external source buffer has {got} cells, grid needs {expected}"
            ),
            Self::UnknownParameter { name } => write!(f, "unknown parameter '{name}'"),
            Self::NonFiniteField { field, cell } => write!(
                f,
                "non-finite {field} at ({}, {})",
                cell.0, cell.1
            ),
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Source(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SourceError> for SimError {
    fn from(e: SourceError) -> Self {
        Self::Source(e)
    }
}

/// Errors talking to a [`RealtimeSim`](crate::RealtimeSim).
#[derive(Debug, PartialEq, Eq)]
pub enum RealtimeError {
    /// The tick thread has shut down.
    ShuttingDown,
    /// The command channel is full (back-pressure).
    ChannelFull,
    /// The operating system refused to start the tick thread.
    ThreadSpawnFailed {
        /// Reason reported by the OS.
        reason: String,
    },
}

impl fmt::Display for RealtimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShuttingDown => write!(f, "tick thread has shut down"),
            Self::ChannelFull => write!(f, "command channel full"),
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "failed to spawn tick thread: {reason}")
            }
        }
    }
}

impl Error for RealtimeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_convert() {
        let e: SimError = ConfigError::InvalidResolution { n: 0 }.into();
        match &e {
            SimError::Config(ConfigError::InvalidResolution { n: 0 }) => {}
            other => panic!("expected Config, got {other:?}"),
        }
        assert!(e.source().is_some());
    }

    #[test]
    fn non_finite_display_names_field() {
        let msg = SimError::NonFiniteField {
            field: FieldKind::Density,
            cell: (3, 4),
        }
        .to_string();
        assert!(msg.contains("density"));
        assert!(msg.contains("(3, 4)"));
    }
}
