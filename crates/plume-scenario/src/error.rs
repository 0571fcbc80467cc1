//! Errors from loading and instantiating scenarios.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use plume_engine::SimError;

/// Errors from [`Scenario`](crate::Scenario) loading and building.
#[derive(Debug)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// The document is not valid scenario JSON.
    Parse(serde_json::Error),
    /// The loaded values were rejected by the simulation.
    Sim(SimError),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "reading {}: {source}", path.display()),
            Self::Parse(e) => write!(f, "parse: {e}"),
            Self::Sim(e) => write!(f, "scenario rejected: {e}"),
        }
    }
}

impl Error for ScenarioError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Sim(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for ScenarioError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<SimError> for ScenarioError {
    fn from(e: SimError) -> Self {
        Self::Sim(e)
    }
}
