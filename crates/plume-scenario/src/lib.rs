//! JSON scenario files for the Plume smoke simulator.
//!
//! A scenario bundles a parameter set, a list of emitters and the grid
//! resolution. Load one with [`Scenario::from_path`] or
//! [`Scenario::from_json_str`], then call [`Scenario::build`] to get a
//! ready [`Simulation`]. See [`schema`] for the document layout.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod schema;

use std::fs;
use std::path::Path;

use serde::Deserialize;

use plume_core::SimParams;
use plume_engine::Simulation;
use plume_source::EmitterSpec;

pub use error::ScenarioError;
pub use schema::{ParamsConfig, SourceConfig, WindowProps, DEFAULT_MAX_FRAME_RATE, DEFAULT_RESOLUTION};

/// A parsed scenario document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Physical and solver parameters.
    #[serde(default)]
    pub params: ParamsConfig,
    /// Emitters, added in document order.
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
    /// Grid resolution and frame-rate cap.
    #[serde(default)]
    pub window_props: WindowProps,
}

impl Scenario {
    /// Parse a scenario from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a scenario file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// The parameter set, unvalidated.
    pub fn sim_params(&self) -> SimParams {
        self.params.into()
    }

    /// Interior cells per side.
    pub fn resolution(&self) -> usize {
        self.window_props.resolution
    }

    /// Frame-rate cap for realtime stepping.
    pub fn max_frame_rate(&self) -> u32 {
        self.window_props.max_frame_rate
    }

    /// The emitters in document order.
    pub fn emitter_specs(&self) -> Vec<EmitterSpec> {
        self.sources.iter().map(SourceConfig::to_spec).collect()
    }

    /// Create a simulation with this scenario's parameters and emitters.
    ///
    /// `seed` drives the dynamic emitters. Fails if the parameters, the
    /// resolution or any emitter is rejected.
    pub fn build(&self, seed: u64) -> Result<Simulation, ScenarioError> {
        let mut sim = Simulation::new(self.resolution(), self.sim_params(), seed)?;
        for spec in self.emitter_specs() {
            sim.add_emitter(spec)?;
        }
        Ok(sim)
    }
}
