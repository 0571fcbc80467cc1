//! Deferred mutations for a simulation owned by another thread.
//!
//! A [`Command`] is the message form of one `Simulation` mutator. The
//! realtime runner applies queued commands between steps, so every
//! command takes effect on a tick boundary.

use plume_core::SimParams;
use plume_source::{EmitterId, EmitterSpec};

use crate::error::SimError;
use crate::sim::Simulation;

/// A mutation applied between steps.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replace the whole parameter set.
    SetParams(SimParams),
    /// Set one float parameter by display name (clamped to its range).
    SetParam {
        /// [`ParamInfo`](plume_core::ParamInfo) display name.
        name: String,
        /// Requested value.
        value: f32,
    },
    /// Add an emitter.
    AddEmitter(EmitterSpec),
    /// Remove an emitter by handle.
    RemoveEmitter(EmitterId),
    /// Remove the first emitter hit at a normalized point.
    RemoveEmitterAt {
        /// Normalized x.
        x: f32,
        /// Normalized y.
        y: f32,
        /// Extra hit radius.
        tolerance: f32,
    },
    /// Remove every emitter.
    ClearEmitters,
    /// Install external forcing buffers.
    SetExternalSources {
        /// Density rate.
        density: Vec<f32>,
        /// Horizontal velocity rate.
        u: Vec<f32>,
        /// Vertical velocity rate.
        v: Vec<f32>,
        /// Temperature floor.
        temperature: Vec<f32>,
    },
    /// Reallocate for a new resolution.
    Resize(usize),
    /// Return fields to background.
    ResetState,
    /// Drop external forcing.
    ResetSources,
}

/// What a successfully applied command produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The command had no return value.
    Applied,
    /// Handle of the new emitter.
    EmitterAdded(EmitterId),
    /// Handle of the emitter removed by a hit-test, if any.
    EmitterRemoved(Option<EmitterId>),
    /// Value stored after clamping.
    ParamStored(f32),
}

/// Per-command result.
pub type Receipt = Result<Outcome, SimError>;

impl Simulation {
    /// Apply one command immediately.
    pub fn apply(&mut self, command: Command) -> Receipt {
        match command {
            Command::SetParams(params) => self.set_params(params).map(|()| Outcome::Applied),
            Command::SetParam { name, value } => {
                self.set_param(&name, value).map(Outcome::ParamStored)
            }
            Command::AddEmitter(spec) => self.add_emitter(spec).map(Outcome::EmitterAdded),
            Command::RemoveEmitter(id) => self
                .remove_emitter(id)
                .map(|_| Outcome::EmitterRemoved(Some(id))),
            Command::RemoveEmitterAt { x, y, tolerance } => Ok(Outcome::EmitterRemoved(
                self.remove_emitter_at(x, y, tolerance),
            )),
            Command::ClearEmitters => {
                self.clear_emitters();
                Ok(Outcome::Applied)
            }
            Command::SetExternalSources {
                density,
                u,
                v,
                temperature,
            } => self
                .set_external_sources(&density, &u, &v, &temperature)
                .map(|()| Outcome::Applied),
            Command::Resize(n) => self.resize(n).map(|()| Outcome::Applied),
            Command::ResetState => {
                self.reset_state();
                Ok(Outcome::Applied)
            }
            Command::ResetSources => {
                self.reset_sources();
                Ok(Outcome::Applied)
            }
        }
    }
}
