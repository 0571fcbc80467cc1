//! Step orchestration for the Plume smoke simulator.
//!
//! Provides the [`Simulation`] aggregate that owns every field, the
//! source buffers and the emitter set, and sequences the solver kernels
//! in a fixed order each step. Around it sit the front-end helpers:
//!
//! - [`StepMetrics`]: per-step timing and field statistics
//! - [`FrameClock`]: frame-rate capping and time-step derivation
//! - [`RealtimeSim`]: the simulation on its own thread, fed by
//!   [`Command`]s and publishing [`FieldSnapshot`]s

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod command;
pub mod error;
pub mod metrics;
pub mod realtime;
pub mod sim;
pub mod snapshot;
mod tick_thread;

pub use clock::FrameClock;
pub use command::{Command, Outcome, Receipt};
pub use error::{RealtimeError, SimError};
pub use metrics::StepMetrics;
pub use realtime::RealtimeSim;
pub use sim::Simulation;
pub use snapshot::FieldSnapshot;
