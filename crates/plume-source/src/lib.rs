//! Emitters for the Plume smoke simulator.
//!
//! An [`EmitterSpec`] describes a gas, wind, heat or energy source (or the
//! side-wall [wind boundary](EmitterSpec::wind_boundary)) in normalized
//! coordinates. An [`EmitterSet`] rasterizes specs onto a grid and
//! flattens them into [`SourceBuffers`](plume_grid::SourceBuffers) each
//! tick: velocity and density contributions add, temperature contributions
//! take the maximum.
//!
//! Dynamic emitters carry a [`Variation`] and are resampled per covered
//! cell with a caller-supplied RNG, so runs are reproducible from a seed.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod emitter;
pub mod noise;
pub mod set;
pub mod shape;

pub use emitter::{Contribution, Emitter, EmitterKind, EmitterSpec, Footprint, Variation};
pub use set::{EmitterId, EmitterSet};
pub use shape::{rasterize, CellSet, Shape};
