//! Plume: real-time 2-D smoke simulation.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Plume sub-crates. For most users, adding `plume` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use plume::prelude::*;
//!
//! let params = SimParams::basic(1.0, 1.0, 1e-4, 1e-4);
//! let mut sim = Simulation::new(32, params, 42).unwrap();
//! sim.add_emitter(EmitterSpec::gas(Shape::Circle, 0.0, -0.5, 0.1, 1.0, 300.0))
//!     .unwrap();
//!
//! let metrics = sim.step(1.0 / 60.0).unwrap();
//! assert_eq!(metrics.emitter_count, 1);
//! assert!(sim.total_density() > 0.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `plume-core` | Grid geometry, parameters, field kinds, errors |
//! | [`grid`] | `plume-grid` | Field buffers, double buffers, boundary evaluator |
//! | [`solver`] | `plume-solver` | Diffusion, advection, projection, buoyancy, decay |
//! | [`source`] | `plume-source` | Emitter shapes, specs and the emitter set |
//! | [`engine`] | `plume-engine` | The step orchestrator and the realtime runner |
//! | [`scenario`] | `plume-scenario` | JSON scenario loading |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, parameters and errors (`plume-core`).
///
/// Contains [`types::Grid`], [`types::SimParams`], [`types::FieldKind`]
/// and the error enums shared by every crate.
pub use plume_core as types;

/// Field storage and boundary conditions (`plume-grid`).
pub use plume_grid as grid;

/// Numerical kernels (`plume-solver`).
///
/// Each stage of a step is a free function over
/// [`grid::Field`] buffers, usable on its own.
pub use plume_solver as solver;

/// Emitters and source injection (`plume-source`).
pub use plume_source as source;

/// Step orchestration (`plume-engine`).
///
/// [`engine::Simulation`] for synchronous stepping,
/// [`engine::RealtimeSim`] for a capped-rate background thread.
pub use plume_engine as engine;

/// JSON scenario files (`plume-scenario`).
pub use plume_scenario as scenario;

/// Common imports for typical Plume usage.
///
/// ```rust
/// use plume::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use plume_core::{FieldKind, Grid, ParamWarning, SimParams};

    // Errors
    pub use plume_core::{ConfigError, SourceError};
    pub use plume_engine::{RealtimeError, SimError};
    pub use plume_scenario::ScenarioError;

    // Fields
    pub use plume_grid::Field;

    // Emitters
    pub use plume_source::{EmitterId, EmitterKind, EmitterSpec, Shape, Variation};

    // Engine
    pub use plume_engine::{
        Command, FieldSnapshot, FrameClock, Outcome, RealtimeSim, Simulation, StepMetrics,
    };

    // Scenarios
    pub use plume_scenario::Scenario;
}
