//! Core types and parameters for the Plume smoke simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Plume workspace:
//! grid geometry, field kinds and their boundary policies, the physical
//! parameter set, and error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod grid;
pub mod param_info;
pub mod params;

pub use error::{ConfigError, ParamWarning, SourceError};
pub use field::{BoundaryMode, FieldKind};
pub use grid::Grid;
pub use param_info::{ParamGroup, ParamInfo};
pub use params::SimParams;
