//! Numerical kernels for the Plume smoke simulator.
//!
//! Every kernel operates on plain `[f32]` slices laid out on a padded
//! [`Grid`](plume_core::Grid) and finishes with a boundary pass, so the
//! output can feed the next stencil directly:
//!
//! - [`diffuse`]: implicit diffusion by Gauss-Seidel relaxation, generic
//!   over a per-cell [`Coefficient`]
//! - [`advect`]: semi-Lagrangian transport with bilinear sampling
//! - [`project`]: Hodge projection towards a divergence-free velocity
//! - [`convect`]: buoyancy from the local mixture density
//! - [`dissipate`] / [`dissipate_with_falloff`]: relaxation towards an
//!   equilibrium value

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod advect;
pub mod buoyancy;
pub mod coefficient;
pub mod ctx;
pub mod diffuse;
pub mod dissipate;
pub mod mixing;
pub mod project;

pub use advect::advect;
pub use buoyancy::convect;
pub use coefficient::{Coefficient, Constant, Transport, TransportCoefficient};
pub use ctx::SolverCtx;
pub use diffuse::diffuse;
pub use dissipate::{dissipate, dissipate_with_falloff};
pub use project::{divergence, max_divergence, project};
