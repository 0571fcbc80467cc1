//! Field storage for the Plume smoke simulator.
//!
//! Every quantity lives in a dense `(N+2)²` [`Field`]. Evolving quantities
//! are held as a [`FieldPair`] (current plus scratch), grouped per grid in a
//! [`FieldStore`]; per-tick forcing lives in [`SourceBuffers`]. The
//! [`boundary`] module fills the ghost ring after interior updates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod field;
pub mod ops;
pub mod pair;
pub mod store;

pub use boundary::set_boundary;
pub use field::Field;
pub use pair::FieldPair;
pub use store::{FieldStore, SourceBuffers};
