//! Core types for the Riffle fluid simulation workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the grid configuration, the scalar field buffers the solver operates
//! on, the boundary classification, and the shared error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod field;
pub mod id;

pub use config::{ConfigError, FluidConfig};
pub use field::{BoundaryKind, FieldSet, ScalarField};
pub use id::TickId;
