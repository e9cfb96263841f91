//! Simulation engine orchestrating Riffle fluid worlds.
//!
//! [`Simulator`] is the primary user-facing API: it owns the
//! [`FieldSet`](riffle_core::FieldSet), seeds the initial conditions,
//! drains interaction impulses into the source buffers, and drives one
//! [`FluidStepper`](riffle_solver::FluidStepper) tick at a time against
//! the configured [`ComputeBackend`](riffle_backend::ComputeBackend).
//!
//! # Ownership model
//!
//! All mutating methods take `&mut self`, and [`Simulator::snapshot`]
//! returns a [`DensitySnapshot`] that borrows from `self`. The caller
//! therefore cannot tick while holding a snapshot — the borrow checker
//! enforces the single-writer/single-reader discipline at compile time.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod impulse;
pub mod init;
pub mod metrics;
pub mod simulator;
pub mod snapshot;

pub use impulse::{Impulse, ImpulseError, ImpulseSender};
pub use metrics::StepMetrics;
pub use simulator::Simulator;
pub use snapshot::DensitySnapshot;
