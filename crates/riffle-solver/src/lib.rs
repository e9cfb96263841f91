//! The Stable Fluids stepping algorithm.
//!
//! [`FluidStepper`] implements one simulation tick — velocity update,
//! then density update — as a fixed sequence of [`ComputeBackend`]
//! operation calls over a [`FieldSet`]. The algorithm is written once;
//! instantiating it against the serial or the parallel backend yields
//! the same physics, so the two execution strategies cannot drift.
//!
//! [`ComputeBackend`]: riffle_backend::ComputeBackend
//! [`FieldSet`]: riffle_core::FieldSet

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod stepper;

pub use stepper::FluidStepper;
