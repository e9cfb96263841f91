//! Compute backends for the Riffle fluid solver.
//!
//! The stepping algorithm is written once against the [`ComputeBackend`]
//! operation contract; this crate provides the two implementations:
//!
//! - [`SerialBackend`] — nested per-cell loops on one thread. Relaxation
//!   is Gauss-Seidel: a sweep may read neighbour values already updated
//!   within the same sweep.
//! - [`ParallelBackend`] — data-parallel passes over grid rows (rayon).
//!   Every pass reads from one buffer and writes to a distinct buffer,
//!   so no unit of work can observe a partially-updated neighbour from
//!   its own pass. Relaxation is therefore Jacobi, ping-ponged through a
//!   backend-owned scratch buffer.
//!
//! Both relaxation variants converge to the same fixed point given
//! enough sweeps; the sweep count is a tuning parameter, not part of
//! the contract. All non-iterative operations produce bit-identical
//! results across the two backends.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod kernels;
pub mod parallel;
pub mod serial;

pub use backend::ComputeBackend;
pub use parallel::ParallelBackend;
pub use serial::SerialBackend;
