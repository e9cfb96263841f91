//! Riffle: dual-backend Stable Fluids simulation for real-time applications.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Riffle sub-crates. For most users, adding `riffle` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use riffle::prelude::*;
//!
//! // A 64x64 grid (62x62 interior) stepped with the serial backend.
//! let config = FluidConfig::new(64, 64);
//! let mut sim = Simulator::new(config, Box::new(SerialBackend::new())).unwrap();
//!
//! // Stir the fluid and advance a few fixed timesteps.
//! let input = sim.impulse_sender();
//! input.send(Impulse::force_at(32, 32, 5.0, 0.0)).unwrap();
//! for _ in 0..10 {
//!     sim.tick(1.0 / 60.0);
//! }
//!
//! // Hand the density off for grayscale display.
//! let snapshot = sim.snapshot();
//! assert_eq!(snapshot.tick_id(), TickId(10));
//! let pixel = snapshot.luminance(32, 32);
//! assert!((0.0..=1.0).contains(&pixel));
//! ```
//!
//! Swapping `SerialBackend` for [`backend::ParallelBackend`] changes the
//! execution strategy, not the physics: the stepping algorithm is written
//! once against the [`backend::ComputeBackend`] contract.
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `riffle-core` | Configuration, fields, boundary kinds, IDs |
//! | [`backend`] | `riffle-backend` | The operation contract and both backends |
//! | [`solver`] | `riffle-solver` | The Stable Fluids stepping algorithm |
//! | [`engine`] | `riffle-engine` | Simulator lifecycle, impulses, snapshots |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Configuration, field buffers, boundary kinds, and IDs (`riffle-core`).
pub use riffle_core as types;

/// The [`backend::ComputeBackend`] contract and its serial and parallel
/// implementations (`riffle-backend`).
pub use riffle_backend as backend;

/// The Stable Fluids stepping algorithm (`riffle-solver`).
pub use riffle_solver as solver;

/// Simulator lifecycle, impulse ingress, metrics, and snapshots
/// (`riffle-engine`).
pub use riffle_engine as engine;

/// Common imports for typical Riffle usage.
///
/// ```rust
/// use riffle::prelude::*;
/// ```
pub mod prelude {
    pub use riffle_backend::{ComputeBackend, ParallelBackend, SerialBackend};
    pub use riffle_core::{BoundaryKind, ConfigError, FieldSet, FluidConfig, ScalarField, TickId};
    pub use riffle_engine::{
        DensitySnapshot, Impulse, ImpulseError, ImpulseSender, Simulator, StepMetrics,
    };
    pub use riffle_solver::FluidStepper;
}
