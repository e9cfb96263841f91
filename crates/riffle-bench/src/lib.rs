//! Benchmark profiles for the Riffle fluid simulation workspace.
//!
//! Provides pre-built configurations shared by the criterion benches:
//!
//! - [`reference_profile`]: 128x128 grid, reference coefficients
//! - [`stress_profile`]: 512x512 grid for backend scaling comparisons

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use riffle_core::FluidConfig;

/// Fixed timestep used by all profiles (60 Hz).
pub const BENCH_DT: f32 = 1.0 / 60.0;

/// Reference profile: 128x128 grid with the original coefficients.
pub fn reference_profile(seed: u64) -> FluidConfig {
    let mut config = FluidConfig::new(128, 128);
    config.seed = seed;
    config
}

/// Stress profile: 512x512 grid, where the parallel backend's
/// per-dispatch overhead is amortized over enough cells to matter.
pub fn stress_profile(seed: u64) -> FluidConfig {
    let mut config = FluidConfig::new(512, 512);
    config.seed = seed;
    config
}
