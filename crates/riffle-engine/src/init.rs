//! Initial conditions.
//!
//! Seeds the field set the way the reference scene does: a smooth
//! density bump peaked at the grid centre, and a per-cell uniform
//! velocity perturbation so the flow has nontrivial vorticity from the
//! first tick. The perturbation comes from a ChaCha8 RNG seeded by the
//! configuration, so a given seed always reproduces the same run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use riffle_core::{FieldSet, ScalarField};

/// Spread constant for the density bump.
const DENSITY_SPREAD: f32 = 10.0;

/// Fill `field` with a Gaussian bump peaked at the grid centre.
///
/// `value = exp(-(x^2 + y^2) * k)` with `x`, `y` the cell position
/// normalized to `[-1, 1]` across each axis.
pub fn seed_density(field: &mut ScalarField) {
    let w = field.width() as f32;
    let h = field.height() as f32;
    for j in 0..field.height() {
        for i in 0..field.width() {
            let x = (i as f32 - w / 2.0) / (w / 2.0);
            let y = (j as f32 - h / 2.0) / (h / 2.0);
            field.set(i, j, (-(x * x + y * y) * DENSITY_SPREAD).exp());
        }
    }
}

/// Fill both velocity components with uniform samples in `[-0.5, 0.5)`.
pub fn seed_velocity(vel_x: &mut ScalarField, vel_y: &mut ScalarField, seed: u64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for j in 0..vel_x.height() {
        for i in 0..vel_x.width() {
            vel_x.set(i, j, rng.random_range(-0.5f32..0.5));
            vel_y.set(i, j, rng.random_range(-0.5f32..0.5));
        }
    }
}

/// Seed a freshly allocated field set.
pub fn seed_fields(fields: &mut FieldSet, seed: u64) {
    seed_density(&mut fields.density);
    seed_velocity(&mut fields.velocity_x, &mut fields.velocity_y, seed);
}
