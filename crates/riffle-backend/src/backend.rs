//! The [`ComputeBackend`] operation contract.

use riffle_core::{BoundaryKind, ScalarField};

use crate::kernels;

/// Per-cell grid primitives shared by both execution strategies.
///
/// # Contract
///
/// - Every operation is deterministic: identical inputs produce
///   identical outputs regardless of the execution strategy, except for
///   [`relaxation_step`](ComputeBackend::relaxation_step), where the
///   serial and parallel backends run different (but
///   fixed-point-equivalent) sweep orders.
/// - Operations that write interior cells never touch boundary cells;
///   boundary values are maintained exclusively by
///   [`apply_boundary`](ComputeBackend::apply_boundary).
/// - A backend may keep internal scratch storage across calls
///   (the parallel backend's ping-pong buffer), hence `&mut self`.
///
/// # Object safety
///
/// The trait is object-safe; the simulator stores its backend as a
/// `Box<dyn ComputeBackend>`.
pub trait ComputeBackend: Send {
    /// Human-readable backend name for telemetry.
    fn name(&self) -> &str;

    /// Set every cell of `field` to zero.
    fn reset(&mut self, field: &mut ScalarField);

    /// `field[c] += dt * source[c]` for every cell, boundary included.
    fn add_source(&mut self, field: &mut ScalarField, source: &ScalarField, dt: f32);

    /// One relaxation sweep of the implicit solve
    /// `field[c] = (prev[c] + neighbor_coeff * sum4(field)) / norm`
    /// over interior cells.
    ///
    /// Serves both the diffusion solve (`neighbor_coeff = a`,
    /// `norm = 1 + 4a`) and the pressure Poisson solve
    /// (`neighbor_coeff = 1`, `norm = 4`, `prev` holding the
    /// divergence). The serial backend updates in place (Gauss-Seidel);
    /// the parallel backend reads only previous-sweep values (Jacobi).
    fn relaxation_step(
        &mut self,
        field: &mut ScalarField,
        prev: &ScalarField,
        neighbor_coeff: f32,
        norm: f32,
    );

    /// Semi-Lagrangian transport: for each interior cell, backtrace
    /// along `(vel_x, vel_y)` scaled by `dt * N`, clamp into the valid
    /// sampling range, and bilinearly resample `prev` at the traced
    /// position. Boundary cells are untouched.
    fn advect(
        &mut self,
        field: &mut ScalarField,
        prev: &ScalarField,
        vel_x: &ScalarField,
        vel_y: &ScalarField,
        dt: f32,
    );

    /// Discrete central-difference divergence of `(vel_x, vel_y)`,
    /// scaled by `-0.5 h`, written to interior cells of `div`.
    fn divergence(&mut self, vel_x: &ScalarField, vel_y: &ScalarField, div: &mut ScalarField);

    /// Subtract the pressure gradient (`0.5 / h` central differences)
    /// from both velocity components, interior cells only.
    fn subtract_gradient(
        &mut self,
        vel_x: &mut ScalarField,
        vel_y: &mut ScalarField,
        pressure: &ScalarField,
    );

    /// Overwrite the edge and corner cells of `field` per the mirror
    /// rule for `kind`.
    fn apply_boundary(&mut self, field: &mut ScalarField, kind: BoundaryKind);

    /// Bilinear interpolation of `field` at continuous coordinates.
    ///
    /// `(x, y)` must lie within `[0, width - 1) x [0, height - 1)`;
    /// advection guarantees this by clamping backtraced positions.
    fn sample_bilinear(&self, field: &ScalarField, x: f32, y: f32) -> f32 {
        kernels::sample_bilinear(field, x, y)
    }

    /// Exchange the contents of two same-shaped buffers in O(1).
    fn swap(&mut self, a: &mut ScalarField, b: &mut ScalarField) {
        a.swap(b);
    }
}
