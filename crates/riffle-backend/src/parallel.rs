//! Data-parallel grid-dispatch backend.

use rayon::prelude::*;
use riffle_core::{BoundaryKind, ScalarField};

use crate::backend::ComputeBackend;
use crate::kernels;

/// Backend executing each operation as a parallel pass over grid rows.
///
/// Cells within a pass are independent units of work with no ordering
/// guarantee relative to each other, but passes themselves are strictly
/// ordered: rayon's fork-join scope ends before the next pass starts,
/// so a pass never observes another pass's partial writes.
///
/// The invariant that makes this sound is that no pass reads and writes
/// the same buffer. Most operations already write a buffer distinct
/// from every buffer they read; the relaxation sweep is the exception,
/// so it runs as Jacobi through [`scratch`](Self), a backend-owned
/// ping-pong buffer swapped into the field after each sweep.
#[derive(Debug, Default)]
pub struct ParallelBackend {
    scratch: Vec<f32>,
}

impl ParallelBackend {
    /// Create a parallel backend. The scratch buffer is sized lazily on
    /// first use and reused across sweeps.
    pub fn new() -> Self {
        Self {
            scratch: Vec::new(),
        }
    }

    fn ensure_scratch(&mut self, len: usize) {
        if self.scratch.len() != len {
            self.scratch.clear();
            self.scratch.resize(len, 0.0);
        }
    }
}

impl ComputeBackend for ParallelBackend {
    fn name(&self) -> &str {
        "parallel"
    }

    fn reset(&mut self, field: &mut ScalarField) {
        field.as_mut_slice().par_iter_mut().for_each(|v| *v = 0.0);
    }

    fn add_source(&mut self, field: &mut ScalarField, source: &ScalarField, dt: f32) {
        field
            .as_mut_slice()
            .par_iter_mut()
            .zip(source.as_slice().par_iter())
            .for_each(|(v, s)| *v += dt * s);
    }

    fn relaxation_step(
        &mut self,
        field: &mut ScalarField,
        prev: &ScalarField,
        neighbor_coeff: f32,
        norm: f32,
    ) {
        let w = field.width();
        let h = field.height();
        self.ensure_scratch(w * h);

        {
            // Jacobi sweep: read the previous iterate from `field`,
            // write the next iterate into scratch. Boundary rows and
            // columns carry over unchanged; the stepper reapplies the
            // boundary rule after each sweep.
            let current = field.as_slice();
            let source = prev.as_slice();
            self.scratch
                .par_chunks_mut(w)
                .enumerate()
                .for_each(|(y, row)| {
                    if y == 0 || y == h - 1 {
                        row.copy_from_slice(&current[y * w..(y + 1) * w]);
                        return;
                    }
                    row[0] = current[y * w];
                    row[w - 1] = current[y * w + w - 1];
                    for x in 1..w - 1 {
                        let i = x + y * w;
                        let neighbours =
                            current[i - 1] + current[i + 1] + current[i - w] + current[i + w];
                        row[x] = (source[i] + neighbor_coeff * neighbours) / norm;
                    }
                });
        }

        // Publish the new iterate; the old buffer becomes the next
        // sweep's scratch.
        field.swap_buffer(&mut self.scratch);
    }

    fn advect(
        &mut self,
        field: &mut ScalarField,
        prev: &ScalarField,
        vel_x: &ScalarField,
        vel_y: &ScalarField,
        dt: f32,
    ) {
        let w = field.width();
        let h = field.height();
        let dt_scaled = kernels::advection_scale(field, dt);
        let vx = vel_x.as_slice();
        let vy = vel_y.as_slice();
        field
            .as_mut_slice()
            .par_chunks_mut(w)
            .enumerate()
            .skip(1)
            .take(h - 2)
            .for_each(|(y, row)| {
                for x in 1..w - 1 {
                    let i = x + y * w;
                    row[x] = kernels::backtrace_sample(prev, x, y, vx[i], vy[i], dt_scaled);
                }
            });
    }

    fn divergence(&mut self, vel_x: &ScalarField, vel_y: &ScalarField, div: &mut ScalarField) {
        let w = div.width();
        let h = div.height();
        let spacing = kernels::cell_spacing(div);
        let vx = vel_x.as_slice();
        let vy = vel_y.as_slice();
        div.as_mut_slice()
            .par_chunks_mut(w)
            .enumerate()
            .skip(1)
            .take(h - 2)
            .for_each(|(y, row)| {
                for x in 1..w - 1 {
                    let i = x + y * w;
                    row[x] =
                        -0.5 * spacing * (vx[i + 1] - vx[i - 1] + vy[i + w] - vy[i - w]);
                }
            });
    }

    fn subtract_gradient(
        &mut self,
        vel_x: &mut ScalarField,
        vel_y: &mut ScalarField,
        pressure: &ScalarField,
    ) {
        let w = pressure.width();
        let h = pressure.height();
        let spacing = kernels::cell_spacing(pressure);
        let p = pressure.as_slice();

        vel_x
            .as_mut_slice()
            .par_chunks_mut(w)
            .enumerate()
            .skip(1)
            .take(h - 2)
            .for_each(|(y, row)| {
                for x in 1..w - 1 {
                    let i = x + y * w;
                    row[x] -= 0.5 * (p[i + 1] - p[i - 1]) / spacing;
                }
            });

        vel_y
            .as_mut_slice()
            .par_chunks_mut(w)
            .enumerate()
            .skip(1)
            .take(h - 2)
            .for_each(|(y, row)| {
                for x in 1..w - 1 {
                    let i = x + y * w;
                    row[x] -= 0.5 * (p[i + w] - p[i - w]) / spacing;
                }
            });
    }

    fn apply_boundary(&mut self, field: &mut ScalarField, kind: BoundaryKind) {
        // The edge set is O(width + height); a parallel dispatch would
        // cost more than the pass itself.
        kernels::apply_boundary(field, kind);
    }
}
