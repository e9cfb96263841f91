//! Per-cell kernels shared by both backends.
//!
//! The bilinear sampler, the backtrace rule, and the boundary mirror
//! are defined once here so the two execution strategies cannot drift
//! numerically: a backend only decides *how* cells are visited, never
//! *what* is computed at a cell.

use riffle_core::{BoundaryKind, ScalarField};

/// Bilinear interpolation of `field` at continuous `(x, y)`.
///
/// `x` is interpolated first, then `y`. The caller must keep `(x, y)`
/// within `[0, width - 1) x [0, height - 1)` so the four sampled cells
/// exist; clamped backtrace positions always satisfy this.
#[inline]
pub fn sample_bilinear(field: &ScalarField, x: f32, y: f32) -> f32 {
    let i0 = x as usize;
    let i1 = i0 + 1;
    let j0 = y as usize;
    let j1 = j0 + 1;

    let s1 = x - i0 as f32;
    let s0 = 1.0 - s1;
    let t1 = y - j0 as f32;
    let t0 = 1.0 - t1;

    s0 * (t0 * field.get(i0, j0) + t1 * field.get(i0, j1))
        + s1 * (t0 * field.get(i1, j0) + t1 * field.get(i1, j1))
}

/// Backtrace the characteristic through cell `(x, y)` and resample.
///
/// `dt_scaled` is `dt * N`, the timestep converted to grid-index units
/// under the unit-square assumption. Positions are clamped to
/// `[0.5, width - 1.5]` / `[0.5, height - 1.5]` so the sample never
/// reaches past the boundary margin; clamping is boundary policy, not
/// an error path.
#[inline]
pub fn backtrace_sample(
    prev: &ScalarField,
    x: usize,
    y: usize,
    vel_x: f32,
    vel_y: f32,
    dt_scaled: f32,
) -> f32 {
    let max_x = prev.width() as f32 - 1.5;
    let max_y = prev.height() as f32 - 1.5;
    let pos_x = (x as f32 - dt_scaled * vel_x).clamp(0.5, max_x);
    let pos_y = (y as f32 - dt_scaled * vel_y).clamp(0.5, max_y);
    sample_bilinear(prev, pos_x, pos_y)
}

/// Overwrite the edge and corner cells of `field` per the mirror rule.
///
/// Edge cells copy their interior neighbour, with a sign flip on the
/// normal component for the vector kinds. Corners are the average of
/// their two adjacent edge cells and are written after the edges.
///
/// The pass is O(width + height); both backends run it inline.
pub fn apply_boundary(field: &mut ScalarField, kind: BoundaryKind) {
    let w = field.width();
    let h = field.height();
    let flip_x = if kind == BoundaryKind::VectorX { -1.0 } else { 1.0 };
    let flip_y = if kind == BoundaryKind::VectorY { -1.0 } else { 1.0 };

    for x in 1..w - 1 {
        field.set(x, 0, flip_y * field.get(x, 1));
        field.set(x, h - 1, flip_y * field.get(x, h - 2));
    }
    for y in 1..h - 1 {
        field.set(0, y, flip_x * field.get(1, y));
        field.set(w - 1, y, flip_x * field.get(w - 2, y));
    }

    field.set(0, 0, 0.5 * (field.get(1, 0) + field.get(0, 1)));
    field.set(0, h - 1, 0.5 * (field.get(1, h - 1) + field.get(0, h - 2)));
    field.set(w - 1, 0, 0.5 * (field.get(w - 2, 0) + field.get(w - 1, 1)));
    field.set(
        w - 1,
        h - 1,
        0.5 * (field.get(w - 2, h - 1) + field.get(w - 1, h - 2)),
    );
}

/// Grid-index scale factor for advection: `dt * N` with `N = width - 2`.
#[inline]
pub fn advection_scale(field: &ScalarField, dt: f32) -> f32 {
    dt * (field.width() as f32 - 2.0)
}

/// Cell spacing `h = 1 / (width - 2)` under the unit-square assumption.
#[inline]
pub fn cell_spacing(field: &ScalarField) -> f32 {
    1.0 / (field.width() as f32 - 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ramp_field(w: usize, h: usize) -> ScalarField {
        // value = x + 10*y, linear in both axes.
        let mut field = ScalarField::new(w, h);
        for y in 0..h {
            for x in 0..w {
                field.set(x, y, x as f32 + 10.0 * y as f32);
            }
        }
        field
    }

    #[test]
    fn sample_at_cell_centre_is_exact() {
        let field = ramp_field(6, 6);
        assert_eq!(sample_bilinear(&field, 2.0, 3.0), 32.0);
        assert_eq!(sample_bilinear(&field, 0.0, 0.0), 0.0);
    }

    #[test]
    fn sample_is_linear_between_cells() {
        let field = ramp_field(6, 6);
        // Bilinear interpolation reproduces a bilinear ramp exactly.
        assert!((sample_bilinear(&field, 2.5, 3.0) - 32.5).abs() < 1e-5);
        assert!((sample_bilinear(&field, 2.0, 3.25) - 34.5).abs() < 1e-5);
        assert!((sample_bilinear(&field, 1.5, 1.5) - 16.5).abs() < 1e-5);
    }

    #[test]
    fn backtrace_with_zero_velocity_returns_cell_value() {
        let field = ramp_field(8, 8);
        for y in 1..7 {
            for x in 1..7 {
                let v = backtrace_sample(&field, x, y, 0.0, 0.0, 0.5);
                assert_eq!(v, field.get(x, y));
            }
        }
    }

    #[test]
    fn backtrace_clamps_at_the_margin() {
        let field = ramp_field(8, 8);
        // Huge velocity pushes the trace far outside; the sample must
        // come from the clamped position (0.5, 0.5).
        let v = backtrace_sample(&field, 4, 4, 1e6, 1e6, 1.0);
        assert!((v - sample_bilinear(&field, 0.5, 0.5)).abs() < 1e-6);
    }

    #[test]
    fn scalar_boundary_mirrors_without_flip() {
        let mut field = ramp_field(6, 6);
        apply_boundary(&mut field, BoundaryKind::Scalar);
        for y in 1..5 {
            assert_eq!(field.get(0, y), field.get(1, y));
            assert_eq!(field.get(5, y), field.get(4, y));
        }
        for x in 1..5 {
            assert_eq!(field.get(x, 0), field.get(x, 1));
            assert_eq!(field.get(x, 5), field.get(x, 4));
        }
    }

    #[test]
    fn vector_x_flips_left_right_only() {
        let mut field = ramp_field(6, 6);
        apply_boundary(&mut field, BoundaryKind::VectorX);
        for y in 1..5 {
            assert_eq!(field.get(0, y), -field.get(1, y));
            assert_eq!(field.get(5, y), -field.get(4, y));
        }
        for x in 1..5 {
            assert_eq!(field.get(x, 0), field.get(x, 1));
            assert_eq!(field.get(x, 5), field.get(x, 4));
        }
    }

    #[test]
    fn vector_y_flips_top_bottom_only() {
        let mut field = ramp_field(6, 6);
        apply_boundary(&mut field, BoundaryKind::VectorY);
        for y in 1..5 {
            assert_eq!(field.get(0, y), field.get(1, y));
            assert_eq!(field.get(5, y), field.get(4, y));
        }
        for x in 1..5 {
            assert_eq!(field.get(x, 0), -field.get(x, 1));
            assert_eq!(field.get(x, 5), -field.get(x, 4));
        }
    }

    #[test]
    fn corners_average_their_edge_neighbours() {
        for kind in [
            BoundaryKind::Scalar,
            BoundaryKind::VectorX,
            BoundaryKind::VectorY,
        ] {
            let mut field = ramp_field(6, 6);
            apply_boundary(&mut field, kind);
            let w = 6;
            let h = 6;
            assert_eq!(field.get(0, 0), 0.5 * (field.get(1, 0) + field.get(0, 1)));
            assert_eq!(
                field.get(0, h - 1),
                0.5 * (field.get(1, h - 1) + field.get(0, h - 2))
            );
            assert_eq!(
                field.get(w - 1, 0),
                0.5 * (field.get(w - 2, 0) + field.get(w - 1, 1))
            );
            assert_eq!(
                field.get(w - 1, h - 1),
                0.5 * (field.get(w - 2, h - 1) + field.get(w - 1, h - 2))
            );
        }
    }

    #[test]
    fn boundary_is_idempotent() {
        for kind in [
            BoundaryKind::Scalar,
            BoundaryKind::VectorX,
            BoundaryKind::VectorY,
        ] {
            let mut field = ramp_field(7, 7);
            apply_boundary(&mut field, kind);
            let once = field.clone();
            apply_boundary(&mut field, kind);
            assert_eq!(field, once, "reapplying {kind:?} changed the field");
        }
    }

    fn arb_grid() -> impl Strategy<Value = ScalarField> {
        (4usize..16, 4usize..16).prop_flat_map(|(w, h)| {
            prop::collection::vec(-50.0f32..50.0, w * h).prop_map(move |data| {
                let mut field = ScalarField::new(w, h);
                field.as_mut_slice().copy_from_slice(&data);
                field
            })
        })
    }

    proptest! {
        #[test]
        fn boundary_leaves_interior_untouched(field in arb_grid()) {
            let before = field.clone();
            let mut field = field;
            apply_boundary(&mut field, BoundaryKind::VectorX);
            for y in 1..field.height() - 1 {
                for x in 1..field.width() - 1 {
                    prop_assert_eq!(field.get(x, y), before.get(x, y));
                }
            }
        }

        #[test]
        fn sample_stays_within_field_extremes(
            field in arb_grid(),
            fx in 0.0f32..1.0,
            fy in 0.0f32..1.0,
        ) {
            let x = fx * (field.width() as f32 - 1.001);
            let y = fy * (field.height() as f32 - 1.001);
            let v = sample_bilinear(&field, x, y);
            let min = field.as_slice().iter().cloned().fold(f32::INFINITY, f32::min);
            let max = field.as_slice().iter().cloned().fold(f32::NEG_INFINITY, f32::max);
            prop_assert!(v >= min - 1e-4 && v <= max + 1e-4, "sample {v} outside [{min}, {max}]");
        }
    }
}
