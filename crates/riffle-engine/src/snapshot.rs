//! Read-only density snapshots for the external renderer.

use riffle_core::{ScalarField, TickId};

/// A read-only view of a completed tick's density field.
///
/// Borrows from the simulator, so the compiler guarantees no tick can
/// run while the snapshot is alive. Accessors clamp to `[0, 1]` for
/// direct use as a grayscale intensity; the raw values are available
/// through [`as_slice`](DensitySnapshot::as_slice).
#[derive(Clone, Copy, Debug)]
pub struct DensitySnapshot<'a> {
    field: &'a ScalarField,
    tick: TickId,
}

impl<'a> DensitySnapshot<'a> {
    pub(crate) fn new(field: &'a ScalarField, tick: TickId) -> Self {
        Self { field, tick }
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.field.width()
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.field.height()
    }

    /// The tick this snapshot was taken after.
    pub fn tick_id(&self) -> TickId {
        self.tick
    }

    /// Density at `(x, y)` clamped to `[0, 1]`.
    pub fn luminance(&self, x: usize, y: usize) -> f32 {
        self.field.get(x, y).clamp(0.0, 1.0)
    }

    /// The whole field as clamped grayscale values, row-major.
    pub fn to_grayscale(&self) -> Vec<f32> {
        self.field
            .as_slice()
            .iter()
            .map(|v| v.clamp(0.0, 1.0))
            .collect()
    }

    /// Raw unclamped density values, row-major.
    pub fn as_slice(&self) -> &[f32] {
        self.field.as_slice()
    }
}
