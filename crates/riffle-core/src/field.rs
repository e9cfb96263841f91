//! Scalar field buffers and the [`FieldSet`] simulation state.

use std::fmt;

/// Classification of a field for boundary reflection.
///
/// Determines which edges mirror with a sign flip when the boundary
/// pass runs: the normal component of a vector field reflects off a
/// wall, a scalar field mirrors without flipping anywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryKind {
    /// Pure mirror copy on all four edges.
    Scalar,
    /// Sign flip on the left/right edge columns, mirror on top/bottom.
    VectorX,
    /// Sign flip on the top/bottom edge rows, mirror on left/right.
    VectorY,
}

/// A dense `width x height` grid of `f32` cell values.
///
/// Storage is row-major: cell `(x, y)` lives at index `x + y * width`.
/// Index 0 and `width - 1` / `height - 1` are the boundary margin; the
/// interior spans `[1, width - 2] x [1, height - 2]`. Dimensions never
/// change after allocation.
#[derive(Clone, PartialEq)]
pub struct ScalarField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ScalarField {
    /// Allocate a zero-filled field.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// Field width in cells, boundary margin included.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells, boundary margin included.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat cell index for `(x, y)`.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        x + y * self.width
    }

    /// Read the value at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[x + y * self.width]
    }

    /// Write the value at `(x, y)`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let i = self.idx(x, y);
        self.data[i] = value;
    }

    /// The full buffer as a flat slice, row-major.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The full buffer as a mutable flat slice, row-major.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Exchange the contents of two same-shaped fields in O(1).
    ///
    /// This is a pointer exchange of the underlying buffers, not an
    /// element copy; it is the primitive behind the double-buffered
    /// update scheme.
    ///
    /// # Panics
    ///
    /// Panics if the fields have different dimensions.
    pub fn swap(&mut self, other: &mut ScalarField) {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "cannot swap fields of different dimensions"
        );
        std::mem::swap(&mut self.data, &mut other.data);
    }

    /// Exchange the underlying storage with a raw buffer in O(1).
    ///
    /// Used by the ping-pong relaxation scheme: a backend computes a
    /// Jacobi sweep into its own scratch buffer, then publishes it here
    /// without copying a single element.
    ///
    /// # Panics
    ///
    /// Panics if `buf` does not have exactly `width * height` elements.
    pub fn swap_buffer(&mut self, buf: &mut Vec<f32>) {
        assert_eq!(
            buf.len(),
            self.data.len(),
            "cannot swap in a buffer of different size"
        );
        std::mem::swap(&mut self.data, buf);
    }

    /// Replace this field's buffer with a copy of `other`'s.
    ///
    /// # Panics
    ///
    /// Panics if the fields have different dimensions.
    pub fn copy_from(&mut self, other: &ScalarField) {
        assert_eq!((self.width, self.height), (other.width, other.height));
        self.data.copy_from_slice(&other.data);
    }
}

impl fmt::Debug for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarField")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// The six same-shaped buffers making up the simulation state.
///
/// Each quantity (density, velocity-x, velocity-y) carries a paired
/// previous/scratch buffer. The previous buffers double as the external
/// source buffers: impulses are merged into them before `add_source`
/// runs, and they are reused as relaxation scratch space afterwards.
/// All six always share the same dimensions; none is ever reallocated.
///
/// Fields are public so the stepper can split-borrow them (for example
/// mutating `density` while sampling `prev_density` and the velocity
/// buffers in the same call).
#[derive(Clone, Debug)]
pub struct FieldSet {
    /// Density field.
    pub density: ScalarField,
    /// Previous-frame density; also the density source buffer.
    pub prev_density: ScalarField,
    /// Velocity x-component.
    pub velocity_x: ScalarField,
    /// Previous-frame velocity x; also the x-force source buffer.
    pub prev_velocity_x: ScalarField,
    /// Velocity y-component.
    pub velocity_y: ScalarField,
    /// Previous-frame velocity y; also the y-force source buffer.
    pub prev_velocity_y: ScalarField,
}

impl FieldSet {
    /// Allocate all six buffers zero-filled.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            density: ScalarField::new(width, height),
            prev_density: ScalarField::new(width, height),
            velocity_x: ScalarField::new(width, height),
            prev_velocity_x: ScalarField::new(width, height),
            velocity_y: ScalarField::new(width, height),
            prev_velocity_y: ScalarField::new(width, height),
        }
    }

    /// Shared width of all six buffers.
    pub fn width(&self) -> usize {
        self.density.width()
    }

    /// Shared height of all six buffers.
    pub fn height(&self) -> usize {
        self.density.height()
    }
}
