//! The [`FluidStepper`] tick algorithm.

use riffle_backend::ComputeBackend;
use riffle_core::{BoundaryKind, FieldSet, FluidConfig};

/// One tick of Jos Stam's Stable Fluids method, expressed purely in
/// backend operations over a [`FieldSet`].
///
/// The previous-frame buffers serve three roles over the course of a
/// tick: external source terms on entry, the transported quantity after
/// the first swap, and raw scratch space during projection. The caller
/// (the simulator) zeroes them and merges interaction impulses into
/// them before each tick.
///
/// The stepper holds no field data and can drive any number of
/// field sets.
#[derive(Clone, Debug)]
pub struct FluidStepper {
    diffusion: f32,
    viscosity: f32,
    iterations: u32,
}

impl FluidStepper {
    /// Create a stepper from a validated configuration.
    pub fn new(config: &FluidConfig) -> Self {
        Self {
            diffusion: config.diffusion,
            viscosity: config.viscosity,
            iterations: config.iterations,
        }
    }

    /// Relaxation sweeps per implicit solve.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Advance the velocity field by one tick.
    ///
    /// Sequence: add external forces → swap → viscous diffusion of both
    /// components → projection (removes the divergence the diffusion
    /// introduced) → swap → self-advection, transporting each component
    /// with the pre-advection projected velocity → projection again,
    /// producing the final incompressible field for this tick.
    pub fn update_velocity(
        &self,
        backend: &mut dyn ComputeBackend,
        fields: &mut FieldSet,
        dt: f32,
    ) {
        backend.add_source(&mut fields.velocity_x, &fields.prev_velocity_x, dt);
        backend.add_source(&mut fields.velocity_y, &fields.prev_velocity_y, dt);
        backend.swap(&mut fields.velocity_x, &mut fields.prev_velocity_x);
        backend.swap(&mut fields.velocity_y, &mut fields.prev_velocity_y);

        self.diffuse(backend, fields, Quantity::VelocityX, self.viscosity, dt);
        self.diffuse(backend, fields, Quantity::VelocityY, self.viscosity, dt);
        self.project(backend, fields);

        backend.swap(&mut fields.velocity_x, &mut fields.prev_velocity_x);
        backend.swap(&mut fields.velocity_y, &mut fields.prev_velocity_y);

        // Both components are carried by the same (pre-advection)
        // velocity, now sitting in the previous buffers.
        backend.advect(
            &mut fields.velocity_x,
            &fields.prev_velocity_x,
            &fields.prev_velocity_x,
            &fields.prev_velocity_y,
            dt,
        );
        backend.apply_boundary(&mut fields.velocity_x, BoundaryKind::VectorX);
        backend.advect(
            &mut fields.velocity_y,
            &fields.prev_velocity_y,
            &fields.prev_velocity_x,
            &fields.prev_velocity_y,
            dt,
        );
        backend.apply_boundary(&mut fields.velocity_y, BoundaryKind::VectorY);

        self.project(backend, fields);
    }

    /// Advance the density field by one tick.
    ///
    /// Density is a passive scalar: sourced, diffused, and transported
    /// by the (already updated) velocity field, never projected.
    pub fn update_density(&self, backend: &mut dyn ComputeBackend, fields: &mut FieldSet, dt: f32) {
        backend.add_source(&mut fields.density, &fields.prev_density, dt);
        backend.swap(&mut fields.density, &mut fields.prev_density);

        self.diffuse(backend, fields, Quantity::Density, self.diffusion, dt);
        backend.swap(&mut fields.density, &mut fields.prev_density);

        backend.advect(
            &mut fields.density,
            &fields.prev_density,
            &fields.velocity_x,
            &fields.velocity_y,
            dt,
        );
        backend.apply_boundary(&mut fields.density, BoundaryKind::Scalar);
    }

    /// Implicit diffusion of one quantity by `coeff`.
    ///
    /// Solves `(1 + 4a) field - a * sum4(field) = prev` with
    /// `a = dt * coeff * N^2` by a fixed number of relaxation sweeps,
    /// reapplying the quantity's boundary rule after every sweep. The
    /// destination is zeroed first so both backends iterate from the
    /// same initial guess regardless of stale buffer contents.
    fn diffuse(
        &self,
        backend: &mut dyn ComputeBackend,
        fields: &mut FieldSet,
        quantity: Quantity,
        coeff: f32,
        dt: f32,
    ) {
        let n = fields.width() as f32 - 2.0;
        let a = dt * coeff * n * n;
        let norm = 1.0 + 4.0 * a;
        let kind = quantity.boundary_kind();

        let (field, prev) = match quantity {
            Quantity::Density => (&mut fields.density, &fields.prev_density),
            Quantity::VelocityX => (&mut fields.velocity_x, &fields.prev_velocity_x),
            Quantity::VelocityY => (&mut fields.velocity_y, &fields.prev_velocity_y),
        };

        backend.reset(field);
        for _ in 0..self.iterations {
            backend.relaxation_step(field, prev, a, norm);
            backend.apply_boundary(field, kind);
        }
    }

    /// Helmholtz-Hodge projection: make the velocity field
    /// divergence-free.
    ///
    /// Computes the discrete divergence, solves the pressure Poisson
    /// equation by fixed-iteration relaxation, and subtracts the
    /// pressure gradient. The previous-velocity buffers are reused as
    /// the pressure and divergence scratch space — their contents are
    /// destroyed.
    pub fn project(&self, backend: &mut dyn ComputeBackend, fields: &mut FieldSet) {
        let pressure = &mut fields.prev_velocity_x;
        let div = &mut fields.prev_velocity_y;

        backend.divergence(&fields.velocity_x, &fields.velocity_y, div);
        backend.reset(pressure);
        backend.apply_boundary(div, BoundaryKind::Scalar);
        backend.apply_boundary(pressure, BoundaryKind::Scalar);

        for _ in 0..self.iterations {
            backend.relaxation_step(pressure, div, 1.0, 4.0);
            backend.apply_boundary(pressure, BoundaryKind::Scalar);
        }

        backend.subtract_gradient(&mut fields.velocity_x, &mut fields.velocity_y, pressure);
        backend.apply_boundary(&mut fields.velocity_x, BoundaryKind::VectorX);
        backend.apply_boundary(&mut fields.velocity_y, BoundaryKind::VectorY);
    }
}

/// Which quantity a diffusion pass operates on.
#[derive(Clone, Copy, Debug)]
enum Quantity {
    Density,
    VelocityX,
    VelocityY,
}

impl Quantity {
    fn boundary_kind(self) -> BoundaryKind {
        match self {
            Self::Density => BoundaryKind::Scalar,
            Self::VelocityX => BoundaryKind::VectorX,
            Self::VelocityY => BoundaryKind::VectorY,
        }
    }
}
