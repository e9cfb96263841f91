//! The [`Simulator`] lifecycle: setup, tick, snapshot.

use std::time::Instant;

use crossbeam_channel::{bounded, Receiver, Sender};

use riffle_backend::ComputeBackend;
use riffle_core::{ConfigError, FieldSet, FluidConfig, TickId};
use riffle_solver::FluidStepper;

use crate::impulse::{Impulse, ImpulseSender};
use crate::init;
use crate::metrics::StepMetrics;
use crate::snapshot::DensitySnapshot;

/// Default capacity of the bounded impulse queue.
pub const DEFAULT_IMPULSE_CAPACITY: usize = 1024;

/// A fluid simulation world: configuration, state, and stepping.
///
/// Created from a validated [`FluidConfig`] and a boxed
/// [`ComputeBackend`]; the same stepping algorithm runs against either
/// backend. Ticks are strictly sequential and atomic from the caller's
/// perspective: `tick` takes `&mut self` and returns only after the
/// full velocity-then-density update completes.
pub struct Simulator {
    config: FluidConfig,
    backend: Box<dyn ComputeBackend>,
    stepper: FluidStepper,
    fields: FieldSet,
    impulse_tx: Sender<Impulse>,
    impulse_rx: Receiver<Impulse>,
    tick: TickId,
    last_metrics: StepMetrics,
}

impl Simulator {
    /// Create a simulator with the default impulse queue capacity.
    ///
    /// Validates the configuration, allocates the field set, and seeds
    /// the initial conditions (centre density bump, seeded velocity
    /// perturbation).
    pub fn new(config: FluidConfig, backend: Box<dyn ComputeBackend>) -> Result<Self, ConfigError> {
        Self::with_impulse_capacity(config, backend, DEFAULT_IMPULSE_CAPACITY)
    }

    /// Create a simulator with an explicit impulse queue capacity.
    pub fn with_impulse_capacity(
        config: FluidConfig,
        backend: Box<dyn ComputeBackend>,
        impulse_capacity: usize,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut fields = FieldSet::new(config.width as usize, config.height as usize);
        init::seed_fields(&mut fields, config.seed);

        let (impulse_tx, impulse_rx) = bounded(impulse_capacity.max(1));

        Ok(Self {
            stepper: FluidStepper::new(&config),
            config,
            backend,
            fields,
            impulse_tx,
            impulse_rx,
            tick: TickId(0),
            last_metrics: StepMetrics::default(),
        })
    }

    /// A cloneable handle for submitting interaction impulses.
    pub fn impulse_sender(&self) -> ImpulseSender {
        ImpulseSender::new(
            self.impulse_tx.clone(),
            self.config.width,
            self.config.height,
        )
    }

    /// Advance the simulation by one tick of `dt`.
    ///
    /// Zeroes the source buffers, merges queued impulses into them,
    /// then runs the velocity and density updates. Returns this tick's
    /// metrics.
    ///
    /// `dt` stability is the caller's responsibility: the solver clamps
    /// backtraces and never rejects a timestep, but an oversized
    /// `dt * N * |velocity|` degrades into visible artefacts or NaN.
    pub fn tick(&mut self, dt: f32) -> StepMetrics {
        let start = Instant::now();

        self.backend.reset(&mut self.fields.prev_density);
        self.backend.reset(&mut self.fields.prev_velocity_x);
        self.backend.reset(&mut self.fields.prev_velocity_y);
        let impulses_applied = self.drain_impulses();
        let ingress_done = Instant::now();

        self.stepper
            .update_velocity(self.backend.as_mut(), &mut self.fields, dt);
        let velocity_done = Instant::now();

        self.stepper
            .update_density(self.backend.as_mut(), &mut self.fields, dt);
        let density_done = Instant::now();

        self.tick = TickId(self.tick.0 + 1);
        self.last_metrics = StepMetrics {
            total_us: (density_done - start).as_micros() as u64,
            ingress_us: (ingress_done - start).as_micros() as u64,
            velocity_update_us: (velocity_done - ingress_done).as_micros() as u64,
            density_update_us: (density_done - velocity_done).as_micros() as u64,
            impulses_applied,
        };
        self.last_metrics.clone()
    }

    /// Merge every queued impulse into the source buffers.
    ///
    /// Coordinates were validated at submission, so the drain applies
    /// unconditionally.
    fn drain_impulses(&mut self) -> u32 {
        let mut applied = 0u32;
        while let Ok(imp) = self.impulse_rx.try_recv() {
            let x = imp.x as usize;
            let y = imp.y as usize;
            let d = self.fields.prev_density.get(x, y);
            self.fields.prev_density.set(x, y, d + imp.density);
            let vx = self.fields.prev_velocity_x.get(x, y);
            self.fields.prev_velocity_x.set(x, y, vx + imp.velocity_x);
            let vy = self.fields.prev_velocity_y.get(x, y);
            self.fields.prev_velocity_y.set(x, y, vy + imp.velocity_y);
            applied += 1;
        }
        applied
    }

    /// Read-only density snapshot of the last completed tick.
    pub fn snapshot(&self) -> DensitySnapshot<'_> {
        DensitySnapshot::new(&self.fields.density, self.tick)
    }

    /// The full field set, for diagnostics and tests.
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Number of completed ticks (0 after construction or reset).
    pub fn current_tick(&self) -> TickId {
        self.tick
    }

    /// The configuration this simulator was built from.
    pub fn config(&self) -> &FluidConfig {
        &self.config
    }

    /// Name of the compute backend in use.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Metrics from the most recent tick.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Reset to tick 0 with a new seed, re-seeding the initial
    /// conditions and discarding any queued impulses.
    pub fn reset(&mut self, seed: u64) {
        self.config.seed = seed;
        for field in [
            &mut self.fields.density,
            &mut self.fields.prev_density,
            &mut self.fields.velocity_x,
            &mut self.fields.prev_velocity_x,
            &mut self.fields.velocity_y,
            &mut self.fields.prev_velocity_y,
        ] {
            field.fill(0.0);
        }
        init::seed_fields(&mut self.fields, seed);
        while self.impulse_rx.try_recv().is_ok() {}
        self.tick = TickId(0);
        self.last_metrics = StepMetrics::default();
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("backend", &self.backend.name())
            .field("width", &self.config.width)
            .field("height", &self.config.height)
            .field("tick", &self.tick)
            .finish()
    }
}
