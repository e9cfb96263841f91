//! Per-tick performance metrics.

/// Timing and counter data for a single tick.
///
/// All durations are in microseconds. Returned by value from
/// [`Simulator::tick`](crate::Simulator::tick) and retained as
/// [`Simulator::last_metrics`](crate::Simulator::last_metrics).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Time spent zeroing source buffers and draining impulses.
    pub ingress_us: u64,
    /// Time spent in the velocity update.
    pub velocity_update_us: u64,
    /// Time spent in the density update.
    pub density_update_us: u64,
    /// Impulses merged into the source buffers this tick.
    pub impulses_applied: u32,
}
