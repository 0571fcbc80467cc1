//! Per-step timing and field statistics.
//!
//! [`StepMetrics`] is returned by every
//! [`Simulation::step()`](crate::Simulation::step) and retained as
//! [`last_metrics()`](crate::Simulation::last_metrics) for front ends that
//! display solver health.

/// Timing and diagnostic data collected during a single step.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step.
    pub total_us: u64,
    /// Time spent rebuilding and staging the source buffers.
    pub sources_us: u64,
    /// Time spent in the velocity step (two projections included).
    pub velocity_us: u64,
    /// Time spent in the density step.
    pub density_us: u64,
    /// Time spent in the temperature step; zero when coupling is off.
    pub temperature_us: u64,
    /// Largest interior divergence after the final projection.
    pub max_divergence: f32,
    /// Sum of interior density after the step.
    pub total_density: f32,
    /// Number of emitters applied this step.
    pub emitter_count: usize,
    /// Simulated seconds advanced.
    pub sim_dt: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.sources_us, 0);
        assert_eq!(m.velocity_us, 0);
        assert_eq!(m.density_us, 0);
        assert_eq!(m.temperature_us, 0);
        assert_eq!(m.max_divergence, 0.0);
        assert_eq!(m.total_density, 0.0);
        assert_eq!(m.emitter_count, 0);
    }
}
