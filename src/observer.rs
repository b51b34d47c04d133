//! Step observer trait for monitoring cloth simulation progress.

use crate::error::Degeneracy;
use crate::float::Float;
use crate::vec::Vec3;

/// Trait for observing simulation steps.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver<F: Float> {
    /// Called after the cloth was reset to a flat grid offset by `jitter`.
    ///
    /// Only resets made after construction are reported; the initial layout
    /// happens before any observer is attached.
    /// [`Simulation::reset_count`](crate::simulation::Simulation::reset_count)
    /// includes it.
    fn on_reset(&mut self, _jitter: Vec3<F>) {}

    /// Called after forces for all springs have been accumulated.
    fn on_forces_accumulated(&mut self) {}

    /// Called after all nodes have been integrated.
    fn on_integrate(&mut self) {}

    /// Called when an update was skipped because of a numerical degeneracy.
    fn on_degeneracy(&mut self, _degeneracy: Degeneracy) {}

    /// Called when a substep is fully complete, with the elapsed time since
    /// the last reset.
    fn on_substep_complete(&mut self, _elapsed: F) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl<F: Float> StepObserver<F> for NoOpStepObserver {}
