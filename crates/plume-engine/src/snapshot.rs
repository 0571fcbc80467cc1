//! Immutable post-step copies of the fields.

use std::sync::{Arc, Mutex, PoisonError};

use plume_core::{FieldKind, Grid};
use plume_grid::Field;

use crate::metrics::StepMetrics;

/// The fields as they stood at the end of one step.
///
/// Produced by [`Simulation::snapshot()`](crate::Simulation::snapshot) and
/// published by the realtime runner after every tick, so readers never
/// observe a half-updated grid.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSnapshot {
    /// Steps completed when the copy was taken.
    pub tick: u64,
    /// Grid the fields are laid out on.
    pub grid: Grid,
    /// Density.
    pub density: Field,
    /// Horizontal velocity.
    pub x_velocity: Field,
    /// Vertical velocity.
    pub y_velocity: Field,
    /// Temperature.
    pub temperature: Field,
    /// Metrics of the step that produced these fields.
    pub metrics: StepMetrics,
}

impl FieldSnapshot {
    /// The field for `kind`.
    pub fn field(&self, kind: FieldKind) -> &Field {
        match kind {
            FieldKind::XVelocity => &self.x_velocity,
            FieldKind::YVelocity => &self.y_velocity,
            FieldKind::Density => &self.density,
            FieldKind::Temperature => &self.temperature,
        }
    }
}

/// Single-slot handoff of the latest snapshot from the tick thread.
///
/// The tick thread replaces the slot once per tick; readers clone the
/// `Arc` and never block the writer for longer than a pointer swap.
#[derive(Debug, Default)]
pub(crate) struct SnapshotSlot {
    latest: Mutex<Option<Arc<FieldSnapshot>>>,
}

impl SnapshotSlot {
    pub fn publish(&self, snapshot: FieldSnapshot) {
        let snap = Arc::new(snapshot);
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(snap);
    }

    pub fn latest(&self) -> Option<Arc<FieldSnapshot>> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

// Compile-time assertion: the slot is shared across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SnapshotSlot>();
};
