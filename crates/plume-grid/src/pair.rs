//! Current/scratch double buffer.

use std::mem;

use plume_core::Grid;

use crate::field::Field;

/// A field and its scratch buffer.
///
/// `previous` carries no state across steps: each step stages its input
/// there, swaps, and solves back into `current`. Both fields are public so
/// kernels can borrow them disjointly.
#[derive(Clone, Debug)]
pub struct FieldPair {
    /// The settled field read by consumers between steps.
    pub current: Field,
    /// Staging and scratch space.
    pub previous: Field,
}

impl FieldPair {
    /// Both buffers filled with `value`.
    pub fn filled(grid: Grid, value: f32) -> Self {
        Self {
            current: Field::filled(grid, value),
            previous: Field::filled(grid, value),
        }
    }

    /// Exchange the two buffers without copying.
    #[inline]
    pub fn swap(&mut self) {
        mem::swap(&mut self.current, &mut self.previous);
    }

    /// Reset both buffers to `value`.
    pub fn fill(&mut self, value: f32) {
        self.current.fill(value);
        self.previous.fill(value);
    }

    /// The grid both buffers were allocated for.
    #[inline]
    pub fn grid(&self) -> Grid {
        self.current.grid()
    }
}
