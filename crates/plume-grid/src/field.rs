//! A single dense scalar field over the padded grid.

use std::ops::{Deref, DerefMut};

use plume_core::Grid;

/// A scalar field of `(N+2)²` cells, ghost ring included.
///
/// Dereferences to `[f32]` so numerical kernels can take plain slices.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    grid: Grid,
    data: Vec<f32>,
}

impl Field {
    /// A zeroed field.
    pub fn new(grid: Grid) -> Self {
        Self::filled(grid, 0.0)
    }

    /// A field with every cell set to `value`.
    pub fn filled(grid: Grid, value: f32) -> Self {
        Self {
            grid,
            data: vec![value; grid.len()],
        }
    }

    /// A field initialised from `f(i, j)` for every cell, ghosts included.
    pub fn from_fn(grid: Grid, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let data = (0..grid.len())
            .map(|idx| {
                let (i, j) = grid.coords(idx);
                f(i, j)
            })
            .collect();
        Self { grid, data }
    }

    /// The grid this field was allocated for.
    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Value at `(i, j)`.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> f32 {
        self.data[self.grid.idx(i, j)]
    }

    /// Set the value at `(i, j)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f32) {
        let idx = self.grid.idx(i, j);
        self.data[idx] = value;
    }

    /// Sum over interior cells.
    pub fn sum_interior(&self) -> f32 {
        self.grid.interior_indices().map(|idx| self.data[idx]).sum()
    }

    /// Largest absolute value over interior cells.
    pub fn max_abs_interior(&self) -> f32 {
        self.grid
            .interior_indices()
            .map(|idx| self.data[idx].abs())
            .fold(0.0, f32::max)
    }

    /// Flat offset of the first non-finite cell, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.data.iter().position(|v| !v.is_finite())
    }

    /// Consume the field, returning its backing storage.
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

impl Deref for Field {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.data
    }
}

impl DerefMut for Field {
    fn deref_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}
