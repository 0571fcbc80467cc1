//! Square simulation grid with a one-cell ghost ring.
//!
//! A grid of resolution `N` has `N × N` interior cells addressed by
//! `(i, j)` with `i, j ∈ [1, N]`, surrounded by a ghost ring at
//! `i, j ∈ {0, N+1}`. Every field is stored as a dense `(N+2)²` array,
//! and cell `(i, j)` lives at flat offset `i + (N+2)·j`.

use crate::error::ConfigError;

/// Geometry of an `(N+2) × (N+2)` simulation grid.
///
/// `Grid` is `Copy` and carries only the resolution; it is passed by value
/// to every kernel so no operation depends on process-wide state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    n: usize,
}

impl Grid {
    /// Create a grid with `n` interior cells per side.
    ///
    /// Returns `Err(ConfigError::InvalidResolution)` if `n == 0`.
    pub fn new(n: usize) -> Result<Self, ConfigError> {
        if n == 0 {
            return Err(ConfigError::InvalidResolution { n });
        }
        Ok(Self { n })
    }

    /// Number of interior cells per side.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Row stride of the allocated array, `N + 2`.
    #[inline]
    pub fn stride(&self) -> usize {
        self.n + 2
    }

    /// Total number of allocated cells, `(N+2)²`.
    #[inline]
    pub fn len(&self) -> usize {
        self.stride() * self.stride()
    }

    /// Always `false`: a valid grid has at least one interior cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Flat offset of cell `(i, j)`.
    #[inline]
    pub fn idx(&self, i: usize, j: usize) -> usize {
        i + self.stride() * j
    }

    /// Inverse of [`idx`](Self::idx).
    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx % self.stride(), idx / self.stride())
    }

    /// Whether `(i, j)` is an interior (non-ghost) cell.
    #[inline]
    pub fn is_interior(&self, i: usize, j: usize) -> bool {
        (1..=self.n).contains(&i) && (1..=self.n).contains(&j)
    }

    /// Physical width of one cell for a domain of width `length_scale`.
    #[inline]
    pub fn cell_size(&self, length_scale: f32) -> f32 {
        length_scale / self.n as f32
    }

    /// Map a normalized coordinate in `[-1, 1]` to a grid coordinate.
    ///
    /// `-1` lands on the low ghost edge (0) and `+1` on `N + 2`.
    #[inline]
    pub fn to_grid_coord(&self, norm: f32) -> f32 {
        self.stride() as f32 * (norm + 1.0) / 2.0
    }

    /// Convert a normalized radius to grid cells (the domain `[-1, 1]`
    /// spans `N` interior cells).
    #[inline]
    pub fn to_grid_radius(&self, norm_radius: f32) -> f32 {
        self.n as f32 * norm_radius / 2.0
    }

    /// Iterate over interior cells in sweep order (`i` outer, `j` inner).
    pub fn interior(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.n;
        (1..=n).flat_map(move |i| (1..=n).map(move |j| (i, j)))
    }

    /// Iterate over the flat offsets of all interior cells.
    pub fn interior_indices(&self) -> impl Iterator<Item = usize> {
        let grid = *self;
        self.interior().map(move |(i, j)| grid.idx(i, j))
    }
}
