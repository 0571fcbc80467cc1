//! Ghost-ring boundary evaluation.
//!
//! Each edge ghost is the adjacent interior value times a per-mode factor
//! (see [`BoundaryMode::edge_factors`]); each corner ghost is the mean of
//! its two neighbouring edge ghosts.

use plume_core::{BoundaryMode, Grid};

/// Fill the ghost ring of `x` according to `mode`.
///
/// Must run after every interior update that a later stencil reads.
pub fn set_boundary(grid: Grid, mode: BoundaryMode, x: &mut [f32]) {
    debug_assert_eq!(x.len(), grid.len());
    let n = grid.n();
    let (fx, fy) = mode.edge_factors();

    for k in 1..=n {
        x[grid.idx(0, k)] = fx * x[grid.idx(1, k)];
        x[grid.idx(n + 1, k)] = fx * x[grid.idx(n, k)];
        x[grid.idx(k, 0)] = fy * x[grid.idx(k, 1)];
        x[grid.idx(k, n + 1)] = fy * x[grid.idx(k, n)];
    }

    x[grid.idx(0, 0)] = 0.5 * (x[grid.idx(1, 0)] + x[grid.idx(0, 1)]);
    x[grid.idx(0, n + 1)] = 0.5 * (x[grid.idx(1, n + 1)] + x[grid.idx(0, n)]);
    x[grid.idx(n + 1, 0)] = 0.5 * (x[grid.idx(n, 0)] + x[grid.idx(n + 1, 1)]);
    x[grid.idx(n + 1, n + 1)] = 0.5 * (x[grid.idx(n, n + 1)] + x[grid.idx(n + 1, n)]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use proptest::prelude::*;

    fn handcrafted() -> Field {
        // Interior values 1..=16, ghosts start at a sentinel.
        let g = Grid::new(4).unwrap();
        Field::from_fn(g, |i, j| {
            if g.is_interior(i, j) {
                (i + 4 * (j - 1)) as f32
            } else {
                -999.0
            }
        })
    }

    fn assert_corners_average(f: &Field) {
        let n = f.grid().n();
        assert_eq!(f.at(0, 0), 0.5 * (f.at(1, 0) + f.at(0, 1)));
        assert_eq!(f.at(0, n + 1), 0.5 * (f.at(1, n + 1) + f.at(0, n)));
        assert_eq!(f.at(n + 1, 0), 0.5 * (f.at(n, 0) + f.at(n + 1, 1)));
        assert_eq!(f.at(n + 1, n + 1), 0.5 * (f.at(n, n + 1) + f.at(n + 1, n)));
    }

    #[test]
    fn x_reflect_negates_left_right_edges() {
        let mut f = handcrafted();
        let g = f.grid();
        set_boundary(g, BoundaryMode::XReflect, &mut f);
        for j in 1..=4 {
            assert_eq!(f.at(0, j), -f.at(1, j));
            assert_eq!(f.at(5, j), -f.at(4, j));
        }
        for i in 1..=4 {
            assert_eq!(f.at(i, 0), f.at(i, 1));
            assert_eq!(f.at(i, 5), f.at(i, 4));
        }
        assert_corners_average(&f);
    }

    #[test]
    fn y_reflect_negates_top_bottom_edges() {
        let mut f = handcrafted();
        let g = f.grid();
        set_boundary(g, BoundaryMode::YReflect, &mut f);
        for k in 1..=4 {
            assert_eq!(f.at(0, k), f.at(1, k));
            assert_eq!(f.at(k, 0), -f.at(k, 1));
            assert_eq!(f.at(k, 5), -f.at(k, 4));
        }
        assert_corners_average(&f);
    }

    #[test]
    fn scalar_copies_adjacent_interior() {
        let mut f = handcrafted();
        let g = f.grid();
        set_boundary(g, BoundaryMode::Scalar, &mut f);
        for k in 1..=4 {
            assert_eq!(f.at(0, k), f.at(1, k));
            assert_eq!(f.at(5, k), f.at(4, k));
            assert_eq!(f.at(k, 0), f.at(k, 1));
            assert_eq!(f.at(k, 5), f.at(k, 4));
        }
        // (0,0) averages (1,0)=1 and (0,1)=1.
        assert_eq!(f.at(0, 0), 1.0);
        assert_corners_average(&f);
    }

    #[test]
    fn open_zeroes_ghosts() {
        let mut f = handcrafted();
        let g = f.grid();
        set_boundary(g, BoundaryMode::Open, &mut f);
        for k in 0..=5 {
            assert_eq!(f.at(0, k), 0.0);
            assert_eq!(f.at(5, k), 0.0);
            assert_eq!(f.at(k, 0), 0.0);
            assert_eq!(f.at(k, 5), 0.0);
        }
        assert_eq!(f.at(2, 3), 10.0);
    }

    proptest! {
        #[test]
        fn interior_is_never_touched(
            n in 1usize..12,
            seed in proptest::collection::vec(-10.0f32..10.0, 196),
            mode_idx in 0usize..4,
        ) {
            let mode = [
                BoundaryMode::Open,
                BoundaryMode::Scalar,
                BoundaryMode::XReflect,
                BoundaryMode::YReflect,
            ][mode_idx];
            let g = Grid::new(n).unwrap();
            let mut f = Field::from_fn(g, |i, j| seed[(i * 13 + j) % seed.len()]);
            let before = f.clone();
            set_boundary(g, mode, &mut f);
            for (i, j) in g.interior() {
                prop_assert_eq!(f.at(i, j), before.at(i, j));
            }
        }
    }
}
