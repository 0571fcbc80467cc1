//! Emitter footprints and their rasterization onto the grid.
//!
//! Emitter geometry is given in normalized coordinates: the domain spans
//! `[-1, 1]` on both axes. Rasterization maps the center to grid units with
//! [`Grid::to_grid_coord`] and the radius with [`Grid::to_grid_radius`].

use smallvec::SmallVec;

use plume_core::Grid;

/// Flat offsets of the cells an emitter covers.
pub type CellSet = SmallVec<[usize; 8]>;

/// Footprint of an emitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// The single nearest cell; radius is ignored.
    Point,
    /// Axis-aligned square of half-width `radius`.
    Square,
    /// Euclidean disc of `radius`.
    Circle,
    /// Manhattan ball of `radius`.
    Diamond,
}

impl Shape {
    /// Parse a lowercase shape name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "point" => Some(Self::Point),
            "square" => Some(Self::Square),
            "circle" => Some(Self::Circle),
            "diamond" => Some(Self::Diamond),
            _ => None,
        }
    }

    /// Whether `(dx, dy)` from the center lies inside a footprint of
    /// `radius`, inclusive of the edge.
    #[inline]
    fn covers(self, dx: f32, dy: f32, radius: f32) -> bool {
        match self {
            Self::Point => dx == 0.0 && dy == 0.0,
            Self::Square => dx.abs() <= radius && dy.abs() <= radius,
            Self::Circle => dx * dx + dy * dy <= radius * radius,
            Self::Diamond => dx.abs() + dy.abs() <= radius,
        }
    }

    /// Hit-test in normalized coordinates: whether `(x, y)` lies strictly
    /// within `radius + tolerance` of the footprint centered at `(cx, cy)`.
    ///
    /// Points use the circle metric.
    pub fn hit(self, cx: f32, cy: f32, radius: f32, x: f32, y: f32, tolerance: f32) -> bool {
        let rad = radius + tolerance;
        let dx = (x - cx).abs();
        let dy = (y - cy).abs();
        match self {
            Self::Point | Self::Circle => dx * dx + dy * dy < rad * rad,
            Self::Square => dx < rad && dy < rad,
            Self::Diamond => dx + dy < rad,
        }
    }
}

/// Interior cells covered by `shape` centered at normalized `(cx, cy)`.
///
/// Cells are emitted in `(i, j)` sweep order and clipped to the interior.
/// If nothing is covered (a radius smaller than a cell, or a footprint
/// entirely in the ghost ring), the nearest interior cell is used, so the
/// result is never empty.
pub fn rasterize(grid: Grid, shape: Shape, cx: f32, cy: f32, radius: f32) -> CellSet {
    let n = grid.n();
    let xc = grid.to_grid_coord(cx);
    let yc = grid.to_grid_coord(cy);
    let mut cells = CellSet::new();

    if shape != Shape::Point {
        let r = grid.to_grid_radius(radius);
        let lo = |c: f32| ((c - r).floor().max(1.0)) as usize;
        let hi = |c: f32| ((c + r).ceil().min(n as f32)).max(0.0) as usize;
        for i in lo(xc)..=hi(xc) {
            for j in lo(yc)..=hi(yc) {
                if shape.covers(i as f32 - xc, j as f32 - yc, r) {
                    cells.push(grid.idx(i, j));
                }
            }
        }
    }

    if cells.is_empty() {
        cells.push(nearest_interior(grid, xc, yc));
    }
    cells
}

fn nearest_interior(grid: Grid, xc: f32, yc: f32) -> usize {
    let n = grid.n() as f32;
    let snap = |c: f32| c.round().clamp(1.0, n) as usize;
    grid.idx(snap(xc), snap(yc))
}

/// The left and right interior columns, every interior row.
pub fn side_columns(grid: Grid) -> CellSet {
    let n = grid.n();
    let mut cells = CellSet::new();
    for j in 1..=n {
        cells.push(grid.idx(1, j));
        if n > 1 {
            cells.push(grid.idx(n, j));
        }
    }
    cells
}
