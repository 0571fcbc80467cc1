//! Per-grid field sets.

use plume_core::{FieldKind, Grid};

use crate::field::Field;
use crate::pair::FieldPair;

/// All evolving fields of one simulation grid.
///
/// Temperature rests at the background temperature rather than zero, so
/// a disabled temperature field still reads as ambient air.
#[derive(Clone, Debug)]
pub struct FieldStore {
    grid: Grid,
    /// Horizontal velocity.
    pub u: FieldPair,
    /// Vertical velocity.
    pub v: FieldPair,
    /// Gas density.
    pub density: FieldPair,
    /// Temperature.
    pub temperature: FieldPair,
}

impl FieldStore {
    /// Allocate a store at rest.
    pub fn new(grid: Grid, air_temp: f32) -> Self {
        Self {
            grid,
            u: FieldPair::filled(grid, 0.0),
            v: FieldPair::filled(grid, 0.0),
            density: FieldPair::filled(grid, 0.0),
            temperature: FieldPair::filled(grid, air_temp),
        }
    }

    /// Return every field to rest without reallocating.
    pub fn reset(&mut self, air_temp: f32) {
        self.u.fill(0.0);
        self.v.fill(0.0);
        self.density.fill(0.0);
        self.temperature.fill(air_temp);
    }

    /// The grid all fields were allocated for.
    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// The pair holding `kind`.
    pub fn pair(&self, kind: FieldKind) -> &FieldPair {
        match kind {
            FieldKind::XVelocity => &self.u,
            FieldKind::YVelocity => &self.v,
            FieldKind::Density => &self.density,
            FieldKind::Temperature => &self.temperature,
        }
    }

    /// Mutable access to the pair holding `kind`.
    pub fn pair_mut(&mut self, kind: FieldKind) -> &mut FieldPair {
        match kind {
            FieldKind::XVelocity => &mut self.u,
            FieldKind::YVelocity => &mut self.v,
            FieldKind::Density => &mut self.density,
            FieldKind::Temperature => &mut self.temperature,
        }
    }

    /// The settled value of `kind`.
    #[inline]
    pub fn current(&self, kind: FieldKind) -> &Field {
        &self.pair(kind).current
    }
}

/// Per-tick forcing, one buffer per field.
///
/// Velocity and density sources are rates added with `dt`; the
/// temperature source is a floor merged with `max`.
#[derive(Clone, Debug)]
pub struct SourceBuffers {
    grid: Grid,
    /// Horizontal velocity source.
    pub u: Field,
    /// Vertical velocity source.
    pub v: Field,
    /// Density source.
    pub density: Field,
    /// Temperature floor.
    pub temperature: Field,
}

impl SourceBuffers {
    /// Allocate empty sources.
    pub fn new(grid: Grid, air_temp: f32) -> Self {
        Self {
            grid,
            u: Field::new(grid),
            v: Field::new(grid),
            density: Field::new(grid),
            temperature: Field::filled(grid, air_temp),
        }
    }

    /// Clear all sources; the temperature floor drops to `air_temp`.
    pub fn reset(&mut self, air_temp: f32) {
        self.u.fill(0.0);
        self.v.fill(0.0);
        self.density.fill(0.0);
        self.temperature.fill(air_temp);
    }

    /// The grid all buffers were allocated for.
    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// The buffer for `kind`.
    pub fn get(&self, kind: FieldKind) -> &Field {
        match kind {
            FieldKind::XVelocity => &self.u,
            FieldKind::YVelocity => &self.v,
            FieldKind::Density => &self.density,
            FieldKind::Temperature => &self.temperature,
        }
    }

    /// Mutable access to the buffer for `kind`.
    pub fn get_mut(&mut self, kind: FieldKind) -> &mut Field {
        match kind {
            FieldKind::XVelocity => &mut self.u,
            FieldKind::YVelocity => &mut self.v,
            FieldKind::Density => &mut self.density,
            FieldKind::Temperature => &mut self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_rests_at_background() {
        let g = Grid::new(4).unwrap();
        let store = FieldStore::new(g, 293.0);
        assert_eq!(store.current(FieldKind::Temperature).at(2, 2), 293.0);
        assert_eq!(store.current(FieldKind::Density).at(2, 2), 0.0);
        assert_eq!(store.temperature.previous.at(0, 0), 293.0);
    }

    #[test]
    fn reset_clears_motion() {
        let g = Grid::new(4).unwrap();
        let mut store = FieldStore::new(g, 300.0);
        store.u.current.set(1, 1, 5.0);
        store.density.previous.set(2, 2, 1.0);
        store.temperature.current.set(3, 3, 900.0);
        store.reset(300.0);
        assert_eq!(store.u.current.at(1, 1), 0.0);
        assert_eq!(store.density.previous.at(2, 2), 0.0);
        assert_eq!(store.temperature.current.at(3, 3), 300.0);
    }

    #[test]
    fn pair_by_kind_matches_named_field() {
        let g = Grid::new(2).unwrap();
        let mut store = FieldStore::new(g, 0.0);
        store.pair_mut(FieldKind::YVelocity).current.set(1, 2, 7.0);
        assert_eq!(store.v.current.at(1, 2), 7.0);
    }

    #[test]
    fn sources_reset_to_floor() {
        let g = Grid::new(3).unwrap();
        let mut src = SourceBuffers::new(g, 0.0);
        src.get_mut(FieldKind::Density).set(2, 2, 4.0);
        src.reset(280.0);
        assert_eq!(src.density.at(2, 2), 0.0);
        assert_eq!(src.get(FieldKind::Temperature).at(1, 1), 280.0);
    }
}
