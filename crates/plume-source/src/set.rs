//! The owned emitter collection and its flattening into source buffers.

use std::fmt;

use indexmap::IndexMap;
use rand::Rng;

use plume_core::{Grid, SourceError};
use plume_grid::SourceBuffers;

use crate::emitter::{Contribution, Emitter, EmitterSpec};

/// Handle to an emitter in an [`EmitterSet`].
///
/// Handles are allocated sequentially and never reused within a set, so a
/// removed emitter's handle stays invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmitterId(pub u64);

impl fmt::Display for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EmitterId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Emitters rasterized for one grid, in insertion order.
///
/// The set remembers the grid and length scale it was built for. Applying
/// it to buffers of another resolution fails with
/// [`SourceError::StaleIndices`]; call [`rebuild`](Self::rebuild) after a
/// resize.
#[derive(Clone, Debug)]
pub struct EmitterSet {
    grid: Grid,
    length_scale: f32,
    emitters: IndexMap<EmitterId, Emitter>,
    next_id: u64,
}

impl EmitterSet {
    /// An empty set for `grid`.
    pub fn new(grid: Grid, length_scale: f32) -> Self {
        Self {
            grid,
            length_scale,
            emitters: IndexMap::new(),
            next_id: 0,
        }
    }

    /// Rasterize `spec` and append it.
    ///
    /// A wind boundary replaces any existing one; the old handle becomes
    /// invalid.
    pub fn add(&mut self, spec: EmitterSpec) -> Result<EmitterId, SourceError> {
        let emitter = spec.build(self.grid, self.length_scale)?;
        if spec.is_wind_boundary() {
            self.emitters.retain(|_, e| !e.spec().is_wind_boundary());
        }
        let id = EmitterId(self.next_id);
        self.next_id += 1;
        self.emitters.insert(id, emitter);
        Ok(id)
    }

    /// Remove the emitter with handle `id`, returning its description.
    pub fn remove(&mut self, id: EmitterId) -> Result<EmitterSpec, SourceError> {
        self.emitters
            .shift_remove(&id)
            .map(|e| *e.spec())
            .ok_or(SourceError::UnknownEmitter { id: id.0 })
    }

    /// Remove the first emitter, in insertion order, whose footprint
    /// grown by `tolerance` contains normalized `(x, y)`.
    ///
    /// The wind boundary is never hit.
    pub fn remove_at(&mut self, x: f32, y: f32, tolerance: f32) -> Option<EmitterId> {
        let id = self
            .emitters
            .iter()
            .find(|(_, e)| e.hit(x, y, tolerance))
            .map(|(id, _)| *id)?;
        self.emitters.shift_remove(&id);
        Some(id)
    }

    /// Remove every emitter.
    pub fn clear(&mut self) {
        self.emitters.clear();
    }

    /// Re-rasterize every emitter for `grid` and `length_scale`.
    ///
    /// Handles and order are preserved. On error the set is unchanged.
    pub fn rebuild(&mut self, grid: Grid, length_scale: f32) -> Result<(), SourceError> {
        let mut rebuilt = IndexMap::with_capacity(self.emitters.len());
        for (id, e) in &self.emitters {
            rebuilt.insert(*id, e.spec().build(grid, length_scale)?);
        }
        self.emitters = rebuilt;
        self.grid = grid;
        self.length_scale = length_scale;
        Ok(())
    }

    /// The grid the emitters are rasterized for.
    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// The length scale energy emitters were converted with.
    #[inline]
    pub fn length_scale(&self) -> f32 {
        self.length_scale
    }

    /// Number of emitters.
    #[inline]
    pub fn len(&self) -> usize {
        self.emitters.len()
    }

    /// Whether the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.emitters.is_empty()
    }

    /// Emitters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EmitterId, &Emitter)> {
        self.emitters.iter().map(|(id, e)| (*id, e))
    }

    /// The emitter with handle `id`.
    pub fn get(&self, id: EmitterId) -> Option<&Emitter> {
        self.emitters.get(&id)
    }

    /// Whether any emitter resamples every tick.
    pub fn has_dynamic(&self) -> bool {
        self.emitters.values().any(Emitter::is_dynamic)
    }

    /// Reset `buffers` and merge every emitter's mean contribution.
    ///
    /// Dynamic emitters contribute their means.
    pub fn apply_static(&self, buffers: &mut SourceBuffers, air_temp: f32) -> Result<(), SourceError> {
        self.apply_with(buffers, air_temp, |e| e.contribution())
    }

    /// Reset `buffers` and merge every emitter, redrawing each covered
    /// cell of every dynamic emitter from `rng`.
    pub fn apply_dynamic<R: Rng>(
        &self,
        buffers: &mut SourceBuffers,
        air_temp: f32,
        rng: &mut R,
    ) -> Result<(), SourceError> {
        self.apply_with(buffers, air_temp, |e| e.sample(rng))
    }

    fn apply_with(
        &self,
        buffers: &mut SourceBuffers,
        air_temp: f32,
        mut draw: impl FnMut(&Emitter) -> Contribution,
    ) -> Result<(), SourceError> {
        let current = buffers.grid();
        if current != self.grid {
            return Err(SourceError::StaleIndices {
                built_for: self.grid.n(),
                current: current.n(),
            });
        }
        buffers.reset(air_temp);
        for e in self.emitters.values() {
            for &idx in e.cells() {
                let c = draw(e);
                buffers.u[idx] += c.u;
                buffers.v[idx] += c.v;
                buffers.density[idx] += c.density;
                if let Some(t) = c.temperature {
                    let floor = &mut buffers.temperature[idx];
                    *floor = floor.max(t);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::Variation;
    use crate::shape::Shape;
    use plume_test_utils::small_grid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn handles_are_sequential_and_not_reused() {
        let g = small_grid(10);
        let mut set = EmitterSet::new(g, 1.0);
        let a = set.add(EmitterSpec::heat(Shape::Point, 0.0, 0.0, 0.0, 400.0)).unwrap();
        let b = set.add(EmitterSpec::heat(Shape::Point, 0.5, 0.0, 0.0, 400.0)).unwrap();
        assert_eq!((a, b), (EmitterId(0), EmitterId(1)));
        set.remove(b).unwrap();
        let c = set.add(EmitterSpec::heat(Shape::Point, 0.5, 0.0, 0.0, 400.0)).unwrap();
        assert_eq!(c, EmitterId(2));
    }

    #[test]
    fn remove_unknown_is_error() {
        let mut set = EmitterSet::new(small_grid(10), 1.0);
        match set.remove(EmitterId(7)) {
            Err(SourceError::UnknownEmitter { id: 7 }) => {}
            other => panic!("expected UnknownEmitter, got {other:?}"),
        }
    }

    #[test]
    fn wind_boundary_is_replaced() {
        let mut set = EmitterSet::new(small_grid(10), 1.0);
        let first = set.add(EmitterSpec::wind_boundary(1.0)).unwrap();
        set.add(EmitterSpec::heat(Shape::Point, 0.0, 0.0, 0.0, 400.0)).unwrap();
        let second = set.add(EmitterSpec::wind_boundary(2.0)).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.get(first).is_none());
        assert_eq!(set.get(second).unwrap().contribution().u, 2.0);
    }

    #[test]
    fn remove_at_first_match_in_insertion_order() {
        let mut set = EmitterSet::new(small_grid(20), 1.0);
        set.add(EmitterSpec::wind_boundary(1.0)).unwrap();
        let a = set
            .add(EmitterSpec::gas(Shape::Circle, 0.0, 0.0, 0.3, 1.0, 300.0))
            .unwrap();
        let b = set
            .add(EmitterSpec::gas(Shape::Circle, 0.1, 0.0, 0.3, 1.0, 300.0))
            .unwrap();
        assert_eq!(set.remove_at(0.05, 0.0, 0.0), Some(a));
        assert_eq!(set.remove_at(0.05, 0.0, 0.0), Some(b));
        assert_eq!(set.remove_at(0.05, 0.0, 0.0), None);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn static_apply_adds_velocity_and_maxes_temperature() {
        let g = small_grid(10);
        let mut set = EmitterSet::new(g, 1.0);
        set.add(EmitterSpec::wind(0.0, 0.0, 1.0, 0.0)).unwrap();
        set.add(EmitterSpec::wind(0.0, 0.0, 2.0, 0.0)).unwrap();
        set.add(EmitterSpec::heat(Shape::Point, 0.0, 0.0, 0.0, 500.0)).unwrap();
        set.add(EmitterSpec::heat(Shape::Point, 0.0, 0.0, 0.0, 350.0)).unwrap();

        let mut buf = SourceBuffers::new(g, 300.0);
        buf.density[0] = 9.0;
        set.apply_static(&mut buf, 300.0).unwrap();

        let c = g.idx(6, 6);
        assert!((buf.u[c] - 3.0).abs() < 1e-6);
        assert_eq!(buf.temperature[c], 500.0);
        assert_eq!(buf.temperature[g.idx(1, 1)], 300.0);
        assert_eq!(buf.density[0], 0.0);
    }

    #[test]
    fn gas_total_equals_flow_rate() {
        let g = small_grid(20);
        let mut set = EmitterSet::new(g, 1.0);
        set.add(EmitterSpec::gas(Shape::Circle, 0.0, 0.0, 0.3, 2.0, 300.0))
            .unwrap();
        let mut buf = SourceBuffers::new(g, 0.0);
        set.apply_static(&mut buf, 0.0).unwrap();
        assert!((buf.density.sum_interior() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn stale_grid_fails_fast() {
        let mut set = EmitterSet::new(small_grid(20), 1.0);
        set.add(EmitterSpec::gas(Shape::Square, 0.5, 0.5, 0.2, 1.0, 300.0))
            .unwrap();
        let mut buf = SourceBuffers::new(small_grid(8), 0.0);
        match set.apply_static(&mut buf, 0.0) {
            Err(SourceError::StaleIndices {
                built_for: 20,
                current: 8,
            }) => {}
            other => panic!("expected StaleIndices, got {other:?}"),
        }
        set.rebuild(small_grid(8), 1.0).unwrap();
        set.apply_static(&mut buf, 0.0).unwrap();
        assert!((buf.density.sum_interior() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn dynamic_apply_is_seed_reproducible_and_varies_per_cell() {
        let g = small_grid(16);
        let mut set = EmitterSet::new(g, 1.0);
        set.add(
            EmitterSpec::heat(Shape::Square, 0.0, 0.0, 0.25, 400.0).with_variation(Variation {
                temperature: 20.0,
                ..Variation::default()
            }),
        )
        .unwrap();
        assert!(set.has_dynamic());

        let mut a = SourceBuffers::new(g, 300.0);
        let mut b = SourceBuffers::new(g, 300.0);
        set.apply_dynamic(&mut a, 300.0, &mut ChaCha8Rng::seed_from_u64(11))
            .unwrap();
        set.apply_dynamic(&mut b, 300.0, &mut ChaCha8Rng::seed_from_u64(11))
            .unwrap();
        assert_eq!(&a.temperature[..], &b.temperature[..]);

        let cells = set.iter().next().unwrap().1.cells().to_vec();
        let first = a.temperature[cells[0]];
        assert!(cells.iter().any(|&c| a.temperature[c] != first));
    }
}
