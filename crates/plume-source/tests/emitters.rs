//! Emitter set behaviour across grids and update modes.

use plume_core::SourceError;
use plume_grid::SourceBuffers;
use plume_source::{rasterize, EmitterSet, EmitterSpec, Shape, Variation};
use plume_test_utils::{assert_close, small_grid};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn circle_rasterization_is_repeatable_and_contains_centre() {
    let grid = small_grid(20);
    let centre = grid.idx(11, 11);
    for radius in [0.0, 0.05, 0.1, 0.25, 0.5] {
        let a = rasterize(grid, Shape::Circle, 0.0, 0.0, radius);
        let b = rasterize(grid, Shape::Circle, 0.0, 0.0, radius);
        assert_eq!(a, b, "radius {radius}");
        assert!(a.contains(&centre), "radius {radius} misses the centre");
    }
}

#[test]
fn rebuild_keeps_handles_and_totals() {
    let mut set = EmitterSet::new(small_grid(32), 1.0);
    let gas = set
        .add(EmitterSpec::gas(Shape::Circle, -0.3, 0.2, 0.2, 3.0, 320.0))
        .unwrap();
    let heat = set
        .add(EmitterSpec::heat(Shape::Diamond, 0.4, -0.4, 0.15, 600.0))
        .unwrap();

    for n in [8, 17, 48] {
        let grid = small_grid(n);
        set.rebuild(grid, 1.0).unwrap();
        assert!(set.get(gas).is_some());
        assert!(set.get(heat).is_some());

        let mut buf = SourceBuffers::new(grid, 290.0);
        set.apply_static(&mut buf, 290.0).unwrap();
        assert_close(buf.density.sum_interior(), 3.0, 1e-4);
        let hottest = buf.temperature.iter().cloned().fold(f32::MIN, f32::max);
        assert_eq!(hottest, 600.0);
    }
}

#[test]
fn resized_buffers_without_rebuild_are_rejected() {
    let mut set = EmitterSet::new(small_grid(64), 1.0);
    set.add(EmitterSpec::gas(Shape::Square, 0.9, 0.9, 0.1, 1.0, 300.0))
        .unwrap();
    let mut small = SourceBuffers::new(small_grid(16), 0.0);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    match set.apply_dynamic(&mut small, 0.0, &mut rng) {
        Err(SourceError::StaleIndices { .. }) => {}
        other => panic!("expected StaleIndices, got {other:?}"),
    }
    assert_eq!(small.density.sum_interior(), 0.0);
}

#[test]
fn dynamic_gas_mean_tracks_flow_rate() {
    let grid = small_grid(24);
    let mut set = EmitterSet::new(grid, 1.0);
    set.add(
        EmitterSpec::gas(Shape::Square, 0.0, 0.0, 0.2, 2.0, 300.0).with_variation(Variation {
            flow: 0.5,
            ..Variation::default()
        }),
    )
    .unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut buf = SourceBuffers::new(grid, 0.0);
    let ticks = 400;
    let mut total = 0.0;
    for _ in 0..ticks {
        set.apply_dynamic(&mut buf, 0.0, &mut rng).unwrap();
        total += buf.density.sum_interior();
    }
    assert_close(total / ticks as f32, 2.0, 0.05);
}

#[test]
fn static_update_ignores_variation() {
    let grid = small_grid(12);
    let mut set = EmitterSet::new(grid, 1.0);
    set.add(
        EmitterSpec::wind(0.0, 0.0, 4.0, 0.0).with_variation(Variation {
            speed: 3.0,
            ..Variation::default()
        }),
    )
    .unwrap();
    let mut buf = SourceBuffers::new(grid, 0.0);
    set.apply_static(&mut buf, 0.0).unwrap();
    assert_close(buf.u.sum_interior(), 4.0, 1e-6);
}
