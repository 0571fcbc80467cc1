//! Integration tests: whole-step behaviour of `Simulation`.

use plume_core::{FieldKind, SimParams};
use plume_engine::{SimError, Simulation};
use plume_source::{EmitterSpec, Shape, Variation};
use plume_test_utils::{
    assert_all_finite, assert_close, assert_close_rel, closed_params, open_params,
};
use proptest::prelude::*;

fn density_centroid_y(sim: &Simulation) -> f32 {
    let grid = sim.grid();
    let d = sim.density();
    let mut mass = 0.0;
    let mut moment = 0.0;
    for (i, j) in grid.interior() {
        mass += d.at(i, j);
        moment += j as f32 * d.at(i, j);
    }
    moment / mass
}

// ── End-to-end ───────────────────────────────────────────────────────

#[test]
fn point_gas_source_spreads_without_losing_mass() {
    // Eight Gauss-Seidel sweeps cannot reach (1,1), ten Manhattan cells
    // from the source, in one step. At the default 20 sweeps that corner
    // already holds a denormal trace after the first step.
    let mut sim = Simulation::new(10, closed_params(1e-3, 8), 1).unwrap();
    sim.add_emitter(EmitterSpec::gas(Shape::Point, 0.0, 0.0, 0.0, 1.0, 300.0))
        .unwrap();
    let source = (6, 6);

    sim.step(0.1).unwrap();
    assert!(sim.density().at(source.0, source.1) > 0.0);
    assert_eq!(sim.density().at(1, 1), 0.0);

    for _ in 1..100 {
        sim.step(0.1).unwrap();
    }
    let grid = sim.grid();
    for (i, j) in grid.interior() {
        assert!(sim.density().at(i, j) > 0.0, "({i},{j}) still empty");
    }
    // 100 steps of 0.1 s at 1 unit/s.
    let injected = 10.0;
    let total = sim.total_density();
    assert!(total <= injected * (1.0 + 1e-4), "total {total}");
    assert_close_rel(total, injected, 1e-3);
}

#[test]
fn diffusion_alone_conserves_density() {
    let mut sim = Simulation::new(12, closed_params(5e-3, 20), 0).unwrap();
    let grid = sim.grid();
    let mut blob = vec![0.0; grid.len()];
    for (i, j) in [(3, 3), (3, 4), (4, 3), (9, 10)] {
        blob[grid.idx(i, j)] = 20.0;
    }
    let zeros = vec![0.0; grid.len()];
    sim.set_external_sources(&blob, &zeros, &zeros, &zeros).unwrap();
    sim.step(0.05).unwrap();
    sim.reset_sources();
    let initial = sim.total_density();
    assert_close(initial, 4.0, 1e-4);

    for _ in 0..200 {
        sim.step(0.05).unwrap();
    }
    assert_close_rel(sim.total_density(), initial, 1e-4);
    assert!(sim.max_divergence() == 0.0);
}

#[test]
fn density_decay_reduces_mass() {
    let params = SimParams {
        dens_decay: 0.5,
        ..closed_params(1e-3, 10)
    };
    let mut sim = Simulation::new(8, params, 0).unwrap();
    let grid = sim.grid();
    let mut blob = vec![0.0; grid.len()];
    blob[grid.idx(4, 4)] = 10.0;
    let zeros = vec![0.0; grid.len()];
    sim.set_external_sources(&blob, &zeros, &zeros, &zeros).unwrap();
    sim.step(0.1).unwrap();
    sim.reset_sources();

    let mut last = sim.total_density();
    for _ in 0..20 {
        sim.step(0.1).unwrap();
        let now = sim.total_density();
        assert!(now < last, "{now} >= {last}");
        last = now;
    }
}

fn density_ghosts(sim: &Simulation) -> impl Iterator<Item = f32> + '_ {
    let grid = sim.grid();
    let last = grid.n() + 1;
    (0..=last).flat_map(move |k| {
        let d = sim.density();
        [d.at(k, 0), d.at(k, last), d.at(0, k), d.at(last, k)]
    })
}

/// Release smoke from a square, stop the source, then let it spread.
/// Returns the total right after the source stops and at the end.
fn release_then_spread(sim: &mut Simulation) -> (f32, f32) {
    sim.add_emitter(EmitterSpec::gas(Shape::Square, 0.0, 0.0, 0.25, 1.0, 300.0))
        .unwrap();
    for _ in 0..5 {
        sim.step(0.1).unwrap();
    }
    sim.clear_emitters();
    sim.step(0.1).unwrap();
    let released = sim.total_density();
    for _ in 0..200 {
        sim.step(0.1).unwrap();
        if !sim.params().closed_boundaries {
            assert!(
                density_ghosts(sim).all(|g| g == 0.0),
                "open wall ghost holds density at tick {}",
                sim.tick()
            );
        }
    }
    (released, sim.total_density())
}

#[test]
fn open_walls_drain_density_through_zero_ghosts() {
    let mut open = Simulation::new(8, open_params(5e-3, 20), 0).unwrap();
    let (released, remaining) = release_then_spread(&mut open);
    assert!(released > 0.0);
    assert!(
        remaining < 0.5 * released,
        "open box kept {remaining} of {released}"
    );
    assert!(density_ghosts(&open).all(|g| g == 0.0));
    assert_all_finite(open.x_velocity());
    assert_all_finite(open.y_velocity());

    let mut closed = Simulation::new(8, closed_params(5e-3, 20), 0).unwrap();
    let (released, remaining) = release_then_spread(&mut closed);
    assert_close_rel(remaining, released, 1e-4);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn still_air_keeps_every_injected_unit(
        n in 4usize..16,
        flow in 0.1f32..5.0,
        steps in 1usize..6,
    ) {
        let mut sim = Simulation::new(n, closed_params(1e-4, 8), 0).unwrap();
        sim.add_emitter(EmitterSpec::gas(Shape::Point, 0.0, 0.0, 0.0, flow, 300.0))
            .unwrap();
        for _ in 0..steps {
            sim.step(0.1).unwrap();
        }
        let injected = steps as f32 * 0.1 * flow;
        let total = sim.total_density();
        prop_assert!((total - injected).abs() <= 1e-3 * injected, "{total} vs {injected}");
    }
}

// ── Buoyancy and heat ────────────────────────────────────────────────

#[test]
fn compositional_buoyancy_lifts_the_plume() {
    let run = |gravity_on: bool| {
        let params = SimParams {
            gravity_on,
            ..SimParams::buoyant(1.0, 1.0, 1e-4, 1e-4, 9.81, 1.2, 0.5)
        };
        let mut sim = Simulation::new(16, SimParams { solver_steps: 10, ..params }, 0).unwrap();
        sim.add_emitter(EmitterSpec::gas(Shape::Point, 0.0, -0.5, 0.0, 5.0, 300.0))
            .unwrap();
        for _ in 0..40 {
            sim.step(0.05).unwrap();
        }
        assert_all_finite(sim.y_velocity());
        density_centroid_y(&sim)
    };
    let passive = run(false);
    let buoyant = run(true);
    assert_close(passive, 5.0, 1e-3);
    assert!(buoyant > passive + 2.0, "passive {passive}, buoyant {buoyant}");
}

#[test]
fn heat_source_raises_local_temperature_only_when_coupled() {
    let run = |temperature_on: bool| {
        let params = SimParams {
            air_temp: 300.0,
            diff_temp: 1e-4,
            temperature_on,
            ..closed_params(1e-4, 10)
        };
        let mut sim = Simulation::new(12, params, 0).unwrap();
        sim.add_emitter(EmitterSpec::heat(Shape::Square, 0.0, 0.0, 0.2, 800.0))
            .unwrap();
        for _ in 0..5 {
            sim.step(0.05).unwrap();
        }
        sim.temperature().at(7, 7)
    };
    assert_eq!(run(false), 300.0);
    let hot = run(true);
    assert!(hot > 700.0 && hot <= 800.0 + 1e-3, "hot {hot}");
}

#[test]
fn full_thermal_model_stays_finite() {
    let params = SimParams::full(
        2.0, 1.0, 1.5e-5, 2e-5, -9.81, 1.2, 0.6, 293.0, 2.2e-5, 0.05, 0.002, 0.1,
    );
    let mut sim = Simulation::new(24, params, 9).unwrap();
    sim.set_check_finite(true);
    sim.add_emitter(
        EmitterSpec::gas(Shape::Circle, 0.0, -0.6, 0.1, 2.0, 600.0).with_variation(Variation {
            flow: 0.5,
            temperature: 40.0,
            ..Variation::default()
        }),
    )
    .unwrap();
    sim.add_emitter(EmitterSpec::energy(Shape::Diamond, 0.5, -0.6, 0.1, 50.0, 293.0, 1.2))
        .unwrap();
    sim.add_emitter(EmitterSpec::wind_boundary(0.2)).unwrap();
    for _ in 0..60 {
        sim.step(1.0 / 30.0).unwrap();
    }
    for kind in FieldKind::ALL {
        assert_all_finite(sim.field(kind));
    }
    assert!(sim.total_density() > 0.0);
}

#[test]
fn non_finite_fields_are_reported() {
    let mut sim = Simulation::new(6, closed_params(1e-4, 4), 0).unwrap();
    sim.set_check_finite(true);
    let grid = sim.grid();
    let mut bad = vec![0.0; grid.len()];
    bad[grid.idx(3, 3)] = f32::INFINITY;
    let zeros = vec![0.0; grid.len()];
    sim.set_external_sources(&bad, &zeros, &zeros, &zeros).unwrap();
    match sim.step(0.1) {
        Err(SimError::NonFiniteField {
            field: FieldKind::Density,
            ..
        }) => {}
        other => panic!("expected NonFiniteField, got {other:?}"),
    }
}

// ── Emitters across resets ───────────────────────────────────────────

#[test]
fn dynamic_emitters_reproduce_from_seed() {
    let run = |seed: u64| {
        let mut sim = Simulation::new(16, closed_params(1e-4, 6), seed).unwrap();
        sim.add_emitter(
            EmitterSpec::wind(-0.5, 0.0, 2.0, 0.0).with_variation(Variation {
                speed: 0.5,
                angle: 20.0,
                ..Variation::default()
            }),
        )
        .unwrap();
        sim.add_emitter(
            EmitterSpec::gas(Shape::Circle, -0.5, 0.0, 0.15, 1.0, 300.0).with_variation(
                Variation {
                    flow: 0.3,
                    ..Variation::default()
                },
            ),
        )
        .unwrap();
        for _ in 0..15 {
            sim.step(0.05).unwrap();
        }
        sim.density().clone()
    };
    assert_eq!(run(42), run(42));
    assert_ne!(run(42), run(43));
}

#[test]
fn resize_keeps_emitters_usable() {
    let mut sim = Simulation::new(64, closed_params(1e-4, 4), 0).unwrap();
    sim.add_emitter(EmitterSpec::gas(Shape::Square, 0.9, 0.9, 0.1, 1.0, 300.0))
        .unwrap();
    sim.add_emitter(EmitterSpec::wind_boundary(1.0)).unwrap();
    sim.step(0.05).unwrap();

    for n in [16, 3, 40] {
        sim.resize(n).unwrap();
        assert_eq!(sim.emitters().len(), 2);
        sim.step(0.05).unwrap();
        assert!(sim.total_density() > 0.0);
        assert_eq!(sim.density().len(), (n + 2) * (n + 2));
    }
}

#[test]
fn cleared_emitters_stop_injecting() {
    let mut sim = Simulation::new(10, closed_params(1e-4, 4), 0).unwrap();
    sim.add_emitter(EmitterSpec::gas(Shape::Circle, 0.0, 0.0, 0.2, 1.0, 300.0))
        .unwrap();
    sim.step(0.1).unwrap();
    sim.clear_emitters();
    let before = sim.total_density();
    sim.step(0.1).unwrap();
    assert_close_rel(sim.total_density(), before, 1e-4);
    assert!(sim.sources().density.iter().all(|&d| d == 0.0));
}
