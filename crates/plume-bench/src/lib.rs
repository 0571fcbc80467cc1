//! Benchmark profiles and utilities for the Plume smoke simulator.
//!
//! Provides pre-built [`Simulation`] profiles for benchmarking and demos:
//!
//! - [`reference_profile`]: 64x64 grid with the full thermal model
//! - [`stress_profile`]: 128x128 grid, same model and emitters
//! - [`ascii_frame`]: headless text rendering of a field

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use plume_core::SimParams;
use plume_engine::Simulation;
use plume_grid::Field;
use plume_source::{EmitterSpec, Shape, Variation};

/// Density ramp from empty to saturated.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Parameters shared by both profiles: every physics stage enabled.
pub fn profile_params() -> SimParams {
    SimParams::full(
        2.0, 1.0, 1.5e-5, 2e-5, -9.81, 1.2, 0.6, 293.0, 2.2e-5, 0.05, 0.002, 0.1,
    )
}

fn profile(n: usize, seed: u64) -> Simulation {
    let mut sim = Simulation::new(n, profile_params(), seed).unwrap();
    sim.add_emitter(
        EmitterSpec::gas(Shape::Circle, 0.0, -0.7, 0.08, 2.5, 600.0).with_variation(Variation {
            flow: 0.5,
            temperature: 40.0,
            ..Variation::default()
        }),
    )
    .unwrap();
    sim.add_emitter(EmitterSpec::energy(
        Shape::Diamond,
        0.0,
        -0.8,
        0.1,
        40.0,
        293.0,
        1.2,
    ))
    .unwrap();
    sim.add_emitter(EmitterSpec::wind_boundary(0.2)).unwrap();
    sim
}

/// Build a reference benchmark profile: 64x64 grid (4K cells).
///
/// Full thermal model, 20 solver sweeps, one dynamic gas emitter, one
/// energy emitter and a side-wall breeze.
pub fn reference_profile(seed: u64) -> Simulation {
    profile(64, seed)
}

/// Build a stress benchmark profile: 128x128 grid (16K cells).
///
/// Same model and emitters as [`reference_profile`] at 4x the cell count.
pub fn stress_profile(seed: u64) -> Simulation {
    profile(128, seed)
}

/// Render the interior of `field` as text, top row (highest `j`) first.
///
/// Values are scaled against `ceiling` and clamped onto a 10-step ramp;
/// non-finite values render as `?`.
pub fn ascii_frame(field: &Field, ceiling: f32) -> String {
    let grid = field.grid();
    let n = grid.n();
    let top = (RAMP.len() - 1) as f32;
    let mut out = String::with_capacity((n + 1) * n);
    for j in (1..=n).rev() {
        for i in 1..=n {
            let value = field.at(i, j);
            let ch = if !value.is_finite() {
                '?'
            } else if ceiling <= 0.0 {
                ' '
            } else {
                let level = (value / ceiling * top).clamp(0.0, top) as usize;
                char::from(RAMP[level])
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
