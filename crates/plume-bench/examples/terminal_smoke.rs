//! Headless smoke demo rendered as text in the terminal.
//!
//! Runs the simulation on its realtime tick thread and redraws the density
//! field from the latest snapshot about 20 times per second. Pass a scenario
//! file to run it instead of the reference profile:
//!
//! ```text
//! cargo run --example terminal_smoke -- crates/plume-scenario/scenarios/chimney.json
//! ```

use std::env;
use std::thread;
use std::time::Duration;

use plume_bench::{ascii_frame, reference_profile};
use plume_core::SimParams;
use plume_engine::{Command, RealtimeSim, Simulation};
use plume_scenario::{Scenario, DEFAULT_MAX_FRAME_RATE};

const REDRAWS: usize = 400;

fn load() -> (Simulation, u32) {
    match env::args().nth(1) {
        Some(path) => {
            let scenario = Scenario::from_path(&path).unwrap();
            (scenario.build(7).unwrap(), scenario.max_frame_rate())
        }
        None => {
            let mut sim = reference_profile(7);
            sim.resize(48).unwrap();
            (sim, DEFAULT_MAX_FRAME_RATE)
        }
    }
}

fn main() {
    let (sim, frame_rate) = load();
    let params = *sim.params();
    let mut rt = RealtimeSim::spawn(sim, frame_rate).unwrap();

    for redraw in 0..REDRAWS {
        // Halfway through, switch the gravity off and watch the plume stall.
        if redraw == REDRAWS / 2 {
            rt.send(Command::SetParams(SimParams {
                gravity_on: false,
                ..params
            }))
            .unwrap()
            .unwrap();
        }

        if let Some(snap) = rt.latest() {
            let ceiling = snap.density.max_abs_interior().max(1e-6);
            print!("\x1b[2J\x1b[H");
            print!("{}", ascii_frame(&snap.density, ceiling));
            println!(
                "tick {:>6}  dt={:>6.4}s  step={:>6}μs  mass={:>9.4}  div={:>9.2e}  emitters={}",
                snap.tick,
                snap.metrics.sim_dt,
                snap.metrics.total_us,
                snap.metrics.total_density,
                snap.metrics.max_divergence,
                snap.metrics.emitter_count,
            );
        }
        thread::sleep(Duration::from_millis(50));
    }

    let sim = rt.shutdown().unwrap();
    println!(
        "\nstopped after {} ticks ({} failed)",
        sim.tick(),
        rt.failed_steps()
    );
}
