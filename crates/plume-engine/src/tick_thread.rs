//! Tick loop and command draining for the realtime runner.
//!
//! The tick thread owns the [`Simulation`] exclusively (moved in via
//! `thread::Builder::spawn`). Commands arrive over a bounded crossbeam
//! channel and are drained before each step; replies go back over a
//! per-batch channel.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crossbeam_channel::{Receiver, Sender};

use crate::clock::FrameClock;
use crate::command::{Command, Receipt};
use crate::error::SimError;
use crate::sim::Simulation;
use crate::snapshot::SnapshotSlot;

/// Commands submitted together, with the channel their receipts go to.
pub(crate) struct CommandBatch {
    pub commands: Vec<Command>,
    pub reply: Sender<Vec<Receipt>>,
}

/// State held by the tick thread's main loop.
pub(crate) struct TickThreadState {
    sim: Simulation,
    slot: Arc<SnapshotSlot>,
    cmd_rx: Receiver<CommandBatch>,
    shutdown_flag: Arc<AtomicBool>,
    failed_steps: Arc<AtomicU64>,
    last_error: Arc<Mutex<Option<SimError>>>,
    clock: FrameClock,
}

impl TickThreadState {
    pub fn new(
        sim: Simulation,
        slot: Arc<SnapshotSlot>,
        cmd_rx: Receiver<CommandBatch>,
        shutdown_flag: Arc<AtomicBool>,
        failed_steps: Arc<AtomicU64>,
        last_error: Arc<Mutex<Option<SimError>>>,
        max_frame_rate: u32,
    ) -> Self {
        Self {
            sim,
            slot,
            cmd_rx,
            shutdown_flag,
            failed_steps,
            last_error,
            clock: FrameClock::new(max_frame_rate),
        }
    }

    /// Main tick loop. Runs until `shutdown_flag` is set, then hands the
    /// simulation back through the `JoinHandle`.
    ///
    /// A failed step publishes nothing; its error replaces the stored one.
    pub fn run(mut self) -> Simulation {
        let mut time_step = self.clock.time_step();
        loop {
            if self.shutdown_flag.load(Ordering::Acquire) {
                break;
            }
            self.clock.start_frame();

            self.drain_command_channel();

            match self.sim.step(time_step) {
                Ok(_) => self.slot.publish(self.sim.snapshot()),
                Err(e) => {
                    *self
                        .last_error
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner) = Some(e);
                    self.failed_steps.fetch_add(1, Ordering::Release);
                }
            }

            time_step = self.clock.end_frame();
        }
        self.sim
    }

    /// Apply every pending batch in arrival order.
    fn drain_command_channel(&mut self) {
        while let Ok(batch) = self.cmd_rx.try_recv() {
            let receipts = batch
                .commands
                .into_iter()
                .map(|c| self.sim.apply(c))
                .collect();
            // Best-effort reply; the caller may have given up waiting.
            let _ = batch.reply.send(receipts);
        }
    }
}
