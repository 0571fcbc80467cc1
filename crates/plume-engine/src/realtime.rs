//! Background-thread runner for interactive front ends.
//!
//! ```text
//! Caller thread                      Tick thread
//!     |                                  |
//!     |--submit()----------------------->| cmd_rx.try_recv()
//!     |   [cmd_tx: bounded(64)]          | sim.apply(command)
//!     |<--receipts via reply channel-----| sim.step(time_step)
//!     |                                  | slot.publish(snapshot)
//!     |                                  | sleep(budget - elapsed)
//!     |--latest()----------------------->|
//!     |<--Arc<FieldSnapshot>-------------|
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Sender, TrySendError};

use crate::command::{Command, Receipt};
use crate::error::{RealtimeError, SimError};
use crate::sim::Simulation;
use crate::snapshot::{FieldSnapshot, SnapshotSlot};
use crate::tick_thread::{CommandBatch, TickThreadState};

/// Capacity of the command channel.
const COMMAND_CAPACITY: usize = 64;

/// A simulation stepping on its own thread at a capped frame rate.
///
/// The time step of each tick is the real duration of the previous frame
/// (at least the frame budget), as measured by
/// [`FrameClock`](crate::FrameClock).
pub struct RealtimeSim {
    slot: Arc<SnapshotSlot>,
    cmd_tx: Option<Sender<CommandBatch>>,
    shutdown_flag: Arc<AtomicBool>,
    failed_steps: Arc<AtomicU64>,
    last_error: Arc<Mutex<Option<SimError>>>,
    tick_thread: Option<JoinHandle<Simulation>>,
}

impl RealtimeSim {
    /// Move `sim` onto a new tick thread running at most
    /// `max_frame_rate` steps per second.
    pub fn spawn(sim: Simulation, max_frame_rate: u32) -> Result<Self, RealtimeError> {
        let slot = Arc::new(SnapshotSlot::default());
        slot.publish(sim.snapshot());
        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let failed_steps = Arc::new(AtomicU64::new(0));
        let last_error = Arc::new(Mutex::new(None));
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(COMMAND_CAPACITY);

        let state = TickThreadState::new(
            sim,
            Arc::clone(&slot),
            cmd_rx,
            Arc::clone(&shutdown_flag),
            Arc::clone(&failed_steps),
            Arc::clone(&last_error),
            max_frame_rate,
        );
        let tick_thread = thread::Builder::new()
            .name("plume-tick".into())
            .spawn(move || state.run())
            .map_err(|e| RealtimeError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;

        Ok(Self {
            slot,
            cmd_tx: Some(cmd_tx),
            shutdown_flag,
            failed_steps,
            last_error,
            tick_thread: Some(tick_thread),
        })
    }

    /// Queue `commands` for the next tick and wait for their receipts.
    ///
    /// Never blocks on the channel itself: a full queue is reported as
    /// [`RealtimeError::ChannelFull`].
    pub fn submit(&self, commands: Vec<Command>) -> Result<Vec<Receipt>, RealtimeError> {
        let cmd_tx = self.cmd_tx.as_ref().ok_or(RealtimeError::ShuttingDown)?;
        let (reply_tx, reply_rx) = crossbeam_channel::bounded(1);
        let batch = CommandBatch {
            commands,
            reply: reply_tx,
        };
        cmd_tx.try_send(batch).map_err(|e| match e {
            TrySendError::Full(_) => RealtimeError::ChannelFull,
            TrySendError::Disconnected(_) => RealtimeError::ShuttingDown,
        })?;
        reply_rx.recv().map_err(|_| RealtimeError::ShuttingDown)
    }

    /// Queue one command and wait for its receipt.
    pub fn send(&self, command: Command) -> Result<Receipt, RealtimeError> {
        self.submit(vec![command])?
            .pop()
            .ok_or(RealtimeError::ShuttingDown)
    }

    /// The most recently completed step.
    pub fn latest(&self) -> Option<Arc<FieldSnapshot>> {
        self.slot.latest()
    }

    /// Steps that returned an error so far.
    ///
    /// A failed tick publishes no snapshot, so [`latest`](Self::latest)
    /// keeps showing the last good step.
    pub fn failed_steps(&self) -> u64 {
        self.failed_steps.load(Ordering::Acquire)
    }

    /// The error of the most recent failed step, if any step has failed.
    pub fn last_error(&self) -> Option<SimError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the tick thread is still running.
    pub fn is_running(&self) -> bool {
        self.tick_thread
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Stop the tick thread and take the simulation back.
    ///
    /// Returns `None` if the thread panicked or was already stopped.
    pub fn shutdown(&mut self) -> Option<Simulation> {
        self.shutdown_flag.store(true, Ordering::Release);
        self.cmd_tx.take();
        self.tick_thread.take().and_then(|h| h.join().ok())
    }
}

impl Drop for RealtimeSim {
    fn drop(&mut self) {
        self.shutdown();
    }
}
