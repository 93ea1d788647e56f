//! Tick scheduler - re-evaluates every live timer on a fixed cadence
//!
//! Architecture:
//! - TickScheduler: background task owning the set of tracked start instants
//! - SchedulerHandle: sends lifecycle commands and reads the latest board
//! - SnapshotBoard: all snapshots computed on one tick, published through a
//!   watch channel so readers always see the most recent one

use std::time::Duration;

use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::clock::Clock;
use super::error::SchedulerError;
use crate::cycle::{self, PhaseSnapshot};
use crate::timers::{Lifecycle, TimerId};

/// Shortest cadence accepted; `tokio::time::interval` rejects zero
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(10);

// ─────────────────────────────────────────────────────────────────────────────
// Commands and Board
// ─────────────────────────────────────────────────────────────────────────────

/// Messages sent to the scheduler task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerCommand {
    Track { id: TimerId, start: DateTime<Utc> },
    Untrack(TimerId),
    Clear,
    Shutdown,
}

impl From<Lifecycle> for SchedulerCommand {
    fn from(lifecycle: Lifecycle) -> Self {
        match lifecycle {
            Lifecycle::Added { id, start } => SchedulerCommand::Track { id, start },
            Lifecycle::Removed(id) => SchedulerCommand::Untrack(id),
            Lifecycle::Cleared => SchedulerCommand::Clear,
        }
    }
}

/// Snapshots of every tracked timer, all evaluated at the same instant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotBoard {
    /// Evaluation instant. None until the first publish.
    pub at: Option<DateTime<Utc>>,
    /// Sorted by timer id
    pub entries: Vec<(TimerId, PhaseSnapshot)>,
}

impl SnapshotBoard {
    pub fn get(&self, id: TimerId) -> Option<&PhaseSnapshot> {
        self.entries
            .binary_search_by_key(&id, |(entry_id, _)| *entry_id)
            .ok()
            .map(|idx| &self.entries[idx].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handle
// ─────────────────────────────────────────────────────────────────────────────

/// Cloneable handle for talking to a running `TickScheduler`
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    cmd_tx: mpsc::Sender<SchedulerCommand>,
    board_rx: watch::Receiver<SnapshotBoard>,
}

impl SchedulerHandle {
    pub async fn send(&self, cmd: SchedulerCommand) -> Result<(), SchedulerError> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| SchedulerError::Stopped)
    }

    /// Forward a timer list change
    pub async fn notify(&self, lifecycle: Lifecycle) -> Result<(), SchedulerError> {
        self.send(lifecycle.into()).await
    }

    pub async fn track(&self, id: TimerId, start: DateTime<Utc>) -> Result<(), SchedulerError> {
        self.send(SchedulerCommand::Track { id, start }).await
    }

    pub async fn untrack(&self, id: TimerId) -> Result<(), SchedulerError> {
        self.send(SchedulerCommand::Untrack(id)).await
    }

    pub async fn clear(&self) -> Result<(), SchedulerError> {
        self.send(SchedulerCommand::Clear).await
    }

    pub async fn shutdown(&self) -> Result<(), SchedulerError> {
        self.send(SchedulerCommand::Shutdown).await
    }

    /// Latest published board
    pub fn board(&self) -> SnapshotBoard {
        self.board_rx.borrow().clone()
    }

    /// Receiver that wakes on every publish
    pub fn subscribe(&self) -> watch::Receiver<SnapshotBoard> {
        self.board_rx.clone()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scheduler Task
// ─────────────────────────────────────────────────────────────────────────────

pub struct TickScheduler<C: Clock> {
    clock: C,
    interval: Duration,
    tracked: HashMap<TimerId, DateTime<Utc>>,
    cmd_rx: mpsc::Receiver<SchedulerCommand>,
    board_tx: watch::Sender<SnapshotBoard>,
}

impl<C: Clock> TickScheduler<C> {
    /// Create a scheduler and return a handle to communicate with it
    pub fn new(clock: C, interval: Duration) -> (Self, SchedulerHandle) {
        let (cmd_tx, cmd_rx) = mpsc::channel(32);
        let (board_tx, board_rx) = watch::channel(SnapshotBoard::default());

        let scheduler = Self {
            clock,
            interval: interval.max(MIN_TICK_INTERVAL),
            tracked: HashMap::new(),
            cmd_rx,
            board_tx,
        };

        (scheduler, SchedulerHandle { cmd_tx, board_rx })
    }

    /// Run the scheduler on the current tokio runtime
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Run the tick loop until `Shutdown` arrives or every handle is dropped
    pub async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Tick scheduler started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.publish();
                }
                cmd = self.cmd_rx.recv() => match cmd {
                    Some(SchedulerCommand::Shutdown) | None => break,
                    Some(cmd) => {
                        self.handle_command(cmd);
                        // Lifecycle changes show up without waiting for the next tick
                        self.publish();
                    }
                },
            }
        }

        self.tracked.clear();
        tracing::info!("Tick scheduler stopped");
    }

    fn handle_command(&mut self, cmd: SchedulerCommand) {
        match cmd {
            SchedulerCommand::Track { id, start } => {
                tracing::debug!(%id, %start, "Tracking timer");
                self.tracked.insert(id, start);
            }
            SchedulerCommand::Untrack(id) => {
                if self.tracked.remove(&id).is_none() {
                    tracing::warn!(%id, "Untrack for a timer that was not tracked");
                } else {
                    tracing::debug!(%id, "Stopped tracking timer");
                }
            }
            SchedulerCommand::Clear => {
                tracing::debug!(count = self.tracked.len(), "Stopped tracking all timers");
                self.tracked.clear();
            }
            SchedulerCommand::Shutdown => {}
        }
    }

    fn publish(&self) {
        let now = self.clock.now();

        let mut entries: Vec<(TimerId, PhaseSnapshot)> = self
            .tracked
            .iter()
            .map(|(id, start)| (*id, cycle::snapshot(*start, now)))
            .collect();
        entries.sort_by_key(|(id, _)| *id);

        self.board_tx.send_replace(SnapshotBoard {
            at: Some(now),
            entries,
        });
    }
}
