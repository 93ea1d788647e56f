//! Periodic timer re-evaluation
//!
//! One shared task ticks at the configured cadence and recomputes the
//! snapshot of every tracked timer. Removing a timer stops its evaluation
//! at once; shutting the task down stops all of them together.

mod clock;
mod error;
mod service;


pub use clock::{Clock, ManualClock, SystemClock};
pub use error::SchedulerError;
pub use service::{
    MIN_TICK_INTERVAL, SchedulerCommand, SchedulerHandle, SnapshotBoard, TickScheduler,
};
