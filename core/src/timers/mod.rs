//! Timer system
//!
//! This module provides:
//! - **Records**: what the user declared (station, alliance, cycle start)
//! - **Form**: validation of new timers from a "time remaining" input
//! - **List**: the ordered timer collection and its reducer
//!
//! Phase evaluation itself lives in `cycle`; re-evaluation on a cadence
//! lives in `scheduler`.

mod error;
mod form;
mod list;
mod record;

#[cfg(test)]
mod list_tests;

pub use error::TimerError;
pub use form::{PRESETS, RemainingPreset, TimerForm, find_preset};
pub use list::{Lifecycle, PhaseCounts, TimerAction, TimerList};
pub use record::{TimerEntry, TimerId, TimerRecord};
