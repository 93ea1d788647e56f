//! Timer records (host-owned data)
//!
//! A `TimerRecord` is what the user declared: which station, which
//! alliance, and when its cycle started. Records are never mutated after
//! creation; a timer is changed only by deleting it.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::cycle::{self, PhaseSnapshot};

/// A declared contested resource timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerRecord {
    /// Station name, trimmed and non-empty
    pub project: String,

    /// Owning alliance, trimmed and non-empty
    pub alliance: String,

    /// Start of the cycle this timer counts through
    pub start_time: DateTime<Utc>,

    pub created_at: DateTime<Utc>,
}

impl TimerRecord {
    /// Evaluate this timer's phase at `now`
    pub fn snapshot(&self, now: DateTime<Utc>) -> PhaseSnapshot {
        cycle::snapshot(self.start_time, now)
    }
}

/// Stable identifier for a timer in a `TimerList`.
///
/// Assigned on insertion and never reused, so deleting one timer never
/// shifts the identity of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record together with its list identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEntry {
    pub id: TimerId,
    pub record: TimerRecord,
}
