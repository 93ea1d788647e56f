//! Forward and inverse phase cycle computation
//!
//! `snapshot` maps (start, now) to the active phase and its countdowns.
//! `derive_start_instant` goes the other way: given how much of the cycle
//! a user says is left, it finds the start instant that produces it.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use outpost_types::Phase;

use super::countdown::{CycleCountdown, PhaseCountdown};
use super::error::CycleError;

/// Length of the contestable phase (24h)
pub const PHASE1_SECS: u64 = 24 * 60 * 60;
/// Length of the protected phase (72h)
pub const PHASE2_SECS: u64 = 72 * 60 * 60;
/// Length of a full cycle (96h)
pub const CYCLE_SECS: u64 = PHASE1_SECS + PHASE2_SECS;

const PHASE1_MS: i64 = PHASE1_SECS as i64 * 1000;
const PHASE2_MS: i64 = PHASE2_SECS as i64 * 1000;
const CYCLE_MS: i64 = CYCLE_SECS as i64 * 1000;

/// Derived state of one timer at one instant.
///
/// Recomputed on every tick and never persisted. Durations keep millisecond
/// precision; the countdowns are truncated to whole seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSnapshot {
    pub phase: Phase,

    /// Number of full cycles completed since the start instant.
    /// Negative when the start instant lies in the future.
    pub cycle_index: i64,

    /// Always in `[0, CYCLE)`
    pub elapsed_in_cycle: Duration,

    pub phase_remaining: Duration,
    pub total_remaining: Duration,

    /// Percent of the current phase already elapsed, in `[0, 100)`
    pub phase_progress: f64,

    pub countdown: CycleCountdown,
    pub phase_countdown: PhaseCountdown,
}

impl PhaseSnapshot {
    pub fn elapsed_in_cycle_secs(&self) -> u64 {
        self.elapsed_in_cycle.as_secs()
    }

    pub fn phase_remaining_secs(&self) -> u64 {
        self.phase_remaining.as_secs()
    }

    pub fn total_remaining_secs(&self) -> u64 {
        self.total_remaining.as_secs()
    }

    /// `{days}天 HH:MM:SS` for the rest of the cycle
    pub fn formatted(&self) -> String {
        self.countdown.to_string()
    }

    /// `HH:MM:SS` for the rest of the current phase
    pub fn phase_formatted(&self) -> String {
        self.phase_countdown.to_string()
    }

    /// Phase progress with one decimal, e.g. `12.5%`
    pub fn progress_label(&self) -> String {
        format!("{:.1}%", self.phase_progress)
    }
}

/// Compute the phase snapshot of a timer started at `start`, evaluated at `now`.
///
/// A start instant in the future is not an error: floored division keeps
/// `elapsed_in_cycle` in range and yields a negative `cycle_index`.
pub fn snapshot(start: DateTime<Utc>, now: DateTime<Utc>) -> PhaseSnapshot {
    let elapsed_ms = now.signed_duration_since(start).num_milliseconds();

    let cycle_index = elapsed_ms.div_euclid(CYCLE_MS);
    let in_cycle_ms = elapsed_ms.rem_euclid(CYCLE_MS);

    let (phase, phase_elapsed_ms, phase_len_ms) = if in_cycle_ms < PHASE1_MS {
        (Phase::Contestable, in_cycle_ms, PHASE1_MS)
    } else {
        (Phase::Protected, in_cycle_ms - PHASE1_MS, PHASE2_MS)
    };

    let phase_remaining = millis(phase_len_ms - phase_elapsed_ms);
    let total_remaining = millis(CYCLE_MS - in_cycle_ms);
    let phase_progress = phase_elapsed_ms as f64 / phase_len_ms as f64 * 100.0;

    PhaseSnapshot {
        phase,
        cycle_index,
        elapsed_in_cycle: millis(in_cycle_ms),
        phase_remaining,
        total_remaining,
        phase_progress,
        countdown: CycleCountdown::from_secs(total_remaining.as_secs()),
        phase_countdown: PhaseCountdown::from_secs(phase_remaining.as_secs()),
    }
}

/// Find the start instant for a timer that has `remaining_secs` of its
/// cycle left at `now`.
///
/// Requests beyond one full cycle are rejected, never clamped. A request
/// of zero lands exactly on a cycle boundary, which `snapshot` reports as
/// the beginning of the next cycle.
pub fn derive_start_instant(
    remaining_secs: u64,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, CycleError> {
    if remaining_secs > CYCLE_SECS {
        return Err(CycleError::RemainingOutOfRange {
            requested: remaining_secs,
            max: CYCLE_SECS,
        });
    }

    let elapsed = TimeDelta::seconds((CYCLE_SECS - remaining_secs) as i64);
    Ok(now - elapsed)
}

// Callers only pass values already reduced into [0, CYCLE_MS]
fn millis(ms: i64) -> Duration {
    Duration::from_millis(ms as u64)
}
