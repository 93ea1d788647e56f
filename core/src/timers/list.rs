//! Timer list state container
//!
//! The list is an immutable ordered collection. Every change goes through
//! `TimerList::apply`, which returns the next list plus a `Lifecycle`
//! notification for whoever re-evaluates timers (see `scheduler`).

use chrono::{DateTime, Utc};
use outpost_types::{Phase, PhaseFilter};

use super::error::TimerError;
use super::record::{TimerEntry, TimerId, TimerRecord};
use crate::cycle::PhaseSnapshot;

/// A requested change to the timer list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerAction {
    Add(TimerRecord),
    Remove(TimerId),
    Clear,
}

/// What changed, as seen by the tick scheduler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    Added { id: TimerId, start: DateTime<Utc> },
    Removed(TimerId),
    Cleared,
}

/// Per-phase totals for the stats bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseCounts {
    pub total: usize,
    pub contestable: usize,
    pub protected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerList {
    entries: Vec<TimerEntry>,
    next_id: u64,
}

impl Default for TimerList {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl TimerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produce the list that results from `action`.
    ///
    /// `self` is left untouched, so a rejected action leaves the caller's
    /// state exactly as it was.
    pub fn apply(&self, action: TimerAction) -> Result<(TimerList, Lifecycle), TimerError> {
        match action {
            TimerAction::Add(record) => {
                if record.start_time > record.created_at {
                    return Err(TimerError::StartInFuture {
                        start: record.start_time.to_rfc3339(),
                        created: record.created_at.to_rfc3339(),
                    });
                }

                let id = TimerId(self.next_id);
                let start = record.start_time;
                let mut next = self.clone();
                next.entries.push(TimerEntry { id, record });
                next.next_id += 1;

                tracing::debug!(%id, %start, "Timer added");
                Ok((next, Lifecycle::Added { id, start }))
            }
            TimerAction::Remove(id) => {
                if self.get(id).is_none() {
                    return Err(TimerError::NotFound(id));
                }

                let next = Self {
                    entries: self.entries.iter().filter(|e| e.id != id).cloned().collect(),
                    next_id: self.next_id,
                };

                tracing::debug!(%id, "Timer removed");
                Ok((next, Lifecycle::Removed(id)))
            }
            TimerAction::Clear => {
                tracing::debug!(count = self.entries.len(), "Timer list cleared");
                Ok((
                    Self {
                        entries: Vec::new(),
                        next_id: self.next_id,
                    },
                    Lifecycle::Cleared,
                ))
            }
        }
    }

    pub fn entries(&self) -> &[TimerEntry] {
        &self.entries
    }

    pub fn get(&self, id: TimerId) -> Option<&TimerEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count timers per phase as of `now`
    pub fn counts(&self, now: DateTime<Utc>) -> PhaseCounts {
        self.entries
            .iter()
            .fold(PhaseCounts::default(), |mut counts, entry| {
                counts.total += 1;
                match entry.record.snapshot(now).phase {
                    Phase::Contestable => counts.contestable += 1,
                    Phase::Protected => counts.protected += 1,
                }
                counts
            })
    }

    /// Entries passing `filter` as of `now`, in insertion order, each paired
    /// with its snapshot
    pub fn filtered(
        &self,
        filter: PhaseFilter,
        now: DateTime<Utc>,
    ) -> Vec<(&TimerEntry, PhaseSnapshot)> {
        self.entries
            .iter()
            .map(|entry| (entry, entry.record.snapshot(now)))
            .filter(|(_, snap)| filter.matches(snap.phase))
            .collect()
    }
}
