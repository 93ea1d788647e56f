//! Shared types for Outpost
//!
//! This crate contains serializable types that are shared between the
//! calculator core (outpost-core) and the host front-end (outpost-cli).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────────────────────────────────────
// Phases
// ─────────────────────────────────────────────────────────────────────────────

/// The two phases of a contested resource cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// First 24 hours of a cycle, the resource can be attacked
    Contestable,
    /// Remaining 72 hours of a cycle, the resource is shielded
    Protected,
}

impl Phase {
    /// Phase number as shown to users (1 or 2)
    pub fn number(&self) -> u8 {
        match self {
            Phase::Contestable => 1,
            Phase::Protected => 2,
        }
    }

    /// Short badge label
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Contestable => "可争夺阶段",
            Phase::Protected => "保护阶段",
        }
    }

    /// Longer label used next to the phase countdown
    pub fn description(&self) -> &'static str {
        match self {
            Phase::Contestable => "可争夺阶段 (第一天)",
            Phase::Protected => "保护阶段 (后三天)",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// List filter matching the phase buttons of the timer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseFilter {
    #[default]
    All,
    Contestable,
    Protected,
}

impl PhaseFilter {
    /// Returns true if a timer currently in `phase` passes this filter
    pub fn matches(&self, phase: Phase) -> bool {
        match self {
            PhaseFilter::All => true,
            PhaseFilter::Contestable => phase == Phase::Contestable,
            PhaseFilter::Protected => phase == Phase::Protected,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhaseFilter::All => "显示全部",
            PhaseFilter::Contestable => Phase::Contestable.label(),
            PhaseFilter::Protected => Phase::Protected.label(),
        }
    }
}

impl FromStr for PhaseFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(PhaseFilter::All),
            "contestable" | "phase1" | "1" => Ok(PhaseFilter::Contestable),
            "protected" | "phase2" | "2" => Ok(PhaseFilter::Protected),
            other => Err(format!("unknown filter '{other}' (expected all, contestable or protected)")),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Re-evaluation cadence for every live timer, in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Ask before deleting a timer or clearing the list
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,

    /// Filter applied by `list` when none is given
    #[serde(default)]
    pub default_filter: PhaseFilter,
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            confirm_destructive: true,
            default_filter: PhaseFilter::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matches_phases() {
        assert!(PhaseFilter::All.matches(Phase::Contestable));
        assert!(PhaseFilter::All.matches(Phase::Protected));
        assert!(PhaseFilter::Contestable.matches(Phase::Contestable));
        assert!(!PhaseFilter::Contestable.matches(Phase::Protected));
        assert!(!PhaseFilter::Protected.matches(Phase::Contestable));
    }

    #[test]
    fn filter_parses_aliases() {
        assert_eq!("phase1".parse::<PhaseFilter>(), Ok(PhaseFilter::Contestable));
        assert_eq!("Protected".parse::<PhaseFilter>(), Ok(PhaseFilter::Protected));
        assert_eq!("all".parse::<PhaseFilter>(), Ok(PhaseFilter::All));
        assert!("phase3".parse::<PhaseFilter>().is_err());
    }

    #[test]
    fn phase_numbers() {
        assert_eq!(Phase::Contestable.number(), 1);
        assert_eq!(Phase::Protected.number(), 2);
    }
}
