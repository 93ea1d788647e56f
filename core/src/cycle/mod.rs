//! Phase cycle calculation
//!
//! Every contested resource runs an endless 96 hour cycle:
//! - **Phase 1** (24h): contestable, the resource can be attacked
//! - **Phase 2** (72h): protected
//!
//! The phase is never stored. It is derived from the timer's start instant
//! and the evaluation instant, so any caller can recompute a snapshot at
//! any time without coordination.

mod calculator;
mod countdown;
mod error;


pub use calculator::{
    CYCLE_SECS, PHASE1_SECS, PHASE2_SECS, PhaseSnapshot, derive_start_instant, snapshot,
};
pub use countdown::{CycleCountdown, PhaseCountdown};
pub use error::CycleError;
