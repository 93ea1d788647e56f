//! Error types for cycle calculations

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("remaining time {requested}s exceeds the {max}s cycle")]
    RemainingOutOfRange { requested: u64, max: u64 },
}
