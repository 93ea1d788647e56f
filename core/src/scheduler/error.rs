//! Error types for the tick scheduler

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("tick scheduler is not running")]
    Stopped,
}
