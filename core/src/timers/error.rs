//! Error types for timer operations

use thiserror::Error;

use super::TimerId;
use crate::cycle::CycleError;

/// Errors raised when a form is submitted or the timer list is changed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    #[error("请输入工程站名称")]
    EmptyProject,

    #[error("请输入所属联盟")]
    EmptyAlliance,

    #[error("剩余时间不能超过4天（96小时）")]
    RemainingOutOfRange(#[from] CycleError),

    #[error("start time {start} is after creation time {created}")]
    StartInFuture { start: String, created: String },

    #[error("no timer with id {0}")]
    NotFound(TimerId),

    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
}
