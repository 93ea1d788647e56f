pub mod context;
pub mod cycle;
pub mod scheduler;
pub mod timers;

// Re-exports for convenience
pub use context::{AppConfig, AppConfigExt, BackgroundTasks, ConfigError};
pub use cycle::{
    CYCLE_SECS, CycleCountdown, CycleError, PHASE1_SECS, PHASE2_SECS, PhaseCountdown,
    PhaseSnapshot, derive_start_instant, snapshot,
};
pub use outpost_types::{Phase, PhaseFilter};
pub use scheduler::{
    Clock, ManualClock, SchedulerCommand, SchedulerError, SchedulerHandle, SnapshotBoard,
    SystemClock, TickScheduler,
};
pub use timers::{
    Lifecycle, PhaseCounts, TimerAction, TimerEntry, TimerError, TimerForm, TimerId, TimerList,
    TimerRecord,
};
