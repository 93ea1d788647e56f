use outpost_core::context::{AppConfig, AppConfigExt, BackgroundTasks};
use outpost_core::scheduler::{SchedulerHandle, SystemClock, TickScheduler};
use outpost_core::timers::{Lifecycle, TimerAction, TimerList};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Holds all shared state for the CLI application.
/// This is a lightweight container - logic lives in the individual state types.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    /// The timer list. Only replaced through `dispatch`.
    timers: Arc<RwLock<TimerList>>,
    pub scheduler: SchedulerHandle,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl CliContext {
    /// Build the context and start the tick scheduler on the current runtime.
    pub fn start(config: AppConfig) -> Self {
        let (scheduler, handle) = TickScheduler::new(SystemClock, config.tick_interval());
        let ticker = scheduler.spawn();

        let tasks = BackgroundTasks {
            ticker: Some(ticker),
            scheduler: Some(handle.clone()),
        };

        Self {
            config: Arc::new(RwLock::new(config)),
            timers: Arc::new(RwLock::new(TimerList::new())),
            scheduler: handle,
            tasks: Arc::new(Mutex::new(tasks)),
        }
    }

    /// Current timer list
    pub async fn timers(&self) -> TimerList {
        self.timers.read().await.clone()
    }

    /// Apply a change to the timer list and forward it to the scheduler.
    pub async fn dispatch(&self, action: TimerAction) -> Result<Lifecycle, String> {
        // Held across the notify so the scheduler sees changes in list order
        let mut timers = self.timers.write().await;
        let (next, lifecycle) = timers.apply(action).map_err(|e| e.to_string())?;

        // The list only moves once the scheduler has accepted the change
        self.scheduler
            .notify(lifecycle.clone())
            .await
            .map_err(|e| e.to_string())?;
        *timers = next;

        Ok(lifecycle)
    }

    /// Stop all recurring work
    pub async fn shutdown(&self) {
        self.tasks.lock().await.abort_all().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use outpost_core::timers::{TimerForm, TimerId};
    use std::time::Duration;

    fn record() -> outpost_core::timers::TimerRecord {
        TimerForm::new("阿尔法站", "星辰联盟")
            .with_remaining(2, 0, 0)
            .submit(Utc::now())
            .unwrap()
    }

    #[tokio::test]
    async fn test_dispatch_add_reaches_list_and_board() {
        let ctx = CliContext::start(AppConfig::default());
        let mut rx = ctx.scheduler.subscribe();

        let lifecycle = ctx.dispatch(TimerAction::Add(record())).await.unwrap();
        let Lifecycle::Added { id, .. } = lifecycle else {
            panic!("expected Added, got {lifecycle:?}");
        };
        assert_eq!(id, TimerId(1));
        assert_eq!(ctx.timers().await.len(), 1);

        tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|b| b.get(id).is_some()))
            .await
            .expect("timed out waiting for board")
            .expect("scheduler dropped");

        ctx.shutdown().await;
    }

    #[tokio::test]
    async fn test_dispatch_after_shutdown_leaves_list_unchanged() {
        let ctx = CliContext::start(AppConfig::default());
        ctx.shutdown().await;

        let result = ctx.dispatch(TimerAction::Add(record())).await;

        assert!(result.is_err());
        assert_eq!(ctx.timers().await.len(), 0);
    }

    #[tokio::test]
    async fn test_failed_remove_keeps_timer() {
        let ctx = CliContext::start(AppConfig::default());
        ctx.dispatch(TimerAction::Add(record())).await.unwrap();
        ctx.shutdown().await;

        assert!(ctx.dispatch(TimerAction::Remove(TimerId(1))).await.is_err());
        assert!(ctx.timers().await.get(TimerId(1)).is_some());
    }
}
