use tokio::task::JoinHandle;

use crate::scheduler::SchedulerHandle;

#[derive(Default)]
pub struct BackgroundTasks {
    pub ticker: Option<JoinHandle<()>>,
    pub scheduler: Option<SchedulerHandle>,
}

impl BackgroundTasks {
    /// Ask the scheduler to stop, then make sure its task is gone
    pub async fn abort_all(&mut self) {
        if let Some(scheduler) = self.scheduler.take() {
            if let Err(e) = scheduler.shutdown().await {
                tracing::debug!(error = %e, "Scheduler already stopped");
            }
        }
        if let Some(handle) = self.ticker.take() {
            handle.abort();
            let _ = handle.await;
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|h| !h.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{ManualClock, TickScheduler};
    use chrono::Utc;
    use std::time::Duration;

    #[tokio::test]
    async fn abort_all_stops_the_ticker() {
        let (scheduler, handle) =
            TickScheduler::new(ManualClock::new(Utc::now()), Duration::from_millis(20));

        let mut tasks = BackgroundTasks {
            ticker: Some(scheduler.spawn()),
            scheduler: Some(handle.clone()),
        };
        assert!(tasks.is_running());

        tasks.abort_all().await;
        assert!(!tasks.is_running());
        assert!(handle.untrack(crate::timers::TimerId(1)).await.is_err());
    }
}
