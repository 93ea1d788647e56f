use chrono::Utc;
use outpost_core::context::PhaseFilter;
use outpost_core::scheduler::{SchedulerHandle, SnapshotBoard};
use outpost_core::timers::{Lifecycle, PRESETS, TimerAction, TimerForm, TimerId, find_preset};
use std::io::Write;
use tokio::sync::watch::Receiver;

use crate::CliContext;
use crate::render;
use crate::repl::confirm;

pub async fn add_timer(
    ctx: &CliContext,
    project: &str,
    alliance: &str,
    days: u32,
    hours: u32,
    minutes: u32,
    preset: Option<&str>,
) -> Result<(), String> {
    let mut form = TimerForm::new(project, alliance).with_remaining(days, hours, minutes);
    if let Some(key) = preset {
        form.apply_preset(find_preset(key).map_err(|e| e.to_string())?);
    }

    let now = Utc::now();
    let record = form.submit(now).map_err(|e| e.to_string())?;
    let snap = record.snapshot(now);

    if let Lifecycle::Added { id, .. } = ctx.dispatch(TimerAction::Add(record)).await? {
        println!("Added timer [{}]: {} ({})", id, snap.formatted(), snap.phase);
    }
    Ok(())
}

pub async fn list_timers(ctx: &CliContext, filter: Option<PhaseFilter>) -> Result<(), String> {
    let filter = match filter {
        Some(f) => f,
        None => ctx.config.read().await.default_filter,
    };
    let timers = ctx.timers().await;
    let now = Utc::now();

    println!("{}", render::stats_bar(&timers.counts(now)));
    println!("{}", "-".repeat(60));

    if timers.is_empty() {
        println!("No timers");
        return Ok(());
    }

    let shown = timers.filtered(filter, now);
    if shown.is_empty() {
        println!("No timers in {}", filter.label());
        return Ok(());
    }

    for (entry, snap) in shown {
        println!("{}\n", render::timer_card(entry, &snap));
    }
    Ok(())
}

/// Destructive commands prompt unless `--yes` was given or prompts are off
fn needs_confirmation(yes: bool, confirm_destructive: bool) -> bool {
    !yes && confirm_destructive
}

pub async fn delete_timer(ctx: &CliContext, id: u64, yes: bool) -> Result<(), String> {
    let id = TimerId(id);
    let project = ctx
        .timers()
        .await
        .get(id)
        .map(|e| e.record.project.clone())
        .ok_or_else(|| format!("no timer with id {id}"))?;

    let confirm_destructive = ctx.config.read().await.confirm_destructive;
    if needs_confirmation(yes, confirm_destructive)
        && !confirm("确定要删除这个倒计时吗？")?
    {
        println!("Cancelled");
        return Ok(());
    }

    ctx.dispatch(TimerAction::Remove(id)).await?;
    println!("Deleted timer [{}] {}", id, project);
    Ok(())
}

pub async fn reset_timers(ctx: &CliContext, yes: bool) -> Result<(), String> {
    let count = ctx.timers().await.len();
    if count == 0 {
        println!("No timers to delete");
        return Ok(());
    }

    let confirm_destructive = ctx.config.read().await.confirm_destructive;
    if needs_confirmation(yes, confirm_destructive)
        && !confirm("确定要删除所有倒计时吗？此操作不可撤销。")?
    {
        println!("Cancelled");
        return Ok(());
    }

    ctx.dispatch(TimerAction::Clear).await?;
    println!("Deleted {} timers", count);
    Ok(())
}

/// Receiver that only wakes for boards published after this call
fn fresh_boards(scheduler: &SchedulerHandle) -> Receiver<SnapshotBoard> {
    let mut rx = scheduler.subscribe();
    rx.mark_unchanged();
    rx
}

/// Print the next `ticks` boards published by the scheduler
pub async fn watch(ctx: &CliContext, ticks: usize) -> Result<(), String> {
    let mut rx = fresh_boards(&ctx.scheduler);

    for _ in 0..ticks {
        rx.changed().await.map_err(|e| e.to_string())?;
        let board = rx.borrow_and_update().clone();
        let timers = ctx.timers().await;

        let at = board
            .at
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_default();
        println!("── {} ──", at);

        if board.is_empty() {
            println!("No timers");
        }
        for (id, snap) in &board.entries {
            // A timer removed between publish and render is skipped
            if let Some(entry) = timers.get(*id) {
                println!("{}", render::timer_line(entry, snap));
            }
        }
    }
    Ok(())
}

pub fn show_presets() -> Result<(), String> {
    for preset in PRESETS.iter() {
        println!(
            "{:<4} {}  ({}天 {:02}:{:02})",
            preset.key, preset.label, preset.days, preset.hours, preset.minutes
        );
    }
    Ok(())
}

pub async fn show_settings(ctx: &CliContext) -> Result<(), String> {
    use outpost_core::context::{AppConfig, AppConfigExt};

    let config = ctx.config.read().await;
    match AppConfig::config_path() {
        Ok(path) => println!("Config file:          {}", path.display()),
        Err(e) => println!("Config file:          unavailable ({e})"),
    }
    println!("Tick interval:        {}ms", config.tick_interval_ms);
    println!("Confirm destructive:  {}", config.confirm_destructive);
    println!("Default filter:       {}", config.default_filter.label());
    Ok(())
}

pub fn exit() -> Result<(), String> {
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use outpost_core::scheduler::{ManualClock, TickScheduler};
    use std::time::Duration;

    #[test]
    fn test_yes_flag_skips_confirmation() {
        assert!(!needs_confirmation(true, true));
        assert!(!needs_confirmation(true, false));
    }

    #[test]
    fn test_confirmation_follows_setting_without_yes() {
        assert!(needs_confirmation(false, true));
        assert!(!needs_confirmation(false, false));
    }

    #[tokio::test]
    async fn test_fresh_boards_skips_already_published_board() {
        let epoch = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let (scheduler, handle) =
            TickScheduler::new(ManualClock::new(epoch), Duration::from_secs(3600));
        let task = scheduler.spawn();

        // First tick fires immediately
        let mut initial = handle.subscribe();
        tokio::time::timeout(Duration::from_secs(5), initial.wait_for(|b| b.at.is_some()))
            .await
            .expect("timed out waiting for first board")
            .expect("scheduler dropped");

        let mut rx = fresh_boards(&handle);
        assert!(!rx.has_changed().unwrap());

        handle.track(TimerId(3), epoch).await.unwrap();
        tokio::time::timeout(Duration::from_secs(5), rx.changed())
            .await
            .expect("timed out waiting for board")
            .unwrap();
        assert!(rx.borrow_and_update().get(TimerId(3)).is_some());

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }
}
