//! Text rendering of timer cards and the stats bar

use outpost_core::cycle::PhaseSnapshot;
use outpost_core::timers::{PhaseCounts, TimerEntry};

const BAR_WIDTH: usize = 20;

/// Multi-line card for one timer
pub fn timer_card(entry: &TimerEntry, snap: &PhaseSnapshot) -> String {
    format!(
        "[{id}] {project} · {alliance}  <{badge}>\n    {total}  当前周期剩余时间\n    ● {phase}  {phase_time}  {bar} {percent}",
        id = entry.id,
        project = entry.record.project,
        alliance = entry.record.alliance,
        badge = snap.phase.label(),
        total = snap.formatted(),
        phase = snap.phase.description(),
        phase_time = snap.phase_formatted(),
        bar = progress_bar(snap.phase_progress),
        percent = snap.progress_label(),
    )
}

/// Single line used by `watch`
pub fn timer_line(entry: &TimerEntry, snap: &PhaseSnapshot) -> String {
    format!(
        "[{}] {:<12} P{} {:>14}  {}",
        entry.id,
        entry.record.project,
        snap.phase.number(),
        snap.formatted(),
        snap.phase_formatted(),
    )
}

pub fn stats_bar(counts: &PhaseCounts) -> String {
    format!(
        "总数 {} | 可争夺 {} | 保护 {}",
        counts.total, counts.contestable, counts.protected
    )
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).floor() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
