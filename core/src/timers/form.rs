//! New timer form
//!
//! Users rarely know when a cycle started. They read "X days Y hours Z
//! minutes left" off the game and enter that; the form turns it into a
//! start instant with `derive_start_instant`.

use chrono::{DateTime, Utc};

use super::error::TimerError;
use super::record::TimerRecord;
use crate::cycle::derive_start_instant;

/// Raw input of the "add timer" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerForm {
    pub project: String,
    pub alliance: String,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
}

impl TimerForm {
    pub fn new(project: impl Into<String>, alliance: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            alliance: alliance.into(),
            ..Self::default()
        }
    }

    /// Set the remaining time fields
    pub fn with_remaining(mut self, days: u32, hours: u32, minutes: u32) -> Self {
        self.days = days;
        self.hours = hours;
        self.minutes = minutes;
        self
    }

    /// Overwrite the remaining time with a preset
    pub fn apply_preset(&mut self, preset: &RemainingPreset) {
        self.days = preset.days;
        self.hours = preset.hours;
        self.minutes = preset.minutes;
    }

    /// Total requested remaining time in seconds
    pub fn remaining_secs(&self) -> u64 {
        u64::from(self.days) * 24 * 60 * 60
            + u64::from(self.hours) * 60 * 60
            + u64::from(self.minutes) * 60
    }

    /// Validate the form and build a record evaluated against `now`.
    pub fn submit(&self, now: DateTime<Utc>) -> Result<TimerRecord, TimerError> {
        let project = self.project.trim();
        if project.is_empty() {
            return Err(TimerError::EmptyProject);
        }

        let alliance = self.alliance.trim();
        if alliance.is_empty() {
            return Err(TimerError::EmptyAlliance);
        }

        let start_time = derive_start_instant(self.remaining_secs(), now)?;

        Ok(TimerRecord {
            project: project.to_string(),
            alliance: alliance.to_string(),
            start_time,
            created_at: now,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Presets
// ═══════════════════════════════════════════════════════════════════════════

/// Quick-pick remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingPreset {
    pub key: &'static str,
    pub label: &'static str,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
}

pub static PRESETS: [RemainingPreset; 5] = [
    RemainingPreset { key: "1h", label: "还剩1小时", days: 0, hours: 1, minutes: 0 },
    RemainingPreset { key: "6h", label: "还剩6小时", days: 0, hours: 6, minutes: 0 },
    RemainingPreset { key: "12h", label: "还剩12小时", days: 0, hours: 12, minutes: 0 },
    RemainingPreset { key: "1d", label: "还剩1天", days: 1, hours: 0, minutes: 0 },
    RemainingPreset { key: "3d", label: "还剩3天", days: 3, hours: 0, minutes: 0 },
];

/// Look up a preset by key (`1h`, `6h`, `12h`, `1d`, `3d`)
pub fn find_preset(key: &str) -> Result<&'static RemainingPreset, TimerError> {
    PRESETS
        .iter()
        .find(|p| p.key.eq_ignore_ascii_case(key.trim()))
        .ok_or_else(|| TimerError::UnknownPreset(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{CYCLE_SECS, CycleError, snapshot};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 10, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_submit_trims_names_and_derives_start() {
        let form = TimerForm::new("  阿尔法站 ", " 星辰联盟").with_remaining(2, 0, 0);
        let record = form.submit(now()).unwrap();

        assert_eq!(record.project, "阿尔法站");
        assert_eq!(record.alliance, "星辰联盟");
        assert_eq!(record.created_at, now());
        assert_eq!(snapshot(record.start_time, now()).total_remaining_secs(), 172_800);
    }

    #[test]
    fn test_blank_names_are_rejected() {
        let form = TimerForm::new("   ", "星辰联盟");
        assert_eq!(form.submit(now()), Err(TimerError::EmptyProject));

        let form = TimerForm::new("阿尔法站", "");
        assert_eq!(form.submit(now()), Err(TimerError::EmptyAlliance));
    }

    #[test]
    fn test_more_than_four_days_is_rejected() {
        let form = TimerForm::new("阿尔法站", "星辰联盟").with_remaining(4, 0, 1);
        assert_eq!(
            form.submit(now()),
            Err(TimerError::RemainingOutOfRange(CycleError::RemainingOutOfRange {
                requested: CYCLE_SECS + 60,
                max: CYCLE_SECS,
            }))
        );
    }

    #[test]
    fn test_exactly_four_days_is_accepted() {
        let form = TimerForm::new("阿尔法站", "星辰联盟").with_remaining(4, 0, 0);
        let record = form.submit(now()).unwrap();
        assert_eq!(record.start_time, now());
    }

    #[test]
    fn test_hours_and_minutes_are_not_capped_individually() {
        let form = TimerForm::new("贝塔站", "光辉联盟").with_remaining(0, 30, 90);
        assert_eq!(form.remaining_secs(), 30 * 3600 + 90 * 60);
        assert!(form.submit(now()).is_ok());
    }

    #[test]
    fn test_presets_fill_remaining_time() {
        let mut form = TimerForm::new("贝塔站", "光辉联盟");
        form.apply_preset(find_preset("3d").unwrap());
        assert_eq!(form.remaining_secs(), 3 * 86_400);

        form.apply_preset(find_preset("12H").unwrap());
        assert_eq!((form.days, form.hours, form.minutes), (0, 12, 0));

        assert_eq!(
            find_preset("2d"),
            Err(TimerError::UnknownPreset("2d".to_string()))
        );
    }
}
