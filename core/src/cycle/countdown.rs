//! Whole-second countdown breakdowns used for display

use std::fmt;

const SECS_PER_DAY: u64 = 24 * 60 * 60;
const SECS_PER_HOUR: u64 = 60 * 60;
const SECS_PER_MINUTE: u64 = 60;

/// Time left in the whole cycle, split into days and a clock.
///
/// Renders as `{days}天 HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleCountdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CycleCountdown {
    pub fn from_secs(total: u64) -> Self {
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }

    pub fn as_secs(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }
}

impl fmt::Display for CycleCountdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}天 {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Time left in the current phase. Hours are not folded into days, so a
/// fresh protected phase reads `72:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhaseCountdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl PhaseCountdown {
    pub fn from_secs(total: u64) -> Self {
        Self {
            hours: total / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }

    pub fn as_secs(&self) -> u64 {
        self.hours * SECS_PER_HOUR + self.minutes * SECS_PER_MINUTE + self.seconds
    }
}

impl fmt::Display for PhaseCountdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_countdown_carries_into_days() {
        let c = CycleCountdown::from_secs(255_600);
        assert_eq!(c, CycleCountdown { days: 2, hours: 23, minutes: 0, seconds: 0 });
        assert_eq!(c.to_string(), "2天 23:00:00");
        assert_eq!(c.as_secs(), 255_600);
    }

    #[test]
    fn phase_countdown_keeps_hours_above_a_day() {
        let c = PhaseCountdown::from_secs(255_600);
        assert_eq!(c.to_string(), "71:00:00");
        assert_eq!(PhaseCountdown::from_secs(259_200).to_string(), "72:00:00");
    }

    #[test]
    fn fields_are_zero_padded_days_are_not() {
        assert_eq!(CycleCountdown::from_secs(61).to_string(), "0天 00:01:01");
        assert_eq!(CycleCountdown::from_secs(345_600).to_string(), "4天 00:00:00");
        assert_eq!(PhaseCountdown::from_secs(9).to_string(), "00:00:09");
    }
}
