use std::str::FromStr;

use crate::error::ConsoleError;
use crate::models::{DayKey, DaySchedule, WeeklyAvailability};

/// Named weekly templates offered by the schedule editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulePreset {
    Weekdays9To5,
    Weekdays8To4,
    ExtendedHours,
    Closed,
}

impl SchedulePreset {
    pub const ALL: [SchedulePreset; 4] = [
        SchedulePreset::Weekdays9To5,
        SchedulePreset::Weekdays8To4,
        SchedulePreset::ExtendedHours,
        SchedulePreset::Closed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SchedulePreset::Weekdays9To5 => "weekdays_9_to_5",
            SchedulePreset::Weekdays8To4 => "weekdays_8_to_4",
            SchedulePreset::ExtendedHours => "extended_hours",
            SchedulePreset::Closed => "closed",
        }
    }

    pub fn week(&self) -> WeeklyAvailability {
        let mut week = WeeklyAvailability::empty_week();

        match self {
            SchedulePreset::Weekdays9To5 => weekdays(&mut week, "09:00", "17:00"),
            SchedulePreset::Weekdays8To4 => weekdays(&mut week, "08:00", "16:00"),
            SchedulePreset::ExtendedHours => {
                weekdays(&mut week, "08:00", "20:00");
                week.saturday = DaySchedule::working("09:00", "14:00");
            }
            SchedulePreset::Closed => {}
        }

        week
    }
}

fn weekdays(week: &mut WeeklyAvailability, start: &str, end: &str) {
    for day in DayKey::ALL.into_iter().filter(DayKey::is_weekday) {
        week.set_day(day, DaySchedule::working(start, end));
    }
}

impl FromStr for SchedulePreset {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchedulePreset::ALL
            .into_iter()
            .find(|preset| preset.name() == s.trim())
            .ok_or_else(|| ConsoleError::Validation(format!("unknown schedule preset '{}'", s)))
    }
}
