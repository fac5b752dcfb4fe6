use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MappingError;

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "17:00";

/// The seven canonical days, in calendar order starting Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKey {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayKey {
    pub const ALL: [DayKey; 7] = [
        DayKey::Monday,
        DayKey::Tuesday,
        DayKey::Wednesday,
        DayKey::Thursday,
        DayKey::Friday,
        DayKey::Saturday,
        DayKey::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayKey::Monday => "monday",
            DayKey::Tuesday => "tuesday",
            DayKey::Wednesday => "wednesday",
            DayKey::Thursday => "thursday",
            DayKey::Friday => "friday",
            DayKey::Saturday => "saturday",
            DayKey::Sunday => "sunday",
        }
    }

    pub fn is_weekday(&self) -> bool {
        !matches!(self, DayKey::Saturday | DayKey::Sunday)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DayKey {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MappingError::UnknownKey(s.to_string()))
    }
}

/// One contiguous working period, "HH:MM" to "HH:MM".
///
/// Ordering of start and end is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    pub start_time: String,
    pub end_time: String,
}

impl TimeBlock {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

impl Default for TimeBlock {
    fn default() -> Self {
        Self::new(DEFAULT_START_TIME, DEFAULT_END_TIME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub is_working: bool,
    pub blocks: Vec<TimeBlock>,
}

impl DaySchedule {
    /// Off day with the default block kept so re-enabling restores sane times.
    pub fn off() -> Self {
        Self {
            is_working: false,
            blocks: vec![TimeBlock::default()],
        }
    }

    pub fn working(start_time: &str, end_time: &str) -> Self {
        Self {
            is_working: true,
            blocks: vec![TimeBlock::new(start_time, end_time)],
        }
    }

    /// The block used when a single time range has to stand for the whole day.
    pub fn representative_block(&self) -> Option<&TimeBlock> {
        self.blocks.first()
    }

    /// Guarantees at least one block while the day is marked working.
    pub fn normalize(&mut self) {
        if self.is_working && self.blocks.is_empty() {
            self.blocks.push(TimeBlock::default());
        }
    }
}

impl Default for DaySchedule {
    fn default() -> Self {
        Self::off()
    }
}

/// Dense week of schedules keyed by day. Always holds all seven days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAvailability {
    pub monday: DaySchedule,
    pub tuesday: DaySchedule,
    pub wednesday: DaySchedule,
    pub thursday: DaySchedule,
    pub friday: DaySchedule,
    pub saturday: DaySchedule,
    pub sunday: DaySchedule,
}

impl WeeklyAvailability {
    /// All seven days off with a 09:00-17:00 block. A fresh value every call.
    pub fn empty_week() -> Self {
        Self {
            monday: DaySchedule::off(),
            tuesday: DaySchedule::off(),
            wednesday: DaySchedule::off(),
            thursday: DaySchedule::off(),
            friday: DaySchedule::off(),
            saturday: DaySchedule::off(),
            sunday: DaySchedule::off(),
        }
    }

    pub fn day(&self, key: DayKey) -> &DaySchedule {
        match key {
            DayKey::Monday => &self.monday,
            DayKey::Tuesday => &self.tuesday,
            DayKey::Wednesday => &self.wednesday,
            DayKey::Thursday => &self.thursday,
            DayKey::Friday => &self.friday,
            DayKey::Saturday => &self.saturday,
            DayKey::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, key: DayKey) -> &mut DaySchedule {
        match key {
            DayKey::Monday => &mut self.monday,
            DayKey::Tuesday => &mut self.tuesday,
            DayKey::Wednesday => &mut self.wednesday,
            DayKey::Thursday => &mut self.thursday,
            DayKey::Friday => &mut self.friday,
            DayKey::Saturday => &mut self.saturday,
            DayKey::Sunday => &mut self.sunday,
        }
    }

    pub fn set_day(&mut self, key: DayKey, schedule: DaySchedule) {
        *self.day_mut(key) = schedule;
    }

    /// Days in calendar order, Monday first.
    pub fn iter(&self) -> impl Iterator<Item = (DayKey, &DaySchedule)> {
        DayKey::ALL.into_iter().map(move |key| (key, self.day(key)))
    }

    pub fn normalize(&mut self) {
        for key in DayKey::ALL {
            self.day_mut(key).normalize();
        }
    }

    pub fn working_days(&self) -> usize {
        self.iter().filter(|(_, day)| day.is_working).count()
    }
}

impl Default for WeeklyAvailability {
    fn default() -> Self {
        Self::empty_week()
    }
}

/// Structural equality over every day's flag and blocks, in block order.
pub fn availability_equals(a: &WeeklyAvailability, b: &WeeklyAvailability) -> bool {
    DayKey::ALL.iter().all(|&key| {
        let (left, right) = (a.day(key), b.day(key));
        left.is_working == right.is_working
            && left.blocks.len() == right.blocks.len()
            && left
                .blocks
                .iter()
                .zip(&right.blocks)
                .all(|(x, y)| x.start_time == y.start_time && x.end_time == y.end_time)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_week_is_all_off_with_default_block() {
        let week = WeeklyAvailability::empty_week();

        for (_, day) in week.iter() {
            assert!(!day.is_working);
            assert_eq!(day.blocks, vec![TimeBlock::new("09:00", "17:00")]);
        }
        assert_eq!(week.working_days(), 0);
    }

    #[test]
    fn test_empty_week_returns_independent_copies() {
        let mut first = WeeklyAvailability::empty_week();
        first.monday.is_working = true;

        let second = WeeklyAvailability::empty_week();
        assert!(!second.monday.is_working);
    }

    #[test]
    fn test_iter_is_calendar_order() {
        let week = WeeklyAvailability::empty_week();
        let keys: Vec<DayKey> = week.iter().map(|(key, _)| key).collect();

        assert_eq!(keys, DayKey::ALL.to_vec());
        assert_eq!(keys.first(), Some(&DayKey::Monday));
        assert_eq!(keys.last(), Some(&DayKey::Sunday));
    }

    #[test]
    fn test_normalize_adds_block_only_for_working_days() {
        let mut working = DaySchedule {
            is_working: true,
            blocks: vec![],
        };
        working.normalize();
        assert_eq!(working.blocks, vec![TimeBlock::default()]);

        let mut off = DaySchedule {
            is_working: false,
            blocks: vec![],
        };
        off.normalize();
        assert!(off.blocks.is_empty());
    }

    #[test]
    fn test_equality_is_order_sensitive_for_blocks() {
        let mut a = WeeklyAvailability::empty_week();
        a.tuesday = DaySchedule {
            is_working: true,
            blocks: vec![TimeBlock::new("08:00", "12:00"), TimeBlock::new("13:00", "17:00")],
        };

        let mut b = a.clone();
        assert!(availability_equals(&a, &b));

        b.tuesday.blocks.reverse();
        assert!(!availability_equals(&a, &b));
    }

    #[test]
    fn test_equality_ignores_nothing_on_off_days() {
        let a = WeeklyAvailability::empty_week();
        let mut b = a.clone();
        b.sunday.blocks[0].end_time = "18:00".to_string();

        assert!(!availability_equals(&a, &b));
    }

    #[test]
    fn test_day_key_parse() {
        assert_eq!("Monday".parse::<DayKey>().unwrap(), DayKey::Monday);
        assert_eq!(" sunday ".parse::<DayKey>().unwrap(), DayKey::Sunday);
        assert!("funday".parse::<DayKey>().is_err());
    }

    #[test]
    fn test_week_serializes_with_day_names() {
        let json = serde_json::to_value(WeeklyAvailability::empty_week()).unwrap();

        assert_eq!(json["monday"]["isWorking"], false);
        assert_eq!(json["sunday"]["blocks"][0]["startTime"], "09:00");
    }
}
