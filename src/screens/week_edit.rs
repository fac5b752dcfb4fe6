use crate::error::{ConsoleError, ConsoleResult};
use crate::models::{DayKey, TimeBlock, WeeklyAvailability};

use super::presets::SchedulePreset;

/// A single user action on a week editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekEdit {
    SetWorking { day: DayKey, working: bool },
    SetBlock { day: DayKey, index: usize, start_time: String, end_time: String },
    AddBlock { day: DayKey },
    RemoveBlock { day: DayKey, index: usize },
    ApplyPreset(SchedulePreset),
}

impl WeekEdit {
    /// Applies the edit in place. Index errors leave `week` untouched.
    ///
    /// Block overlap and start/end ordering are not checked.
    pub fn apply(&self, week: &mut WeeklyAvailability) -> ConsoleResult<()> {
        match self {
            WeekEdit::SetWorking { day, working } => {
                let schedule = week.day_mut(*day);
                schedule.is_working = *working;
                schedule.normalize();
            }
            WeekEdit::SetBlock {
                day,
                index,
                start_time,
                end_time,
            } => {
                let block = week
                    .day_mut(*day)
                    .blocks
                    .get_mut(*index)
                    .ok_or_else(|| missing_block(*day, *index))?;
                *block = TimeBlock::new(start_time.clone(), end_time.clone());
            }
            WeekEdit::AddBlock { day } => {
                week.day_mut(*day).blocks.push(TimeBlock::default());
            }
            WeekEdit::RemoveBlock { day, index } => {
                let schedule = week.day_mut(*day);
                if *index >= schedule.blocks.len() {
                    return Err(missing_block(*day, *index));
                }
                if schedule.blocks.len() == 1 {
                    return Err(ConsoleError::Validation(format!(
                        "{} must keep at least one time block",
                        day
                    )));
                }
                schedule.blocks.remove(*index);
            }
            WeekEdit::ApplyPreset(preset) => {
                *week = preset.week();
            }
        }

        Ok(())
    }
}

fn missing_block(day: DayKey, index: usize) -> ConsoleError {
    ConsoleError::Validation(format!("{} has no time block #{}", day, index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DaySchedule;

    #[test]
    fn test_enabling_a_day_keeps_previous_times() {
        let mut week = WeeklyAvailability::empty_week();
        week.monday.blocks[0] = TimeBlock::new("07:00", "15:00");

        WeekEdit::SetWorking {
            day: DayKey::Monday,
            working: true,
        }
        .apply(&mut week)
        .unwrap();

        assert_eq!(week.monday, DaySchedule::working("07:00", "15:00"));
    }

    #[test]
    fn test_disabling_a_day_retains_blocks() {
        let mut week = WeeklyAvailability::empty_week();
        week.friday = DaySchedule::working("10:00", "18:00");

        WeekEdit::SetWorking {
            day: DayKey::Friday,
            working: false,
        }
        .apply(&mut week)
        .unwrap();

        assert!(!week.friday.is_working);
        assert_eq!(week.friday.blocks, vec![TimeBlock::new("10:00", "18:00")]);
    }

    #[test]
    fn test_split_shift_add_and_remove() {
        let mut week = WeeklyAvailability::empty_week();
        WeekEdit::AddBlock { day: DayKey::Tuesday }.apply(&mut week).unwrap();
        WeekEdit::SetBlock {
            day: DayKey::Tuesday,
            index: 1,
            start_time: "18:00".to_string(),
            end_time: "21:00".to_string(),
        }
        .apply(&mut week)
        .unwrap();
        assert_eq!(week.tuesday.blocks.len(), 2);

        WeekEdit::RemoveBlock {
            day: DayKey::Tuesday,
            index: 0,
        }
        .apply(&mut week)
        .unwrap();
        assert_eq!(week.tuesday.blocks, vec![TimeBlock::new("18:00", "21:00")]);
    }

    #[test]
    fn test_invalid_block_index_and_last_block_are_rejected() {
        let mut week = WeeklyAvailability::empty_week();

        let bad_index = WeekEdit::SetBlock {
            day: DayKey::Monday,
            index: 3,
            start_time: "01:00".to_string(),
            end_time: "02:00".to_string(),
        };
        assert!(matches!(bad_index.apply(&mut week), Err(ConsoleError::Validation(_))));

        let last = WeekEdit::RemoveBlock {
            day: DayKey::Monday,
            index: 0,
        };
        assert!(matches!(last.apply(&mut week), Err(ConsoleError::Validation(_))));
        assert_eq!(week, WeeklyAvailability::empty_week());
    }
}
