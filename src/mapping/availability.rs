use crate::models::availability::{DEFAULT_END_TIME, DEFAULT_START_TIME};
use crate::models::{AvailabilityRecord, DayKey, DaySchedule, TimeBlock, WeeklyAvailability};

use super::days::{day_index_from_key, key_from_day_index};

fn block_from_record(record: &AvailabilityRecord) -> TimeBlock {
    TimeBlock::new(
        record.start_time.as_deref().unwrap_or(DEFAULT_START_TIME),
        record.end_time.as_deref().unwrap_or(DEFAULT_END_TIME),
    )
}

/// Builds a full week from sparse backend rows.
///
/// Days missing from `records` keep the default off schedule. Rows with a
/// day number outside 0..=6 are dropped. When a day repeats, the last row wins.
pub fn from_records(records: &[AvailabilityRecord]) -> WeeklyAvailability {
    let mut week = WeeklyAvailability::empty_week();

    for record in records {
        let Ok(key) = key_from_day_index(record.day_of_week) else {
            tracing::debug!(day_of_week = record.day_of_week, "Skipping availability row with unknown day");
            continue;
        };

        week.set_day(
            key,
            DaySchedule {
                is_working: record.is_active,
                blocks: vec![block_from_record(record)],
            },
        );
    }

    week
}

/// Multi-block variant of [`from_records`]: repeated active rows for a day
/// append blocks in input order. The day is working if any of its rows is
/// active, and then only active rows contribute blocks. A day with only
/// inactive rows keeps the first row's times as its off-day block.
pub fn from_records_multi(records: &[AvailabilityRecord]) -> WeeklyAvailability {
    let mut week = WeeklyAvailability::empty_week();
    let mut seen = [false; 7];

    for record in records {
        let Ok(key) = key_from_day_index(record.day_of_week) else {
            tracing::debug!(day_of_week = record.day_of_week, "Skipping availability row with unknown day");
            continue;
        };

        let slot = record.day_of_week as usize;
        let day = week.day_mut(key);

        if seen[slot] {
            if !record.is_active {
                continue;
            }
            if day.is_working {
                day.blocks.push(block_from_record(record));
            } else {
                // the earlier rows were all inactive: their block was only a placeholder
                *day = DaySchedule {
                    is_working: true,
                    blocks: vec![block_from_record(record)],
                };
            }
        } else {
            seen[slot] = true;
            *day = DaySchedule {
                is_working: record.is_active,
                blocks: vec![block_from_record(record)],
            };
        }
    }

    week.normalize();
    week
}

/// Emits exactly one row per day in calendar order, Monday first, using
/// each day's first block. Row ids are always `None`; the backend
/// reconciles identity on write.
pub fn to_records(week: &WeeklyAvailability) -> Vec<AvailabilityRecord> {
    week.iter()
        .map(|(key, day)| {
            let block = day.representative_block();
            AvailabilityRecord {
                id: None,
                day_of_week: day_index_from_key(key),
                is_active: day.is_working,
                start_time: block.map(|b| b.start_time.clone()),
                end_time: block.map(|b| b.end_time.clone()),
            }
        })
        .collect()
}

/// One row per block on working days, one row for each off day.
pub fn to_records_expanded(week: &WeeklyAvailability) -> Vec<AvailabilityRecord> {
    let mut records = Vec::with_capacity(7);

    for (key, day) in week.iter() {
        let day_of_week = day_index_from_key(key);

        if day.is_working && day.blocks.len() > 1 {
            records.extend(day.blocks.iter().map(|block| AvailabilityRecord {
                id: None,
                day_of_week,
                is_active: true,
                start_time: Some(block.start_time.clone()),
                end_time: Some(block.end_time.clone()),
            }));
        } else {
            let block = day.representative_block();
            records.push(AvailabilityRecord {
                id: None,
                day_of_week,
                is_active: day.is_working,
                start_time: block.map(|b| b.start_time.clone()),
                end_time: block.map(|b| b.end_time.clone()),
            });
        }
    }

    records
}

/// Days whose schedule differs between two weeks, in calendar order.
pub fn changed_days(before: &WeeklyAvailability, after: &WeeklyAvailability) -> Vec<DayKey> {
    DayKey::ALL
        .into_iter()
        .filter(|&key| before.day(key) != after.day(key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::availability_equals;

    fn sample_week() -> WeeklyAvailability {
        let mut week = WeeklyAvailability::empty_week();
        week.monday = DaySchedule::working("09:00", "17:00");
        week.tuesday = DaySchedule::working("08:30", "16:30");
        week.friday = DaySchedule::working("10:00", "14:00");
        week.saturday.blocks[0] = TimeBlock::new("11:00", "13:00");
        week
    }

    #[test]
    fn test_round_trip_single_block_week() {
        let week = sample_week();
        let back = from_records(&to_records(&week));

        assert!(availability_equals(&week, &back));
    }

    #[test]
    fn test_empty_records_give_empty_week() {
        assert!(availability_equals(
            &from_records(&[]),
            &WeeklyAvailability::empty_week()
        ));
    }

    #[test]
    fn test_unknown_day_is_ignored() {
        let records = vec![AvailabilityRecord {
            id: Some(4),
            day_of_week: 9,
            is_active: true,
            start_time: Some("07:00".to_string()),
            end_time: Some("19:00".to_string()),
        }];

        assert_eq!(from_records(&records), WeeklyAvailability::empty_week());
        assert_eq!(from_records_multi(&records), WeeklyAvailability::empty_week());
    }

    #[test]
    fn test_missing_times_default() {
        let records = vec![AvailabilityRecord {
            id: Some(1),
            day_of_week: 3,
            is_active: true,
            start_time: None,
            end_time: None,
        }];

        let week = from_records(&records);
        assert_eq!(week.wednesday, DaySchedule::working("09:00", "17:00"));
    }

    #[test]
    fn test_duplicate_day_last_wins() {
        let records = vec![
            AvailabilityRecord::new(1, true, "08:00", "12:00"),
            AvailabilityRecord::new(1, false, "13:00", "18:00"),
        ];

        let week = from_records(&records);
        assert!(!week.monday.is_working);
        assert_eq!(week.monday.blocks, vec![TimeBlock::new("13:00", "18:00")]);
    }

    #[test]
    fn test_multi_variant_appends_blocks_in_order() {
        let records = vec![
            AvailabilityRecord::new(2, true, "08:00", "12:00"),
            AvailabilityRecord::new(0, false, "09:00", "17:00"),
            AvailabilityRecord::new(2, true, "13:00", "17:00"),
        ];

        let week = from_records_multi(&records);
        assert!(week.tuesday.is_working);
        assert_eq!(
            week.tuesday.blocks,
            vec![TimeBlock::new("08:00", "12:00"), TimeBlock::new("13:00", "17:00")]
        );
        assert_eq!(week.sunday, DaySchedule::off());
    }

    #[test]
    fn test_to_records_emits_full_week_in_day_order() {
        let records = to_records(&WeeklyAvailability::empty_week());

        assert_eq!(records.len(), 7);
        let days: Vec<i64> = records.iter().map(|r| r.day_of_week).collect();
        assert_eq!(days, vec![1, 2, 3, 4, 5, 6, 0]);
        assert!(records.iter().all(|r| r.id.is_none() && !r.is_active));
    }

    #[test]
    fn test_to_records_uses_first_block() {
        let mut week = WeeklyAvailability::empty_week();
        week.thursday = DaySchedule {
            is_working: true,
            blocks: vec![TimeBlock::new("07:00", "11:00"), TimeBlock::new("12:00", "15:00")],
        };

        let thursday = to_records(&week)
            .into_iter()
            .find(|r| r.day_of_week == 4)
            .unwrap();
        assert_eq!(thursday.start_time.as_deref(), Some("07:00"));
        assert_eq!(thursday.end_time.as_deref(), Some("11:00"));
    }

    #[test]
    fn test_expanded_round_trip_keeps_split_shifts() {
        let mut week = sample_week();
        week.thursday = DaySchedule {
            is_working: true,
            blocks: vec![TimeBlock::new("07:00", "11:00"), TimeBlock::new("12:00", "15:00")],
        };

        let records = to_records_expanded(&week);
        assert_eq!(records.len(), 8);
        assert!(availability_equals(&from_records_multi(&records), &week));
    }

    #[test]
    fn test_changed_days() {
        let before = WeeklyAvailability::empty_week();
        let after = sample_week();

        assert_eq!(
            changed_days(&before, &after),
            vec![DayKey::Monday, DayKey::Tuesday, DayKey::Friday, DayKey::Saturday]
        );
    }

    #[test]
    fn test_multi_ignores_inactive_rows_beside_active_ones() {
        let records = vec![
            AvailabilityRecord::new(2, true, "08:00", "12:00"),
            AvailabilityRecord::new(2, false, "13:00", "17:00"),
            AvailabilityRecord::new(4, false, "07:00", "11:00"),
            AvailabilityRecord::new(4, true, "12:00", "16:00"),
            AvailabilityRecord::new(5, false, "10:00", "15:00"),
            AvailabilityRecord::new(5, false, "16:00", "18:00"),
        ];

        let week = from_records_multi(&records);

        assert_eq!(week.tuesday, DaySchedule::working("08:00", "12:00"));
        assert_eq!(week.thursday, DaySchedule::working("12:00", "16:00"));
        assert!(!week.friday.is_working);
        assert_eq!(week.friday.blocks, vec![TimeBlock::new("10:00", "15:00")]);

        let tuesday_rows: Vec<_> = to_records_expanded(&week)
            .into_iter()
            .filter(|r| r.day_of_week == 2)
            .map(|r| (r.is_active, r.start_time))
            .collect();
        assert_eq!(tuesday_rows, vec![(true, Some("08:00".to_string()))]);
    }
}
