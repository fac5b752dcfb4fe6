use crate::error::MappingError;
use crate::models::availability::{DEFAULT_END_TIME, DEFAULT_START_TIME};
use crate::models::{DayKey, DaySchedule, OperatingHoursRecord, TimeBlock, WeeklyAvailability};

/// Day map used by `/company/hours`. Kept separate from the staff table in
/// [`super::days`] because the two endpoints define their numbering
/// independently.
pub const COMPANY_HOURS_DAY_MAP: [(DayKey, i64); 7] = [
    (DayKey::Monday, 1),
    (DayKey::Tuesday, 2),
    (DayKey::Wednesday, 3),
    (DayKey::Thursday, 4),
    (DayKey::Friday, 5),
    (DayKey::Saturday, 6),
    (DayKey::Sunday, 0),
];

pub fn company_day_number(key: DayKey) -> i64 {
    // the map is laid out in DayKey order
    COMPANY_HOURS_DAY_MAP[key as usize].1
}

pub fn company_day_key(number: i64) -> Result<DayKey, MappingError> {
    COMPANY_HOURS_DAY_MAP
        .iter()
        .find(|(_, n)| *n == number)
        .map(|(k, _)| *k)
        .ok_or(MappingError::IndexOutOfRange(number))
}

/// One hours row per day, Monday first. `ids` carries identities already
/// known to the backend so updates can target existing rows.
pub fn to_hours_records(
    week: &WeeklyAvailability,
    ids: &[(DayKey, i64)],
) -> Vec<OperatingHoursRecord> {
    week.iter()
        .map(|(key, day)| {
            let block = day.representative_block();
            OperatingHoursRecord {
                id: ids.iter().find(|(k, _)| *k == key).map(|(_, id)| *id),
                day_of_week: company_day_number(key),
                is_open: day.is_working,
                open_time: block.map(|b| b.start_time.clone()),
                close_time: block.map(|b| b.end_time.clone()),
            }
        })
        .collect()
}

/// Full week plus the ids of rows the backend returned, keyed by day.
pub fn from_hours_records(records: &[OperatingHoursRecord]) -> (WeeklyAvailability, Vec<(DayKey, i64)>) {
    let mut week = WeeklyAvailability::empty_week();
    let mut ids = Vec::new();

    for record in records {
        let Ok(key) = company_day_key(record.day_of_week) else {
            tracing::debug!(day_of_week = record.day_of_week, "Skipping hours row with unknown day");
            continue;
        };

        week.set_day(
            key,
            DaySchedule {
                is_working: record.is_open,
                blocks: vec![TimeBlock::new(
                    record.open_time.as_deref().unwrap_or(DEFAULT_START_TIME),
                    record.close_time.as_deref().unwrap_or(DEFAULT_END_TIME),
                )],
            },
        );

        ids.retain(|(k, _)| *k != key);
        if let Some(id) = record.id {
            ids.push((key, id));
        }
    }

    (week, ids)
}
