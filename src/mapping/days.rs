use crate::error::MappingError;
use crate::models::DayKey;

/// Day table used by the staff scheduling endpoints: the array position is
/// the backend's `dayOfWeek` (Sunday-first).
///
/// Independent from [`super::company_hours::COMPANY_HOURS_DAY_MAP`]; stored
/// data is interpreted through each table separately.
pub const STAFF_DAY_ORDER: [DayKey; 7] = [
    DayKey::Sunday,
    DayKey::Monday,
    DayKey::Tuesday,
    DayKey::Wednesday,
    DayKey::Thursday,
    DayKey::Friday,
    DayKey::Saturday,
];

pub fn day_index_from_key(key: DayKey) -> i64 {
    match key {
        DayKey::Sunday => 0,
        DayKey::Monday => 1,
        DayKey::Tuesday => 2,
        DayKey::Wednesday => 3,
        DayKey::Thursday => 4,
        DayKey::Friday => 5,
        DayKey::Saturday => 6,
    }
}

pub fn key_from_day_index(index: i64) -> Result<DayKey, MappingError> {
    usize::try_from(index)
        .ok()
        .and_then(|idx| STAFF_DAY_ORDER.get(idx).copied())
        .ok_or(MappingError::IndexOutOfRange(index))
}

/// String form of [`day_index_from_key`] for loosely-typed callers.
pub fn day_index_from_name(name: &str) -> Result<i64, MappingError> {
    name.parse::<DayKey>().map(day_index_from_key)
}
