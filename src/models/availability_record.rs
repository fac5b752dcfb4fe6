use serde::{Deserialize, Serialize};

/// One availability row as the scheduling backend stores it.
///
/// `day_of_week` follows the backend convention, 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRecord {
    pub id: Option<i64>,
    pub day_of_week: i64,
    #[serde(default)]
    pub is_active: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl AvailabilityRecord {
    pub fn new(day_of_week: i64, is_active: bool, start_time: &str, end_time: &str) -> Self {
        Self {
            id: None,
            day_of_week,
            is_active,
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_backend_shape_with_nulls() {
        let record: AvailabilityRecord = serde_json::from_str(
            r#"{"id": null, "dayOfWeek": 3, "isActive": true, "startTime": null, "endTime": "18:30"}"#,
        )
        .unwrap();

        assert_eq!(record.id, None);
        assert_eq!(record.day_of_week, 3);
        assert!(record.is_active);
        assert_eq!(record.start_time, None);
        assert_eq!(record.end_time.as_deref(), Some("18:30"));
    }

    #[test]
    fn test_encodes_camel_case() {
        let json = serde_json::to_value(AvailabilityRecord::new(1, false, "09:00", "17:00")).unwrap();

        assert_eq!(json["dayOfWeek"], 1);
        assert_eq!(json["isActive"], false);
        assert!(json["id"].is_null());
    }
}
