use serde::{Deserialize, Serialize};

use super::availability::WeeklyAvailability;
use super::availability_record::AvailabilityRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

/// Staff member as returned by `GET /scheduling/staff-members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub specialties: Vec<SpecialtyDto>,
    #[serde(default)]
    pub availability: Vec<AvailabilityRecord>,
}

/// Editor-facing staff member. Owns its week by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: Option<i64>,
    pub name: String,
    pub role: String,
    pub specialties: Vec<SpecialtyDto>,
    pub availability: WeeklyAvailability,
}

impl StaffMember {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn specialty_names(&self) -> Vec<&str> {
        self.specialties.iter().map(|s| s.name.as_str()).collect()
    }
}
