use serde::{Deserialize, Serialize};

use super::availability::WeeklyAvailability;
use super::availability_record::AvailabilityRecord;
use super::staff::SpecialtyDto;

/// Body for `POST`/`PUT /scheduling/staff-members`. `id` is present on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub role: String,
    pub specialties: Vec<SpecialtyDto>,
    pub availability: Vec<AvailabilityRecord>,
}

/// Blank "add staff member" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStaffForm {
    pub name: String,
    pub role: String,
    pub specialties: Vec<String>,
    pub availability: WeeklyAvailability,
}

impl Default for NewStaffForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: String::new(),
            specialties: Vec::new(),
            availability: WeeklyAvailability::empty_week(),
        }
    }
}
