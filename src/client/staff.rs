use reqwest::Method;

use super::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};
use crate::models::{StaffDto, StaffInput};

impl ApiClient {
    /// GET /scheduling/staff-members
    pub async fn list_staff(&self) -> ConsoleResult<Vec<StaffDto>> {
        self.get_json("/scheduling/staff-members", "scheduling/staff-members")
            .await
    }

    /// POST /scheduling/staff-members
    pub async fn create_staff(&self, input: &StaffInput) -> ConsoleResult<StaffDto> {
        tracing::debug!(name = %input.name, "Creating staff member");
        self.send_json(
            Method::POST,
            "/scheduling/staff-members",
            "scheduling/staff-members",
            input,
        )
        .await
    }

    /// PUT /scheduling/staff-members (id travels in the body)
    pub async fn update_staff(&self, input: &StaffInput) -> ConsoleResult<StaffDto> {
        let Some(staff_id) = input.id else {
            return Err(ConsoleError::Validation(
                "Cannot update a staff member without an id".to_string(),
            ));
        };

        tracing::debug!(staff_id, "Updating staff member");
        self.send_json(
            Method::PUT,
            "/scheduling/staff-members",
            "scheduling/staff-members",
            input,
        )
        .await
    }

    /// DELETE /scheduling/staff-members/{id}
    pub async fn delete_staff(&self, staff_id: i64) -> ConsoleResult<()> {
        tracing::debug!(staff_id, "Deleting staff member");
        self.delete(
            "/scheduling/staff-members/{id}",
            &format!("scheduling/staff-members/{}", staff_id),
        )
        .await
    }
}
