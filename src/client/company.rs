use reqwest::Method;

use super::ApiClient;
use crate::error::ConsoleResult;
use crate::models::{CompanyContact, CompanyDetails, OperatingHoursRecord};

impl ApiClient {
    /// GET /company/details
    pub async fn get_company_details(&self) -> ConsoleResult<CompanyDetails> {
        self.get_json("/company/details", "company/details").await
    }

    /// PUT /company/details. An empty reply means the backend kept `details` as sent.
    pub async fn update_company_details(&self, details: &CompanyDetails) -> ConsoleResult<CompanyDetails> {
        self.send_json_or_echo(Method::PUT, "/company/details", "company/details", details)
            .await
    }

    /// GET /company/contact
    pub async fn get_company_contact(&self) -> ConsoleResult<CompanyContact> {
        self.get_json("/company/contact", "company/contact").await
    }

    /// PUT /company/contact
    pub async fn update_company_contact(&self, contact: &CompanyContact) -> ConsoleResult<CompanyContact> {
        self.send_json_or_echo(Method::PUT, "/company/contact", "company/contact", contact)
            .await
    }

    /// GET /company/hours
    pub async fn get_company_hours(&self) -> ConsoleResult<Vec<OperatingHoursRecord>> {
        self.get_json("/company/hours", "company/hours").await
    }

    /// Writes one day of operating hours: PUT when the row already exists,
    /// POST otherwise.
    pub async fn save_company_hours_day(
        &self,
        record: &OperatingHoursRecord,
    ) -> ConsoleResult<OperatingHoursRecord> {
        let method = if record.id.is_some() {
            Method::PUT
        } else {
            Method::POST
        };

        tracing::debug!(day_of_week = record.day_of_week, %method, "Saving company hours");
        self.send_json_or_echo(method, "/company/hours", "company/hours", record)
            .await
    }
}
