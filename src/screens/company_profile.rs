use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};
use crate::mapping::{changed_days, company_day_number, from_hours_records, to_hours_records};
use crate::models::{CompanyContact, CompanyDetails, CompanyProfile, DayKey};
use crate::tracker::{DirtyObserver, DirtyTracker, TrackerState};

use super::company_hours::save_hours_rows;
use super::week_edit::WeekEdit;

pub const COMPANY_PROFILE_SCREEN: &str = "company-profile";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilePart {
    Details,
    Contact,
    Hours(DayKey),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFailure {
    pub part: ProfilePart,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSaveReport {
    pub failures: Vec<SaveFailure>,
    pub requests: usize,
}

impl ProfileSaveReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Company details, contact and operating hours edited as one screen.
pub struct CompanyProfileEditor {
    client: ApiClient,
    tracker: DirtyTracker<CompanyProfile>,
    hour_ids: Vec<(DayKey, i64)>,
}

impl CompanyProfileEditor {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            tracker: DirtyTracker::new(COMPANY_PROFILE_SCREEN),
            hour_ids: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn DirtyObserver>) -> Self {
        self.tracker = self.tracker.with_observer(observer);
        self
    }

    pub fn profile(&self) -> Option<&CompanyProfile> {
        self.tracker.current()
    }

    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    pub fn state(&self) -> TrackerState {
        self.tracker.state()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.tracker.last_error()
    }

    /// Fetches details, contact and hours concurrently. Any failure fails
    /// the whole load.
    pub async fn load(&mut self) -> ConsoleResult<()> {
        self.tracker.begin_load();

        let fetched = tokio::try_join!(
            self.client.get_company_details(),
            self.client.get_company_contact(),
            self.client.get_company_hours(),
        );

        match fetched {
            Ok((details, contact, hour_rows)) => {
                let (hours, ids) = from_hours_records(&hour_rows);
                self.hour_ids = ids;
                self.tracker.finish_load(CompanyProfile {
                    details,
                    contact,
                    hours,
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load company profile");
                self.tracker.fail_load(e.to_string());
                Err(e)
            }
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        self.tracker.set(|p| &mut p.details.name, name.into())
    }

    pub fn set_industry(&mut self, industry: Option<String>) -> bool {
        self.tracker.set(|p| &mut p.details.industry, industry)
    }

    pub fn set_website(&mut self, website: Option<String>) -> bool {
        self.tracker.set(|p| &mut p.details.website, website)
    }

    pub fn set_description(&mut self, description: Option<String>) -> bool {
        self.tracker.set(|p| &mut p.details.description, description)
    }

    pub fn set_contact(&mut self, contact: CompanyContact) -> bool {
        self.tracker.set(|p| &mut p.contact, contact)
    }

    pub fn edit_hours(&mut self, edit: WeekEdit) -> ConsoleResult<bool> {
        let mut hours = self
            .tracker
            .current()
            .map(|p| p.hours.clone())
            .ok_or_else(|| ConsoleError::Validation("Company profile is not loaded".to_string()))?;
        edit.apply(&mut hours)?;

        Ok(self.tracker.set(|p| &mut p.hours, hours))
    }

    pub fn cancel(&mut self) {
        self.tracker.revert();
    }

    /// Writes the changed parts one after another: details, contact, then
    /// each changed day of hours. Every failure is reported on its own.
    pub async fn save(&mut self) -> ConsoleResult<ProfileSaveReport> {
        if self
            .tracker
            .current()
            .is_some_and(|p| p.details.name.trim().is_empty())
        {
            return Err(ConsoleError::Validation("Company name is required".to_string()));
        }

        let baseline = self.tracker.baseline().cloned();
        let draft = self.tracker.begin_save()?;
        let mut report = ProfileSaveReport::default();

        let details_changed = baseline.as_ref().map_or(true, |b| b.details != draft.details);
        let contact_changed = baseline.as_ref().map_or(true, |b| b.contact != draft.contact);

        let mut saved_details: Option<CompanyDetails> = None;
        if details_changed {
            report.requests += 1;
            match self.client.update_company_details(&draft.details).await {
                Ok(details) => saved_details = Some(details),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to save company details");
                    report.failures.push(SaveFailure {
                        part: ProfilePart::Details,
                        message: e.to_string(),
                    });
                }
            }
        }

        let mut contact_saved = false;
        if contact_changed {
            report.requests += 1;
            match self.client.update_company_contact(&draft.contact).await {
                Ok(_) => contact_saved = true,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to save company contact");
                    report.failures.push(SaveFailure {
                        part: ProfilePart::Contact,
                        message: e.to_string(),
                    });
                }
            }
        }

        let days = match &baseline {
            Some(b) => changed_days(&b.hours, &draft.hours),
            None => DayKey::ALL.to_vec(),
        };
        let mut saved_days = Vec::new();
        if !days.is_empty() {
            let rows = to_hours_records(&draft.hours, &self.hour_ids)
                .into_iter()
                .filter(|row| days.iter().any(|&d| company_day_number(d) == row.day_of_week))
                .collect::<Vec<_>>();
            report.requests += rows.len();

            let hours_report = save_hours_rows(&self.client, rows, &mut self.hour_ids).await;
            saved_days = hours_report.saved;
            report
                .failures
                .extend(hours_report.failed.into_iter().map(|(day, message)| SaveFailure {
                    part: ProfilePart::Hours(day),
                    message,
                }));
        }

        if report.is_complete() {
            if let Some(details) = saved_details {
                self.tracker.edit(|p| p.details = details);
            }
            tracing::info!(requests = report.requests, "Saved company profile");
            self.tracker.save_succeeded(None);
        } else {
            let message = report
                .failures
                .iter()
                .map(|f| format!("{:?}: {}", f.part, f.message))
                .collect::<Vec<_>>()
                .join("; ");
            tracing::warn!(failed = report.failures.len(), "Company profile saved partially");

            // persisted parts join the baseline so the next save only retries failures
            self.tracker.save_partially(message, |base, current| {
                if let Some(details) = saved_details {
                    base.details = details.clone();
                    current.details = details;
                }
                if contact_saved {
                    base.contact = draft.contact.clone();
                }
                for day in saved_days {
                    base.hours.set_day(day, draft.hours.day(day).clone());
                }
            });
        }

        Ok(report)
    }
}
