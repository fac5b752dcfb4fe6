use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};
use crate::mapping::{company_day_key, from_hours_records, to_hours_records};
use crate::models::{DayKey, OperatingHoursRecord, WeeklyAvailability};
use crate::tracker::{DirtyObserver, DirtyTracker, TrackerState};

use super::week_edit::WeekEdit;

pub const COMPANY_HOURS_SCREEN: &str = "company-hours";

/// Outcome of a best-effort multi-day save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoursSaveReport {
    pub saved: Vec<DayKey>,
    pub failed: Vec<(DayKey, String)>,
}

impl HoursSaveReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        self.failed
            .iter()
            .map(|(day, message)| format!("{}: {}", day, message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Writes each row in turn. A failing day is logged and recorded, and the
/// loop moves on to the next day. `ids` gains the identity of created rows.
pub(crate) async fn save_hours_rows(
    client: &ApiClient,
    rows: Vec<OperatingHoursRecord>,
    ids: &mut Vec<(DayKey, i64)>,
) -> HoursSaveReport {
    let mut report = HoursSaveReport::default();

    for row in rows {
        let day = match company_day_key(row.day_of_week) {
            Ok(day) => day,
            Err(e) => {
                debug_assert!(false, "hours row built with invalid day: {e}");
                tracing::error!(error = %e, "Skipping hours row with invalid day");
                continue;
            }
        };

        match client.save_company_hours_day(&row).await {
            Ok(saved) => {
                if let Some(id) = saved.id {
                    ids.retain(|(k, _)| *k != day);
                    ids.push((day, id));
                }
                report.saved.push(day);
            }
            Err(e) => {
                tracing::warn!(error = %e, %day, "Failed to save company hours, continuing");
                report.failed.push((day, e.to_string()));
            }
        }
    }

    report
}

/// Operating-hours-only editor for the company.
pub struct CompanyHoursEditor {
    client: ApiClient,
    tracker: DirtyTracker<WeeklyAvailability>,
    ids: Vec<(DayKey, i64)>,
}

impl CompanyHoursEditor {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            tracker: DirtyTracker::new(COMPANY_HOURS_SCREEN),
            ids: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn DirtyObserver>) -> Self {
        self.tracker = self.tracker.with_observer(observer);
        self
    }

    pub fn hours(&self) -> Option<&WeeklyAvailability> {
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

    pub async fn load(&mut self) -> ConsoleResult<()> {
        self.tracker.begin_load();

        match self.client.get_company_hours().await {
            Ok(rows) => {
                let (week, ids) = from_hours_records(&rows);
                self.ids = ids;
                self.tracker.finish_load(week);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load company hours");
                self.tracker.fail_load(e.to_string());
                Err(e)
            }
        }
    }

    pub fn edit(&mut self, edit: WeekEdit) -> ConsoleResult<bool> {
        let mut week = self
            .tracker
            .current()
            .cloned()
            .ok_or_else(|| ConsoleError::Validation("Company hours are not loaded".to_string()))?;
        edit.apply(&mut week)?;

        Ok(self.tracker.edit(|current| *current = week))
    }

    pub fn cancel(&mut self) {
        self.tracker.revert();
    }

    /// Re-sends all seven days. The tracker only returns to pristine when
    /// every day was accepted; otherwise the edits stay and the report lists
    /// the failed days.
    pub async fn save(&mut self) -> ConsoleResult<HoursSaveReport> {
        let week = self.tracker.begin_save()?;
        let rows = to_hours_records(&week, &self.ids);

        let report = save_hours_rows(&self.client, rows, &mut self.ids).await;

        if report.is_complete() {
            tracing::info!("Saved company hours");
            self.tracker.save_succeeded(None);
        } else {
            tracing::error!(failed = report.failed.len(), "Company hours saved partially");
            self.tracker.save_failed(report.summary());
        }

        Ok(report)
    }
}
