use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};
use crate::mapping::{form_to_input, staff_from_dto};
use crate::models::{NewStaffForm, StaffMember};
use crate::tracker::{DirtyObserver, DirtyTracker, TrackerState};

use super::week_edit::WeekEdit;

pub const NEW_STAFF_SCREEN: &str = "new-staff";

/// "Add staff member" form. Dirty while any field differs from the blank form.
pub struct NewStaffScreen {
    client: ApiClient,
    tracker: DirtyTracker<NewStaffForm>,
}

impl NewStaffScreen {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            tracker: DirtyTracker::for_new_entity(NEW_STAFF_SCREEN, NewStaffForm::default()),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn DirtyObserver>) -> Self {
        self.tracker = self.tracker.with_observer(observer);
        self
    }

    pub fn form(&self) -> Option<&NewStaffForm> {
        self.tracker.current()
    }

    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    pub fn state(&self) -> TrackerState {
        self.tracker.state()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        self.tracker.set(|f| &mut f.name, name.into())
    }

    pub fn set_role(&mut self, role: impl Into<String>) -> bool {
        self.tracker.set(|f| &mut f.role, role.into())
    }

    pub fn add_specialty(&mut self, specialty: impl Into<String>) -> bool {
        let specialty = specialty.into();
        let specialty = specialty.trim();
        if specialty.is_empty() {
            return false;
        }

        self.tracker.edit(|f| {
            if !f.specialties.iter().any(|s| s.eq_ignore_ascii_case(specialty)) {
                f.specialties.push(specialty.to_string());
            }
        })
    }

    pub fn remove_specialty(&mut self, specialty: &str) -> bool {
        self.tracker
            .edit(|f| f.specialties.retain(|s| !s.eq_ignore_ascii_case(specialty)))
    }

    pub fn edit_availability(&mut self, edit: WeekEdit) -> ConsoleResult<bool> {
        let mut week = self
            .tracker
            .current()
            .map(|f| f.availability.clone())
            .unwrap_or_default();
        edit.apply(&mut week)?;

        Ok(self.tracker.set(|f| &mut f.availability, week))
    }

    pub fn reset(&mut self) {
        self.tracker.revert();
    }

    /// Creates the member. On success the form returns to its blank state.
    pub async fn submit(&mut self) -> ConsoleResult<StaffMember> {
        if self.tracker.current().is_some_and(|f| f.name.trim().is_empty()) {
            return Err(ConsoleError::Validation("Staff name is required".to_string()));
        }

        let form = self.tracker.begin_save()?;

        match self.client.create_staff(&form_to_input(&form)).await {
            Ok(dto) => {
                let created = staff_from_dto(dto);
                tracing::info!(staff_id = ?created.id, "Created staff member");
                // next entry starts from a blank form
                self.tracker.save_succeeded(Some(NewStaffForm::default()));
                Ok(created)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create staff member");
                self.tracker.save_failed(e.to_string());
                Err(e)
            }
        }
    }
}
