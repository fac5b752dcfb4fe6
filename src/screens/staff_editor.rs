use std::sync::Arc;

use crate::client::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};
use crate::mapping::{staff_from_dto, staff_to_input};
use crate::models::StaffMember;
use crate::tracker::{DirtyObserver, DirtyTracker, TrackerState};

use super::week_edit::WeekEdit;

pub const STAFF_EDITOR_SCREEN: &str = "staff-editor";

/// Staff list plus at most one open draft of an existing member.
pub struct StaffEditor {
    client: ApiClient,
    members: Vec<StaffMember>,
    draft: Option<DirtyTracker<StaffMember>>,
    observer: Option<Arc<dyn DirtyObserver>>,
    split_shifts: bool,
}

impl StaffEditor {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            members: Vec::new(),
            draft: None,
            observer: None,
            split_shifts: false,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn DirtyObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Send every block of a split shift instead of one block per day.
    pub fn with_split_shifts(mut self, enabled: bool) -> Self {
        self.split_shifts = enabled;
        self
    }

    pub async fn load(&mut self) -> ConsoleResult<()> {
        let staff = self.client.list_staff().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to load staff members");
            e
        })?;

        self.members = staff.into_iter().map(staff_from_dto).collect();
        tracing::info!(count = self.members.len(), "Loaded staff members");
        Ok(())
    }

    pub fn members(&self) -> &[StaffMember] {
        &self.members
    }

    pub fn draft(&self) -> Option<&StaffMember> {
        self.draft.as_ref().and_then(|t| t.current())
    }

    pub fn is_dirty(&self) -> bool {
        self.draft.as_ref().is_some_and(|t| t.is_dirty())
    }

    pub fn state(&self) -> TrackerState {
        self.draft
            .as_ref()
            .map_or(TrackerState::Uninitialized, |t| t.state())
    }

    pub fn last_error(&self) -> Option<&str> {
        self.draft.as_ref().and_then(|t| t.last_error())
    }

    /// Opens a draft copy of a loaded member. Refused while another draft
    /// has unsaved edits.
    pub fn select(&mut self, staff_id: i64) -> ConsoleResult<()> {
        if self.is_dirty() {
            return Err(ConsoleError::Validation(
                "You have unsaved changes. Save or cancel them first.".to_string(),
            ));
        }

        let member = self
            .members
            .iter()
            .find(|m| m.id == Some(staff_id))
            .cloned()
            .ok_or_else(|| ConsoleError::NotFound(format!("staff member {}", staff_id)))?;

        let mut tracker = DirtyTracker::new(STAFF_EDITOR_SCREEN);
        if let Some(observer) = &self.observer {
            tracker = tracker.with_observer(observer.clone());
        }
        tracker.begin_load();
        tracker.finish_load(member);

        self.draft = Some(tracker);
        Ok(())
    }

    /// Discards the draft's edits and closes it.
    pub fn close(&mut self) {
        if let Some(mut tracker) = self.draft.take() {
            tracker.revert();
        }
    }

    pub fn cancel(&mut self) {
        if let Some(tracker) = self.draft.as_mut() {
            tracker.revert();
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> ConsoleResult<bool> {
        let name = name.into();
        Ok(self.tracker_mut()?.set(|m| &mut m.name, name))
    }

    pub fn set_role(&mut self, role: impl Into<String>) -> ConsoleResult<bool> {
        let role = role.into();
        Ok(self.tracker_mut()?.set(|m| &mut m.role, role))
    }

    pub fn edit_availability(&mut self, edit: WeekEdit) -> ConsoleResult<bool> {
        let tracker = self.tracker_mut()?;
        let mut week = tracker
            .current()
            .map(|m| m.availability.clone())
            .unwrap_or_default();
        edit.apply(&mut week)?;

        Ok(tracker.set(|m| &mut m.availability, week))
    }

    pub async fn save(&mut self) -> ConsoleResult<()> {
        let split_shifts = self.split_shifts;
        let tracker = self
            .draft
            .as_mut()
            .ok_or_else(|| ConsoleError::Validation("No staff member is open".to_string()))?;

        if tracker.current().is_some_and(|m| m.name.trim().is_empty()) {
            return Err(ConsoleError::Validation("Staff name is required".to_string()));
        }

        let member = tracker.begin_save()?;
        let input = staff_to_input(&member, split_shifts);

        let result = if member.is_persisted() {
            self.client.update_staff(&input).await
        } else {
            self.client.create_staff(&input).await
        };

        match result {
            Ok(dto) => {
                let saved = staff_from_dto(dto);
                match self.members.iter_mut().find(|m| m.id == saved.id) {
                    Some(slot) => *slot = saved.clone(),
                    None => self.members.push(saved.clone()),
                }
                tracing::info!(staff_id = ?saved.id, "Saved staff member");
                tracker.save_succeeded(Some(saved));
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, staff_id = ?member.id, "Failed to save staff member");
                tracker.save_failed(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn delete(&mut self, staff_id: i64) -> ConsoleResult<()> {
        self.client.delete_staff(staff_id).await.map_err(|e| {
            tracing::error!(error = %e, staff_id, "Failed to delete staff member");
            e
        })?;

        self.members.retain(|m| m.id != Some(staff_id));
        if self.draft().is_some_and(|m| m.id == Some(staff_id)) {
            self.close();
        }
        Ok(())
    }

    fn tracker_mut(&mut self) -> ConsoleResult<&mut DirtyTracker<StaffMember>> {
        self.draft
            .as_mut()
            .ok_or_else(|| ConsoleError::Validation("No staff member is open".to_string()))
    }
}
