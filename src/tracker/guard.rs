use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::error::{ConsoleError, ConsoleResult};

use super::dirty::DirtyObserver;

/// Cross-screen coordinator: remembers which screens hold unsaved edits and
/// blocks flows that must not start while any do.
#[derive(Debug, Default)]
pub struct UnsavedChangesGuard {
    dirty: Mutex<BTreeSet<String>>,
}

impl UnsavedChangesGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dirty_screens(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        !self.lock().is_empty()
    }

    /// Errors with a "save first" message while any screen is dirty.
    pub fn ensure_saved(&self) -> ConsoleResult<()> {
        let dirty = self.dirty_screens();
        if dirty.is_empty() {
            return Ok(());
        }

        Err(ConsoleError::Validation(format!(
            "You have unsaved changes in {}. Save them before proceeding.",
            dirty.join(", ")
        )))
    }

    /// Drops a screen's entry when it closes; unsaved edits are discarded.
    pub fn forget(&self, screen: &str) {
        self.lock().remove(screen);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<String>> {
        self.dirty.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DirtyObserver for UnsavedChangesGuard {
    fn dirty_changed(&self, screen: &str, is_dirty: bool) {
        let mut dirty = self.lock();
        if is_dirty {
            dirty.insert(screen.to_string());
        } else {
            dirty.remove(screen);
        }
    }
}
