use std::fmt;
use std::sync::Arc;

use crate::error::{ConsoleError, ConsoleResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Uninitialized,
    Loading,
    Pristine,
    Dirty,
    Saving,
    Error,
}

/// Receives every dirty/pristine flip of a tracker.
pub trait DirtyObserver: Send + Sync {
    fn dirty_changed(&self, screen: &str, is_dirty: bool);
}

impl<F> DirtyObserver for F
where
    F: Fn(&str, bool) + Send + Sync,
{
    fn dirty_changed(&self, screen: &str, is_dirty: bool) {
        self(screen, is_dirty)
    }
}

/// Tracks whether an editable value differs from what was last loaded from
/// or saved to the backend.
///
/// Writes made while no load has completed (including a reload in flight
/// or one that failed) are refused. Writes between
/// [`DirtyTracker::begin_save`] and the save outcome are applied but never
/// mark the tracker dirty. Writes that leave the value unchanged are ignored.
pub struct DirtyTracker<T> {
    screen: String,
    state: TrackerState,
    baseline: Option<T>,
    current: Option<T>,
    // set once the initial load completed
    armed: bool,
    saving: bool,
    dirty: bool,
    last_error: Option<String>,
    observer: Option<Arc<dyn DirtyObserver>>,
}

impl<T: Clone + PartialEq> DirtyTracker<T> {
    pub fn new(screen: impl Into<String>) -> Self {
        Self {
            screen: screen.into(),
            state: TrackerState::Uninitialized,
            baseline: None,
            current: None,
            armed: false,
            saving: false,
            dirty: false,
            last_error: None,
            observer: None,
        }
    }

    /// Tracker for a form that has never been persisted: pristine means
    /// "equal to the form's blank defaults".
    pub fn for_new_entity(screen: impl Into<String>, defaults: T) -> Self {
        let mut tracker = Self::new(screen);
        tracker.finish_load(defaults);
        tracker
    }

    pub fn with_observer(mut self, observer: Arc<dyn DirtyObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn screen(&self) -> &str {
        &self.screen
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn baseline(&self) -> Option<&T> {
        self.baseline.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn begin_load(&mut self) {
        self.armed = false;
        self.saving = false;
        self.last_error = None;
        self.state = TrackerState::Loading;
        self.set_dirty(false);
    }

    /// Installs freshly fetched data as both the baseline and the working
    /// copy, then arms change detection.
    pub fn finish_load(&mut self, value: T) {
        self.baseline = Some(value.clone());
        self.current = Some(value);
        self.armed = true;
        self.saving = false;
        self.last_error = None;
        self.state = TrackerState::Pristine;
        self.set_dirty(false);
    }

    pub fn fail_load(&mut self, message: impl Into<String>) {
        self.armed = false;
        self.last_error = Some(message.into());
        self.state = TrackerState::Error;
        self.set_dirty(false);
    }

    /// Applies `f` to the working copy. Returns whether the value changed.
    pub fn edit(&mut self, f: impl FnOnce(&mut T)) -> bool {
        if !self.armed {
            return false;
        }
        let Some(current) = self.current.as_mut() else {
            return false;
        };

        let before = current.clone();
        f(current);
        if *current == before {
            return false;
        }

        self.reevaluate();
        true
    }

    /// Writes one field, comparing the old and new value first.
    pub fn set<V: PartialEq>(&mut self, field: impl FnOnce(&mut T) -> &mut V, value: V) -> bool {
        if !self.armed {
            return false;
        }
        let Some(current) = self.current.as_mut() else {
            return false;
        };

        let slot = field(current);
        if *slot == value {
            return false;
        }
        *slot = value;

        self.reevaluate();
        true
    }

    /// Restores the working copy to the baseline.
    pub fn revert(&mut self) {
        if self.saving {
            return;
        }
        self.current = self.baseline.clone();
        if self.armed {
            self.state = TrackerState::Pristine;
        }
        self.set_dirty(false);
    }

    /// Disarms change detection and hands back the value to persist.
    pub fn begin_save(&mut self) -> ConsoleResult<T> {
        if !self.armed {
            return Err(ConsoleError::Tracker(format!(
                "{}: cannot save before the initial load completes",
                self.screen
            )));
        }
        if self.saving {
            return Err(ConsoleError::Tracker(format!("{}: a save is already in progress", self.screen)));
        }
        let value = self
            .current
            .clone()
            .ok_or_else(|| ConsoleError::Tracker(format!("{}: nothing loaded to save", self.screen)))?;

        self.saving = true;
        self.state = TrackerState::Saving;
        Ok(value)
    }

    /// Marks the save as persisted. `saved` replaces the working copy when
    /// the backend echoed back a reconciled value.
    pub fn save_succeeded(&mut self, saved: Option<T>) {
        if let Some(value) = saved {
            self.current = Some(value);
        }
        self.baseline = self.current.clone();
        self.saving = false;
        self.last_error = None;
        self.state = TrackerState::Pristine;
        self.set_dirty(false);
    }

    /// Keeps the working copy and the dirty flag so no edits are lost.
    pub fn save_failed(&mut self, message: impl Into<String>) {
        self.saving = false;
        self.last_error = Some(message.into());
        self.state = TrackerState::Error;
    }

    /// Ends a save where only some parts reached the backend. `accept` folds
    /// the persisted parts into the baseline (and may reconcile the working
    /// copy), so only what failed stays dirty.
    pub fn save_partially(&mut self, message: impl Into<String>, accept: impl FnOnce(&mut T, &mut T)) {
        if let (Some(baseline), Some(current)) = (self.baseline.as_mut(), self.current.as_mut()) {
            accept(baseline, current);
        }
        self.saving = false;
        self.last_error = Some(message.into());
        self.state = TrackerState::Error;
        let dirty = self.current != self.baseline;
        self.set_dirty(dirty);
    }

    fn reevaluate(&mut self) {
        if !self.armed || self.saving {
            return;
        }

        let dirty = self.current != self.baseline;
        self.state = if dirty {
            TrackerState::Dirty
        } else {
            TrackerState::Pristine
        };
        self.set_dirty(dirty);
    }

    fn set_dirty(&mut self, dirty: bool) {
        if self.dirty == dirty {
            return;
        }
        self.dirty = dirty;
        tracing::debug!(screen = %self.screen, dirty, "Dirty state changed");
        if let Some(observer) = &self.observer {
            observer.dirty_changed(&self.screen, dirty);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for DirtyTracker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirtyTracker")
            .field("screen", &self.screen)
            .field("state", &self.state)
            .field("dirty", &self.dirty)
            .field("current", &self.current)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}
