pub mod dirty;
pub mod guard;

pub use dirty::{DirtyObserver, DirtyTracker, TrackerState};
pub use guard::UnsavedChangesGuard;
