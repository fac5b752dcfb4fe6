//! Client-side core of the CallingBird console: weekly availability model
//! and its backend mappers, the dirty-state tracker used by every editor
//! screen, and a typed client for the CallingBird REST backend.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod mapping;
pub mod models;
pub mod screens;
pub mod tracker;

pub use client::ApiClient;
pub use config::{ConsoleConfig, TokenSource};
pub use error::{ConsoleError, ConsoleResult, MappingError};
pub use tracker::{DirtyObserver, DirtyTracker, TrackerState, UnsavedChangesGuard};
