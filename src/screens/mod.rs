//! Editor screens: each pairs backend calls with a dirty tracker.

pub mod company_hours;
pub mod company_profile;
pub mod new_staff;
pub mod presets;
pub mod staff_editor;
pub mod week_edit;

pub use company_hours::{CompanyHoursEditor, HoursSaveReport, COMPANY_HOURS_SCREEN};
pub use company_profile::{CompanyProfileEditor, ProfilePart, ProfileSaveReport, SaveFailure, COMPANY_PROFILE_SCREEN};
pub use new_staff::{NewStaffScreen, NEW_STAFF_SCREEN};
pub use presets::SchedulePreset;
pub use staff_editor::{StaffEditor, STAFF_EDITOR_SCREEN};
pub use week_edit::WeekEdit;
