//! Conversions between editor-facing weeks and backend rows.

pub mod availability;
pub mod company_hours;
pub mod days;
pub mod staff;

pub use availability::{changed_days, from_records, from_records_multi, to_records, to_records_expanded};
pub use company_hours::{company_day_key, company_day_number, from_hours_records, to_hours_records, COMPANY_HOURS_DAY_MAP};
pub use days::{day_index_from_key, day_index_from_name, key_from_day_index, STAFF_DAY_ORDER};
pub use staff::{form_to_input, staff_from_dto, staff_to_input};
