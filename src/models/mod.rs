pub mod availability;
pub mod availability_record;
pub mod call;
pub mod company;
pub mod staff;
pub mod staff_input;

pub use availability::{availability_equals, DayKey, DaySchedule, TimeBlock, WeeklyAvailability};
pub use availability_record::AvailabilityRecord;
pub use call::{CallRecord, DecodeError, PayloadVersion, TranscriptTurn};
pub use company::{CompanyContact, CompanyDetails, CompanyProfile, OperatingHoursRecord};
pub use staff::{SpecialtyDto, StaffDto, StaffMember};
pub use staff_input::{NewStaffForm, StaffInput};
