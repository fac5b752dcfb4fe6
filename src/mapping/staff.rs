use crate::models::{NewStaffForm, SpecialtyDto, StaffDto, StaffInput, StaffMember};

use super::availability::{from_records_multi, to_records, to_records_expanded};

pub fn staff_from_dto(dto: StaffDto) -> StaffMember {
    StaffMember {
        id: Some(dto.id),
        name: dto.name,
        role: dto.role.unwrap_or_default(),
        specialties: dto.specialties,
        availability: from_records_multi(&dto.availability),
    }
}

/// Request body for a create or update. With `expand_blocks` every block of
/// a split shift becomes its own row, otherwise each day sends its first block.
pub fn staff_to_input(member: &StaffMember, expand_blocks: bool) -> StaffInput {
    let availability = if expand_blocks {
        to_records_expanded(&member.availability)
    } else {
        to_records(&member.availability)
    };

    StaffInput {
        id: member.id,
        name: member.name.trim().to_string(),
        role: member.role.trim().to_string(),
        specialties: member.specialties.clone(),
        availability,
    }
}

pub fn form_to_input(form: &NewStaffForm) -> StaffInput {
    StaffInput {
        id: None,
        name: form.name.trim().to_string(),
        role: form.role.trim().to_string(),
        specialties: form
            .specialties
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| SpecialtyDto {
                id: None,
                name: name.to_string(),
            })
            .collect(),
        availability: to_records(&form.availability),
    }
}
