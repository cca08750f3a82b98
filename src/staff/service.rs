use std::sync::Arc;

use crate::error::DomainError;
use crate::repository::{Page, PageRequest};
use crate::shows::domain::ShowId;
use crate::tenant::OrganizationId;
use crate::validate;

use super::domain::{
    NewAssignment, NewStaffMember, ShowStaffAssignment, StaffFilter, StaffMember, StaffMemberId,
    StaffPatch,
};
use super::repository::{AssignmentRepository, StaffRepository};

/// Enforces staff email uniqueness and exposes show-staff assignment
/// replacement.
pub struct StaffService<R, A> {
    staff: Arc<R>,
    assignments: Arc<A>,
}

impl<R, A> StaffService<R, A>
where
    R: StaffRepository,
    A: AssignmentRepository,
{
    pub fn new(staff: Arc<R>, assignments: Arc<A>) -> Self {
        Self { staff, assignments }
    }

    pub fn create_staff_member(
        &self,
        org: &OrganizationId,
        mut data: NewStaffMember,
    ) -> Result<StaffMember, DomainError> {
        data.first_name = validate::required_text("first name", &data.first_name)?;
        data.last_name = validate::required_text("last name", &data.last_name)?;
        data.email = validate::optional_text(data.email);

        if let Some(email) = &data.email {
            if self.staff.find_by_email(org, email)?.is_some() {
                return Err(DomainError::conflict(format!(
                    "a staff member with email {email} already exists in this organization"
                )));
            }
        }

        Ok(self.staff.create(org, data)?)
    }

    /// Returns `Ok(None)` when the id does not resolve within the tenant.
    pub fn update_staff_member(
        &self,
        org: &OrganizationId,
        id: &StaffMemberId,
        mut patch: StaffPatch,
    ) -> Result<Option<StaffMember>, DomainError> {
        if self.staff.find_by_id(org, id)?.is_none() {
            return Ok(None);
        }

        if let Some(first_name) = patch.first_name.take() {
            patch.first_name = Some(validate::required_text("first name", &first_name)?);
        }
        if let Some(last_name) = patch.last_name.take() {
            patch.last_name = Some(validate::required_text("last name", &last_name)?);
        }

        patch.email = validate::optional_text(patch.email);
        if let Some(email) = &patch.email {
            if let Some(existing) = self.staff.find_by_email(org, email)? {
                if existing.id != *id {
                    return Err(DomainError::conflict(format!(
                        "a staff member with email {email} already exists in this organization"
                    )));
                }
            }
        }

        Ok(self.staff.update(org, id, patch)?)
    }

    pub fn delete_staff_member(
        &self,
        org: &OrganizationId,
        id: &StaffMemberId,
    ) -> Result<bool, DomainError> {
        Ok(self.staff.delete(org, id)?)
    }

    pub fn get_staff_member(
        &self,
        org: &OrganizationId,
        id: &StaffMemberId,
    ) -> Result<Option<StaffMember>, DomainError> {
        Ok(self.staff.find_by_id(org, id)?)
    }

    pub fn list_staff(
        &self,
        org: &OrganizationId,
        filter: &StaffFilter,
        page: &PageRequest,
    ) -> Result<Page<StaffMember>, DomainError> {
        Ok(self.staff.list(org, filter, page)?)
    }

    /// Full-replacement semantics: the supplied set becomes the show's entire
    /// assignment roster. Callers always pass the complete desired set.
    pub fn replace_show_assignments(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
        assignments: Vec<NewAssignment>,
    ) -> Result<Vec<ShowStaffAssignment>, DomainError> {
        let removed = self.assignments.delete_by_show(org, show_id)?;
        tracing::debug!(show = %show_id, removed, "replacing show staff assignments");
        Ok(self.assignments.create_many(org, show_id, assignments)?)
    }

    pub fn show_assignments(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
    ) -> Result<Vec<ShowStaffAssignment>, DomainError> {
        Ok(self.assignments.list_by_show(org, show_id)?)
    }
}
