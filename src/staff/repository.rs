use crate::repository::{Page, PageRequest, RepositoryError};
use crate::shows::domain::ShowId;
use crate::tenant::OrganizationId;

use super::domain::{
    NewAssignment, NewStaffMember, ShowStaffAssignment, StaffFilter, StaffMember, StaffMemberId,
    StaffPatch,
};

/// Storage abstraction for staff members.
pub trait StaffRepository: Send + Sync {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &StaffMemberId,
    ) -> Result<Option<StaffMember>, RepositoryError>;

    fn list(
        &self,
        org: &OrganizationId,
        filter: &StaffFilter,
        page: &PageRequest,
    ) -> Result<Page<StaffMember>, RepositoryError>;

    fn create(
        &self,
        org: &OrganizationId,
        data: NewStaffMember,
    ) -> Result<StaffMember, RepositoryError>;

    fn update(
        &self,
        org: &OrganizationId,
        id: &StaffMemberId,
        patch: StaffPatch,
    ) -> Result<Option<StaffMember>, RepositoryError>;

    fn delete(&self, org: &OrganizationId, id: &StaffMemberId) -> Result<bool, RepositoryError>;

    fn exists(&self, org: &OrganizationId, id: &StaffMemberId) -> Result<bool, RepositoryError>;

    /// Case-insensitive email lookup within the tenant.
    fn find_by_email(
        &self,
        org: &OrganizationId,
        email: &str,
    ) -> Result<Option<StaffMember>, RepositoryError>;
}

/// Storage abstraction for show-staff assignments.
pub trait AssignmentRepository: Send + Sync {
    fn list_by_show(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
    ) -> Result<Vec<ShowStaffAssignment>, RepositoryError>;

    /// Remove every assignment for the show; returns how many were removed.
    fn delete_by_show(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
    ) -> Result<usize, RepositoryError>;

    fn create_many(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
        assignments: Vec<NewAssignment>,
    ) -> Result<Vec<ShowStaffAssignment>, RepositoryError>;
}
