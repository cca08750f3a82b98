use crate::repository::{Page, PageRequest, RepositoryError};
use crate::staff::domain::StaffMemberId;
use crate::tenant::OrganizationId;

use super::domain::{
    MemberFilter, MemberId, MemberRole, NewMember, NewOrganization, Organization,
    OrganizationMember, OrganizationPatch, UserId,
};

/// Storage abstraction for organizations.
pub trait OrganizationRepository: Send + Sync {
    fn find_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, RepositoryError>;

    /// The single global, non-tenant-scoped lookup in the system.
    fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, RepositoryError>;

    /// Create the organization and its founding admin membership in one
    /// storage call, so the founder write cannot be lost halfway.
    fn create_with_founder(
        &self,
        data: NewOrganization,
        founder: &UserId,
    ) -> Result<(Organization, OrganizationMember), RepositoryError>;

    fn update(
        &self,
        id: &OrganizationId,
        patch: OrganizationPatch,
    ) -> Result<Option<Organization>, RepositoryError>;

    fn delete(&self, id: &OrganizationId) -> Result<bool, RepositoryError>;
}

/// Storage abstraction for organization memberships.
pub trait MemberRepository: Send + Sync {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &MemberId,
    ) -> Result<Option<OrganizationMember>, RepositoryError>;

    fn find_by_user(
        &self,
        org: &OrganizationId,
        user_id: &UserId,
    ) -> Result<Option<OrganizationMember>, RepositoryError>;

    /// The member currently claiming a staff-member link, if any.
    fn find_by_staff_member(
        &self,
        org: &OrganizationId,
        staff_member_id: &StaffMemberId,
    ) -> Result<Option<OrganizationMember>, RepositoryError>;

    fn list(
        &self,
        org: &OrganizationId,
        filter: &MemberFilter,
        page: &PageRequest,
    ) -> Result<Page<OrganizationMember>, RepositoryError>;

    fn count_active_admins(&self, org: &OrganizationId) -> Result<usize, RepositoryError>;

    fn create(
        &self,
        org: &OrganizationId,
        data: NewMember,
    ) -> Result<OrganizationMember, RepositoryError>;

    fn set_role(
        &self,
        org: &OrganizationId,
        id: &MemberId,
        role: MemberRole,
    ) -> Result<Option<OrganizationMember>, RepositoryError>;

    /// Write or clear the staff-member back-reference.
    fn set_staff_link(
        &self,
        org: &OrganizationId,
        id: &MemberId,
        staff_member_id: Option<StaffMemberId>,
    ) -> Result<Option<OrganizationMember>, RepositoryError>;

    /// Demote one member to staff and promote another to admin as a single
    /// storage operation, so the quorum holds across the transfer.
    fn swap_roles(
        &self,
        org: &OrganizationId,
        demote: &MemberId,
        promote: &MemberId,
    ) -> Result<(OrganizationMember, OrganizationMember), RepositoryError>;

    fn delete(&self, org: &OrganizationId, id: &MemberId) -> Result<bool, RepositoryError>;
}
