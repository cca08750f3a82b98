use std::sync::Arc;

use crate::error::DomainError;
use crate::repository::{Page, PageRequest};
use crate::staff::domain::StaffMemberId;
use crate::staff::repository::StaffRepository;
use crate::sync::{InvariantLocks, LockScope};
use crate::tenant::OrganizationId;
use crate::validate;

use super::domain::{
    MemberFilter, MemberId, MemberRole, NewMember, NewOrganization, Organization,
    OrganizationMember, OrganizationPatch, UserId,
};
use super::repository::{MemberRepository, OrganizationRepository};

/// Enforces slug uniqueness and format, the admin quorum, membership
/// invariants, and the mutual 1:1 staff link.
pub struct OrganizationService<O, M, S> {
    organizations: Arc<O>,
    members: Arc<M>,
    staff: Arc<S>,
    locks: Arc<InvariantLocks>,
}

impl<O, M, S> OrganizationService<O, M, S>
where
    O: OrganizationRepository,
    M: MemberRepository,
    S: StaffRepository,
{
    pub fn new(
        organizations: Arc<O>,
        members: Arc<M>,
        staff: Arc<S>,
        locks: Arc<InvariantLocks>,
    ) -> Self {
        Self {
            organizations,
            members,
            staff,
            locks,
        }
    }

    /// Create the tenant and its founding admin membership. The slug is
    /// globally unique.
    pub fn create_organization(
        &self,
        mut data: NewOrganization,
        creator: &UserId,
    ) -> Result<(Organization, OrganizationMember), DomainError> {
        data.name = validate::required_text("organization name", &data.name)?;
        data.slug = validate::slug(&data.slug)?;

        if self.organizations.find_by_slug(&data.slug)?.is_some() {
            return Err(DomainError::conflict(format!(
                "an organization with slug '{}' already exists",
                data.slug
            )));
        }

        Ok(self.organizations.create_with_founder(data, creator)?)
    }

    pub fn get_organization(&self, id: &OrganizationId) -> Result<Option<Organization>, DomainError> {
        Ok(self.organizations.find_by_id(id)?)
    }

    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Organization>, DomainError> {
        Ok(self.organizations.find_by_slug(slug)?)
    }

    /// The slug is immutable; the patch type cannot carry one.
    pub fn update_organization(
        &self,
        id: &OrganizationId,
        mut patch: OrganizationPatch,
    ) -> Result<Option<Organization>, DomainError> {
        if let Some(name) = patch.name.take() {
            patch.name = Some(validate::required_text("organization name", &name)?);
        }
        Ok(self.organizations.update(id, patch)?)
    }

    /// At most one membership per (organization, user).
    pub fn add_member(
        &self,
        org: &OrganizationId,
        data: NewMember,
    ) -> Result<OrganizationMember, DomainError> {
        if self.members.find_by_user(org, &data.user_id)?.is_some() {
            return Err(DomainError::conflict(
                "user already belongs to this organization",
            ));
        }
        Ok(self.members.create(org, data)?)
    }

    pub fn list_members(
        &self,
        org: &OrganizationId,
        filter: &MemberFilter,
        page: &PageRequest,
    ) -> Result<Page<OrganizationMember>, DomainError> {
        Ok(self.members.list(org, filter, page)?)
    }

    pub fn member_for_user(
        &self,
        org: &OrganizationId,
        user_id: &UserId,
    ) -> Result<Option<OrganizationMember>, DomainError> {
        Ok(self.members.find_by_user(org, user_id)?)
    }

    /// Demoting the sole active admin would leave the tenant unadministered;
    /// the quorum is re-counted under its lock, never cached.
    pub fn update_member_role(
        &self,
        org: &OrganizationId,
        member_id: &MemberId,
        role: MemberRole,
    ) -> Result<OrganizationMember, DomainError> {
        let slot = self.locks.slot(org, LockScope::AdminQuorum);
        let _guard = slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let member = self
            .members
            .find_by_id(org, member_id)?
            .ok_or_else(|| DomainError::not_found("organization member", member_id))?;

        if member.role == MemberRole::Admin
            && member.is_active
            && role != MemberRole::Admin
            && self.members.count_active_admins(org)? <= 1
        {
            return Err(DomainError::conflict(
                "cannot remove the last admin from the organization",
            ));
        }

        self.members
            .set_role(org, member_id, role)?
            .ok_or_else(|| DomainError::not_found("organization member", member_id))
    }

    /// Same quorum guard as [`Self::update_member_role`].
    pub fn remove_member(
        &self,
        org: &OrganizationId,
        member_id: &MemberId,
    ) -> Result<bool, DomainError> {
        let slot = self.locks.slot(org, LockScope::AdminQuorum);
        let _guard = slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let Some(member) = self.members.find_by_id(org, member_id)? else {
            return Ok(false);
        };

        if member.role == MemberRole::Admin
            && member.is_active
            && self.members.count_active_admins(org)? <= 1
        {
            return Err(DomainError::conflict(
                "cannot remove the last admin from the organization",
            ));
        }

        Ok(self.members.delete(org, member_id)?)
    }

    /// Attach a staff member to an organization member. The link is mutually
    /// 1:1 within the tenant and is enforced by re-querying the claim under
    /// the staff-link lock before every write.
    pub fn link_staff_member(
        &self,
        org: &OrganizationId,
        member_id: &MemberId,
        staff_member_id: &StaffMemberId,
        acting_role: MemberRole,
    ) -> Result<OrganizationMember, DomainError> {
        if acting_role != MemberRole::Admin {
            return Err(DomainError::forbidden(
                "only organization admins can manage staff links",
            ));
        }

        let member = self
            .members
            .find_by_id(org, member_id)?
            .ok_or_else(|| DomainError::not_found("organization member", member_id))?;

        let slot = self
            .locks
            .slot(org, LockScope::StaffLink(staff_member_id.0.clone()));
        let _guard = slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let staff_member = self
            .staff
            .find_by_id(org, staff_member_id)?
            .ok_or_else(|| DomainError::not_found("staff member", staff_member_id))?;
        if !staff_member.is_active {
            return Err(DomainError::validation(format!(
                "staff member {staff_member_id} is not active"
            )));
        }
        // Lookup is tenant-scoped already; this guards repository
        // implementations that are not.
        if staff_member.organization_id != *org {
            return Err(DomainError::validation(
                "staff member belongs to a different organization",
            ));
        }

        if let Some(claimant) = self.members.find_by_staff_member(org, staff_member_id)? {
            if claimant.id != member.id {
                return Err(DomainError::conflict(
                    "staff member is already linked to another member",
                ));
            }
        }

        self.members
            .set_staff_link(org, member_id, Some(staff_member_id.clone()))?
            .ok_or_else(|| DomainError::not_found("organization member", member_id))
    }

    /// Symmetric to [`Self::link_staff_member`]: admin-only, clears the field.
    pub fn unlink_staff_member(
        &self,
        org: &OrganizationId,
        member_id: &MemberId,
        acting_role: MemberRole,
    ) -> Result<OrganizationMember, DomainError> {
        if acting_role != MemberRole::Admin {
            return Err(DomainError::forbidden(
                "only organization admins can manage staff links",
            ));
        }

        if self.members.find_by_id(org, member_id)?.is_none() {
            return Err(DomainError::not_found("organization member", member_id));
        }

        self.members
            .set_staff_link(org, member_id, None)?
            .ok_or_else(|| DomainError::not_found("organization member", member_id))
    }

    /// Demote the current owner to staff and promote the new owner to admin
    /// in one storage operation: exactly one swap, no window with zero admins.
    pub fn transfer_ownership(
        &self,
        org: &OrganizationId,
        current_owner_id: &MemberId,
        new_owner_id: &MemberId,
    ) -> Result<(OrganizationMember, OrganizationMember), DomainError> {
        let slot = self.locks.slot(org, LockScope::AdminQuorum);
        let _guard = slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        let current = self
            .members
            .find_by_id(org, current_owner_id)?
            .ok_or_else(|| DomainError::not_found("organization member", current_owner_id))?;
        if current.role != MemberRole::Admin {
            return Err(DomainError::forbidden(
                "only the current admin can transfer ownership",
            ));
        }

        if self.members.find_by_id(org, new_owner_id)?.is_none() {
            return Err(DomainError::not_found(
                "organization member",
                new_owner_id,
            ));
        }

        Ok(self
            .members
            .swap_roles(org, current_owner_id, new_owner_id)?)
    }
}
