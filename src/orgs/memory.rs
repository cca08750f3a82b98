use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::config::PaginationConfig;
use crate::repository::{Page, PageRequest, RepositoryError};
use crate::staff::domain::StaffMemberId;
use crate::tenant::OrganizationId;

use super::domain::{
    MemberFilter, MemberId, MemberRole, NewMember, NewOrganization, Organization,
    OrganizationMember, OrganizationPatch, UserId,
};
use super::repository::{MemberRepository, OrganizationRepository};

/// In-memory organization store. Holds the member store so the founder
/// membership lands in the same call that creates the tenant.
#[derive(Debug)]
pub struct MemoryOrganizationRepository {
    members: Arc<MemoryMemberRepository>,
    sequence: AtomicU64,
    records: Mutex<HashMap<OrganizationId, Organization>>,
}

impl MemoryOrganizationRepository {
    pub fn new(members: Arc<MemoryMemberRepository>) -> Self {
        Self {
            members,
            sequence: AtomicU64::new(0),
            records: Mutex::new(HashMap::new()),
        }
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<OrganizationId, Organization>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> OrganizationId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        OrganizationId(format!("org-{id:06}"))
    }
}

impl OrganizationRepository for MemoryOrganizationRepository {
    fn find_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, RepositoryError> {
        Ok(self.guard().get(id).cloned())
    }

    fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, RepositoryError> {
        Ok(self
            .guard()
            .values()
            .find(|organization| organization.slug == slug)
            .cloned())
    }

    fn create_with_founder(
        &self,
        data: NewOrganization,
        founder: &UserId,
    ) -> Result<(Organization, OrganizationMember), RepositoryError> {
        let now = Utc::now();
        let organization = Organization {
            id: self.next_id(),
            name: data.name,
            slug: data.slug,
            contact_email: data.contact_email,
            contact_phone: data.contact_phone,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.guard()
            .insert(organization.id.clone(), organization.clone());

        let member = self.members.create(
            &organization.id,
            NewMember {
                user_id: founder.clone(),
                role: MemberRole::Admin,
                invited_by: None,
            },
        )?;

        Ok((organization, member))
    }

    fn update(
        &self,
        id: &OrganizationId,
        patch: OrganizationPatch,
    ) -> Result<Option<Organization>, RepositoryError> {
        let mut records = self.guard();
        let Some(organization) = records.get_mut(id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            organization.name = name;
        }
        if let Some(contact_email) = patch.contact_email {
            organization.contact_email = Some(contact_email);
        }
        if let Some(contact_phone) = patch.contact_phone {
            organization.contact_phone = Some(contact_phone);
        }
        if let Some(is_active) = patch.is_active {
            organization.is_active = is_active;
        }
        organization.updated_at = Utc::now();

        Ok(Some(organization.clone()))
    }

    fn delete(&self, id: &OrganizationId) -> Result<bool, RepositoryError> {
        Ok(self.guard().remove(id).is_some())
    }
}

/// In-memory membership store.
#[derive(Debug, Default)]
pub struct MemoryMemberRepository {
    pagination: PaginationConfig,
    sequence: AtomicU64,
    records: Mutex<HashMap<MemberId, OrganizationMember>>,
}

impl MemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<MemberId, OrganizationMember>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> MemberId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        MemberId(format!("mem-{id:06}"))
    }

    fn sorted(mut members: Vec<OrganizationMember>) -> Vec<OrganizationMember> {
        members.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        members
    }
}

impl MemberRepository for MemoryMemberRepository {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &MemberId,
    ) -> Result<Option<OrganizationMember>, RepositoryError> {
        Ok(self
            .guard()
            .get(id)
            .filter(|member| member.organization_id == *org)
            .cloned())
    }

    fn find_by_user(
        &self,
        org: &OrganizationId,
        user_id: &UserId,
    ) -> Result<Option<OrganizationMember>, RepositoryError> {
        Ok(self
            .guard()
            .values()
            .find(|member| member.organization_id == *org && member.user_id == *user_id)
            .cloned())
    }

    fn find_by_staff_member(
        &self,
        org: &OrganizationId,
        staff_member_id: &StaffMemberId,
    ) -> Result<Option<OrganizationMember>, RepositoryError> {
        Ok(self
            .guard()
            .values()
            .find(|member| {
                member.organization_id == *org
                    && member.staff_member_id.as_ref() == Some(staff_member_id)
            })
            .cloned())
    }

    fn list(
        &self,
        org: &OrganizationId,
        filter: &MemberFilter,
        page: &PageRequest,
    ) -> Result<Page<OrganizationMember>, RepositoryError> {
        let members = Self::sorted(
            self.guard()
                .values()
                .filter(|member| member.organization_id == *org)
                .filter(|member| {
                    filter.role.map_or(true, |role| member.role == role)
                        && filter
                            .is_active
                            .map_or(true, |is_active| member.is_active == is_active)
                })
                .cloned()
                .collect(),
        );
        Ok(Page::paginate(members, page, &self.pagination))
    }

    fn count_active_admins(&self, org: &OrganizationId) -> Result<usize, RepositoryError> {
        Ok(self
            .guard()
            .values()
            .filter(|member| {
                member.organization_id == *org
                    && member.role == MemberRole::Admin
                    && member.is_active
            })
            .count())
    }

    fn create(
        &self,
        org: &OrganizationId,
        data: NewMember,
    ) -> Result<OrganizationMember, RepositoryError> {
        let now = Utc::now();
        let member = OrganizationMember {
            id: self.next_id(),
            organization_id: org.clone(),
            user_id: data.user_id,
            role: data.role,
            is_active: true,
            invited_at: data.invited_by.is_some().then_some(now),
            invited_by: data.invited_by,
            joined_at: Some(now),
            staff_member_id: None,
            created_at: now,
            updated_at: now,
        };
        self.guard().insert(member.id.clone(), member.clone());
        Ok(member)
    }

    fn set_role(
        &self,
        org: &OrganizationId,
        id: &MemberId,
        role: MemberRole,
    ) -> Result<Option<OrganizationMember>, RepositoryError> {
        let mut records = self.guard();
        let Some(member) = records
            .get_mut(id)
            .filter(|member| member.organization_id == *org)
        else {
            return Ok(None);
        };
        member.role = role;
        member.updated_at = Utc::now();
        Ok(Some(member.clone()))
    }

    fn set_staff_link(
        &self,
        org: &OrganizationId,
        id: &MemberId,
        staff_member_id: Option<StaffMemberId>,
    ) -> Result<Option<OrganizationMember>, RepositoryError> {
        let mut records = self.guard();
        let Some(member) = records
            .get_mut(id)
            .filter(|member| member.organization_id == *org)
        else {
            return Ok(None);
        };
        member.staff_member_id = staff_member_id;
        member.updated_at = Utc::now();
        Ok(Some(member.clone()))
    }

    fn swap_roles(
        &self,
        org: &OrganizationId,
        demote: &MemberId,
        promote: &MemberId,
    ) -> Result<(OrganizationMember, OrganizationMember), RepositoryError> {
        let mut records = self.guard();

        let Some(mut demoted) = records
            .get(demote)
            .filter(|member| member.organization_id == *org)
            .cloned()
        else {
            return Err(RepositoryError::NotFound);
        };
        let Some(mut promoted) = records
            .get(promote)
            .filter(|member| member.organization_id == *org)
            .cloned()
        else {
            return Err(RepositoryError::NotFound);
        };

        let now = Utc::now();
        demoted.role = MemberRole::Staff;
        demoted.updated_at = now;
        promoted.role = MemberRole::Admin;
        promoted.updated_at = now;

        // A self-swap resolves to the promotion.
        if demote == promote {
            records.insert(promote.clone(), promoted.clone());
            return Ok((promoted.clone(), promoted));
        }

        records.insert(demote.clone(), demoted.clone());
        records.insert(promote.clone(), promoted.clone());
        Ok((demoted, promoted))
    }

    fn delete(&self, org: &OrganizationId, id: &MemberId) -> Result<bool, RepositoryError> {
        let mut records = self.guard();
        let owned = records
            .get(id)
            .is_some_and(|member| member.organization_id == *org);
        if owned {
            records.remove(id);
        }
        Ok(owned)
    }
}
