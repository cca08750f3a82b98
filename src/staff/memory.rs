use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::config::PaginationConfig;
use crate::repository::{Page, PageRequest, RepositoryError};
use crate::shows::domain::ShowId;
use crate::tenant::OrganizationId;

use super::domain::{
    AssignmentId, NewAssignment, NewStaffMember, ShowStaffAssignment, StaffFilter, StaffMember,
    StaffMemberId, StaffPatch,
};
use super::repository::{AssignmentRepository, StaffRepository};

/// In-memory staff store for tests and embedders running without a database.
#[derive(Debug, Default)]
pub struct MemoryStaffRepository {
    pagination: PaginationConfig,
    sequence: AtomicU64,
    records: Mutex<HashMap<StaffMemberId, StaffMember>>,
}

impl MemoryStaffRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed record, bypassing id and timestamp assignment.
    pub fn seed(&self, member: StaffMember) {
        self.guard().insert(member.id.clone(), member);
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<StaffMemberId, StaffMember>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> StaffMemberId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        StaffMemberId(format!("stf-{id:06}"))
    }

    fn matches(member: &StaffMember, filter: &StaffFilter) -> bool {
        if let Some(is_active) = filter.is_active {
            if member.is_active != is_active {
                return false;
            }
        }
        if let Some(primary_role) = filter.primary_role {
            if member.primary_role != primary_role {
                return false;
            }
        }
        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            let email_hit = member
                .email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(&needle));
            if !(member.first_name.to_lowercase().contains(&needle)
                || member.last_name.to_lowercase().contains(&needle)
                || email_hit)
            {
                return false;
            }
        }
        true
    }

    fn sorted(mut members: Vec<StaffMember>) -> Vec<StaffMember> {
        members.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        members
    }
}

impl StaffRepository for MemoryStaffRepository {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &StaffMemberId,
    ) -> Result<Option<StaffMember>, RepositoryError> {
        Ok(self
            .guard()
            .get(id)
            .filter(|member| member.organization_id == *org)
            .cloned())
    }

    fn list(
        &self,
        org: &OrganizationId,
        filter: &StaffFilter,
        page: &PageRequest,
    ) -> Result<Page<StaffMember>, RepositoryError> {
        let members = Self::sorted(
            self.guard()
                .values()
                .filter(|member| member.organization_id == *org)
                .filter(|member| Self::matches(member, filter))
                .cloned()
                .collect(),
        );
        Ok(Page::paginate(members, page, &self.pagination))
    }

    fn create(
        &self,
        org: &OrganizationId,
        data: NewStaffMember,
    ) -> Result<StaffMember, RepositoryError> {
        let now = Utc::now();
        let member = StaffMember {
            id: self.next_id(),
            organization_id: org.clone(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            phone: data.phone,
            primary_role: data.primary_role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.guard().insert(member.id.clone(), member.clone());
        Ok(member)
    }

    fn update(
        &self,
        org: &OrganizationId,
        id: &StaffMemberId,
        patch: StaffPatch,
    ) -> Result<Option<StaffMember>, RepositoryError> {
        let mut records = self.guard();
        let Some(member) = records
            .get_mut(id)
            .filter(|member| member.organization_id == *org)
        else {
            return Ok(None);
        };

        if let Some(first_name) = patch.first_name {
            member.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            member.last_name = last_name;
        }
        if let Some(email) = patch.email {
            member.email = Some(email);
        }
        if let Some(phone) = patch.phone {
            member.phone = Some(phone);
        }
        if let Some(primary_role) = patch.primary_role {
            member.primary_role = primary_role;
        }
        if let Some(is_active) = patch.is_active {
            member.is_active = is_active;
        }
        member.updated_at = Utc::now();

        Ok(Some(member.clone()))
    }

    fn delete(&self, org: &OrganizationId, id: &StaffMemberId) -> Result<bool, RepositoryError> {
        let mut records = self.guard();
        let owned = records
            .get(id)
            .is_some_and(|member| member.organization_id == *org);
        if owned {
            records.remove(id);
        }
        Ok(owned)
    }

    fn exists(&self, org: &OrganizationId, id: &StaffMemberId) -> Result<bool, RepositoryError> {
        Ok(self
            .guard()
            .get(id)
            .is_some_and(|member| member.organization_id == *org))
    }

    fn find_by_email(
        &self,
        org: &OrganizationId,
        email: &str,
    ) -> Result<Option<StaffMember>, RepositoryError> {
        Ok(self
            .guard()
            .values()
            .find(|member| {
                member.organization_id == *org
                    && member
                        .email
                        .as_deref()
                        .is_some_and(|stored| stored.eq_ignore_ascii_case(email))
            })
            .cloned())
    }
}

/// In-memory assignment store.
#[derive(Debug, Default)]
pub struct MemoryAssignmentRepository {
    sequence: AtomicU64,
    records: Mutex<HashMap<AssignmentId, ShowStaffAssignment>>,
}

impl MemoryAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<AssignmentId, ShowStaffAssignment>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> AssignmentId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        AssignmentId(format!("asn-{id:06}"))
    }
}

impl AssignmentRepository for MemoryAssignmentRepository {
    fn list_by_show(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
    ) -> Result<Vec<ShowStaffAssignment>, RepositoryError> {
        let mut assignments: Vec<ShowStaffAssignment> = self
            .guard()
            .values()
            .filter(|assignment| {
                assignment.organization_id == *org && assignment.show_id == *show_id
            })
            .cloned()
            .collect();
        assignments.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(assignments)
    }

    fn delete_by_show(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
    ) -> Result<usize, RepositoryError> {
        let mut records = self.guard();
        let doomed: Vec<AssignmentId> = records
            .values()
            .filter(|assignment| {
                assignment.organization_id == *org && assignment.show_id == *show_id
            })
            .map(|assignment| assignment.id.clone())
            .collect();
        for id in &doomed {
            records.remove(id);
        }
        Ok(doomed.len())
    }

    fn create_many(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
        assignments: Vec<NewAssignment>,
    ) -> Result<Vec<ShowStaffAssignment>, RepositoryError> {
        let now = Utc::now();
        let mut created = Vec::with_capacity(assignments.len());
        let mut records = self.guard();
        for assignment in assignments {
            let row = ShowStaffAssignment {
                id: self.next_id(),
                organization_id: org.clone(),
                show_id: show_id.clone(),
                staff_member_id: assignment.staff_member_id,
                role: assignment.role,
                notes: assignment.notes,
                created_at: now,
                updated_at: now,
            };
            records.insert(row.id.clone(), row.clone());
            created.push(row);
        }
        Ok(created)
    }
}
