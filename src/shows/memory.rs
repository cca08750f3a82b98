use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::config::PaginationConfig;
use crate::repository::{Page, PageRequest, RepositoryError};
use crate::staff::domain::StaffMemberId;
use crate::students::domain::StudentId;
use crate::tenant::OrganizationId;

use super::domain::{
    Casting, CastingId, CastingStatus, NewCasting, NewRole, NewShow, RoleId, RolePatch, Show,
    ShowFilter, ShowId, ShowPatch, ShowRole, ShowStatus,
};
use super::repository::{CastingRepository, RoleRepository, ShowRepository};

/// In-memory show store for tests and embedders running without a database.
#[derive(Debug, Default)]
pub struct MemoryShowRepository {
    pagination: PaginationConfig,
    sequence: AtomicU64,
    records: Mutex<HashMap<ShowId, Show>>,
}

impl MemoryShowRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed record, bypassing id and timestamp assignment.
    pub fn seed(&self, show: Show) {
        self.guard().insert(show.id.clone(), show);
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<ShowId, Show>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> ShowId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        ShowId(format!("shw-{id:06}"))
    }

    fn matches(show: &Show, filter: &ShowFilter) -> bool {
        if let Some(is_active) = filter.is_active {
            if show.is_active != is_active {
                return false;
            }
        }
        if let Some(status) = filter.status {
            if show.status != status {
                return false;
            }
        }
        if let Some(director_id) = &filter.director_id {
            if show.director_id.as_ref() != Some(director_id) {
                return false;
            }
        }
        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            let venue_hit = show
                .venue
                .as_deref()
                .is_some_and(|venue| venue.to_lowercase().contains(&needle));
            if !(show.title.to_lowercase().contains(&needle) || venue_hit) {
                return false;
            }
        }
        true
    }

    fn sorted(mut shows: Vec<Show>) -> Vec<Show> {
        shows.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        shows
    }
}

impl ShowRepository for MemoryShowRepository {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &ShowId,
    ) -> Result<Option<Show>, RepositoryError> {
        Ok(self
            .guard()
            .get(id)
            .filter(|show| show.organization_id == *org)
            .cloned())
    }

    fn list(
        &self,
        org: &OrganizationId,
        filter: &ShowFilter,
        page: &PageRequest,
    ) -> Result<Page<Show>, RepositoryError> {
        let shows = Self::sorted(
            self.guard()
                .values()
                .filter(|show| show.organization_id == *org)
                .filter(|show| Self::matches(show, filter))
                .cloned()
                .collect(),
        );
        Ok(Page::paginate(shows, page, &self.pagination))
    }

    fn list_active(&self, org: &OrganizationId) -> Result<Vec<Show>, RepositoryError> {
        Ok(Self::sorted(
            self.guard()
                .values()
                .filter(|show| show.organization_id == *org && show.is_active)
                .cloned()
                .collect(),
        ))
    }

    fn list_recent(&self, org: &OrganizationId, limit: usize) -> Result<Vec<Show>, RepositoryError> {
        let mut shows = Self::sorted(
            self.guard()
                .values()
                .filter(|show| show.organization_id == *org)
                .cloned()
                .collect(),
        );
        shows.reverse();
        shows.truncate(limit);
        Ok(shows)
    }

    fn find_by_director(
        &self,
        org: &OrganizationId,
        director_id: &StaffMemberId,
    ) -> Result<Vec<Show>, RepositoryError> {
        Ok(Self::sorted(
            self.guard()
                .values()
                .filter(|show| {
                    show.organization_id == *org && show.director_id.as_ref() == Some(director_id)
                })
                .cloned()
                .collect(),
        ))
    }

    fn create(&self, org: &OrganizationId, data: NewShow) -> Result<Show, RepositoryError> {
        let now = Utc::now();
        let show = Show {
            id: self.next_id(),
            organization_id: org.clone(),
            title: data.title,
            description: data.description,
            director_id: data.director_id,
            start_date: data.start_date,
            end_date: data.end_date,
            venue: data.venue,
            budget: data.budget,
            status: ShowStatus::Planning,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.guard().insert(show.id.clone(), show.clone());
        Ok(show)
    }

    fn update(
        &self,
        org: &OrganizationId,
        id: &ShowId,
        patch: ShowPatch,
    ) -> Result<Option<Show>, RepositoryError> {
        let mut records = self.guard();
        let Some(show) = records
            .get_mut(id)
            .filter(|show| show.organization_id == *org)
        else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            show.title = title;
        }
        if let Some(description) = patch.description {
            show.description = Some(description);
        }
        if let Some(director_id) = patch.director_id {
            show.director_id = Some(director_id);
        }
        if let Some(start_date) = patch.start_date {
            show.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            show.end_date = Some(end_date);
        }
        if let Some(venue) = patch.venue {
            show.venue = Some(venue);
        }
        if let Some(budget) = patch.budget {
            show.budget = Some(budget);
        }
        if let Some(status) = patch.status {
            show.status = status;
        }
        if let Some(is_active) = patch.is_active {
            show.is_active = is_active;
        }
        show.updated_at = Utc::now();

        Ok(Some(show.clone()))
    }

    fn delete(&self, org: &OrganizationId, id: &ShowId) -> Result<bool, RepositoryError> {
        let mut records = self.guard();
        let owned = records
            .get(id)
            .is_some_and(|show| show.organization_id == *org);
        if owned {
            records.remove(id);
        }
        Ok(owned)
    }

    fn exists(&self, org: &OrganizationId, id: &ShowId) -> Result<bool, RepositoryError> {
        Ok(self
            .guard()
            .get(id)
            .is_some_and(|show| show.organization_id == *org))
    }
}

/// In-memory role store.
#[derive(Debug, Default)]
pub struct MemoryRoleRepository {
    sequence: AtomicU64,
    records: Mutex<HashMap<RoleId, ShowRole>>,
}

impl MemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<RoleId, ShowRole>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> RoleId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        RoleId(format!("rol-{id:06}"))
    }

    fn sorted(mut roles: Vec<ShowRole>) -> Vec<ShowRole> {
        roles.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        roles
    }
}

impl RoleRepository for MemoryRoleRepository {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &RoleId,
    ) -> Result<Option<ShowRole>, RepositoryError> {
        Ok(self
            .guard()
            .get(id)
            .filter(|role| role.organization_id == *org)
            .cloned())
    }

    fn list_by_show(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
    ) -> Result<Vec<ShowRole>, RepositoryError> {
        Ok(Self::sorted(
            self.guard()
                .values()
                .filter(|role| role.organization_id == *org && role.show_id == *show_id)
                .cloned()
                .collect(),
        ))
    }

    fn count_active_by_show(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
    ) -> Result<usize, RepositoryError> {
        Ok(self
            .guard()
            .values()
            .filter(|role| {
                role.organization_id == *org && role.show_id == *show_id && role.is_active
            })
            .count())
    }

    fn create(&self, org: &OrganizationId, data: NewRole) -> Result<ShowRole, RepositoryError> {
        let now = Utc::now();
        let role = ShowRole {
            id: self.next_id(),
            organization_id: org.clone(),
            show_id: data.show_id,
            name: data.name,
            character_type: data.character_type,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.guard().insert(role.id.clone(), role.clone());
        Ok(role)
    }

    fn update(
        &self,
        org: &OrganizationId,
        id: &RoleId,
        patch: RolePatch,
    ) -> Result<Option<ShowRole>, RepositoryError> {
        let mut records = self.guard();
        let Some(role) = records
            .get_mut(id)
            .filter(|role| role.organization_id == *org)
        else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            role.name = name;
        }
        if let Some(character_type) = patch.character_type {
            role.character_type = Some(character_type);
        }
        if let Some(is_active) = patch.is_active {
            role.is_active = is_active;
        }
        role.updated_at = Utc::now();

        Ok(Some(role.clone()))
    }

    fn delete(&self, org: &OrganizationId, id: &RoleId) -> Result<bool, RepositoryError> {
        let mut records = self.guard();
        let owned = records
            .get(id)
            .is_some_and(|role| role.organization_id == *org);
        if owned {
            records.remove(id);
        }
        Ok(owned)
    }
}

/// In-memory casting store.
#[derive(Debug, Default)]
pub struct MemoryCastingRepository {
    sequence: AtomicU64,
    records: Mutex<HashMap<CastingId, Casting>>,
}

impl MemoryCastingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<CastingId, Casting>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> CastingId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        CastingId(format!("cst-{id:06}"))
    }

    fn sorted(mut castings: Vec<Casting>) -> Vec<Casting> {
        castings.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        castings
    }
}

impl CastingRepository for MemoryCastingRepository {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &CastingId,
    ) -> Result<Option<Casting>, RepositoryError> {
        Ok(self
            .guard()
            .get(id)
            .filter(|casting| casting.organization_id == *org)
            .cloned())
    }

    fn create(&self, org: &OrganizationId, data: NewCasting) -> Result<Casting, RepositoryError> {
        let now = Utc::now();
        let casting = Casting {
            id: self.next_id(),
            organization_id: org.clone(),
            role_id: data.role_id,
            student_id: data.student_id,
            status: CastingStatus::Assigned,
            created_at: now,
            updated_at: now,
        };
        self.guard().insert(casting.id.clone(), casting.clone());
        Ok(casting)
    }

    fn update_status(
        &self,
        org: &OrganizationId,
        id: &CastingId,
        status: CastingStatus,
    ) -> Result<Option<Casting>, RepositoryError> {
        let mut records = self.guard();
        let Some(casting) = records
            .get_mut(id)
            .filter(|casting| casting.organization_id == *org)
        else {
            return Ok(None);
        };
        casting.status = status;
        casting.updated_at = Utc::now();
        Ok(Some(casting.clone()))
    }

    fn list_by_role(
        &self,
        org: &OrganizationId,
        role_id: &RoleId,
    ) -> Result<Vec<Casting>, RepositoryError> {
        Ok(Self::sorted(
            self.guard()
                .values()
                .filter(|casting| casting.organization_id == *org && casting.role_id == *role_id)
                .cloned()
                .collect(),
        ))
    }

    fn list_by_student(
        &self,
        org: &OrganizationId,
        student_id: &StudentId,
    ) -> Result<Vec<Casting>, RepositoryError> {
        Ok(Self::sorted(
            self.guard()
                .values()
                .filter(|casting| {
                    casting.organization_id == *org && casting.student_id == *student_id
                })
                .cloned()
                .collect(),
        ))
    }

    fn find_open(
        &self,
        org: &OrganizationId,
        role_id: &RoleId,
        student_id: &StudentId,
    ) -> Result<Option<Casting>, RepositoryError> {
        Ok(self
            .guard()
            .values()
            .find(|casting| {
                casting.organization_id == *org
                    && casting.role_id == *role_id
                    && casting.student_id == *student_id
                    && casting.status.is_open()
            })
            .cloned())
    }

    fn count_open_by_role(
        &self,
        org: &OrganizationId,
        role_id: &RoleId,
    ) -> Result<usize, RepositoryError> {
        Ok(self
            .guard()
            .values()
            .filter(|casting| {
                casting.organization_id == *org
                    && casting.role_id == *role_id
                    && casting.status.is_open()
            })
            .count())
    }

    fn is_cast(
        &self,
        org: &OrganizationId,
        role_id: &RoleId,
        student_id: &StudentId,
    ) -> Result<bool, RepositoryError> {
        Ok(self.find_open(org, role_id, student_id)?.is_some())
    }
}
