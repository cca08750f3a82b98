use std::sync::Arc;

use crate::error::{BulkOutcome, DomainError};
use crate::repository::{Page, PageRequest};
use crate::students::domain::StudentId;
use crate::sync::{InvariantLocks, LockScope};
use crate::tenant::OrganizationId;
use crate::validate;

use super::domain::{
    Casting, CastingId, CastingStatus, NewCasting, NewRole, NewShow, RoleId, RolePatch, Show,
    ShowFilter, ShowId, ShowPatch, ShowRole, ShowStats,
};
use super::repository::{CastingRepository, RoleRepository, ShowRepository};

/// Enforces date ordering, role/show referential integrity, casting
/// uniqueness, and deletion guards; owns the casting status lifecycle.
pub struct ShowService<S, R, C> {
    shows: Arc<S>,
    roles: Arc<R>,
    castings: Arc<C>,
    locks: Arc<InvariantLocks>,
}

impl<S, R, C> ShowService<S, R, C>
where
    S: ShowRepository,
    R: RoleRepository,
    C: CastingRepository,
{
    pub fn new(shows: Arc<S>, roles: Arc<R>, castings: Arc<C>, locks: Arc<InvariantLocks>) -> Self {
        Self {
            shows,
            roles,
            castings,
            locks,
        }
    }

    pub fn create_show(&self, org: &OrganizationId, mut data: NewShow) -> Result<Show, DomainError> {
        data.title = validate::required_text("show title", &data.title)?;
        validate::ordered_dates("show", data.start_date, data.end_date)?;
        Ok(self.shows.create(org, data)?)
    }

    /// Returns `Ok(None)` when the id does not resolve within the tenant. Date
    /// ordering runs against the merged current+incoming values. Status is
    /// written as supplied; the production lifecycle is not a gate here.
    pub fn update_show(
        &self,
        org: &OrganizationId,
        id: &ShowId,
        mut patch: ShowPatch,
    ) -> Result<Option<Show>, DomainError> {
        let Some(current) = self.shows.find_by_id(org, id)? else {
            return Ok(None);
        };

        if let Some(title) = patch.title.take() {
            patch.title = Some(validate::required_text("show title", &title)?);
        }
        validate::ordered_dates(
            "show",
            patch.start_date.or(current.start_date),
            patch.end_date.or(current.end_date),
        )?;

        Ok(self.shows.update(org, id, patch)?)
    }

    /// A show with active roles cannot be deleted.
    pub fn delete_show(&self, org: &OrganizationId, id: &ShowId) -> Result<bool, DomainError> {
        if !self.shows.exists(org, id)? {
            return Ok(false);
        }
        if self.roles.count_active_by_show(org, id)? > 0 {
            return Err(DomainError::conflict(
                "show has active roles and cannot be deleted",
            ));
        }
        Ok(self.shows.delete(org, id)?)
    }

    pub fn get_show(&self, org: &OrganizationId, id: &ShowId) -> Result<Option<Show>, DomainError> {
        Ok(self.shows.find_by_id(org, id)?)
    }

    pub fn list_shows(
        &self,
        org: &OrganizationId,
        filter: &ShowFilter,
        page: &PageRequest,
    ) -> Result<Page<Show>, DomainError> {
        Ok(self.shows.list(org, filter, page)?)
    }

    pub fn active_shows(&self, org: &OrganizationId) -> Result<Vec<Show>, DomainError> {
        Ok(self.shows.list_active(org)?)
    }

    pub fn recent_shows(
        &self,
        org: &OrganizationId,
        limit: usize,
    ) -> Result<Vec<Show>, DomainError> {
        Ok(self.shows.list_recent(org, limit)?)
    }

    /// The owning show must resolve within the tenant.
    pub fn create_role(&self, org: &OrganizationId, mut data: NewRole) -> Result<ShowRole, DomainError> {
        data.name = validate::required_text("role name", &data.name)?;
        if !self.shows.exists(org, &data.show_id)? {
            return Err(DomainError::not_found("show", &data.show_id));
        }
        Ok(self.roles.create(org, data)?)
    }

    pub fn update_role(
        &self,
        org: &OrganizationId,
        id: &RoleId,
        mut patch: RolePatch,
    ) -> Result<Option<ShowRole>, DomainError> {
        if self.roles.find_by_id(org, id)?.is_none() {
            return Ok(None);
        }
        if let Some(name) = patch.name.take() {
            patch.name = Some(validate::required_text("role name", &name)?);
        }
        Ok(self.roles.update(org, id, patch)?)
    }

    /// A role with castings still in flight cannot be deleted.
    pub fn delete_role(&self, org: &OrganizationId, id: &RoleId) -> Result<bool, DomainError> {
        if self.roles.find_by_id(org, id)?.is_none() {
            return Ok(false);
        }
        if self.castings.count_open_by_role(org, id)? > 0 {
            return Err(DomainError::conflict(
                "role has castings in progress and cannot be deleted",
            ));
        }
        Ok(self.roles.delete(org, id)?)
    }

    pub fn show_roles(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
    ) -> Result<Vec<ShowRole>, DomainError> {
        Ok(self.roles.list_by_show(org, show_id)?)
    }

    /// Cast a student, holding the role's slot lock across the uniqueness
    /// check and the insert.
    pub fn cast_student(
        &self,
        org: &OrganizationId,
        data: NewCasting,
    ) -> Result<Casting, DomainError> {
        if self.roles.find_by_id(org, &data.role_id)?.is_none() {
            return Err(DomainError::not_found("role", &data.role_id));
        }

        let slot = self
            .locks
            .slot(org, LockScope::CastingSlot(data.role_id.0.clone()));
        let _guard = slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        if self
            .castings
            .find_open(org, &data.role_id, &data.student_id)?
            .is_some()
        {
            return Err(DomainError::conflict(
                "student already holds a casting for this role",
            ));
        }

        Ok(self.castings.create(org, data)?)
    }

    /// Soft state change to `Completed`; calling it again is a no-op.
    pub fn uncast_student(
        &self,
        org: &OrganizationId,
        id: &CastingId,
    ) -> Result<Casting, DomainError> {
        let casting = self
            .castings
            .find_by_id(org, id)?
            .ok_or_else(|| DomainError::not_found("casting", id))?;

        if casting.status == CastingStatus::Completed {
            return Ok(casting);
        }

        self.castings
            .update_status(org, id, CastingStatus::Completed)?
            .ok_or_else(|| DomainError::not_found("casting", id))
    }

    /// Status moves freely between stages; only existence is checked.
    pub fn update_casting_status(
        &self,
        org: &OrganizationId,
        id: &CastingId,
        status: CastingStatus,
    ) -> Result<Casting, DomainError> {
        self.castings
            .update_status(org, id, status)?
            .ok_or_else(|| DomainError::not_found("casting", id))
    }

    /// Best-effort: every input is attempted; failures are logged, skipped,
    /// and reported back per item.
    pub fn bulk_cast_students(
        &self,
        org: &OrganizationId,
        inputs: Vec<NewCasting>,
    ) -> Vec<BulkOutcome<NewCasting, Casting>> {
        inputs
            .into_iter()
            .map(|input| {
                let outcome = self.cast_student(org, input.clone());
                if let Err(error) = &outcome {
                    tracing::warn!(
                        role = %input.role_id,
                        student = %input.student_id,
                        error = %error,
                        "skipping casting in bulk operation"
                    );
                }
                BulkOutcome {
                    input,
                    outcome: outcome.map_err(Into::into),
                }
            })
            .collect()
    }

    pub fn role_castings(
        &self,
        org: &OrganizationId,
        role_id: &RoleId,
    ) -> Result<Vec<Casting>, DomainError> {
        Ok(self.castings.list_by_role(org, role_id)?)
    }

    pub fn student_castings(
        &self,
        org: &OrganizationId,
        student_id: &StudentId,
    ) -> Result<Vec<Casting>, DomainError> {
        Ok(self.castings.list_by_student(org, student_id)?)
    }

    /// Casting coverage: roles holding at least one non-completed casting,
    /// plus casting counts per lifecycle stage.
    pub fn show_stats(&self, org: &OrganizationId, show_id: &ShowId) -> Result<ShowStats, DomainError> {
        if !self.shows.exists(org, show_id)? {
            return Err(DomainError::not_found("show", show_id));
        }

        let mut stats = ShowStats::default();
        for role in self.roles.list_by_show(org, show_id)? {
            stats.total_roles += 1;
            let mut held = false;
            for casting in self.castings.list_by_role(org, &role.id)? {
                *stats.castings_by_status.entry(casting.status).or_default() += 1;
                if casting.status.is_open() {
                    held = true;
                }
            }
            if held {
                stats.cast_roles += 1;
            }
        }
        Ok(stats)
    }
}
