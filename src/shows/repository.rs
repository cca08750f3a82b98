use crate::repository::{Page, PageRequest, RepositoryError};
use crate::staff::domain::StaffMemberId;
use crate::students::domain::StudentId;
use crate::tenant::OrganizationId;

use super::domain::{
    Casting, CastingId, CastingStatus, NewCasting, NewRole, NewShow, RoleId, RolePatch, Show,
    ShowFilter, ShowId, ShowPatch, ShowRole,
};

/// Storage abstraction for shows.
pub trait ShowRepository: Send + Sync {
    fn find_by_id(&self, org: &OrganizationId, id: &ShowId)
        -> Result<Option<Show>, RepositoryError>;

    fn list(
        &self,
        org: &OrganizationId,
        filter: &ShowFilter,
        page: &PageRequest,
    ) -> Result<Page<Show>, RepositoryError>;

    /// Every active show in the tenant, unpaginated.
    fn list_active(&self, org: &OrganizationId) -> Result<Vec<Show>, RepositoryError>;

    /// Most recently created records first.
    fn list_recent(&self, org: &OrganizationId, limit: usize) -> Result<Vec<Show>, RepositoryError>;

    fn find_by_director(
        &self,
        org: &OrganizationId,
        director_id: &StaffMemberId,
    ) -> Result<Vec<Show>, RepositoryError>;

    fn create(&self, org: &OrganizationId, data: NewShow) -> Result<Show, RepositoryError>;

    fn update(
        &self,
        org: &OrganizationId,
        id: &ShowId,
        patch: ShowPatch,
    ) -> Result<Option<Show>, RepositoryError>;

    fn delete(&self, org: &OrganizationId, id: &ShowId) -> Result<bool, RepositoryError>;

    fn exists(&self, org: &OrganizationId, id: &ShowId) -> Result<bool, RepositoryError>;
}

/// Storage abstraction for roles within shows.
pub trait RoleRepository: Send + Sync {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &RoleId,
    ) -> Result<Option<ShowRole>, RepositoryError>;

    fn list_by_show(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
    ) -> Result<Vec<ShowRole>, RepositoryError>;

    fn count_active_by_show(
        &self,
        org: &OrganizationId,
        show_id: &ShowId,
    ) -> Result<usize, RepositoryError>;

    fn create(&self, org: &OrganizationId, data: NewRole) -> Result<ShowRole, RepositoryError>;

    fn update(
        &self,
        org: &OrganizationId,
        id: &RoleId,
        patch: RolePatch,
    ) -> Result<Option<ShowRole>, RepositoryError>;

    fn delete(&self, org: &OrganizationId, id: &RoleId) -> Result<bool, RepositoryError>;
}

/// Storage abstraction for castings.
pub trait CastingRepository: Send + Sync {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &CastingId,
    ) -> Result<Option<Casting>, RepositoryError>;

    fn create(&self, org: &OrganizationId, data: NewCasting) -> Result<Casting, RepositoryError>;

    fn update_status(
        &self,
        org: &OrganizationId,
        id: &CastingId,
        status: CastingStatus,
    ) -> Result<Option<Casting>, RepositoryError>;

    fn list_by_role(
        &self,
        org: &OrganizationId,
        role_id: &RoleId,
    ) -> Result<Vec<Casting>, RepositoryError>;

    fn list_by_student(
        &self,
        org: &OrganizationId,
        student_id: &StudentId,
    ) -> Result<Vec<Casting>, RepositoryError>;

    /// The non-completed casting for a (role, student) pair, if one exists.
    fn find_open(
        &self,
        org: &OrganizationId,
        role_id: &RoleId,
        student_id: &StudentId,
    ) -> Result<Option<Casting>, RepositoryError>;

    fn count_open_by_role(
        &self,
        org: &OrganizationId,
        role_id: &RoleId,
    ) -> Result<usize, RepositoryError>;

    fn is_cast(
        &self,
        org: &OrganizationId,
        role_id: &RoleId,
        student_id: &StudentId,
    ) -> Result<bool, RepositoryError>;
}
