use crate::repository::{Page, PageRequest, RepositoryError};
use crate::tenant::OrganizationId;

use super::domain::{NewStudent, Student, StudentFilter, StudentId, StudentPatch};

/// Storage abstraction for students so the service can be exercised in
/// isolation. Every method is scoped to one tenant; ids from other tenants
/// resolve to `None`/`false`.
pub trait StudentRepository: Send + Sync {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &StudentId,
    ) -> Result<Option<Student>, RepositoryError>;

    fn list(
        &self,
        org: &OrganizationId,
        filter: &StudentFilter,
        page: &PageRequest,
    ) -> Result<Page<Student>, RepositoryError>;

    /// Every active student in the tenant, unpaginated.
    fn list_active(&self, org: &OrganizationId) -> Result<Vec<Student>, RepositoryError>;

    /// Most recently created records first.
    fn list_recent(
        &self,
        org: &OrganizationId,
        limit: usize,
    ) -> Result<Vec<Student>, RepositoryError>;

    fn create(&self, org: &OrganizationId, data: NewStudent) -> Result<Student, RepositoryError>;

    fn update(
        &self,
        org: &OrganizationId,
        id: &StudentId,
        patch: StudentPatch,
    ) -> Result<Option<Student>, RepositoryError>;

    fn delete(&self, org: &OrganizationId, id: &StudentId) -> Result<bool, RepositoryError>;

    fn exists(&self, org: &OrganizationId, id: &StudentId) -> Result<bool, RepositoryError>;

    /// Case-insensitive email lookup within the tenant.
    fn find_by_email(
        &self,
        org: &OrganizationId,
        email: &str,
    ) -> Result<Option<Student>, RepositoryError>;
}
