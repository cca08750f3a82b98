use crate::repository::{Page, PageRequest, RepositoryError};
use crate::staff::domain::StaffMemberId;
use crate::students::domain::StudentId;
use crate::tenant::OrganizationId;

use super::domain::{
    Class, ClassEnrollment, ClassFilter, ClassId, ClassPatch, EnrollmentId, EnrollmentStatus,
    NewClass, NewEnrollment,
};

/// Storage abstraction for classes.
pub trait ClassRepository: Send + Sync {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &ClassId,
    ) -> Result<Option<Class>, RepositoryError>;

    fn list(
        &self,
        org: &OrganizationId,
        filter: &ClassFilter,
        page: &PageRequest,
    ) -> Result<Page<Class>, RepositoryError>;

    /// Every active class in the tenant, unpaginated.
    fn list_active(&self, org: &OrganizationId) -> Result<Vec<Class>, RepositoryError>;

    /// Most recently created records first.
    fn list_recent(&self, org: &OrganizationId, limit: usize)
        -> Result<Vec<Class>, RepositoryError>;

    fn find_by_teacher(
        &self,
        org: &OrganizationId,
        teacher_id: &StaffMemberId,
    ) -> Result<Vec<Class>, RepositoryError>;

    fn create(&self, org: &OrganizationId, data: NewClass) -> Result<Class, RepositoryError>;

    fn update(
        &self,
        org: &OrganizationId,
        id: &ClassId,
        patch: ClassPatch,
    ) -> Result<Option<Class>, RepositoryError>;

    fn delete(&self, org: &OrganizationId, id: &ClassId) -> Result<bool, RepositoryError>;

    fn exists(&self, org: &OrganizationId, id: &ClassId) -> Result<bool, RepositoryError>;
}

/// Storage abstraction for enrollments.
pub trait EnrollmentRepository: Send + Sync {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &EnrollmentId,
    ) -> Result<Option<ClassEnrollment>, RepositoryError>;

    fn create(
        &self,
        org: &OrganizationId,
        data: NewEnrollment,
    ) -> Result<ClassEnrollment, RepositoryError>;

    fn update_status(
        &self,
        org: &OrganizationId,
        id: &EnrollmentId,
        status: EnrollmentStatus,
    ) -> Result<Option<ClassEnrollment>, RepositoryError>;

    fn list_by_class(
        &self,
        org: &OrganizationId,
        class_id: &ClassId,
    ) -> Result<Vec<ClassEnrollment>, RepositoryError>;

    fn list_by_student(
        &self,
        org: &OrganizationId,
        student_id: &StudentId,
    ) -> Result<Vec<ClassEnrollment>, RepositoryError>;

    /// The active enrollment for a (class, student) pair, if one exists.
    fn find_active(
        &self,
        org: &OrganizationId,
        class_id: &ClassId,
        student_id: &StudentId,
    ) -> Result<Option<ClassEnrollment>, RepositoryError>;

    fn count_active_by_class(
        &self,
        org: &OrganizationId,
        class_id: &ClassId,
    ) -> Result<usize, RepositoryError>;

    fn is_enrolled(
        &self,
        org: &OrganizationId,
        class_id: &ClassId,
        student_id: &StudentId,
    ) -> Result<bool, RepositoryError>;
}
