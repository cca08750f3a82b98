use std::sync::Arc;

use crate::error::DomainError;
use crate::repository::{Page, PageRequest};
use crate::tenant::OrganizationId;
use crate::validate;

use super::domain::{
    NewStudent, Student, StudentFilter, StudentId, StudentPatch, StudentStats,
    GRADE_NOT_SPECIFIED,
};
use super::repository::StudentRepository;

/// Validates student input and enforces per-tenant email uniqueness.
pub struct StudentService<R> {
    repository: Arc<R>,
}

impl<R> StudentService<R>
where
    R: StudentRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn create_student(
        &self,
        org: &OrganizationId,
        mut data: NewStudent,
    ) -> Result<Student, DomainError> {
        data.first_name = validate::required_text("first name", &data.first_name)?;
        data.last_name = validate::required_text("last name", &data.last_name)?;
        data.email = validate::optional_text(data.email);

        if let Some(email) = &data.email {
            if self.repository.find_by_email(org, email)?.is_some() {
                return Err(DomainError::conflict(format!(
                    "a student with email {email} already exists in this organization"
                )));
            }
        }

        Ok(self.repository.create(org, data)?)
    }

    /// Returns `Ok(None)` when the id does not resolve within the tenant.
    pub fn update_student(
        &self,
        org: &OrganizationId,
        id: &StudentId,
        mut patch: StudentPatch,
    ) -> Result<Option<Student>, DomainError> {
        if self.repository.find_by_id(org, id)?.is_none() {
            return Ok(None);
        }

        if let Some(first_name) = patch.first_name.take() {
            patch.first_name = Some(validate::required_text("first name", &first_name)?);
        }
        if let Some(last_name) = patch.last_name.take() {
            patch.last_name = Some(validate::required_text("last name", &last_name)?);
        }

        patch.email = validate::optional_text(patch.email);
        if let Some(email) = &patch.email {
            if let Some(existing) = self.repository.find_by_email(org, email)? {
                if existing.id != *id {
                    return Err(DomainError::conflict(format!(
                        "a student with email {email} already exists in this organization"
                    )));
                }
            }
        }

        Ok(self.repository.update(org, id, patch)?)
    }

    /// Deliberately unguarded: enrollments and castings referencing the student
    /// keep their rows.
    pub fn delete_student(&self, org: &OrganizationId, id: &StudentId) -> Result<bool, DomainError> {
        Ok(self.repository.delete(org, id)?)
    }

    pub fn get_student(
        &self,
        org: &OrganizationId,
        id: &StudentId,
    ) -> Result<Option<Student>, DomainError> {
        Ok(self.repository.find_by_id(org, id)?)
    }

    pub fn list_students(
        &self,
        org: &OrganizationId,
        filter: &StudentFilter,
        page: &PageRequest,
    ) -> Result<Page<Student>, DomainError> {
        Ok(self.repository.list(org, filter, page)?)
    }

    pub fn recent_students(
        &self,
        org: &OrganizationId,
        limit: usize,
    ) -> Result<Vec<Student>, DomainError> {
        Ok(self.repository.list_recent(org, limit)?)
    }

    /// Active students grouped by grade level; missing grades bucket under
    /// [`GRADE_NOT_SPECIFIED`].
    pub fn student_stats(&self, org: &OrganizationId) -> Result<StudentStats, DomainError> {
        let mut stats = StudentStats::default();
        for student in self.repository.list_active(org)? {
            let bucket = student
                .grade_level
                .unwrap_or_else(|| GRADE_NOT_SPECIFIED.to_string());
            *stats.by_grade_level.entry(bucket).or_default() += 1;
            stats.total_active += 1;
        }
        Ok(stats)
    }
}
