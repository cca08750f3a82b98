use std::sync::Arc;

use crate::error::{BulkOutcome, DomainError};
use crate::repository::{Page, PageRequest};
use crate::students::domain::StudentId;
use crate::sync::{InvariantLocks, LockScope};
use crate::tenant::OrganizationId;
use crate::validate;

use super::domain::{
    Class, ClassEnrollment, ClassFilter, ClassId, ClassPatch, EnrollmentId, EnrollmentStatus,
    EnrollmentStatusUpdate, NewClass, NewEnrollment,
};
use super::repository::{ClassRepository, EnrollmentRepository};

/// Enforces age-range consistency, class capacity, enrollment uniqueness, and
/// deletion guards; owns the enrollment status lifecycle.
pub struct ClassService<C, E> {
    classes: Arc<C>,
    enrollments: Arc<E>,
    locks: Arc<InvariantLocks>,
}

impl<C, E> ClassService<C, E>
where
    C: ClassRepository,
    E: EnrollmentRepository,
{
    pub fn new(classes: Arc<C>, enrollments: Arc<E>, locks: Arc<InvariantLocks>) -> Self {
        Self {
            classes,
            enrollments,
            locks,
        }
    }

    pub fn create_class(&self, org: &OrganizationId, mut data: NewClass) -> Result<Class, DomainError> {
        data.name = validate::required_text("class name", &data.name)?;
        validate::ordered_range("age range", data.age_range_min, data.age_range_max)?;
        validate::ordered_dates("class", data.start_date, data.end_date)?;
        Ok(self.classes.create(org, data)?)
    }

    /// Returns `Ok(None)` when the id does not resolve within the tenant.
    /// Range and date checks run against the merged current+incoming values, so
    /// a patch supplying only one bound is compared against the stored other.
    pub fn update_class(
        &self,
        org: &OrganizationId,
        id: &ClassId,
        mut patch: ClassPatch,
    ) -> Result<Option<Class>, DomainError> {
        let Some(current) = self.classes.find_by_id(org, id)? else {
            return Ok(None);
        };

        if let Some(name) = patch.name.take() {
            patch.name = Some(validate::required_text("class name", &name)?);
        }
        validate::ordered_range(
            "age range",
            patch.age_range_min.or(current.age_range_min),
            patch.age_range_max.or(current.age_range_max),
        )?;
        validate::ordered_dates(
            "class",
            patch.start_date.or(current.start_date),
            patch.end_date.or(current.end_date),
        )?;

        Ok(self.classes.update(org, id, patch)?)
    }

    /// A class with active enrollments cannot be deleted.
    pub fn delete_class(&self, org: &OrganizationId, id: &ClassId) -> Result<bool, DomainError> {
        if !self.classes.exists(org, id)? {
            return Ok(false);
        }
        if self.enrollments.count_active_by_class(org, id)? > 0 {
            return Err(DomainError::conflict(
                "class has active enrollments and cannot be deleted",
            ));
        }
        Ok(self.classes.delete(org, id)?)
    }

    pub fn get_class(&self, org: &OrganizationId, id: &ClassId) -> Result<Option<Class>, DomainError> {
        Ok(self.classes.find_by_id(org, id)?)
    }

    pub fn list_classes(
        &self,
        org: &OrganizationId,
        filter: &ClassFilter,
        page: &PageRequest,
    ) -> Result<Page<Class>, DomainError> {
        Ok(self.classes.list(org, filter, page)?)
    }

    pub fn active_classes(&self, org: &OrganizationId) -> Result<Vec<Class>, DomainError> {
        Ok(self.classes.list_active(org)?)
    }

    pub fn recent_classes(
        &self,
        org: &OrganizationId,
        limit: usize,
    ) -> Result<Vec<Class>, DomainError> {
        Ok(self.classes.list_recent(org, limit)?)
    }

    /// Enroll a student, holding the class's capacity lock across the
    /// uniqueness check, the capacity check, and the insert.
    pub fn enroll_student(
        &self,
        org: &OrganizationId,
        data: NewEnrollment,
    ) -> Result<ClassEnrollment, DomainError> {
        let class = self
            .classes
            .find_by_id(org, &data.class_id)?
            .ok_or_else(|| DomainError::not_found("class", &data.class_id))?;

        let slot = self
            .locks
            .slot(org, LockScope::ClassCapacity(data.class_id.0.clone()));
        let _guard = slot.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        if self
            .enrollments
            .find_active(org, &data.class_id, &data.student_id)?
            .is_some()
        {
            return Err(DomainError::conflict(
                "student already has an active enrollment in this class",
            ));
        }

        // Capacity is checked at enrollment time only; lowering the cap later
        // never invalidates existing enrollments.
        if let Some(cap) = class.max_students {
            let active = self.enrollments.count_active_by_class(org, &data.class_id)?;
            if active >= cap as usize {
                return Err(DomainError::conflict(format!(
                    "class {} is at capacity ({cap} students)",
                    class.name
                )));
            }
        }

        Ok(self.enrollments.create(org, data)?)
    }

    /// Soft state change to `Dropped`; calling it again on a settled
    /// enrollment is a no-op.
    pub fn unenroll_student(
        &self,
        org: &OrganizationId,
        id: &EnrollmentId,
    ) -> Result<ClassEnrollment, DomainError> {
        let enrollment = self
            .enrollments
            .find_by_id(org, id)?
            .ok_or_else(|| DomainError::not_found("enrollment", id))?;

        if enrollment.status.is_terminal() {
            return Ok(enrollment);
        }

        self.enrollments
            .update_status(org, id, EnrollmentStatus::Dropped)?
            .ok_or_else(|| DomainError::not_found("enrollment", id))
    }

    /// `Completed` and `Dropped` are terminal; everything else may move freely.
    pub fn update_enrollment_status(
        &self,
        org: &OrganizationId,
        id: &EnrollmentId,
        status: EnrollmentStatus,
    ) -> Result<ClassEnrollment, DomainError> {
        let enrollment = self
            .enrollments
            .find_by_id(org, id)?
            .ok_or_else(|| DomainError::not_found("enrollment", id))?;

        if enrollment.status == status {
            return Ok(enrollment);
        }
        if enrollment.status.is_terminal() {
            return Err(DomainError::conflict(format!(
                "enrollment is already {} and cannot change status",
                enrollment.status.label()
            )));
        }

        self.enrollments
            .update_status(org, id, status)?
            .ok_or_else(|| DomainError::not_found("enrollment", id))
    }

    /// Best-effort: every input is attempted; failures are logged, skipped, and
    /// reported back per item.
    pub fn bulk_enroll_students(
        &self,
        org: &OrganizationId,
        inputs: Vec<NewEnrollment>,
    ) -> Vec<BulkOutcome<NewEnrollment, ClassEnrollment>> {
        inputs
            .into_iter()
            .map(|input| {
                let outcome = self.enroll_student(org, input.clone());
                if let Err(error) = &outcome {
                    tracing::warn!(
                        class = %input.class_id,
                        student = %input.student_id,
                        error = %error,
                        "skipping enrollment in bulk operation"
                    );
                }
                BulkOutcome {
                    input,
                    outcome: outcome.map_err(Into::into),
                }
            })
            .collect()
    }

    /// Best-effort counterpart of [`Self::update_enrollment_status`].
    pub fn bulk_update_enrollments(
        &self,
        org: &OrganizationId,
        updates: Vec<EnrollmentStatusUpdate>,
    ) -> Vec<BulkOutcome<EnrollmentStatusUpdate, ClassEnrollment>> {
        updates
            .into_iter()
            .map(|update| {
                let outcome =
                    self.update_enrollment_status(org, &update.enrollment_id, update.status);
                if let Err(error) = &outcome {
                    tracing::warn!(
                        enrollment = %update.enrollment_id,
                        error = %error,
                        "skipping enrollment update in bulk operation"
                    );
                }
                BulkOutcome {
                    input: update,
                    outcome: outcome.map_err(Into::into),
                }
            })
            .collect()
    }

    pub fn class_enrollments(
        &self,
        org: &OrganizationId,
        class_id: &ClassId,
    ) -> Result<Vec<ClassEnrollment>, DomainError> {
        Ok(self.enrollments.list_by_class(org, class_id)?)
    }

    pub fn student_enrollments(
        &self,
        org: &OrganizationId,
        student_id: &StudentId,
    ) -> Result<Vec<ClassEnrollment>, DomainError> {
        Ok(self.enrollments.list_by_student(org, student_id)?)
    }

    /// Sum of active-enrollment counts across the tenant's active classes.
    pub fn total_enrollments(&self, org: &OrganizationId) -> Result<usize, DomainError> {
        let mut total = 0;
        for class in self.classes.list_active(org)? {
            total += self.enrollments.count_active_by_class(org, &class.id)?;
        }
        Ok(total)
    }
}
