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
    Class, ClassEnrollment, ClassFilter, ClassId, ClassPatch, EnrollmentId, EnrollmentStatus,
    NewClass, NewEnrollment,
};
use super::repository::{ClassRepository, EnrollmentRepository};

/// In-memory class store for tests and embedders running without a database.
#[derive(Debug, Default)]
pub struct MemoryClassRepository {
    pagination: PaginationConfig,
    sequence: AtomicU64,
    records: Mutex<HashMap<ClassId, Class>>,
}

impl MemoryClassRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed record, bypassing id and timestamp assignment.
    pub fn seed(&self, class: Class) {
        self.guard().insert(class.id.clone(), class);
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<ClassId, Class>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> ClassId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        ClassId(format!("cls-{id:06}"))
    }

    fn matches(class: &Class, filter: &ClassFilter) -> bool {
        if let Some(is_active) = filter.is_active {
            if class.is_active != is_active {
                return false;
            }
        }
        if let Some(teacher_id) = &filter.teacher_id {
            if class.teacher_id.as_ref() != Some(teacher_id) {
                return false;
            }
        }
        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            let description_hit = class
                .description
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(&needle));
            if !(class.name.to_lowercase().contains(&needle) || description_hit) {
                return false;
            }
        }
        true
    }

    fn sorted(mut classes: Vec<Class>) -> Vec<Class> {
        classes.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        classes
    }
}

impl ClassRepository for MemoryClassRepository {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &ClassId,
    ) -> Result<Option<Class>, RepositoryError> {
        Ok(self
            .guard()
            .get(id)
            .filter(|class| class.organization_id == *org)
            .cloned())
    }

    fn list(
        &self,
        org: &OrganizationId,
        filter: &ClassFilter,
        page: &PageRequest,
    ) -> Result<Page<Class>, RepositoryError> {
        let classes = Self::sorted(
            self.guard()
                .values()
                .filter(|class| class.organization_id == *org)
                .filter(|class| Self::matches(class, filter))
                .cloned()
                .collect(),
        );
        Ok(Page::paginate(classes, page, &self.pagination))
    }

    fn list_active(&self, org: &OrganizationId) -> Result<Vec<Class>, RepositoryError> {
        Ok(Self::sorted(
            self.guard()
                .values()
                .filter(|class| class.organization_id == *org && class.is_active)
                .cloned()
                .collect(),
        ))
    }

    fn list_recent(
        &self,
        org: &OrganizationId,
        limit: usize,
    ) -> Result<Vec<Class>, RepositoryError> {
        let mut classes = Self::sorted(
            self.guard()
                .values()
                .filter(|class| class.organization_id == *org)
                .cloned()
                .collect(),
        );
        classes.reverse();
        classes.truncate(limit);
        Ok(classes)
    }

    fn find_by_teacher(
        &self,
        org: &OrganizationId,
        teacher_id: &StaffMemberId,
    ) -> Result<Vec<Class>, RepositoryError> {
        Ok(Self::sorted(
            self.guard()
                .values()
                .filter(|class| {
                    class.organization_id == *org && class.teacher_id.as_ref() == Some(teacher_id)
                })
                .cloned()
                .collect(),
        ))
    }

    fn create(&self, org: &OrganizationId, data: NewClass) -> Result<Class, RepositoryError> {
        let now = Utc::now();
        let class = Class {
            id: self.next_id(),
            organization_id: org.clone(),
            name: data.name,
            description: data.description,
            teacher_id: data.teacher_id,
            max_students: data.max_students,
            age_range_min: data.age_range_min,
            age_range_max: data.age_range_max,
            schedule: data.schedule,
            start_date: data.start_date,
            end_date: data.end_date,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.guard().insert(class.id.clone(), class.clone());
        Ok(class)
    }

    fn update(
        &self,
        org: &OrganizationId,
        id: &ClassId,
        patch: ClassPatch,
    ) -> Result<Option<Class>, RepositoryError> {
        let mut records = self.guard();
        let Some(class) = records
            .get_mut(id)
            .filter(|class| class.organization_id == *org)
        else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            class.name = name;
        }
        if let Some(description) = patch.description {
            class.description = Some(description);
        }
        if let Some(teacher_id) = patch.teacher_id {
            class.teacher_id = Some(teacher_id);
        }
        if let Some(max_students) = patch.max_students {
            class.max_students = Some(max_students);
        }
        if let Some(age_range_min) = patch.age_range_min {
            class.age_range_min = Some(age_range_min);
        }
        if let Some(age_range_max) = patch.age_range_max {
            class.age_range_max = Some(age_range_max);
        }
        if let Some(schedule) = patch.schedule {
            class.schedule = Some(schedule);
        }
        if let Some(start_date) = patch.start_date {
            class.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            class.end_date = Some(end_date);
        }
        if let Some(is_active) = patch.is_active {
            class.is_active = is_active;
        }
        class.updated_at = Utc::now();

        Ok(Some(class.clone()))
    }

    fn delete(&self, org: &OrganizationId, id: &ClassId) -> Result<bool, RepositoryError> {
        let mut records = self.guard();
        let owned = records
            .get(id)
            .is_some_and(|class| class.organization_id == *org);
        if owned {
            records.remove(id);
        }
        Ok(owned)
    }

    fn exists(&self, org: &OrganizationId, id: &ClassId) -> Result<bool, RepositoryError> {
        Ok(self
            .guard()
            .get(id)
            .is_some_and(|class| class.organization_id == *org))
    }
}

/// In-memory enrollment store.
#[derive(Debug, Default)]
pub struct MemoryEnrollmentRepository {
    sequence: AtomicU64,
    records: Mutex<HashMap<EnrollmentId, ClassEnrollment>>,
}

impl MemoryEnrollmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed record, bypassing id and timestamp assignment.
    pub fn seed(&self, enrollment: ClassEnrollment) {
        self.guard().insert(enrollment.id.clone(), enrollment);
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<EnrollmentId, ClassEnrollment>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> EnrollmentId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        EnrollmentId(format!("enr-{id:06}"))
    }

    fn sorted(mut enrollments: Vec<ClassEnrollment>) -> Vec<ClassEnrollment> {
        enrollments.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        enrollments
    }
}

impl EnrollmentRepository for MemoryEnrollmentRepository {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &EnrollmentId,
    ) -> Result<Option<ClassEnrollment>, RepositoryError> {
        Ok(self
            .guard()
            .get(id)
            .filter(|enrollment| enrollment.organization_id == *org)
            .cloned())
    }

    fn create(
        &self,
        org: &OrganizationId,
        data: NewEnrollment,
    ) -> Result<ClassEnrollment, RepositoryError> {
        let now = Utc::now();
        let enrollment = ClassEnrollment {
            id: self.next_id(),
            organization_id: org.clone(),
            class_id: data.class_id,
            student_id: data.student_id,
            status: EnrollmentStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.guard()
            .insert(enrollment.id.clone(), enrollment.clone());
        Ok(enrollment)
    }

    fn update_status(
        &self,
        org: &OrganizationId,
        id: &EnrollmentId,
        status: EnrollmentStatus,
    ) -> Result<Option<ClassEnrollment>, RepositoryError> {
        let mut records = self.guard();
        let Some(enrollment) = records
            .get_mut(id)
            .filter(|enrollment| enrollment.organization_id == *org)
        else {
            return Ok(None);
        };
        enrollment.status = status;
        enrollment.updated_at = Utc::now();
        Ok(Some(enrollment.clone()))
    }

    fn list_by_class(
        &self,
        org: &OrganizationId,
        class_id: &ClassId,
    ) -> Result<Vec<ClassEnrollment>, RepositoryError> {
        Ok(Self::sorted(
            self.guard()
                .values()
                .filter(|enrollment| {
                    enrollment.organization_id == *org && enrollment.class_id == *class_id
                })
                .cloned()
                .collect(),
        ))
    }

    fn list_by_student(
        &self,
        org: &OrganizationId,
        student_id: &StudentId,
    ) -> Result<Vec<ClassEnrollment>, RepositoryError> {
        Ok(Self::sorted(
            self.guard()
                .values()
                .filter(|enrollment| {
                    enrollment.organization_id == *org && enrollment.student_id == *student_id
                })
                .cloned()
                .collect(),
        ))
    }

    fn find_active(
        &self,
        org: &OrganizationId,
        class_id: &ClassId,
        student_id: &StudentId,
    ) -> Result<Option<ClassEnrollment>, RepositoryError> {
        Ok(self
            .guard()
            .values()
            .find(|enrollment| {
                enrollment.organization_id == *org
                    && enrollment.class_id == *class_id
                    && enrollment.student_id == *student_id
                    && enrollment.status == EnrollmentStatus::Active
            })
            .cloned())
    }

    fn count_active_by_class(
        &self,
        org: &OrganizationId,
        class_id: &ClassId,
    ) -> Result<usize, RepositoryError> {
        Ok(self
            .guard()
            .values()
            .filter(|enrollment| {
                enrollment.organization_id == *org
                    && enrollment.class_id == *class_id
                    && enrollment.status == EnrollmentStatus::Active
            })
            .count())
    }

    fn is_enrolled(
        &self,
        org: &OrganizationId,
        class_id: &ClassId,
        student_id: &StudentId,
    ) -> Result<bool, RepositoryError> {
        Ok(self
            .find_active(org, class_id, student_id)?
            .is_some())
    }
}
