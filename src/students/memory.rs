use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::config::PaginationConfig;
use crate::repository::{Page, PageRequest, RepositoryError};
use crate::tenant::OrganizationId;

use super::domain::{NewStudent, Student, StudentFilter, StudentId, StudentPatch};
use super::repository::StudentRepository;

/// In-memory student store for tests and embedders running without a database.
#[derive(Debug, Default)]
pub struct MemoryStudentRepository {
    pagination: PaginationConfig,
    sequence: AtomicU64,
    records: Mutex<HashMap<StudentId, Student>>,
}

impl MemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pagination(pagination: PaginationConfig) -> Self {
        Self {
            pagination,
            ..Self::default()
        }
    }

    /// Insert a fully-formed record, bypassing id and timestamp assignment.
    pub fn seed(&self, student: Student) {
        self.guard().insert(student.id.clone(), student);
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<StudentId, Student>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> StudentId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        StudentId(format!("stu-{id:06}"))
    }

    fn matches(student: &Student, filter: &StudentFilter) -> bool {
        if let Some(is_active) = filter.is_active {
            if student.is_active != is_active {
                return false;
            }
        }
        if let Some(grade) = &filter.grade_level {
            if student.grade_level.as_deref() != Some(grade.as_str()) {
                return false;
            }
        }
        if let Some(search) = &filter.search {
            let needle = search.to_lowercase();
            let email_hit = student
                .email
                .as_deref()
                .is_some_and(|email| email.to_lowercase().contains(&needle));
            if !(student.first_name.to_lowercase().contains(&needle)
                || student.last_name.to_lowercase().contains(&needle)
                || email_hit)
            {
                return false;
            }
        }
        true
    }

    fn sorted(mut students: Vec<Student>) -> Vec<Student> {
        students.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.0.cmp(&b.id.0))
        });
        students
    }
}

impl StudentRepository for MemoryStudentRepository {
    fn find_by_id(
        &self,
        org: &OrganizationId,
        id: &StudentId,
    ) -> Result<Option<Student>, RepositoryError> {
        Ok(self
            .guard()
            .get(id)
            .filter(|student| student.organization_id == *org)
            .cloned())
    }

    fn list(
        &self,
        org: &OrganizationId,
        filter: &StudentFilter,
        page: &PageRequest,
    ) -> Result<Page<Student>, RepositoryError> {
        let students = Self::sorted(
            self.guard()
                .values()
                .filter(|student| student.organization_id == *org)
                .filter(|student| Self::matches(student, filter))
                .cloned()
                .collect(),
        );
        Ok(Page::paginate(students, page, &self.pagination))
    }

    fn list_active(&self, org: &OrganizationId) -> Result<Vec<Student>, RepositoryError> {
        Ok(Self::sorted(
            self.guard()
                .values()
                .filter(|student| student.organization_id == *org && student.is_active)
                .cloned()
                .collect(),
        ))
    }

    fn list_recent(
        &self,
        org: &OrganizationId,
        limit: usize,
    ) -> Result<Vec<Student>, RepositoryError> {
        let mut students = Self::sorted(
            self.guard()
                .values()
                .filter(|student| student.organization_id == *org)
                .cloned()
                .collect(),
        );
        students.reverse();
        students.truncate(limit);
        Ok(students)
    }

    fn create(&self, org: &OrganizationId, data: NewStudent) -> Result<Student, RepositoryError> {
        let now = Utc::now();
        let student = Student {
            id: self.next_id(),
            organization_id: org.clone(),
            first_name: data.first_name,
            last_name: data.last_name,
            email: data.email,
            phone: data.phone,
            date_of_birth: data.date_of_birth,
            grade_level: data.grade_level,
            emergency_contact_name: data.emergency_contact_name,
            emergency_contact_phone: data.emergency_contact_phone,
            medical_notes: data.medical_notes,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.guard().insert(student.id.clone(), student.clone());
        Ok(student)
    }

    fn update(
        &self,
        org: &OrganizationId,
        id: &StudentId,
        patch: StudentPatch,
    ) -> Result<Option<Student>, RepositoryError> {
        let mut records = self.guard();
        let Some(student) = records
            .get_mut(id)
            .filter(|student| student.organization_id == *org)
        else {
            return Ok(None);
        };

        if let Some(first_name) = patch.first_name {
            student.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            student.last_name = last_name;
        }
        if let Some(email) = patch.email {
            student.email = Some(email);
        }
        if let Some(phone) = patch.phone {
            student.phone = Some(phone);
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            student.date_of_birth = Some(date_of_birth);
        }
        if let Some(grade_level) = patch.grade_level {
            student.grade_level = Some(grade_level);
        }
        if let Some(name) = patch.emergency_contact_name {
            student.emergency_contact_name = Some(name);
        }
        if let Some(phone) = patch.emergency_contact_phone {
            student.emergency_contact_phone = Some(phone);
        }
        if let Some(notes) = patch.medical_notes {
            student.medical_notes = Some(notes);
        }
        if let Some(is_active) = patch.is_active {
            student.is_active = is_active;
        }
        student.updated_at = Utc::now();

        Ok(Some(student.clone()))
    }

    fn delete(&self, org: &OrganizationId, id: &StudentId) -> Result<bool, RepositoryError> {
        let mut records = self.guard();
        let owned = records
            .get(id)
            .is_some_and(|student| student.organization_id == *org);
        if owned {
            records.remove(id);
        }
        Ok(owned)
    }

    fn exists(&self, org: &OrganizationId, id: &StudentId) -> Result<bool, RepositoryError> {
        Ok(self
            .guard()
            .get(id)
            .is_some_and(|student| student.organization_id == *org))
    }

    fn find_by_email(
        &self,
        org: &OrganizationId,
        email: &str,
    ) -> Result<Option<Student>, RepositoryError> {
        Ok(self
            .guard()
            .values()
            .find(|student| {
                student.organization_id == *org
                    && student
                        .email
                        .as_deref()
                        .is_some_and(|stored| stored.eq_ignore_ascii_case(email))
            })
            .cloned())
    }
}
