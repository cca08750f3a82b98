use std::sync::Arc;

use crate::classes::domain::{Class, ClassId, NewClass, NewEnrollment};
use crate::classes::memory::{MemoryClassRepository, MemoryEnrollmentRepository};
use crate::classes::service::ClassService;
use crate::students::domain::StudentId;
use crate::sync::InvariantLocks;
use crate::tenant::OrganizationId;

pub(super) fn org() -> OrganizationId {
    OrganizationId("org-riverside-players".to_string())
}

pub(super) fn other_org() -> OrganizationId {
    OrganizationId("org-harbor-stage".to_string())
}

pub(super) type TestClassService = ClassService<MemoryClassRepository, MemoryEnrollmentRepository>;

pub(super) fn build_service() -> (
    TestClassService,
    Arc<MemoryClassRepository>,
    Arc<MemoryEnrollmentRepository>,
) {
    let classes = Arc::new(MemoryClassRepository::new());
    let enrollments = Arc::new(MemoryEnrollmentRepository::new());
    let service = ClassService::new(
        classes.clone(),
        enrollments.clone(),
        Arc::new(InvariantLocks::new()),
    );
    (service, classes, enrollments)
}

pub(super) fn new_class(name: &str) -> NewClass {
    NewClass {
        name: name.to_string(),
        ..NewClass::default()
    }
}

pub(super) fn capped_class(name: &str, max_students: u32) -> NewClass {
    NewClass {
        max_students: Some(max_students),
        ..new_class(name)
    }
}

pub(super) fn create_class(service: &TestClassService, name: &str) -> Class {
    service
        .create_class(&org(), new_class(name))
        .expect("class created")
}

pub(super) fn student(id: &str) -> StudentId {
    StudentId(id.to_string())
}

pub(super) fn enrollment_of(class_id: &ClassId, student_id: &str) -> NewEnrollment {
    NewEnrollment {
        class_id: class_id.clone(),
        student_id: student(student_id),
    }
}
