use std::sync::Arc;

use crate::students::domain::NewStudent;
use crate::students::memory::MemoryStudentRepository;
use crate::students::service::StudentService;
use crate::tenant::OrganizationId;

pub(super) fn org() -> OrganizationId {
    OrganizationId("org-riverside-players".to_string())
}

pub(super) fn other_org() -> OrganizationId {
    OrganizationId("org-harbor-stage".to_string())
}

pub(super) fn build_service() -> (
    StudentService<MemoryStudentRepository>,
    Arc<MemoryStudentRepository>,
) {
    let repository = Arc::new(MemoryStudentRepository::new());
    (StudentService::new(repository.clone()), repository)
}

pub(super) fn new_student(first_name: &str, last_name: &str) -> NewStudent {
    NewStudent {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        ..NewStudent::default()
    }
}

pub(super) fn new_student_with_email(first_name: &str, last_name: &str, email: &str) -> NewStudent {
    NewStudent {
        email: Some(email.to_string()),
        ..new_student(first_name, last_name)
    }
}
