use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::classes::domain::{Class, ClassId};
use crate::classes::memory::{MemoryClassRepository, MemoryEnrollmentRepository};
use crate::classes::service::ClassService;
use crate::config::DashboardConfig;
use crate::dashboard::service::DashboardUseCase;
use crate::shows::domain::{Show, ShowId, ShowStatus};
use crate::shows::memory::{MemoryCastingRepository, MemoryRoleRepository, MemoryShowRepository};
use crate::shows::service::ShowService;
use crate::students::domain::{Student, StudentId};
use crate::students::memory::MemoryStudentRepository;
use crate::students::service::StudentService;
use crate::sync::InvariantLocks;
use crate::tenant::OrganizationId;

pub(super) fn org() -> OrganizationId {
    OrganizationId("org-riverside-players".to_string())
}

pub(super) fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap()
}

pub(super) type TestDashboard = DashboardUseCase<
    MemoryStudentRepository,
    MemoryClassRepository,
    MemoryEnrollmentRepository,
    MemoryShowRepository,
    MemoryRoleRepository,
    MemoryCastingRepository,
>;

pub(super) struct Fixture {
    pub(super) dashboard: TestDashboard,
    pub(super) students: Arc<MemoryStudentRepository>,
    pub(super) classes: Arc<MemoryClassRepository>,
    pub(super) shows: Arc<MemoryShowRepository>,
}

pub(super) fn fixture(config: DashboardConfig) -> Fixture {
    let students = Arc::new(MemoryStudentRepository::new());
    let classes = Arc::new(MemoryClassRepository::new());
    let enrollments = Arc::new(MemoryEnrollmentRepository::new());
    let shows = Arc::new(MemoryShowRepository::new());
    let roles = Arc::new(MemoryRoleRepository::new());
    let castings = Arc::new(MemoryCastingRepository::new());
    let locks = Arc::new(InvariantLocks::new());

    let dashboard = DashboardUseCase::new(
        Arc::new(StudentService::new(students.clone())),
        Arc::new(ClassService::new(
            classes.clone(),
            enrollments.clone(),
            locks.clone(),
        )),
        Arc::new(ShowService::new(
            shows.clone(),
            roles,
            castings,
            locks,
        )),
        config,
    );

    Fixture {
        dashboard,
        students,
        classes,
        shows,
    }
}

pub(super) fn seeded_student(id: &str, name: &str, created_at: DateTime<Utc>) -> Student {
    Student {
        id: StudentId(id.to_string()),
        organization_id: org(),
        first_name: name.to_string(),
        last_name: "Tester".to_string(),
        email: None,
        phone: None,
        date_of_birth: None,
        grade_level: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        medical_notes: None,
        is_active: true,
        created_at,
        updated_at: created_at,
    }
}

pub(super) fn seeded_class(id: &str, name: &str, created_at: DateTime<Utc>) -> Class {
    Class {
        id: ClassId(id.to_string()),
        organization_id: org(),
        name: name.to_string(),
        description: None,
        teacher_id: None,
        max_students: None,
        age_range_min: None,
        age_range_max: None,
        schedule: None,
        start_date: None,
        end_date: None,
        is_active: true,
        created_at,
        updated_at: created_at,
    }
}

pub(super) fn seeded_show(id: &str, title: &str, created_at: DateTime<Utc>) -> Show {
    Show {
        id: ShowId(id.to_string()),
        organization_id: org(),
        title: title.to_string(),
        description: None,
        director_id: None,
        start_date: None,
        end_date: None,
        venue: None,
        budget: None,
        status: ShowStatus::Planning,
        is_active: true,
        created_at,
        updated_at: created_at,
    }
}
