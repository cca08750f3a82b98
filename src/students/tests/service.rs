use std::sync::Arc;

use super::common::*;
use crate::config::PaginationConfig;
use crate::error::{DomainError, ErrorKind};
use crate::repository::PageRequest;
use crate::students::domain::{StudentFilter, StudentId, StudentPatch, GRADE_NOT_SPECIFIED};
use crate::students::memory::MemoryStudentRepository;
use crate::students::repository::StudentRepository;
use crate::students::service::StudentService;

#[test]
fn create_rejects_blank_names() {
    let (service, _repository) = build_service();

    let error = service
        .create_student(&org(), new_student("   ", "Moreau"))
        .expect_err("blank first name rejected");
    assert_eq!(error.kind(), ErrorKind::Validation);

    let error = service
        .create_student(&org(), new_student("Nadia", ""))
        .expect_err("blank last name rejected");
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[test]
fn create_trims_names_and_blank_email_becomes_none() {
    let (service, _repository) = build_service();

    let student = service
        .create_student(
            &org(),
            crate::students::domain::NewStudent {
                email: Some("   ".to_string()),
                ..new_student("  Nadia ", " Moreau ")
            },
        )
        .expect("student created");

    assert_eq!(student.first_name, "Nadia");
    assert_eq!(student.last_name, "Moreau");
    assert_eq!(student.email, None);
    assert!(student.is_active);
}

#[test]
fn duplicate_email_conflicts_within_the_tenant_only() {
    let (service, _repository) = build_service();

    service
        .create_student(&org(), new_student_with_email("Nadia", "Moreau", "nadia@example.org"))
        .expect("first student created");

    let error = service
        .create_student(&org(), new_student_with_email("Noor", "Haddad", "Nadia@Example.org"))
        .expect_err("duplicate email rejected case-insensitively");
    assert_eq!(error.kind(), ErrorKind::Conflict);

    // The same address is free in a different organization.
    service
        .create_student(
            &other_org(),
            new_student_with_email("Noor", "Haddad", "nadia@example.org"),
        )
        .expect("email is only unique per tenant");
}

#[test]
fn update_excludes_self_from_the_email_check() {
    let (service, _repository) = build_service();

    let student = service
        .create_student(&org(), new_student_with_email("Nadia", "Moreau", "nadia@example.org"))
        .expect("student created");
    let rival = service
        .create_student(&org(), new_student_with_email("Noor", "Haddad", "noor@example.org"))
        .expect("second student created");

    // Re-asserting your own address is fine.
    let updated = service
        .update_student(
            &org(),
            &student.id,
            StudentPatch {
                email: Some("nadia@example.org".to_string()),
                ..StudentPatch::default()
            },
        )
        .expect("update succeeds")
        .expect("student found");
    assert_eq!(updated.email.as_deref(), Some("nadia@example.org"));

    // Claiming another student's address is not.
    let error = service
        .update_student(
            &org(),
            &rival.id,
            StudentPatch {
                email: Some("nadia@example.org".to_string()),
                ..StudentPatch::default()
            },
        )
        .expect_err("email already taken");
    assert_eq!(error.kind(), ErrorKind::Conflict);
}

#[test]
fn update_of_missing_id_returns_none_not_an_error() {
    let (service, _repository) = build_service();

    let outcome = service
        .update_student(
            &org(),
            &StudentId("stu-999999".to_string()),
            StudentPatch::default(),
        )
        .expect("absence is not an error");
    assert!(outcome.is_none());
}

#[test]
fn reads_never_cross_the_tenant_boundary() {
    let (service, _repository) = build_service();

    let student = service
        .create_student(&org(), new_student("Nadia", "Moreau"))
        .expect("student created");

    let leaked = service
        .get_student(&other_org(), &student.id)
        .expect("lookup succeeds");
    assert!(leaked.is_none(), "a valid id from another tenant is not found");

    let listed = service
        .list_students(&other_org(), &StudentFilter::default(), &PageRequest::first())
        .expect("listing succeeds");
    assert_eq!(listed.total, 0);
}

#[test]
fn delete_is_unguarded_and_reports_absence() {
    let (service, _repository) = build_service();

    let student = service
        .create_student(&org(), new_student("Nadia", "Moreau"))
        .expect("student created");

    assert!(service.delete_student(&org(), &student.id).expect("deleted"));
    assert!(!service
        .delete_student(&org(), &student.id)
        .expect("second delete reports absence"));
}

#[test]
fn stats_bucket_missing_grades_under_not_specified() {
    let (service, _repository) = build_service();

    for (first, grade) in [
        ("Nadia", Some("7")),
        ("Noor", Some("7")),
        ("Ira", Some("8")),
        ("Sam", None),
    ] {
        service
            .create_student(
                &org(),
                crate::students::domain::NewStudent {
                    grade_level: grade.map(str::to_string),
                    ..new_student(first, "Tester")
                },
            )
            .expect("student created");
    }

    // Deactivated students fall out of the stats.
    let retired = service
        .create_student(&org(), new_student("Quinn", "Tester"))
        .expect("student created");
    service
        .update_student(
            &org(),
            &retired.id,
            StudentPatch {
                is_active: Some(false),
                ..StudentPatch::default()
            },
        )
        .expect("deactivated")
        .expect("student found");

    let stats = service.student_stats(&org()).expect("stats computed");
    assert_eq!(stats.total_active, 4);
    assert_eq!(stats.by_grade_level.get("7"), Some(&2));
    assert_eq!(stats.by_grade_level.get("8"), Some(&1));
    assert_eq!(stats.by_grade_level.get(GRADE_NOT_SPECIFIED), Some(&1));
}

#[test]
fn search_matches_names_and_email_case_insensitively() {
    let (service, _repository) = build_service();

    service
        .create_student(&org(), new_student_with_email("Nadia", "Moreau", "nadia@example.org"))
        .expect("student created");
    service
        .create_student(&org(), new_student("Noor", "Haddad"))
        .expect("student created");

    let page = service
        .list_students(
            &org(),
            &StudentFilter {
                search: Some("MOREAU".to_string()),
                ..StudentFilter::default()
            },
            &PageRequest::first(),
        )
        .expect("search succeeds");
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].last_name, "Moreau");
}

#[test]
fn configured_pagination_caps_the_page_size() {
    let repository = Arc::new(MemoryStudentRepository::with_pagination(PaginationConfig {
        default_limit: 2,
        max_limit: 2,
    }));
    let service = StudentService::new(repository.clone());

    for first in ["Nadia", "Noor", "Ira"] {
        service
            .create_student(&org(), new_student(first, "Tester"))
            .expect("student created");
    }

    let page = service
        .list_students(&org(), &StudentFilter::default(), &PageRequest::first())
        .expect("listing succeeds");
    assert_eq!(page.limit, 2);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);

    let someone = &page.data[0].id;
    assert!(repository.exists(&org(), someone).expect("probe succeeds"));
    assert!(!repository
        .exists(&other_org(), someone)
        .expect("probe is tenant-scoped"));
}

#[test]
fn repository_failures_surface_with_their_kind() {
    let (service, _repository) = build_service();
    // A conflict raised by the service itself keeps its own kind.
    service
        .create_student(&org(), new_student_with_email("Nadia", "Moreau", "n@example.org"))
        .expect("student created");
    let error = service
        .create_student(&org(), new_student_with_email("Copy", "Cat", "n@example.org"))
        .expect_err("conflict");
    assert!(matches!(error, DomainError::Conflict(_)));
}
