use chrono::NaiveDate;

use super::common::*;
use crate::classes::domain::{ClassFilter, ClassPatch, NewClass};
use crate::error::ErrorKind;
use crate::repository::PageRequest;

#[test]
fn create_rejects_blank_name_and_inverted_age_range() {
    let (service, _classes, _enrollments) = build_service();

    let error = service
        .create_class(&org(), new_class("  "))
        .expect_err("blank name rejected");
    assert_eq!(error.kind(), ErrorKind::Validation);

    let error = service
        .create_class(
            &org(),
            NewClass {
                age_range_min: Some(10),
                age_range_max: Some(5),
                ..new_class("Junior Ensemble")
            },
        )
        .expect_err("inverted age range rejected");
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[test]
fn create_rejects_inverted_date_window() {
    let (service, _classes, _enrollments) = build_service();

    let error = service
        .create_class(
            &org(),
            NewClass {
                start_date: NaiveDate::from_ymd_opt(2026, 6, 1),
                end_date: NaiveDate::from_ymd_opt(2026, 5, 1),
                ..new_class("Summer Intensive")
            },
        )
        .expect_err("end before start rejected");
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[test]
fn update_compares_a_lone_bound_against_the_stored_other() {
    let (service, _classes, _enrollments) = build_service();

    let class = service
        .create_class(
            &org(),
            NewClass {
                age_range_max: Some(5),
                ..new_class("Junior Ensemble")
            },
        )
        .expect("class created");

    // Incoming minimum 10 vs stored maximum 5.
    let error = service
        .update_class(
            &org(),
            &class.id,
            ClassPatch {
                age_range_min: Some(10),
                ..ClassPatch::default()
            },
        )
        .expect_err("merged comparison rejects");
    assert_eq!(error.kind(), ErrorKind::Validation);

    let updated = service
        .update_class(
            &org(),
            &class.id,
            ClassPatch {
                age_range_min: Some(3),
                ..ClassPatch::default()
            },
        )
        .expect("valid bound accepted")
        .expect("class found");
    assert_eq!(updated.age_range_min, Some(3));
    assert_eq!(updated.age_range_max, Some(5));
}

#[test]
fn update_of_missing_id_returns_none() {
    let (service, _classes, _enrollments) = build_service();
    let outcome = service
        .update_class(
            &org(),
            &crate::classes::domain::ClassId("cls-999999".to_string()),
            ClassPatch::default(),
        )
        .expect("absence is not an error");
    assert!(outcome.is_none());
}

#[test]
fn delete_is_blocked_while_enrollments_are_active() {
    let (service, _classes, _enrollments) = build_service();

    let class = create_class(&service, "Junior Ensemble");
    service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000001"))
        .expect("enrolled");

    let error = service
        .delete_class(&org(), &class.id)
        .expect_err("active enrollment blocks deletion");
    assert_eq!(error.kind(), ErrorKind::Conflict);

    // Dropping the enrollment releases the guard.
    let enrollment = service
        .class_enrollments(&org(), &class.id)
        .expect("listed")
        .remove(0);
    service
        .unenroll_student(&org(), &enrollment.id)
        .expect("dropped");
    assert!(service.delete_class(&org(), &class.id).expect("deleted"));
}

#[test]
fn listings_stay_inside_the_tenant() {
    let (service, _classes, _enrollments) = build_service();

    let class = create_class(&service, "Junior Ensemble");

    assert!(service
        .get_class(&other_org(), &class.id)
        .expect("lookup succeeds")
        .is_none());

    let page = service
        .list_classes(&other_org(), &ClassFilter::default(), &PageRequest::first())
        .expect("listing succeeds");
    assert_eq!(page.total, 0);
}
