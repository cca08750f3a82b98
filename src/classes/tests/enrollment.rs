use super::common::*;
use crate::classes::domain::{EnrollmentStatus, EnrollmentStatusUpdate};
use crate::classes::repository::{ClassRepository, EnrollmentRepository};
use crate::error::ErrorKind;

#[test]
fn enrolling_in_a_missing_class_is_not_found() {
    let (service, _classes, _enrollments) = build_service();
    let ghost = crate::classes::domain::ClassId("cls-999999".to_string());

    let error = service
        .enroll_student(&org(), enrollment_of(&ghost, "stu-000001"))
        .expect_err("class must exist in the tenant");
    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[test]
fn a_second_active_enrollment_for_the_pair_conflicts() {
    let (service, _classes, _enrollments) = build_service();
    let class = create_class(&service, "Junior Ensemble");

    service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000001"))
        .expect("first enrollment");

    let error = service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000001"))
        .expect_err("duplicate active enrollment rejected");
    assert_eq!(error.kind(), ErrorKind::Conflict);
}

#[test]
fn re_enrollment_after_drop_creates_a_new_row() {
    let (service, _classes, _enrollments) = build_service();
    let class = create_class(&service, "Junior Ensemble");

    let first = service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000001"))
        .expect("first enrollment");
    service
        .unenroll_student(&org(), &first.id)
        .expect("dropped");

    let second = service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000001"))
        .expect("re-enrollment allowed after drop");
    assert_ne!(first.id, second.id);
    assert_eq!(second.status, EnrollmentStatus::Active);
}

#[test]
fn capacity_is_enforced_at_enrollment_time() {
    let (service, _classes, _enrollments) = build_service();
    let class = service
        .create_class(&org(), capped_class("Junior Ensemble", 2))
        .expect("class created");

    service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000001"))
        .expect("first seat");
    service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000002"))
        .expect("second seat");

    let error = service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000003"))
        .expect_err("class is full");
    assert_eq!(error.kind(), ErrorKind::Conflict);
}

#[test]
fn lowering_the_cap_is_not_retroactive() {
    let (service, _classes, _enrollments) = build_service();
    let class = service
        .create_class(&org(), capped_class("Junior Ensemble", 2))
        .expect("class created");

    service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000001"))
        .expect("first seat");
    service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000002"))
        .expect("second seat");

    service
        .update_class(
            &org(),
            &class.id,
            crate::classes::domain::ClassPatch {
                max_students: Some(1),
                ..crate::classes::domain::ClassPatch::default()
            },
        )
        .expect("cap lowered")
        .expect("class found");

    // Existing enrollments stay active; only new ones are rejected.
    let enrollments = service
        .class_enrollments(&org(), &class.id)
        .expect("listed");
    assert!(enrollments
        .iter()
        .all(|enrollment| enrollment.status == EnrollmentStatus::Active));
    let error = service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000003"))
        .expect_err("new enrollment over the lowered cap");
    assert_eq!(error.kind(), ErrorKind::Conflict);
}

#[test]
fn unenroll_is_idempotent() {
    let (service, _classes, _enrollments) = build_service();
    let class = create_class(&service, "Junior Ensemble");
    let enrollment = service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000001"))
        .expect("enrolled");

    let dropped = service
        .unenroll_student(&org(), &enrollment.id)
        .expect("first drop");
    assert_eq!(dropped.status, EnrollmentStatus::Dropped);

    let again = service
        .unenroll_student(&org(), &enrollment.id)
        .expect("second drop is a no-op");
    assert_eq!(again.status, EnrollmentStatus::Dropped);
}

#[test]
fn settled_enrollments_reject_further_transitions() {
    let (service, _classes, _enrollments) = build_service();
    let class = create_class(&service, "Junior Ensemble");
    let enrollment = service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000001"))
        .expect("enrolled");

    service
        .update_enrollment_status(&org(), &enrollment.id, EnrollmentStatus::Completed)
        .expect("completion allowed from active");

    let error = service
        .update_enrollment_status(&org(), &enrollment.id, EnrollmentStatus::Active)
        .expect_err("completed is terminal");
    assert_eq!(error.kind(), ErrorKind::Conflict);

    // Re-asserting the current status stays a no-op.
    let unchanged = service
        .update_enrollment_status(&org(), &enrollment.id, EnrollmentStatus::Completed)
        .expect("same-status update is a no-op");
    assert_eq!(unchanged.status, EnrollmentStatus::Completed);
}

#[test]
fn bulk_enroll_reports_every_outcome() {
    let (service, _classes, _enrollments) = build_service();
    let class = service
        .create_class(&org(), capped_class("Junior Ensemble", 2))
        .expect("class created");

    let outcomes = service.bulk_enroll_students(
        &org(),
        vec![
            enrollment_of(&class.id, "stu-000001"),
            enrollment_of(&class.id, "stu-000001"), // duplicate
            enrollment_of(&class.id, "stu-000002"),
            enrollment_of(&class.id, "stu-000003"), // over capacity
        ],
    );

    assert_eq!(outcomes.len(), 4);
    assert!(outcomes[0].is_success());
    assert!(outcomes[2].is_success());

    let duplicate = outcomes[1].outcome.as_ref().expect_err("duplicate skipped");
    assert_eq!(duplicate.kind, ErrorKind::Conflict);
    let over_cap = outcomes[3].outcome.as_ref().expect_err("capacity skipped");
    assert_eq!(over_cap.kind, ErrorKind::Conflict);

    // Later items saw the state accumulated by earlier ones.
    assert_eq!(
        service
            .class_enrollments(&org(), &class.id)
            .expect("listed")
            .len(),
        2
    );
}

#[test]
fn bulk_update_skips_missing_ids_but_applies_the_rest() {
    let (service, _classes, _enrollments) = build_service();
    let class = create_class(&service, "Junior Ensemble");
    let enrollment = service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000001"))
        .expect("enrolled");

    let outcomes = service.bulk_update_enrollments(
        &org(),
        vec![
            EnrollmentStatusUpdate {
                enrollment_id: enrollment.id.clone(),
                status: EnrollmentStatus::Inactive,
            },
            EnrollmentStatusUpdate {
                enrollment_id: crate::classes::domain::EnrollmentId("enr-999999".to_string()),
                status: EnrollmentStatus::Dropped,
            },
        ],
    );

    assert!(outcomes[0].is_success());
    let missing = outcomes[1].outcome.as_ref().expect_err("missing skipped");
    assert_eq!(missing.kind, ErrorKind::NotFound);
}

#[test]
fn repository_probes_track_the_active_pair() {
    let (service, classes, enrollments) = build_service();
    let class = create_class(&service, "Junior Ensemble");

    assert!(!enrollments
        .is_enrolled(&org(), &class.id, &student("stu-000001"))
        .expect("probe succeeds"));

    let enrollment = service
        .enroll_student(&org(), enrollment_of(&class.id, "stu-000001"))
        .expect("enrolled");
    assert!(enrollments
        .is_enrolled(&org(), &class.id, &student("stu-000001"))
        .expect("probe succeeds"));

    service
        .unenroll_student(&org(), &enrollment.id)
        .expect("dropped");
    assert!(!enrollments
        .is_enrolled(&org(), &class.id, &student("stu-000001"))
        .expect("dropped pair is no longer enrolled"));

    // Teacher finder round-trips the assignment made on create.
    let teacher = crate::staff::domain::StaffMemberId("stf-000001".to_string());
    service
        .create_class(
            &org(),
            crate::classes::domain::NewClass {
                teacher_id: Some(teacher.clone()),
                ..new_class("Voice Lab")
            },
        )
        .expect("class created");
    let taught = classes
        .find_by_teacher(&org(), &teacher)
        .expect("finder succeeds");
    assert_eq!(taught.len(), 1);
    assert_eq!(taught[0].name, "Voice Lab");
}

#[test]
fn total_enrollments_sums_active_classes_only() {
    let (service, _classes, _enrollments) = build_service();

    let drama = create_class(&service, "Drama Basics");
    let voice = create_class(&service, "Voice Lab");
    service
        .enroll_student(&org(), enrollment_of(&drama.id, "stu-000001"))
        .expect("enrolled");
    service
        .enroll_student(&org(), enrollment_of(&drama.id, "stu-000002"))
        .expect("enrolled");
    service
        .enroll_student(&org(), enrollment_of(&voice.id, "stu-000001"))
        .expect("enrolled");

    assert_eq!(service.total_enrollments(&org()).expect("summed"), 3);

    // Deactivating a class removes its seats from the total.
    service
        .update_class(
            &org(),
            &voice.id,
            crate::classes::domain::ClassPatch {
                is_active: Some(false),
                ..crate::classes::domain::ClassPatch::default()
            },
        )
        .expect("deactivated")
        .expect("class found");
    assert_eq!(service.total_enrollments(&org()).expect("summed"), 2);
}
