use std::sync::Arc;

use crate::staff::domain::{NewAssignment, NewStaffMember, ProductionRole, StaffMemberId};
use crate::staff::memory::{MemoryAssignmentRepository, MemoryStaffRepository};
use crate::staff::service::StaffService;
use crate::tenant::OrganizationId;

pub(super) fn org() -> OrganizationId {
    OrganizationId("org-riverside-players".to_string())
}

pub(super) type TestStaffService = StaffService<MemoryStaffRepository, MemoryAssignmentRepository>;

pub(super) fn build_service() -> (
    TestStaffService,
    Arc<MemoryStaffRepository>,
    Arc<MemoryAssignmentRepository>,
) {
    let staff = Arc::new(MemoryStaffRepository::new());
    let assignments = Arc::new(MemoryAssignmentRepository::new());
    (
        StaffService::new(staff.clone(), assignments.clone()),
        staff,
        assignments,
    )
}

pub(super) fn new_member(first_name: &str, last_name: &str, role: ProductionRole) -> NewStaffMember {
    NewStaffMember {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: None,
        phone: None,
        primary_role: role,
    }
}

pub(super) fn assignment_of(staff_member_id: &StaffMemberId, role: ProductionRole) -> NewAssignment {
    NewAssignment {
        staff_member_id: staff_member_id.clone(),
        role,
        notes: None,
    }
}
