use std::sync::Arc;

use crate::orgs::domain::{
    MemberRole, NewMember, NewOrganization, Organization, OrganizationMember, UserId,
};
use crate::orgs::memory::{MemoryMemberRepository, MemoryOrganizationRepository};
use crate::orgs::service::OrganizationService;
use crate::staff::domain::{NewStaffMember, ProductionRole, StaffMember};
use crate::staff::memory::MemoryStaffRepository;
use crate::staff::repository::StaffRepository;
use crate::sync::InvariantLocks;
use crate::tenant::OrganizationId;

pub(super) type TestOrganizationService = OrganizationService<
    MemoryOrganizationRepository,
    MemoryMemberRepository,
    MemoryStaffRepository,
>;

pub(super) struct Fixture {
    pub(super) service: TestOrganizationService,
    pub(super) members: Arc<MemoryMemberRepository>,
    pub(super) staff: Arc<MemoryStaffRepository>,
}

pub(super) fn fixture() -> Fixture {
    let members = Arc::new(MemoryMemberRepository::new());
    let organizations = Arc::new(MemoryOrganizationRepository::new(members.clone()));
    let staff = Arc::new(MemoryStaffRepository::new());
    let service = OrganizationService::new(
        organizations,
        members.clone(),
        staff.clone(),
        Arc::new(InvariantLocks::new()),
    );
    Fixture {
        service,
        members,
        staff,
    }
}

pub(super) fn user(id: &str) -> UserId {
    UserId(id.to_string())
}

pub(super) fn new_organization(name: &str, slug: &str) -> NewOrganization {
    NewOrganization {
        name: name.to_string(),
        slug: slug.to_string(),
        contact_email: None,
        contact_phone: None,
    }
}

pub(super) fn founded_org(fixture: &Fixture) -> (Organization, OrganizationMember) {
    fixture
        .service
        .create_organization(
            new_organization("Riverside Players", "riverside-players"),
            &user("usr-founder"),
        )
        .expect("organization created")
}

pub(super) fn add_member(
    fixture: &Fixture,
    org: &OrganizationId,
    user_id: &str,
    role: MemberRole,
) -> OrganizationMember {
    fixture
        .service
        .add_member(
            org,
            NewMember {
                user_id: user(user_id),
                role,
                invited_by: Some(user("usr-founder")),
            },
        )
        .expect("member added")
}

pub(super) fn create_staff(fixture: &Fixture, org: &OrganizationId, first_name: &str) -> StaffMember {
    fixture
        .staff
        .create(
            org,
            NewStaffMember {
                first_name: first_name.to_string(),
                last_name: "Okafor".to_string(),
                email: None,
                phone: None,
                primary_role: ProductionRole::StageManager,
            },
        )
        .expect("staff member created")
}
