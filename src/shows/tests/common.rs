use std::sync::Arc;

use crate::shows::domain::{NewCasting, NewRole, NewShow, RoleId, Show, ShowId, ShowRole};
use crate::shows::memory::{MemoryCastingRepository, MemoryRoleRepository, MemoryShowRepository};
use crate::shows::service::ShowService;
use crate::students::domain::StudentId;
use crate::sync::InvariantLocks;
use crate::tenant::OrganizationId;

pub(super) fn org() -> OrganizationId {
    OrganizationId("org-riverside-players".to_string())
}

pub(super) fn other_org() -> OrganizationId {
    OrganizationId("org-harbor-stage".to_string())
}

pub(super) type TestShowService =
    ShowService<MemoryShowRepository, MemoryRoleRepository, MemoryCastingRepository>;

pub(super) fn build_service() -> (
    TestShowService,
    Arc<MemoryShowRepository>,
    Arc<MemoryRoleRepository>,
    Arc<MemoryCastingRepository>,
) {
    let shows = Arc::new(MemoryShowRepository::new());
    let roles = Arc::new(MemoryRoleRepository::new());
    let castings = Arc::new(MemoryCastingRepository::new());
    let service = ShowService::new(
        shows.clone(),
        roles.clone(),
        castings.clone(),
        Arc::new(InvariantLocks::new()),
    );
    (service, shows, roles, castings)
}

pub(super) fn new_show(title: &str) -> NewShow {
    NewShow {
        title: title.to_string(),
        ..NewShow::default()
    }
}

pub(super) fn create_show(service: &TestShowService, title: &str) -> Show {
    service
        .create_show(&org(), new_show(title))
        .expect("show created")
}

pub(super) fn create_role(service: &TestShowService, show_id: &ShowId, name: &str) -> ShowRole {
    service
        .create_role(
            &org(),
            NewRole {
                show_id: show_id.clone(),
                name: name.to_string(),
                character_type: None,
            },
        )
        .expect("role created")
}

pub(super) fn casting_of(role_id: &RoleId, student_id: &str) -> NewCasting {
    NewCasting {
        role_id: role_id.clone(),
        student_id: StudentId(student_id.to_string()),
    }
}
