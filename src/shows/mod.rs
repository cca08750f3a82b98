//! Shows, roles, and the casting lifecycle: date ordering, referential
//! integrity, casting uniqueness, deletion guards.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Casting, CastingId, CastingStatus, NewCasting, NewRole, NewShow, RoleId, RolePatch, Show,
    ShowFilter, ShowId, ShowPatch, ShowRole, ShowStats, ShowStatus,
};
pub use memory::{MemoryCastingRepository, MemoryRoleRepository, MemoryShowRepository};
pub use repository::{CastingRepository, RoleRepository, ShowRepository};
pub use service::ShowService;
