//! Organizations, memberships, admin quorum, and the staff-member link.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    MemberFilter, MemberId, MemberRole, NewMember, NewOrganization, Organization,
    OrganizationMember, OrganizationPatch, UserId,
};
pub use memory::{MemoryMemberRepository, MemoryOrganizationRepository};
pub use repository::{MemberRepository, OrganizationRepository};
pub use service::OrganizationService;
