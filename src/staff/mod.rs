//! Staff members and show-staff assignment replacement.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssignmentId, NewAssignment, NewStaffMember, ProductionRole, ShowStaffAssignment, StaffFilter,
    StaffMember, StaffMemberId, StaffPatch,
};
pub use memory::{MemoryAssignmentRepository, MemoryStaffRepository};
pub use repository::{AssignmentRepository, StaffRepository};
pub use service::StaffService;
