//! Student records and the per-tenant email uniqueness invariant.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    NewStudent, Student, StudentFilter, StudentId, StudentPatch, StudentStats,
    GRADE_NOT_SPECIFIED,
};
pub use memory::MemoryStudentRepository;
pub use repository::StudentRepository;
pub use service::StudentService;
