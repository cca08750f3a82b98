//! Read-only cross-entity summary: counts plus a merged recent-activity feed.

pub mod service;

#[cfg(test)]
mod tests;

pub use service::{ActivityEntry, ActivityKind, DashboardSummary, DashboardUseCase};
