//! Per-tenant locks serializing check-then-act invariants.
//!
//! Capacity checks, casting-slot uniqueness, staff linking, and the admin
//! quorum are all read-validate-write sequences. Holding the scope's lock for
//! the whole sequence keeps the invariant true after concurrent completion,
//! not just at check time.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::tenant::OrganizationId;

/// The invariant a lock protects. Payloads narrow the scope so unrelated
/// operations in the same tenant never contend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LockScope {
    ClassCapacity(String),
    CastingSlot(String),
    StaffLink(String),
    AdminQuorum,
}

/// Registry of invariant locks keyed by `(tenant, scope)`.
#[derive(Debug, Default)]
pub struct InvariantLocks {
    slots: Mutex<HashMap<(OrganizationId, LockScope), Arc<Mutex<()>>>>,
}

impl InvariantLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch (or lazily create) the lock for a scope. Callers hold the returned
    /// mutex across the read and the write of the invariant.
    pub fn slot(&self, org: &OrganizationId, scope: LockScope) -> Arc<Mutex<()>> {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        slots
            .entry((org.clone(), scope))
            .or_default()
            .clone()
    }
}
