//! Tenant identity shared by every scoped entity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for the tenant boundary. Every scoped read, write, and
/// existence check carries one; an id collision across tenants must resolve to
/// "not found", never to another tenant's row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationId(pub String);

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
