use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::staff::domain::StaffMemberId;
use crate::students::domain::StudentId;
use crate::tenant::OrganizationId;

/// Identifier wrapper for show records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShowId(pub String);

impl fmt::Display for ShowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for role records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(pub String);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for casting records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastingId(pub String);

impl fmt::Display for CastingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Production lifecycle of a show. Transitions are not validated; the field
/// records where the production currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowStatus {
    Planning,
    Rehearsing,
    Performing,
    Completed,
    Cancelled,
}

impl ShowStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Rehearsing => "rehearsing",
            Self::Performing => "performing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Tenant-scoped show record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub organization_id: OrganizationId,
    pub title: String,
    pub description: Option<String>,
    pub director_id: Option<StaffMemberId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub venue: Option<String>,
    pub budget: Option<u32>,
    pub status: ShowStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a show. New records start active, in planning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewShow {
    pub title: String,
    pub description: Option<String>,
    pub director_id: Option<StaffMemberId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub venue: Option<String>,
    pub budget: Option<u32>,
}

/// Partial update; `None` fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub director_id: Option<StaffMemberId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub venue: Option<String>,
    pub budget: Option<u32>,
    pub status: Option<ShowStatus>,
    pub is_active: Option<bool>,
}

/// Predicate bag for show listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowFilter {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub status: Option<ShowStatus>,
    pub director_id: Option<StaffMemberId>,
}

/// A character or position within a show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowRole {
    pub id: RoleId,
    pub organization_id: OrganizationId,
    pub show_id: ShowId,
    pub name: String,
    pub character_type: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRole {
    pub show_id: ShowId,
    pub name: String,
    pub character_type: Option<String>,
}

/// Partial update for a role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RolePatch {
    pub name: Option<String>,
    pub character_type: Option<String>,
    pub is_active: Option<bool>,
}

/// Lifecycle of one student's assignment to one role. `Completed` releases the
/// (role, student) slot; every earlier stage holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastingStatus {
    Assigned,
    Confirmed,
    Rehearsing,
    Performing,
    Completed,
}

impl CastingStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Confirmed => "confirmed",
            Self::Rehearsing => "rehearsing",
            Self::Performing => "performing",
            Self::Completed => "completed",
        }
    }

    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Completed)
    }
}

/// Tenant-scoped casting row linking a role and a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Casting {
    pub id: CastingId,
    pub organization_id: OrganizationId,
    pub role_id: RoleId,
    pub student_id: StudentId,
    pub status: CastingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for casting a student. New castings start assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCasting {
    pub role_id: RoleId,
    pub student_id: StudentId,
}

/// Casting coverage for one show.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShowStats {
    pub total_roles: usize,
    /// Roles holding at least one non-completed casting.
    pub cast_roles: usize,
    pub castings_by_status: BTreeMap<CastingStatus, usize>,
}
