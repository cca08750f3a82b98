use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shows::domain::ShowId;
use crate::tenant::OrganizationId;

/// Identifier wrapper for staff-member records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffMemberId(pub String);

impl fmt::Display for StaffMemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for show-staff assignment rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(pub String);

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Production roles a staff member can hold, either as a primary specialty or
/// per show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionRole {
    Director,
    MusicDirector,
    Choreographer,
    StageManager,
    TechnicalDirector,
    CostumeDesigner,
    LightingDesigner,
    SoundDesigner,
    Producer,
    CrewMember,
}

impl ProductionRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Director => "Director",
            Self::MusicDirector => "Music Director",
            Self::Choreographer => "Choreographer",
            Self::StageManager => "Stage Manager",
            Self::TechnicalDirector => "Technical Director",
            Self::CostumeDesigner => "Costume Designer",
            Self::LightingDesigner => "Lighting Designer",
            Self::SoundDesigner => "Sound Designer",
            Self::Producer => "Producer",
            Self::CrewMember => "Crew Member",
        }
    }
}

/// A person record independent of user accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffMemberId,
    pub organization_id: OrganizationId,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub primary_role: ProductionRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StaffMember {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating a staff member. New records start active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStaffMember {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub primary_role: ProductionRole,
}

/// Partial update; `None` fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub primary_role: Option<ProductionRole>,
    pub is_active: Option<bool>,
}

/// Predicate bag for staff listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffFilter {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub primary_role: Option<ProductionRole>,
}

/// Tenant-scoped join row assigning a staff member to a show in a role. The
/// set for a show is always replaced whole, never diffed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowStaffAssignment {
    pub id: AssignmentId,
    pub organization_id: OrganizationId,
    pub show_id: ShowId,
    pub staff_member_id: StaffMemberId,
    pub role: ProductionRole,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One entry of a show's replacement assignment set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssignment {
    pub staff_member_id: StaffMemberId,
    pub role: ProductionRole,
    pub notes: Option<String>,
}
