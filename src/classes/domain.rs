use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::staff::domain::StaffMemberId;
use crate::students::domain::StudentId;
use crate::tenant::OrganizationId;

/// Identifier wrapper for class records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId(pub String);

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for enrollment records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrollmentId(pub String);

impl fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl ScheduleDay {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

/// Weekly meeting pattern for a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSchedule {
    pub days: Vec<ScheduleDay>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Tenant-scoped class record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub organization_id: OrganizationId,
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: Option<StaffMemberId>,
    pub max_students: Option<u32>,
    pub age_range_min: Option<u32>,
    pub age_range_max: Option<u32>,
    pub schedule: Option<ClassSchedule>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a class. New records start active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewClass {
    pub name: String,
    pub description: Option<String>,
    pub teacher_id: Option<StaffMemberId>,
    pub max_students: Option<u32>,
    pub age_range_min: Option<u32>,
    pub age_range_max: Option<u32>,
    pub schedule: Option<ClassSchedule>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Partial update; `None` fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub teacher_id: Option<StaffMemberId>,
    pub max_students: Option<u32>,
    pub age_range_min: Option<u32>,
    pub age_range_max: Option<u32>,
    pub schedule: Option<ClassSchedule>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

/// Predicate bag for class listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassFilter {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub teacher_id: Option<StaffMemberId>,
}

/// Lifecycle of one student's membership in one class. `Completed` and
/// `Dropped` have no outgoing transitions; re-enrollment creates a new row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Active,
    Inactive,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Completed => "completed",
            Self::Dropped => "dropped",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Dropped)
    }
}

/// Tenant-scoped enrollment row linking a class and a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEnrollment {
    pub id: EnrollmentId,
    pub organization_id: OrganizationId,
    pub class_id: ClassId,
    pub student_id: StudentId,
    pub status: EnrollmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for enrolling a student. New enrollments start active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEnrollment {
    pub class_id: ClassId,
    pub student_id: StudentId,
}

/// One item of a bulk status update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentStatusUpdate {
    pub enrollment_id: EnrollmentId,
    pub status: EnrollmentStatus,
}
