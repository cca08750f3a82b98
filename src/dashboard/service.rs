use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::classes::repository::{ClassRepository, EnrollmentRepository};
use crate::classes::service::ClassService;
use crate::config::DashboardConfig;
use crate::error::DomainError;
use crate::shows::repository::{CastingRepository, RoleRepository, ShowRepository};
use crate::shows::service::ShowService;
use crate::students::domain::StudentStats;
use crate::students::repository::StudentRepository;
use crate::students::service::StudentService;
use crate::tenant::OrganizationId;

/// Category tag for one entry of the recent-activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Student,
    Class,
    Show,
}

impl ActivityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Class => "class",
            Self::Show => "show",
        }
    }
}

/// One record of the merged feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub id: String,
    pub label: String,
    pub occurred_at: DateTime<Utc>,
}

/// The dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub student_stats: StudentStats,
    pub active_classes: usize,
    pub total_enrollments: usize,
    pub active_shows: usize,
    pub recent_activity: Vec<ActivityEntry>,
}

/// Composes the student, class, and show services into one read. There is no
/// audit log behind this; the feed is synthesized per call from three bounded
/// recent-record fetches. Failures propagate to the caller unchanged; the
/// empty-state fallback belongs to the API boundary, not here.
pub struct DashboardUseCase<SR, CR, ER, HR, RR, CA> {
    students: Arc<StudentService<SR>>,
    classes: Arc<ClassService<CR, ER>>,
    shows: Arc<ShowService<HR, RR, CA>>,
    config: DashboardConfig,
}

impl<SR, CR, ER, HR, RR, CA> DashboardUseCase<SR, CR, ER, HR, RR, CA>
where
    SR: StudentRepository,
    CR: ClassRepository,
    ER: EnrollmentRepository,
    HR: ShowRepository,
    RR: RoleRepository,
    CA: CastingRepository,
{
    pub fn new(
        students: Arc<StudentService<SR>>,
        classes: Arc<ClassService<CR, ER>>,
        shows: Arc<ShowService<HR, RR, CA>>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            students,
            classes,
            shows,
            config,
        }
    }

    pub fn summary(&self, org: &OrganizationId) -> Result<DashboardSummary, DomainError> {
        let student_stats = self.students.student_stats(org)?;
        let active_classes = self.classes.active_classes(org)?.len();
        let total_enrollments = self.classes.total_enrollments(org)?;
        let active_shows = self.shows.active_shows(org)?.len();

        let mut recent_activity = Vec::new();
        for student in self
            .students
            .recent_students(org, self.config.recent_fetch)?
        {
            recent_activity.push(ActivityEntry {
                kind: ActivityKind::Student,
                id: student.id.0.clone(),
                label: student.full_name(),
                occurred_at: student.created_at,
            });
        }
        for class in self.classes.recent_classes(org, self.config.recent_fetch)? {
            recent_activity.push(ActivityEntry {
                kind: ActivityKind::Class,
                id: class.id.0.clone(),
                label: class.name,
                occurred_at: class.created_at,
            });
        }
        for show in self.shows.recent_shows(org, self.config.recent_fetch)? {
            recent_activity.push(ActivityEntry {
                kind: ActivityKind::Show,
                id: show.id.0.clone(),
                label: show.title,
                occurred_at: show.created_at,
            });
        }

        // Newest first; ties broken by id so the feed is stable.
        recent_activity.sort_by(|a, b| {
            b.occurred_at
                .cmp(&a.occurred_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        recent_activity.truncate(self.config.feed_limit);

        Ok(DashboardSummary {
            student_stats,
            active_classes,
            total_enrollments,
            active_shows,
            recent_activity,
        })
    }
}
