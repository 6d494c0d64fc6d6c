//! Student and schedule records as stored and as served.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    /// Set by shift assignment; omitted from JSON until then.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shift: Option<String>,
}

/// Validated input for student creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub role: String,
    pub shift: Option<String>,
}

/// Schedule row joined with its owning student's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ScheduleEntry {
    pub id: i32,
    pub student_name: String,
    pub date: String,
    pub shift: String,
}

/// Validated input for schedule creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchedule {
    pub student_id: i32,
    pub date: String,
    pub shift: String,
}
