//! Persistence capability injected into handlers via [`crate::AppState`].
//!
//! Both backends enforce the same constraints: unique student email, schedule
//! `student_id` must reference an existing student, and a student with schedules
//! cannot be deleted.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::model::{NewSchedule, NewStudent, ScheduleEntry, Student};
use async_trait::async_trait;

#[async_trait]
pub trait RotationStore: Send + Sync {
    /// All students, ordered by id.
    async fn list_students(&self) -> Result<Vec<Student>, AppError>;

    async fn get_student(&self, id: i32) -> Result<Option<Student>, AppError>;

    /// Insert one student and return it with its assigned id. Duplicate email is a `Conflict`.
    async fn create_student(&self, new: NewStudent) -> Result<Student, AppError>;

    /// Remove one student. `Ok(false)` when no such student; `Conflict` while schedules reference it.
    async fn delete_student(&self, id: i32) -> Result<bool, AppError>;

    /// Set the student's shift. `Ok(None)` when no such student.
    async fn assign_shift(&self, id: i32, shift: String) -> Result<Option<Student>, AppError>;

    /// All schedules joined with their student's name, ordered by id.
    async fn list_schedules(&self) -> Result<Vec<ScheduleEntry>, AppError>;

    /// Insert exactly one schedule row and return its id. Unknown student is a `BadRequest`.
    async fn create_schedule(&self, new: NewSchedule) -> Result<i32, AppError>;

    /// Liveness check of the backing store.
    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn duplicate_email(email: &str) -> AppError {
    AppError::Conflict(format!("a student with email '{}' already exists", email))
}

pub(crate) fn unknown_student(id: i32) -> AppError {
    AppError::BadRequest(format!("student_id {} does not reference an existing student", id))
}

pub(crate) fn student_has_schedules(id: i32) -> AppError {
    AppError::Conflict(format!(
        "Student {} still has schedule entries; remove them before deleting",
        id
    ))
}
