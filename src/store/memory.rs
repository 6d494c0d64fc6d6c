//! In-process backend with the same constraint semantics as [`super::PgStore`].
//! Used by tests and for local runs without a database (`STORE_BACKEND=memory`).

use super::{duplicate_email, student_has_schedules, unknown_student, RotationStore};
use crate::error::AppError;
use crate::model::{NewSchedule, NewStudent, ScheduleEntry, Student};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct ScheduleRow {
    student_id: i32,
    date: String,
    shift: String,
}

#[derive(Debug, Default)]
struct Tables {
    students: BTreeMap<i32, Student>,
    schedules: BTreeMap<i32, ScheduleRow>,
    next_student_id: i32,
    next_schedule_id: i32,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RotationStore for MemoryStore {
    async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.tables.read().await.students.values().cloned().collect())
    }

    async fn get_student(&self, id: i32) -> Result<Option<Student>, AppError> {
        Ok(self.tables.read().await.students.get(&id).cloned())
    }

    async fn create_student(&self, new: NewStudent) -> Result<Student, AppError> {
        let mut tables = self.tables.write().await;
        if tables.students.values().any(|s| s.email == new.email) {
            return Err(duplicate_email(&new.email));
        }
        tables.next_student_id += 1;
        let student = Student {
            id: tables.next_student_id,
            name: new.name,
            email: new.email,
            role: new.role,
            shift: new.shift,
        };
        tables.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn delete_student(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.students.contains_key(&id) {
            return Ok(false);
        }
        if tables.schedules.values().any(|row| row.student_id == id) {
            return Err(student_has_schedules(id));
        }
        tables.students.remove(&id);
        Ok(true)
    }

    async fn assign_shift(&self, id: i32, shift: String) -> Result<Option<Student>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.students.get_mut(&id).map(|student| {
            student.shift = Some(shift);
            student.clone()
        }))
    }

    async fn list_schedules(&self) -> Result<Vec<ScheduleEntry>, AppError> {
        let tables = self.tables.read().await;
        // Inner join: rows whose student is gone are skipped.
        Ok(tables
            .schedules
            .iter()
            .filter_map(|(id, row)| {
                tables.students.get(&row.student_id).map(|student| ScheduleEntry {
                    id: *id,
                    student_name: student.name.clone(),
                    date: row.date.clone(),
                    shift: row.shift.clone(),
                })
            })
            .collect())
    }

    async fn create_schedule(&self, new: NewSchedule) -> Result<i32, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.students.contains_key(&new.student_id) {
            return Err(unknown_student(new.student_id));
        }
        tables.next_schedule_id += 1;
        let id = tables.next_schedule_id;
        tables.schedules.insert(
            id,
            ScheduleRow {
                student_id: new.student_id,
                date: new.date,
                shift: new.shift,
            },
        );
        Ok(id)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
