//! Student directory handlers: list, create, delete, assign shift.

use crate::error::AppError;
use crate::model::Student;
use crate::response::{created, ok, MessageResponse};
use crate::service::{parse_id, JsonBody, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let students = state.store.list_students().await?;
    tracing::debug!(count = students.len(), "listed students");
    Ok(Json(students))
}

pub async fn create(State(state): State<AppState>, body: JsonBody) -> Result<MessageResponse, AppError> {
    let body = RequestValidator::object(body)?;
    let new = RequestValidator::new_student(&body)?;
    let student = state.store.create_student(new).await?;
    tracing::info!(id = student.id, email = %student.email, "student created");
    Ok(created("Student added successfully"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<MessageResponse, AppError> {
    let id = parse_id(&id_str)?;
    if !state.store.delete_student(id).await? {
        return Err(AppError::student_not_found(id));
    }
    tracing::info!(id, "student deleted");
    Ok(ok("Student deleted successfully"))
}

/// Existence is checked before the payload, so an unknown id is 404 whatever the body.
pub async fn assign_shift(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: JsonBody,
) -> Result<MessageResponse, AppError> {
    let id = parse_id(&id_str)?;
    if state.store.get_student(id).await?.is_none() {
        return Err(AppError::student_not_found(id));
    }
    let body = RequestValidator::object(body)?;
    let shift = RequestValidator::shift(&body)?;
    let student = state
        .store
        .assign_shift(id, shift)
        .await?
        .ok_or_else(|| AppError::student_not_found(id))?;
    tracing::info!(id, shift = ?student.shift, "shift assigned");
    Ok(ok("Shift assigned successfully"))
}
