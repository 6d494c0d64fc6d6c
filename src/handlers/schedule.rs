//! Schedule ledger handlers: list (joined with student names) and create.

use crate::error::AppError;
use crate::model::ScheduleEntry;
use crate::response::{created, MessageResponse};
use crate::service::{JsonBody, RequestValidator};
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ScheduleEntry>>, AppError> {
    let entries = state.store.list_schedules().await?;
    tracing::debug!(count = entries.len(), "listed schedules");
    Ok(Json(entries))
}

/// One insert per call; `shift` being present never triggers a second row.
pub async fn create(State(state): State<AppState>, body: JsonBody) -> Result<MessageResponse, AppError> {
    let body = RequestValidator::object(body)?;
    let new = RequestValidator::new_schedule(&body)?;
    let student_id = new.student_id;
    let id = state.store.create_schedule(new).await?;
    tracing::info!(id, student_id, "schedule created");
    Ok(created("Schedule added successfully"))
}
