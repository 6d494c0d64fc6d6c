//! Student directory and schedule ledger routes.

use crate::handlers::{schedule, students};
use crate::state::AppState;
use axum::{
    routing::{delete, get, patch},
    Router,
};

pub fn rotation_routes(state: AppState) -> Router {
    Router::new()
        .route("/students", get(students::list).post(students::create))
        .route("/students/:id", delete(students::delete))
        .route("/students/:id/assign_shift", patch(students::assign_shift))
        .route("/schedule", get(schedule::list).post(schedule::create))
        .with_state(state)
}
