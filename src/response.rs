//! Message envelope helpers for mutation acknowledgements.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageBody {
    pub message: String,
}

pub type MessageResponse = (StatusCode, Json<MessageBody>);

pub fn created(message: impl Into<String>) -> MessageResponse {
    (
        StatusCode::CREATED,
        Json(MessageBody {
            message: message.into(),
        }),
    )
}

pub fn ok(message: impl Into<String>) -> MessageResponse {
    (
        StatusCode::OK,
        Json(MessageBody {
            message: message.into(),
        }),
    )
}
