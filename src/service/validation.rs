//! Request payload validation. Every endpoint body is checked against its schema
//! before anything touches the store; failures are uniformly `BadRequest`.

use crate::error::AppError;
use crate::model::{NewSchedule, NewStudent};
use axum::{extract::rejection::JsonRejection, Json};
use serde_json::{Map, Value};

pub type JsonBody = Result<Json<Value>, JsonRejection>;

/// Column widths of the `student` and `schedule` tables, in characters.
pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 100;
pub const ROLE_MAX: usize = 50;
pub const SHIFT_MAX: usize = 50;
pub const DATE_MAX: usize = 20;

pub struct RequestValidator;

impl RequestValidator {
    /// Unwrap an extracted body into a JSON object.
    pub fn object(body: JsonBody) -> Result<Map<String, Value>, AppError> {
        let Json(value) = body?;
        match value {
            Value::Object(m) => Ok(m),
            _ => Err(AppError::BadRequest("body must be a JSON object".into())),
        }
    }

    /// `name`, `email` and `role` required; `shift` optional.
    pub fn new_student(body: &Map<String, Value>) -> Result<NewStudent, AppError> {
        Ok(NewStudent {
            name: required_str(body, "name", NAME_MAX)?,
            email: required_str(body, "email", EMAIL_MAX)?,
            role: required_str(body, "role", ROLE_MAX)?,
            shift: optional_str(body, "shift", SHIFT_MAX)?,
        })
    }

    /// `student_id`, `date` and `shift` all required.
    pub fn new_schedule(body: &Map<String, Value>) -> Result<NewSchedule, AppError> {
        Ok(NewSchedule {
            student_id: required_id(body, "student_id")?,
            date: required_str(body, "date", DATE_MAX)?,
            shift: required_str(body, "shift", SHIFT_MAX)?,
        })
    }

    pub fn shift(body: &Map<String, Value>) -> Result<String, AppError> {
        match body.get("shift") {
            None | Some(Value::Null) => Err(AppError::BadRequest("No shift provided".into())),
            Some(_) => required_str(body, "shift", SHIFT_MAX),
        }
    }
}

/// Parse a path segment as a student id.
pub fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// Present, a string, and not blank. The value is kept exactly as sent.
fn required_str(body: &Map<String, Value>, field: &str, max: usize) -> Result<String, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(AppError::BadRequest(format!("{} is required", field))),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(AppError::BadRequest(format!("{} must not be empty", field)))
        }
        Some(Value::String(s)) => within_length(field, s, max).map(|()| s.clone()),
        Some(_) => Err(AppError::BadRequest(format!("{} must be a string", field))),
    }
}

/// Absent, null, or blank all mean "not given".
fn optional_str(body: &Map<String, Value>, field: &str, max: usize) -> Result<Option<String>, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => within_length(field, s, max).map(|()| Some(s.clone())),
        Some(_) => Err(AppError::BadRequest(format!("{} must be a string", field))),
    }
}

fn within_length(field: &str, s: &str, max: usize) -> Result<(), AppError> {
    if s.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

fn required_id(body: &Map<String, Value>, field: &str) -> Result<i32, AppError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(AppError::BadRequest(format!("{} is required", field))),
        Some(v) => v
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| AppError::BadRequest(format!("{} must be an integer id", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn student_fields_are_kept_as_sent() {
        let s = RequestValidator::new_student(&map(json!({
            "name": " Ana ",
            "email": " ana@x.com",
            "role": "Recorder"
        })))
        .unwrap();
        assert_eq!(s.name, " Ana ");
        assert_eq!(s.email, " ana@x.com");
        assert_eq!(s.shift, None);
    }

    #[test]
    fn lengths_follow_column_widths() {
        let at_limit = RequestValidator::new_student(&map(json!({
            "name": "n".repeat(NAME_MAX),
            "email": "e".repeat(EMAIL_MAX),
            "role": "r".repeat(ROLE_MAX),
            "shift": "s".repeat(SHIFT_MAX)
        })));
        assert!(at_limit.is_ok());

        let err = RequestValidator::new_student(&map(json!({
            "name": "Ana", "email": "a@x", "role": "r".repeat(ROLE_MAX + 1)
        })))
        .unwrap_err();
        assert_eq!(err.to_string(), "role must be at most 50 characters");

        let err = RequestValidator::new_schedule(&map(json!({
            "student_id": 1, "date": "d".repeat(DATE_MAX + 1), "shift": "AM"
        })))
        .unwrap_err();
        assert_eq!(err.to_string(), "date must be at most 20 characters");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let name: String = std::iter::repeat('é').take(NAME_MAX).collect();
        let s = RequestValidator::new_student(&map(json!({
            "name": name, "email": "a@x", "role": "Recorder"
        })));
        assert!(s.is_ok());
    }

    #[test]
    fn missing_student_field_is_rejected() {
        let err = RequestValidator::new_student(&map(json!({"name": "Ana", "role": "Recorder"}))).unwrap_err();
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn blank_shift_on_create_means_none() {
        let s = RequestValidator::new_student(&map(json!({
            "name": "Ana", "email": "a@x", "role": "Recorder", "shift": ""
        })))
        .unwrap();
        assert_eq!(s.shift, None);
    }

    #[test]
    fn schedule_student_id_must_be_integer() {
        let err = RequestValidator::new_schedule(&map(json!({
            "student_id": "1", "date": "2024-05-01", "shift": "AM"
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = RequestValidator::new_schedule(&map(json!({
            "student_id": 1u64 << 40, "date": "2024-05-01", "shift": "AM"
        })))
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn shift_absent_or_wrong_type() {
        let err = RequestValidator::shift(&map(json!({}))).unwrap_err();
        assert_eq!(err.to_string(), "No shift provided");
        assert!(RequestValidator::shift(&map(json!({"shift": 3}))).is_err());
        assert_eq!(RequestValidator::shift(&map(json!({"shift": "PM"}))).unwrap(), "PM");
    }

    #[test]
    fn non_object_body_is_rejected() {
        let err = RequestValidator::object(Ok(Json(json!([1, 2])))).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn path_ids() {
        assert_eq!(parse_id("17").unwrap(), 17);
        assert!(parse_id("abc").is_err());
    }
}
