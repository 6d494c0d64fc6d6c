//! Payload validation shared by the handlers.

mod validation;
pub use validation::{parse_id, JsonBody, RequestValidator};
