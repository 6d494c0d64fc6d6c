//! HTTP handlers for the student directory, the schedule ledger, and health checks.

pub mod common;
pub mod schedule;
pub mod students;
