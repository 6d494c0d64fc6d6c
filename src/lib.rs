//! Student rotations: REST backend for students and their rotation schedules.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ServerConfig, StoreBackend};
pub use error::{AppError, ConfigError};
pub use model::{NewSchedule, NewStudent, ScheduleEntry, Student};
pub use routes::{app, common_routes, rotation_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, RotationStore};
