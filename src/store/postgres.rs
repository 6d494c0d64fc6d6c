//! PostgreSQL backend: table DDL and per-request queries against a shared pool.

use super::{duplicate_email, student_has_schedules, unknown_student, RotationStore};
use crate::error::{AppError, ConfigError};
use crate::model::{NewSchedule, NewStudent, ScheduleEntry, Student};
use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// SQLSTATE for a value too long for its column.
const STRING_TOO_LONG: &str = "22001";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create `student` and `schedule` if they do not exist. Idempotent; run at startup.
    /// `schedule.student_id` references `student.id` with the default NO ACTION rule.
    pub async fn ensure_tables(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS student (
                id SERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL,
                email VARCHAR(100) NOT NULL UNIQUE,
                role VARCHAR(50) NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        // Databases created before shift assignment existed lack this column.
        sqlx::query("ALTER TABLE student ADD COLUMN IF NOT EXISTS shift VARCHAR(50)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schedule (
                id SERIAL PRIMARY KEY,
                student_id INTEGER NOT NULL REFERENCES student (id),
                date VARCHAR(20) NOT NULL,
                shift VARCHAR(50) NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Translate store-level constraint failures into client errors. `map` picks the
/// error for a constraint kind; anything it declines stays a `Db` error.
fn classify(err: sqlx::Error, map: impl FnOnce(ErrorKind) -> Option<AppError>) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some(STRING_TOO_LONG) {
            return AppError::BadRequest(db.message().to_string());
        }
        if let Some(mapped) = map(db.kind()) {
            return mapped;
        }
    }
    AppError::Db(err)
}

#[async_trait]
impl RotationStore for PgStore {
    async fn list_students(&self) -> Result<Vec<Student>, AppError> {
        let rows = sqlx::query_as::<_, Student>(
            "SELECT id, name, email, role, shift FROM student ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_student(&self, id: i32) -> Result<Option<Student>, AppError> {
        let row = sqlx::query_as::<_, Student>(
            "SELECT id, name, email, role, shift FROM student WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_student(&self, new: NewStudent) -> Result<Student, AppError> {
        tracing::debug!(email = %new.email, "insert student");
        sqlx::query_as::<_, Student>(
            "INSERT INTO student (name, email, role, shift) VALUES ($1, $2, $3, $4) RETURNING id, name, email, role, shift",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.role)
        .bind(&new.shift)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            classify(e, |kind| {
                matches!(kind, ErrorKind::UniqueViolation).then(|| duplicate_email(&new.email))
            })
        })
    }

    async fn delete_student(&self, id: i32) -> Result<bool, AppError> {
        let deleted: Option<(i32,)> = sqlx::query_as("DELETE FROM student WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                classify(e, |kind| {
                    matches!(kind, ErrorKind::ForeignKeyViolation).then(|| student_has_schedules(id))
                })
            })?;
        Ok(deleted.is_some())
    }

    async fn assign_shift(&self, id: i32, shift: String) -> Result<Option<Student>, AppError> {
        sqlx::query_as::<_, Student>(
            "UPDATE student SET shift = $2 WHERE id = $1 RETURNING id, name, email, role, shift",
        )
        .bind(id)
        .bind(&shift)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, |_| None))
    }

    async fn list_schedules(&self) -> Result<Vec<ScheduleEntry>, AppError> {
        let rows = sqlx::query_as::<_, ScheduleEntry>(
            r#"
            SELECT schedule.id, student.name AS student_name, schedule.date, schedule.shift
            FROM schedule
            JOIN student ON schedule.student_id = student.id
            ORDER BY schedule.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_schedule(&self, new: NewSchedule) -> Result<i32, AppError> {
        let student_id = new.student_id;
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO schedule (student_id, date, shift) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(student_id)
        .bind(&new.date)
        .bind(&new.shift)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            classify(e, |kind| {
                matches!(kind, ErrorKind::ForeignKeyViolation).then(|| unknown_student(student_id))
            })
        })?;
        Ok(id)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|_| invalid_url())?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(invalid_url)?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn invalid_url() -> AppError {
    AppError::Config(ConfigError::InvalidDatabaseUrl)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
