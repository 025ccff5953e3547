use crate::core::config::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// PostgreSQL error code for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL error code for foreign key violations
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Constraint violations the repositories translate into domain errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique,
    ForeignKey,
}

/// Classify a database error as a constraint violation, if it is one
pub fn constraint_violation(e: &sqlx::Error) -> Option<ConstraintViolation> {
    let sqlx::Error::Database(db_err) = e else {
        return None;
    };

    match db_err.code().as_deref() {
        Some(UNIQUE_VIOLATION) => Some(ConstraintViolation::Unique),
        Some(FOREIGN_KEY_VIOLATION) => Some(ConstraintViolation::ForeignKey),
        _ => None,
    }
}
