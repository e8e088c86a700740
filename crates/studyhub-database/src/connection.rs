//! PostgreSQL access: pool construction, embedded schema migrations,
//! and connectivity checks.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use studyhub_core::config::database::DatabaseConfig;
use studyhub_core::error::{AppError, ErrorKind};

/// Owns the sqlx connection pool for the lifetime of the process.
/// Cloning is cheap; every clone shares the same underlying pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connect to PostgreSQL and size the pool from configuration.
    ///
    /// The first connection is established eagerly, so a bad URL or an
    /// unreachable host surfaces here instead of on the first request.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to {}: {e}", redact_url(&config.url)),
                    e,
                )
            })?;

        info!(
            url = %redact_url(&config.url),
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "PostgreSQL pool ready"
        );
        Ok(Self { pool })
    }

    /// Apply all pending schema migrations embedded at compile time.
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
            })?;
        info!("Schema migrations up to date");
        Ok(())
    }

    /// Round-trip a trivial query. `Err` means the database is
    /// unreachable or refusing work.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Database ping failed", e))
    }

    /// Borrow the underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close all connections, waiting for in-flight queries to finish.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Replace the password component of a connection URL so the URL can be
/// logged. URLs without credentials pass through untouched.
fn redact_url(url: &str) -> String {
    let Some((credentials, tail)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match credentials.rsplit_once(':') {
        // A '/' after the colon means we split inside the scheme
        // (user-only URL), not inside user:password.
        Some((user, password)) if !password.contains('/') => {
            format!("{user}:****@{tail}")
        }
        _ => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_password_component() {
        assert_eq!(
            redact_url("postgres://studyhub:hunter2@db:5432/studyhub"),
            "postgres://studyhub:****@db:5432/studyhub"
        );
    }

    #[test]
    fn leaves_urls_without_credentials_alone() {
        assert_eq!(
            redact_url("postgres://localhost:5432/studyhub"),
            "postgres://localhost:5432/studyhub"
        );
        assert_eq!(
            redact_url("postgres://studyhub@localhost/studyhub"),
            "postgres://studyhub@localhost/studyhub"
        );
    }
}
