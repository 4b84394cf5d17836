//! Dependency health checks.

use async_trait::async_trait;
use mockall::automock;
use sqlx::query_scalar;
use thiserror::Error;

use crate::database::Db;

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("database is unreachable")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct PgHealthService {
    db: Db,
}

impl PgHealthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HealthService for PgHealthService {
    async fn check_database(&self) -> Result<(), HealthError> {
        query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.db.pool())
            .await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait HealthService: Send + Sync {
    /// Round-trip a trivial query through the pool.
    async fn check_database(&self) -> Result<(), HealthError>;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sqlx::postgres::PgPoolOptions;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn unreachable_database_is_reported() -> TestResult {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://nobody@127.0.0.1:1/nothing")?;

        let result = PgHealthService::new(Db::new(pool)).check_database().await;

        assert!(
            matches!(result, Err(HealthError::Database(_))),
            "expected a database error, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn migrated_database_is_healthy() -> TestResult {
        let ctx = TestContext::new().await;

        PgHealthService::new(Db::new(ctx.db.pool().clone()))
            .check_database()
            .await?;

        Ok(())
    }
}
