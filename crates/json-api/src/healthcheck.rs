//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthResponse {
    /// `ok` when every dependency answered, otherwise `degraded`
    pub status: String,

    /// `ok` or `unreachable`
    pub database: String,
}

/// Healthcheck handler
///
/// Round-trips a query through the connection pool. Answers 503 while the
/// database is unreachable so load balancers can drain the instance.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Healthy"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if let Err(source) = state.app.health.check_database().await {
        warn!("healthcheck failed: {source}");
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);

        return Ok(Json(HealthResponse {
            status: "degraded".to_string(),
            database: "unreachable".to_string(),
        }));
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database: "ok".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::health::HealthError;

    use crate::test_helpers::{MockServices, public_service};

    use super::*;

    fn make_service(services: MockServices) -> Service {
        public_service(services, Router::with_path("healthcheck").get(handler))
    }

    #[tokio::test]
    async fn test_healthy_database_returns_200() -> TestResult {
        let mut services = MockServices::default();

        services
            .health
            .expect_check_database()
            .once()
            .return_once(|| Ok(()));

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: HealthResponse = res.take_json().await?;

        assert_eq!(body.status, "ok");
        assert_eq!(body.database, "ok");

        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_database_returns_503() -> TestResult {
        let mut services = MockServices::default();

        services
            .health
            .expect_check_database()
            .once()
            .return_once(|| Err(HealthError::Database(sqlx::Error::PoolTimedOut)));

        let mut res = TestClient::get("http://example.com/healthcheck")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        let body: HealthResponse = res.take_json().await?;

        assert_eq!(body.status, "degraded");
        assert_eq!(body.database, "unreachable");

        Ok(())
    }
}
