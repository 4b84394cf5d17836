//! Get Profile Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::profiles::records::ProfileRecord;

use crate::{extensions::*, profile::errors::into_status_error, state::State};

/// Profile Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileResponse {
    pub full_name: String,

    pub email: String,

    pub phone: String,
}

impl From<ProfileRecord> for ProfileResponse {
    fn from(profile: ProfileRecord) -> Self {
        Self {
            full_name: profile.full_name,
            email: profile.email,
            phone: profile.phone,
        }
    }
}

/// Get Profile Handler
#[endpoint(
    tags("profile"),
    summary = "Get Profile",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let profile = state
        .app
        .profiles
        .get_profile(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::profiles::{ProfilesServiceError, records::ProfileUuid};

    use crate::test_helpers::{MockServices, TEST_USER_UUID, user_service};

    use super::*;

    fn make_service(services: MockServices) -> Service {
        user_service(services, Router::with_path("api/profile").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_callers_profile() -> TestResult {
        let mut services = MockServices::default();

        services
            .profiles
            .expect_get_profile()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|user| {
                Ok(ProfileRecord {
                    uuid: ProfileUuid::new(),
                    user_uuid: user,
                    full_name: "Ann Smith".to_string(),
                    email: "ann@example.com".to_string(),
                    phone: "+7 900 000 00 00".to_string(),
                })
            });

        let response: ProfileResponse = TestClient::get("http://example.com/api/profile")
            .send(&make_service(services))
            .await
            .take_json()
            .await?;

        assert_eq!(response.full_name, "Ann Smith");
        assert_eq!(response.phone, "+7 900 000 00 00");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_profile_returns_404() -> TestResult {
        let mut services = MockServices::default();

        services
            .profiles
            .expect_get_profile()
            .once()
            .return_once(|_| Err(ProfilesServiceError::NotFound));

        let res = TestClient::get("http://example.com/api/profile")
            .send(&make_service(services))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
