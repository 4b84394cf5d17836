//! Update Profile Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use marketplace_app::domain::profiles::data::ProfileUpdate;

use crate::{
    extensions::*,
    profile::{errors::into_status_error, get::ProfileResponse},
    state::State,
};

/// Update Profile Request. Omitted fields are cleared.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct UpdateProfileRequest {
    pub full_name: String,

    pub email: String,

    pub phone: String,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
        }
    }
}

/// Update Profile Handler
///
/// Overwrites the caller's contact details, creating the profile if needed.
#[endpoint(
    tags("profile"),
    summary = "Update Profile",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(name = "profile.update", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<UpdateProfileRequest>,
    depot: &mut Depot,
) -> Result<Json<ProfileResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let profile = state
        .app
        .profiles
        .update_profile(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(profile.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use marketplace_app::domain::profiles::records::{ProfileRecord, ProfileUuid};

    use crate::test_helpers::{MockServices, TEST_USER_UUID, user_service};

    use super::*;

    #[tokio::test]
    async fn test_update_overwrites_and_clears_omitted_fields() -> TestResult {
        let mut services = MockServices::default();

        services
            .profiles
            .expect_update_profile()
            .once()
            .withf(|user, update| {
                *user == TEST_USER_UUID
                    && *update
                        == ProfileUpdate {
                            full_name: "Ann Smith".to_string(),
                            email: "ann@example.com".to_string(),
                            phone: String::new(),
                        }
            })
            .return_once(|user, update| {
                Ok(ProfileRecord {
                    uuid: ProfileUuid::new(),
                    user_uuid: user,
                    full_name: update.full_name,
                    email: update.email,
                    phone: update.phone,
                })
            });

        let response: ProfileResponse = TestClient::post("http://example.com/api/profile")
            .json(&json!({ "fullName": "Ann Smith", "email": "ann@example.com" }))
            .send(&user_service(
                services,
                Router::with_path("api/profile").post(handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(response.full_name, "Ann Smith");
        assert!(response.phone.is_empty());

        Ok(())
    }
}
