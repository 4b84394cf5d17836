//! Tag Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::tags::records::TagRecord;

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TagResponse {
    pub id: Uuid,

    pub name: String,
}

impl From<TagRecord> for TagResponse {
    fn from(tag: TagRecord) -> Self {
        Self {
            id: tag.uuid.into_uuid(),
            name: tag.name,
        }
    }
}

/// Tag Index Handler
///
/// Returns every tag.
#[endpoint(tags("catalog"), summary = "List Tags")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<TagResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let tags = state
        .app
        .tags
        .list_tags()
        .await
        .or_500("failed to fetch tags")?;

    Ok(Json(tags.into_iter().map(Into::into).collect()))
}
