//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use marketplace_app::domain::categories::records::{CategoryRecord, CategoryTree};

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryImageResponse {
    pub src: String,

    pub alt: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubcategoryResponse {
    pub id: Uuid,

    pub title: String,

    pub image: Option<CategoryImageResponse>,

    /// Catalog link for the category
    pub href: String,
}

impl From<CategoryRecord> for SubcategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        let id = category.uuid.into_uuid();

        Self {
            id,
            image: category.icon_src.map(|src| CategoryImageResponse {
                src,
                alt: category.title.clone(),
            }),
            title: category.title,
            href: format!("/catalog/{id}"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub id: Uuid,

    pub title: String,

    pub image: Option<CategoryImageResponse>,

    pub href: String,

    pub subcategories: Vec<SubcategoryResponse>,
}

impl From<CategoryTree> for CategoryResponse {
    fn from(tree: CategoryTree) -> Self {
        let root = SubcategoryResponse::from(tree.category);

        Self {
            id: root.id,
            title: root.title,
            image: root.image,
            href: root.href,
            subcategories: tree.subcategories.into_iter().map(Into::into).collect(),
        }
    }
}

/// Category Index Handler
///
/// Returns active root categories with their active subcategories.
#[endpoint(tags("catalog"), summary = "List Categories")]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Vec<CategoryResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_root_categories()
        .await
        .or_500("failed to fetch categories")?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use marketplace_app::domain::categories::records::CategoryUuid;

    use crate::test_helpers::{MockServices, public_service};

    use super::*;

    fn category(title: &str, parent: Option<CategoryUuid>) -> CategoryRecord {
        CategoryRecord {
            uuid: CategoryUuid::new(),
            title: title.to_string(),
            active: true,
            parent_uuid: parent,
            favourite: false,
            icon_src: None,
        }
    }

    #[tokio::test]
    async fn test_index_nests_subcategories() -> TestResult {
        let mut root = category("Electronics", None);

        root.icon_src = Some("/media/electronics.svg".to_string());

        let phones = category("Phones", Some(root.uuid));
        let root_uuid = root.uuid.into_uuid();

        let mut services = MockServices::default();

        services
            .categories
            .expect_list_root_categories()
            .once()
            .return_once(move || {
                Ok(vec![CategoryTree {
                    category: root,
                    subcategories: vec![phones],
                }])
            });

        let response: Vec<CategoryResponse> =
            TestClient::get("http://example.com/api/categories")
                .send(&public_service(
                    services,
                    Router::with_path("api/categories").get(handler),
                ))
                .await
                .take_json()
                .await?;

        let electronics = response.first().ok_or("expected a root category")?;

        assert_eq!(electronics.href, format!("/catalog/{root_uuid}"));
        assert_eq!(
            electronics.image.as_ref().map(|image| image.alt.as_str()),
            Some("Electronics")
        );
        assert_eq!(
            electronics
                .subcategories
                .first()
                .map(|sub| sub.title.as_str()),
            Some("Phones")
        );
        assert!(
            electronics
                .subcategories
                .first()
                .is_some_and(|sub| sub.image.is_none())
        );

        Ok(())
    }
}
