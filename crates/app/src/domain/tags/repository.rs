//! Tags Repository

use sqlx::{Postgres, Transaction, query, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    products::records::ProductUuid,
    tags::{
        data::NewTag,
        records::{TagRecord, TagUuid},
    },
};

const CREATE_TAG_SQL: &str = include_str!("sql/create_tag.sql");
const LIST_TAGS_SQL: &str = include_str!("sql/list_tags.sql");
const CREATE_PRODUCT_TAG_SQL: &str = include_str!("sql/create_product_tag.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTagsRepository;

impl PgTagsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_tag(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        tag: &NewTag,
    ) -> Result<TagRecord, sqlx::Error> {
        let (uuid, name): (Uuid, String) = query_as(CREATE_TAG_SQL)
            .bind(tag.uuid.into_uuid())
            .bind(&tag.name)
            .fetch_one(&mut **tx)
            .await?;

        Ok(TagRecord {
            uuid: TagUuid::from_uuid(uuid),
            name,
        })
    }

    pub(crate) async fn list_tags(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<TagRecord>, sqlx::Error> {
        let rows: Vec<(Uuid, String)> = query_as(LIST_TAGS_SQL).fetch_all(&mut **tx).await?;

        Ok(rows
            .into_iter()
            .map(|(uuid, name)| TagRecord {
                uuid: TagUuid::from_uuid(uuid),
                name,
            })
            .collect())
    }

    #[tracing::instrument(
        name = "tags.repository.tag_product",
        skip(self, tx),
        fields(product_uuid = %product, tag_uuid = %tag),
        err
    )]
    pub(crate) async fn tag_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        tag: TagUuid,
    ) -> Result<(), sqlx::Error> {
        let rows_affected = query(CREATE_PRODUCT_TAG_SQL)
            .bind(tag.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        debug!(rows_affected, "tagged product");

        Ok(())
    }
}
