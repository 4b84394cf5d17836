//! Tags service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::records::ProductUuid,
        tags::{
            data::NewTag,
            errors::TagsServiceError,
            records::{TagRecord, TagUuid},
            repository::PgTagsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgTagsService {
    db: Db,
    repository: PgTagsRepository,
}

impl PgTagsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTagsRepository::new(),
        }
    }
}

#[async_trait]
impl TagsService for PgTagsService {
    async fn create_tag(&self, tag: NewTag) -> Result<TagRecord, TagsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self.repository.create_tag(&mut tx, &tag).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_tags(&self) -> Result<Vec<TagRecord>, TagsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let tags = self.repository.list_tags(&mut tx).await?;

        tx.commit().await?;

        Ok(tags)
    }

    async fn tag_product(&self, product: ProductUuid, tag: TagUuid) -> Result<(), TagsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository.tag_product(&mut tx, product, tag).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait TagsService: Send + Sync {
    async fn create_tag(&self, tag: NewTag) -> Result<TagRecord, TagsServiceError>;

    /// Every tag, in creation order.
    async fn list_tags(&self) -> Result<Vec<TagRecord>, TagsServiceError>;

    /// Attach a tag to a product. Attaching twice is a no-op.
    async fn tag_product(&self, product: ProductUuid, tag: TagUuid) -> Result<(), TagsServiceError>;
}
