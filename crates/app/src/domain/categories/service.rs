//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;

use crate::{
    database::Db,
    domain::categories::{
        data::NewCategory,
        errors::CategoriesServiceError,
        records::{CategoryRecord, CategoryTree, CategoryUuid},
        repository::PgCategoriesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository.create_category(&mut tx, &category).await?;

        let created = self.repository.get_category(&mut tx, category.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_root_categories(&self) -> Result<Vec<CategoryTree>, CategoriesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(nest_categories(categories))
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Categories without a parent, each with its direct subcategories.
    async fn list_root_categories(&self) -> Result<Vec<CategoryTree>, CategoriesServiceError>;
}

/// Group categories under their roots, one level deep. Input order is kept.
fn nest_categories(categories: Vec<CategoryRecord>) -> Vec<CategoryTree> {
    let mut children: FxHashMap<CategoryUuid, Vec<CategoryRecord>> = FxHashMap::default();
    let mut roots = Vec::new();

    for category in categories {
        match category.parent_uuid {
            Some(parent) => children.entry(parent).or_default().push(category),
            None => roots.push(category),
        }
    }

    roots
        .into_iter()
        .map(|category| CategoryTree {
            subcategories: children.remove(&category.uuid).unwrap_or_default(),
            category,
        })
        .collect()
}
