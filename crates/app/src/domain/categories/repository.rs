//! Categories Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::categories::{
    data::NewCategory,
    records::{CategoryRecord, CategoryUuid},
};

const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const CREATE_CATEGORY_ICON_SQL: &str = include_str!("sql/create_category_icon.sql");
const SELECT_CATEGORIES_SQL: &str = include_str!("sql/select_categories.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "categories.repository.create_category",
        skip(self, tx, category),
        fields(category_uuid = %category.uuid),
        err
    )]
    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: &NewCategory,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(&category.title)
            .bind(category.active)
            .bind(category.parent_uuid.map(CategoryUuid::into_uuid))
            .bind(category.favourite)
            .execute(&mut **tx)
            .await?;

        if let Some(src) = &category.icon_src {
            query(CREATE_CATEGORY_ICON_SQL)
                .bind(Uuid::now_v7())
                .bind(category.uuid.into_uuid())
                .bind(src)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<_, CategoryRecord>(&format!("{SELECT_CATEGORIES_SQL} WHERE c.uuid = $1"))
            .bind(category.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<_, CategoryRecord>(&format!("{SELECT_CATEGORIES_SQL} ORDER BY c.uuid"))
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            active: row.try_get("active")?,
            parent_uuid: row
                .try_get::<Option<Uuid>, _>("parent_uuid")?
                .map(CategoryUuid::from_uuid),
            favourite: row.try_get("favourite")?,
            icon_src: row.try_get("icon_src")?,
        })
    }
}
