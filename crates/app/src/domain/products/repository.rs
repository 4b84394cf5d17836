//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    categories::records::CategoryUuid,
    products::{
        data::{NewProduct, ProductFilter, ProductSort},
        records::{ProductImageRecord, ProductRecord, ProductUuid, SpecificationRecord},
    },
    tags::records::{TagRecord, TagUuid},
};

const SELECT_PRODUCTS_SQL: &str = include_str!("sql/select_products.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const CREATE_PRODUCT_IMAGES_SQL: &str = include_str!("sql/create_product_images.sql");
const CREATE_PRODUCT_SPECIFICATIONS_SQL: &str =
    include_str!("sql/create_product_specifications.sql");
const LIST_PRODUCT_IMAGES_SQL: &str = include_str!("sql/list_product_images.sql");
const LIST_PRODUCT_TAGS_SQL: &str = include_str!("sql/list_product_tags.sql");
const LIST_PRODUCT_SPECIFICATIONS_SQL: &str = include_str!("sql/list_product_specifications.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "products.repository.list_products",
        skip(self, tx, filter),
        fields(product_count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductFilter,
        sort: Option<ProductSort>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS_SQL);

        builder.push(" WHERE p.active");

        if let Some(name) = filter.name.as_deref().filter(|name| !name.trim().is_empty()) {
            builder
                .push(" AND p.title ILIKE ")
                .push_bind(like_pattern(name.trim()));
        }

        if let Some(min_price) = filter.min_price {
            builder.push(" AND p.price >= ").push_bind(min_price);
        }

        if let Some(max_price) = filter.max_price {
            builder.push(" AND p.price <= ").push_bind(max_price);
        }

        if filter.free_delivery {
            builder.push(" AND p.free_delivery");
        }

        if filter.available {
            builder.push(" AND p.count > 0");
        }

        if let Some(category) = filter.category {
            builder
                .push(" AND p.category_uuid = ")
                .push_bind(category.into_uuid());
        }

        if !filter.tags.is_empty() {
            let tags: Vec<Uuid> = filter.tags.iter().copied().map(TagUuid::into_uuid).collect();

            builder
                .push(
                    " AND EXISTS (SELECT 1 FROM product_tags AS pt \
                     WHERE pt.product_uuid = p.uuid AND pt.tag_uuid = ANY(",
                )
                .push_bind(tags)
                .push("))");
        }

        match sort {
            Some(sort) => builder
                .push(" ORDER BY ")
                .push(sort.field.column())
                .push(" ")
                .push(sort.direction.keyword())
                .push(", p.uuid"),
            None => builder.push(" ORDER BY p.uuid"),
        };

        let mut products = builder
            .build_query_as::<ProductRecord>()
            .fetch_all(&mut **tx)
            .await?;

        self.load_children(tx, &mut products).await?;

        tracing::Span::current().record("product_count", products.len());

        Ok(products)
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS_SQL);

        builder
            .push(" WHERE p.uuid = ")
            .push_bind(product.into_uuid());

        let product = builder
            .build_query_as::<ProductRecord>()
            .fetch_one(&mut **tx)
            .await?;

        let mut products = vec![product];

        self.load_children(tx, &mut products).await?;

        products.pop().ok_or(sqlx::Error::RowNotFound)
    }

    /// Fetch the given products ordered by uuid. Unknown uuids are skipped.
    pub(crate) async fn get_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let uuids: Vec<Uuid> = products.iter().copied().map(ProductUuid::into_uuid).collect();

        let mut builder = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS_SQL);

        builder
            .push(" WHERE p.uuid = ANY(")
            .push_bind(uuids)
            .push(") ORDER BY p.uuid");

        let mut products = builder
            .build_query_as::<ProductRecord>()
            .fetch_all(&mut **tx)
            .await?;

        self.load_children(tx, &mut products).await?;

        Ok(products)
    }

    pub(crate) async fn list_limited(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        self.list_where(tx, " WHERE p.limited_edition ORDER BY p.uuid")
            .await
    }

    pub(crate) async fn list_popular(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        self.list_where(tx, " WHERE p.active ORDER BY reviews_count DESC, p.uuid")
            .await
    }

    pub(crate) async fn list_favourite_limited(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        self.list_where(
            tx,
            " WHERE p.limited_edition AND EXISTS (SELECT 1 FROM categories AS c \
             WHERE c.uuid = p.category_uuid AND c.favourite) ORDER BY p.uuid",
        )
        .await
    }

    #[tracing::instrument(
        name = "products.repository.create_product",
        skip(self, tx, product),
        fields(product_uuid = %product.uuid),
        err
    )]
    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.title)
            .bind(&product.description)
            .bind(&product.full_description)
            .bind(product.price)
            .bind(product.count)
            .bind(product.free_delivery)
            .bind(product.limited_edition)
            .bind(product.rating)
            .bind(product.active)
            .bind(product.category_uuid.map(CategoryUuid::into_uuid))
            .execute(&mut **tx)
            .await?;

        if !product.images.is_empty() {
            let (names, srcs): (Vec<String>, Vec<String>) = product
                .images
                .iter()
                .map(|image| (image.name.clone(), image.src.clone()))
                .unzip();

            query(CREATE_PRODUCT_IMAGES_SQL)
                .bind(new_uuids(names.len()))
                .bind(product.uuid.into_uuid())
                .bind(names)
                .bind(srcs)
                .execute(&mut **tx)
                .await?;
        }

        if !product.specifications.is_empty() {
            let (names, values): (Vec<String>, Vec<String>) = product
                .specifications
                .iter()
                .map(|spec| (spec.name.clone(), spec.value.clone()))
                .unzip();

            query(CREATE_PRODUCT_SPECIFICATIONS_SQL)
                .bind(new_uuids(names.len()))
                .bind(product.uuid.into_uuid())
                .bind(names)
                .bind(values)
                .execute(&mut **tx)
                .await?;
        }

        debug!(
            images = product.images.len(),
            specifications = product.specifications.len(),
            "created product"
        );

        Ok(())
    }

    /// Image records for the given products, keyed by product.
    pub(crate) async fn list_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<FxHashMap<Uuid, Vec<ProductImageRecord>>, sqlx::Error> {
        let rows: Vec<(Uuid, String, String)> = query_as(LIST_PRODUCT_IMAGES_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await?;

        let mut images: FxHashMap<Uuid, Vec<ProductImageRecord>> = FxHashMap::default();

        for (product, name, src) in rows {
            images
                .entry(product)
                .or_default()
                .push(ProductImageRecord { name, src });
        }

        Ok(images)
    }

    async fn list_where(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        clause: &'static str,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_PRODUCTS_SQL);

        builder.push(clause);

        let mut products = builder
            .build_query_as::<ProductRecord>()
            .fetch_all(&mut **tx)
            .await?;

        self.load_children(tx, &mut products).await?;

        Ok(products)
    }

    async fn load_children(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &mut [ProductRecord],
    ) -> Result<(), sqlx::Error> {
        if products.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = products
            .iter()
            .map(|product| product.uuid.into_uuid())
            .collect();

        let mut images = self.list_images(tx, &uuids).await?;

        let tag_rows: Vec<(Uuid, Uuid, String)> = query_as(LIST_PRODUCT_TAGS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut tags: FxHashMap<Uuid, Vec<TagRecord>> = FxHashMap::default();

        for (product, uuid, name) in tag_rows {
            tags.entry(product).or_default().push(TagRecord {
                uuid: TagUuid::from_uuid(uuid),
                name,
            });
        }

        let spec_rows: Vec<(Uuid, Uuid, String, String)> =
            query_as(LIST_PRODUCT_SPECIFICATIONS_SQL)
                .bind(&uuids)
                .fetch_all(&mut **tx)
                .await?;

        let mut specifications: FxHashMap<Uuid, Vec<SpecificationRecord>> = FxHashMap::default();

        for (product, uuid, name, value) in spec_rows {
            specifications
                .entry(product)
                .or_default()
                .push(SpecificationRecord {
                    uuid: uuid.into(),
                    name,
                    value,
                });
        }

        for product in products.iter_mut() {
            let uuid = product.uuid.into_uuid();

            product.images = images.remove(&uuid).unwrap_or_default();
            product.tags = tags.remove(&uuid).unwrap_or_default();
            product.specifications = specifications.remove(&uuid).unwrap_or_default();
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            category_uuid: row
                .try_get::<Option<Uuid>, _>("category_uuid")?
                .map(CategoryUuid::from_uuid),
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            full_description: row.try_get("full_description")?,
            price: row.try_get("price")?,
            sale_price: row.try_get("sale_price")?,
            count: row.try_get("count")?,
            free_delivery: row.try_get("free_delivery")?,
            limited_edition: row.try_get("limited_edition")?,
            rating: row.try_get("rating")?,
            active: row.try_get("active")?,
            reviews_count: row.try_get("reviews_count")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            images: Vec::new(),
            tags: Vec::new(),
            specifications: Vec::new(),
        })
    }
}

fn new_uuids(count: usize) -> Vec<Uuid> {
    (0..count).map(|_| Uuid::now_v7()).collect()
}

/// Escape `LIKE` metacharacters and wrap the term for a substring match.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);

    pattern.push('%');

    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(ch);
    }

    pattern.push('%');

    pattern
}
