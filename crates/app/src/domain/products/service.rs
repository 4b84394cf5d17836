//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductFilter, ProductSort},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
        sort: Option<ProductSort>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self
            .repository
            .list_products(&mut tx, &filter, sort)
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_products(
        &self,
        products: Vec<ProductUuid>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.get_products(&mut tx, &products).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_limited(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_limited(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_popular(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_popular(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_banners(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let mut products = self.repository.list_favourite_limited(&mut tx).await?;

        if products.is_empty() {
            debug!("no limited products in favourite categories, using every limited product");

            products = self.repository.list_limited(&mut tx).await?;
        }

        tx.commit().await?;

        Ok(products)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository.create_product(&mut tx, &product).await?;

        let created = self.repository.get_product(&mut tx, product.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Active products matching the filter, in the requested order.
    async fn list_products(
        &self,
        filter: ProductFilter,
        sort: Option<ProductSort>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Retrieve several products at once, ordered by uuid. Unknown uuids are skipped.
    async fn get_products(
        &self,
        products: Vec<ProductUuid>,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Limited edition products.
    async fn list_limited(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Active products, most reviewed first.
    async fn list_popular(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Limited edition products of favourite categories, or every limited
    /// edition product when no favourite category has any.
    async fn list_banners(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{
        domain::{
            categories::{CategoriesService, data::NewCategory},
            products::data::{NewProductImage, NewSpecification, SortDirection, SortField},
            reviews::{ReviewsService, data::NewReview},
            sales::{SalesService, data::NewSale},
            tags::{TagsService, data::NewTag},
        },
        test::TestContext,
    };

    use super::*;

    fn product(title: &str, price: i64) -> NewProduct {
        NewProduct::active(title, Decimal::new(price, 2))
    }

    #[tokio::test]
    async fn create_product_returns_children() -> TestResult {
        let ctx = TestContext::new().await;

        let mut new = product("Phone", 99_900);
        new.images.push(NewProductImage {
            name: "front".to_string(),
            src: "/media/phone.png".to_string(),
        });
        new.specifications.push(NewSpecification {
            name: "Weight".to_string(),
            value: "180g".to_string(),
        });

        let created = ctx.products.create_product(new.clone()).await?;

        assert_eq!(created.uuid, new.uuid);
        assert_eq!(created.price, Decimal::new(99_900, 2));
        assert_eq!(created.images.len(), 1);
        assert_eq!(created.specifications.len(), 1);
        assert_eq!(created.sale_price, None);
        assert_eq!(created.reviews_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let new = product("Phone", 100);

        ctx.products.create_product(new.clone()).await?;

        let result = ctx.products.create_product(new).await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_products_skips_inactive_products() -> TestResult {
        let ctx = TestContext::new().await;

        let active = ctx.products.create_product(product("Active", 100)).await?;

        let mut hidden = product("Hidden", 100);
        hidden.active = false;
        ctx.products.create_product(hidden).await?;

        let products = ctx
            .products
            .list_products(ProductFilter::default(), None)
            .await?;

        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![active.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_name_and_price() -> TestResult {
        let ctx = TestContext::new().await;

        let cheap = ctx.products.create_product(product("Red phone", 5_000)).await?;
        ctx.products.create_product(product("Blue phone", 50_000)).await?;
        ctx.products.create_product(product("Red chair", 5_000)).await?;

        let products = ctx
            .products
            .list_products(
                ProductFilter {
                    name: Some("PHONE".to_string()),
                    max_price: Some(Decimal::new(10_000, 2)),
                    ..ProductFilter::default()
                },
                None,
            )
            .await?;

        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![cheap.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_availability_tag_and_category() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx
            .categories
            .create_category(NewCategory::active("Phones"))
            .await?;
        let tag = ctx.tags.create_tag(NewTag::named("sale")).await?;

        let mut wanted = product("Stocked", 100);
        wanted.count = 3;
        wanted.category_uuid = Some(category.uuid);
        let wanted = ctx.products.create_product(wanted).await?;
        ctx.tags.tag_product(wanted.uuid, tag.uuid).await?;

        let mut empty = product("Sold out", 100);
        empty.category_uuid = Some(category.uuid);
        let empty = ctx.products.create_product(empty).await?;
        ctx.tags.tag_product(empty.uuid, tag.uuid).await?;

        let mut elsewhere = product("Elsewhere", 100);
        elsewhere.count = 3;
        ctx.products.create_product(elsewhere).await?;

        let products = ctx
            .products
            .list_products(
                ProductFilter {
                    available: true,
                    tags: smallvec![tag.uuid],
                    category: Some(category.uuid),
                    ..ProductFilter::default()
                },
                None,
            )
            .await?;

        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![wanted.uuid]);
        assert_eq!(products.first().map(|p| p.tags.len()), Some(1));

        Ok(())
    }

    #[tokio::test]
    async fn list_products_sorts_by_price() -> TestResult {
        let ctx = TestContext::new().await;

        let dear = ctx.products.create_product(product("Dear", 900)).await?;
        let cheap = ctx.products.create_product(product("Cheap", 100)).await?;

        let products = ctx
            .products
            .list_products(
                ProductFilter::default(),
                Some(ProductSort {
                    field: SortField::Price,
                    direction: SortDirection::Descending,
                }),
            )
            .await?;

        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![dear.uuid, cheap.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn sale_price_comes_from_first_sale() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx.products.create_product(product("Phone", 10_000)).await?;

        ctx.sales
            .create_sale(NewSale::for_product(created.uuid, Decimal::new(8_000, 2)))
            .await?;
        ctx.sales
            .create_sale(NewSale::for_product(created.uuid, Decimal::new(6_000, 2)))
            .await?;

        let fetched = ctx.products.get_product(created.uuid).await?;

        assert_eq!(fetched.sale_price, Some(Decimal::new(8_000, 2)));
        assert_eq!(fetched.listed_price(), Decimal::new(8_000, 2));

        Ok(())
    }

    #[tokio::test]
    async fn list_popular_orders_by_review_count() -> TestResult {
        let ctx = TestContext::new().await;

        let quiet = ctx.products.create_product(product("Quiet", 100)).await?;
        let loud = ctx.products.create_product(product("Loud", 100)).await?;

        for _ in 0..2 {
            ctx.reviews
                .create_review(loud.uuid, NewReview::new("Ann", "ann@example.com", "Great", 5))
                .await?;
        }

        let products = ctx.products.list_popular().await?;
        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![loud.uuid, quiet.uuid]);
        assert_eq!(products.first().map(|p| p.reviews_count), Some(2));

        Ok(())
    }

    #[tokio::test]
    async fn list_banners_falls_back_to_limited_products() -> TestResult {
        let ctx = TestContext::new().await;

        let mut limited = product("Limited", 100);
        limited.limited_edition = true;
        let limited = ctx.products.create_product(limited).await?;

        ctx.products.create_product(product("Regular", 100)).await?;

        let banners = ctx.products.list_banners().await?;
        let uuids: Vec<ProductUuid> = banners.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![limited.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_banners_prefers_favourite_categories() -> TestResult {
        let ctx = TestContext::new().await;

        let mut favourite = NewCategory::active("Favourite");
        favourite.favourite = true;
        let favourite = ctx.categories.create_category(favourite).await?;

        let mut featured = product("Featured", 100);
        featured.limited_edition = true;
        featured.category_uuid = Some(favourite.uuid);
        let featured = ctx.products.create_product(featured).await?;

        let mut other = product("Other", 100);
        other.limited_edition = true;
        ctx.products.create_product(other).await?;

        let banners = ctx.products.list_banners().await?;
        let uuids: Vec<ProductUuid> = banners.iter().map(|p| p.uuid).collect();

        assert_eq!(uuids, vec![featured.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn get_products_skips_unknown_and_orders_by_uuid() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.products.create_product(product("First", 100)).await?;
        let second = ctx.products.create_product(product("Second", 100)).await?;

        let products = ctx
            .products
            .get_products(vec![second.uuid, ProductUuid::new(), first.uuid])
            .await?;

        let uuids: Vec<ProductUuid> = products.iter().map(|p| p.uuid).collect();

        let mut expected = vec![first.uuid, second.uuid];
        expected.sort();

        assert_eq!(uuids, expected);

        Ok(())
    }
}
