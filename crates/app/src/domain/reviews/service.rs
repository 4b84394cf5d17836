//! Reviews service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::records::ProductUuid,
        reviews::{
            data::{NewReview, RATE_RANGE},
            errors::ReviewsServiceError,
            records::ReviewRecord,
            repository::PgReviewsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    repository: PgReviewsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn create_review(
        &self,
        product: ProductUuid,
        review: NewReview,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        if !RATE_RANGE.contains(&review.rate) {
            return Err(ReviewsServiceError::InvalidRate(review.rate));
        }

        let mut tx = self.db.begin_transaction().await?;

        self.repository
            .create_review(&mut tx, product, &review)
            .await?;

        let reviews = self.repository.list_reviews(&mut tx, product).await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn list_reviews(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let reviews = self.repository.list_reviews(&mut tx, product).await?;

        tx.commit().await?;

        Ok(reviews)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Record a review and return every review of the product, oldest first.
    async fn create_review(
        &self,
        product: ProductUuid,
        review: NewReview,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;

    async fn list_reviews(
        &self,
        product: ProductUuid,
    ) -> Result<Vec<ReviewRecord>, ReviewsServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::products::{ProductsService, data::NewProduct},
        test::TestContext,
    };

    use super::*;

    #[tokio::test]
    async fn create_review_returns_all_reviews_oldest_first() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(NewProduct::active("Phone", Decimal::ONE))
            .await?;

        ctx.reviews
            .create_review(product.uuid, NewReview::new("Ann", "ann@example.com", "Good", 4))
            .await?;

        let reviews = ctx
            .reviews
            .create_review(product.uuid, NewReview::new("Bob", "bob@example.com", "Fine", 3))
            .await?;

        let authors: Vec<&str> = reviews.iter().map(|r| r.author.as_str()).collect();

        assert_eq!(authors, vec!["Ann", "Bob"]);
        assert!(reviews.iter().all(|r| r.product_uuid == product.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn create_review_for_unknown_product_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .reviews
            .create_review(
                ProductUuid::new(),
                NewReview::new("Ann", "ann@example.com", "Good", 4),
            )
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_review_rejects_out_of_range_rate() {
        let ctx = TestContext::new().await;

        let result = ctx
            .reviews
            .create_review(
                ProductUuid::new(),
                NewReview::new("Ann", "ann@example.com", "Good", 6),
            )
            .await;

        assert!(
            matches!(result, Err(ReviewsServiceError::InvalidRate(6))),
            "expected InvalidRate(6), got {result:?}"
        );
    }
}
