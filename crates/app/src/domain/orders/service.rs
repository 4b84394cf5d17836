//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        orders::{
            data::{NewOrderLine, OrderUpdate},
            errors::OrdersServiceError,
            records::{OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        pricing::PricingResolver,
        products::repository::PgProductsRepository,
        profiles::records::ProfileUuid,
        users::records::UserUuid,
    },
};

/// Largest quantity a single line may carry (`order_product_counts.count` is
/// an `INTEGER`).
pub const MAX_LINE_COUNT: u32 = i32::MAX.unsigned_abs();

/// Largest total an order can store (`orders.total_cost` is `NUMERIC(10, 2)`),
/// i.e. `99999999.99`.
pub const MAX_TOTAL_COST: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
    products: PgProductsRepository,
    pricing: Arc<dyn PricingResolver>,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, pricing: Arc<dyn PricingResolver>) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
            products: PgProductsRepository::new(),
            pricing,
        }
    }

    async fn profile(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user: UserUuid,
        missing: OrdersServiceError,
    ) -> Result<ProfileUuid, OrdersServiceError> {
        self.repository
            .find_profile_uuid(tx, user)
            .await?
            .ok_or(missing)
    }
}

impl std::fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.create_order",
        skip(self, lines),
        fields(user_uuid = %user, line_count = lines.len(), order_uuid = tracing::field::Empty),
        err
    )]
    async fn create_order(
        &self,
        user: UserUuid,
        lines: Vec<NewOrderLine>,
    ) -> Result<OrderUuid, OrdersServiceError> {
        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        if lines
            .iter()
            .any(|line| line.count == 0 || line.count > MAX_LINE_COUNT)
        {
            return Err(OrdersServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin_transaction().await?;

        let profile = self
            .profile(&mut tx, user, OrdersServiceError::ProfileNotFound)
            .await?;

        let order = OrderUuid::new();

        tracing::Span::current().record("order_uuid", tracing::field::display(order));

        self.repository.create_order(&mut tx, order, profile).await?;

        let mut total = Decimal::ZERO;

        for line in &lines {
            let product = match self.products.get_product(&mut tx, line.product_uuid).await {
                Ok(product) => product,
                Err(sqlx::Error::RowNotFound) => return Err(OrdersServiceError::ProductNotFound),
                Err(error) => return Err(error.into()),
            };

            let price = self.pricing.effective_price(&product);

            self.repository
                .add_line(&mut tx, order, product.uuid, line.count)
                .await?;

            total = price
                .checked_mul(Decimal::from(line.count))
                .and_then(|line_total| total.checked_add(line_total))
                .filter(|total| *total <= MAX_TOTAL_COST)
                .ok_or(OrdersServiceError::InvalidData)?;
        }

        self.repository.set_total(&mut tx, order, total).await?;

        tx.commit().await?;

        info!(order_uuid = %order, %total, "created order");

        Ok(order)
    }

    #[tracing::instrument(
        name = "orders.service.update_order",
        skip(self, update),
        fields(user_uuid = %user, order_uuid = %order),
        err
    )]
    async fn update_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderUuid, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let profile = self
            .profile(&mut tx, user, OrdersServiceError::NotFound)
            .await?;

        let updated = self
            .repository
            .update_order(&mut tx, order, profile, &update)
            .await?;

        if !updated {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(order)
    }

    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let Some(profile) = self.repository.find_profile_uuid(&mut tx, user).await? else {
            return Ok(Vec::new());
        };

        let orders = self.repository.list_orders(&mut tx, profile).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let profile = self
            .profile(&mut tx, user, OrdersServiceError::NotFound)
            .await?;

        let order = self.repository.get_order(&mut tx, order, profile).await?;

        tx.commit().await?;

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Atomically create an order for the user's profile from the given lines,
    /// freezing its total at current effective prices.
    async fn create_order(
        &self,
        user: UserUuid,
        lines: Vec<NewOrderLine>,
    ) -> Result<OrderUuid, OrdersServiceError>;

    /// Apply a partial update to one of the user's orders and mark it in progress.
    ///
    /// Orders owned by someone else are reported as not found.
    async fn update_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderUuid, OrdersServiceError>;

    /// The user's orders, newest first.
    async fn list_orders(&self, user: UserUuid) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
