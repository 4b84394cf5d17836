//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    orders::{
        data::OrderUpdate,
        records::{OrderProductRecord, OrderRecord, OrderUuid, STATUS_CREATED, STATUS_IN_PROGRESS},
    },
    pricing,
    products::records::ProductUuid,
    profiles::records::ProfileUuid,
    users::records::UserUuid,
};

const FIND_PROFILE_UUID_SQL: &str = include_str!("sql/find_profile_uuid.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_PRODUCT_COUNT_SQL: &str = include_str!("sql/create_order_product_count.sql");
const ATTACH_ORDER_PRODUCT_SQL: &str = include_str!("sql/attach_order_product.sql");
const SET_ORDER_TOTAL_SQL: &str = include_str!("sql/set_order_total.sql");
const UPDATE_ORDER_SQL: &str = include_str!("sql/update_order.sql");
const SELECT_ORDERS_SQL: &str = include_str!("sql/select_orders.sql");
const LIST_ORDER_PRODUCTS_SQL: &str = include_str!("sql/list_order_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_profile_uuid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<ProfileUuid>, sqlx::Error> {
        let uuid: Option<Uuid> = query_scalar(FIND_PROFILE_UUID_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        Ok(uuid.map(ProfileUuid::from_uuid))
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        profile: ProfileUuid,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(profile.into_uuid())
            .bind(STATUS_CREATED)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Record one purchased line and attach the product to the order.
    pub(crate) async fn add_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
        count: u32,
    ) -> Result<(), sqlx::Error> {
        let count = i32::try_from(count).map_err(|error| sqlx::Error::Encode(Box::new(error)))?;

        query(CREATE_ORDER_PRODUCT_COUNT_SQL)
            .bind(Uuid::now_v7())
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .bind(count)
            .execute(&mut **tx)
            .await?;

        query(ATTACH_ORDER_PRODUCT_SQL)
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn set_total(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        total: Decimal,
    ) -> Result<(), sqlx::Error> {
        query(SET_ORDER_TOTAL_SQL)
            .bind(order.into_uuid())
            .bind(total)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Apply the update to an order owned by `profile`. Returns `false` when
    /// no such order exists.
    #[tracing::instrument(
        name = "orders.repository.update_order",
        skip(self, tx, update),
        fields(order_uuid = %order, profile_uuid = %profile),
        err
    )]
    pub(crate) async fn update_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        profile: ProfileUuid,
        update: &OrderUpdate,
    ) -> Result<bool, sqlx::Error> {
        let updated: Option<Uuid> = query_scalar(UPDATE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(profile.into_uuid())
            .bind(update.delivery_type.as_deref())
            .bind(update.payment_type.as_deref())
            .bind(update.city.as_deref())
            .bind(update.address.as_deref())
            .bind(STATUS_IN_PROGRESS)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(updated.is_some())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        profile: ProfileUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let order = query_as::<_, OrderRecord>(&format!("{SELECT_ORDERS_SQL} AND o.uuid = $2"))
            .bind(profile.into_uuid())
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let mut orders = vec![order];

        self.load_products(tx, &mut orders).await?;

        orders.pop().ok_or(sqlx::Error::RowNotFound)
    }

    /// Orders of `profile`, newest first.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        profile: ProfileUuid,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let mut orders = query_as::<_, OrderRecord>(&format!(
            "{SELECT_ORDERS_SQL} ORDER BY o.created_at DESC, o.uuid DESC"
        ))
        .bind(profile.into_uuid())
        .fetch_all(&mut **tx)
        .await?;

        self.load_products(tx, &mut orders).await?;

        Ok(orders)
    }

    async fn load_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [OrderRecord],
    ) -> Result<(), sqlx::Error> {
        if orders.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let rows = query(LIST_ORDER_PRODUCTS_SQL)
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut products: FxHashMap<Uuid, Vec<OrderProductRecord>> = FxHashMap::default();

        for row in rows {
            let order: Uuid = row.try_get("order_uuid")?;

            products
                .entry(order)
                .or_default()
                .push(OrderProductRecord {
                    product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                    title: row.try_get("title")?,
                    price: pricing::resolve_price(row.try_get("price")?, row.try_get("sale_price")?),
                    count: row.try_get("count")?,
                });
        }

        for order in orders.iter_mut() {
            order.products = products
                .remove(&order.uuid.into_uuid())
                .unwrap_or_default();
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            profile_uuid: ProfileUuid::from_uuid(row.try_get("profile_uuid")?),
            delivery_type: row.try_get("delivery_type")?,
            payment_type: row.try_get("payment_type")?,
            total_cost: row.try_get("total_cost")?,
            status: row.try_get("status")?,
            city: row.try_get("city")?,
            address: row.try_get("address")?,
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            products: Vec::new(),
        })
    }
}
