//! Sales Repository

use jiff_sqlx::Date as SqlxDate;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    products::{records::ProductUuid, repository::PgProductsRepository},
    sales::{
        data::NewSale,
        records::{SaleRecord, SaleUuid},
    },
};

const CREATE_SALE_SQL: &str = include_str!("sql/create_sale.sql");
const SELECT_SALES_SQL: &str = include_str!("sql/select_sales.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSalesRepository {
    products: PgProductsRepository,
}

impl PgSalesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            products: PgProductsRepository::new(),
        }
    }

    #[tracing::instrument(
        name = "sales.repository.create_sale",
        skip(self, tx, sale),
        fields(sale_uuid = %sale.uuid, product_uuid = %sale.product_uuid),
        err
    )]
    pub(crate) async fn create_sale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sale: &NewSale,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_SALE_SQL)
            .bind(sale.uuid.into_uuid())
            .bind(sale.product_uuid.into_uuid())
            .bind(sale.sale_price)
            .bind(SqlxDate::from(sale.date_from))
            .bind(sale.date_to.map(SqlxDate::from))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_sale(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sale: SaleUuid,
    ) -> Result<SaleRecord, sqlx::Error> {
        let sale = query_as::<_, SaleRecord>(&format!("{SELECT_SALES_SQL} WHERE s.uuid = $1"))
            .bind(sale.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let mut sales = vec![sale];

        self.load_images(tx, &mut sales).await?;

        sales.pop().ok_or(sqlx::Error::RowNotFound)
    }

    pub(crate) async fn list_sales(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<SaleRecord>, sqlx::Error> {
        let mut sales = query_as::<_, SaleRecord>(&format!("{SELECT_SALES_SQL} ORDER BY s.uuid"))
            .fetch_all(&mut **tx)
            .await?;

        self.load_images(tx, &mut sales).await?;

        Ok(sales)
    }

    async fn load_images(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sales: &mut [SaleRecord],
    ) -> Result<(), sqlx::Error> {
        if sales.is_empty() {
            return Ok(());
        }

        let products: Vec<Uuid> = sales
            .iter()
            .map(|sale| sale.product_uuid.into_uuid())
            .collect();

        let images = self.products.list_images(tx, &products).await?;

        for sale in sales.iter_mut() {
            sale.images = images
                .get(&sale.product_uuid.into_uuid())
                .cloned()
                .unwrap_or_default();
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for SaleRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SaleUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            sale_price: row.try_get("sale_price")?,
            date_from: row.try_get::<SqlxDate, _>("date_from")?.to_jiff(),
            date_to: row
                .try_get::<Option<SqlxDate>, _>("date_to")?
                .map(SqlxDate::to_jiff),
            product_title: row.try_get("product_title")?,
            product_price: row.try_get("product_price")?,
            images: Vec::new(),
        })
    }
}
