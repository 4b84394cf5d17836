//! Sales service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::sales::{
        data::NewSale, errors::SalesServiceError, records::SaleRecord,
        repository::PgSalesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgSalesService {
    db: Db,
    repository: PgSalesRepository,
}

impl PgSalesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSalesRepository::new(),
        }
    }
}

#[async_trait]
impl SalesService for PgSalesService {
    async fn create_sale(&self, sale: NewSale) -> Result<SaleRecord, SalesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        self.repository.create_sale(&mut tx, &sale).await?;

        let created = self.repository.get_sale(&mut tx, sale.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_sales(&self) -> Result<Vec<SaleRecord>, SalesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let sales = self.repository.list_sales(&mut tx).await?;

        tx.commit().await?;

        Ok(sales)
    }
}

#[automock]
#[async_trait]
pub trait SalesService: Send + Sync {
    async fn create_sale(&self, sale: NewSale) -> Result<SaleRecord, SalesServiceError>;

    /// Every sale with its product's title, list price and images.
    async fn list_sales(&self) -> Result<Vec<SaleRecord>, SalesServiceError>;
}
