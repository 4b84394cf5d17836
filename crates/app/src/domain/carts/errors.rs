//! Carts service errors.

use thiserror::Error;

use crate::domain::products::ProductsServiceError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    #[error("product not found")]
    ProductNotFound,

    #[error("catalog error")]
    Products(#[source] ProductsServiceError),

    #[error("session store error")]
    Store(#[from] SessionStoreError),
}

impl From<ProductsServiceError> for CartsServiceError {
    fn from(error: ProductsServiceError) -> Self {
        match error {
            ProductsServiceError::NotFound => Self::ProductNotFound,
            other => Self::Products(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),

    #[error("session payload could not be encoded")]
    Encoding(#[from] serde_json::Error),
}
