//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db, PoolSettings},
    domain::{
        carts::{CartsService, MemorySessionStore, PgSessionStore, SessionCartsService, SessionStore},
        categories::{CategoriesService, PgCategoriesService},
        orders::{OrdersService, PgOrdersService},
        pricing::{FirstSalePricing, PricingResolver},
        products::{PgProductsService, ProductsService},
        profiles::{PgProfilesService, ProfilesService},
        reviews::{PgReviewsService, ReviewsService},
        sales::{PgSalesService, SalesService},
        tags::{PgTagsService, TagsService},
        users::{PgUsersService, UsersService},
    },
    health::{HealthService, PgHealthService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

/// Where session carts are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub tags: Arc<dyn TagsService>,
    pub sales: Arc<dyn SalesService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub users: Arc<dyn UsersService>,
    pub profiles: Arc<dyn ProfilesService>,
    pub auth: Arc<dyn AuthService>,
    pub health: Arc<dyn HealthService>,
}

impl AppContext {
    /// Connect, migrate and wire every service.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or applying
    /// migrations fails.
    pub async fn from_database_url(
        url: &str,
        pool: PoolSettings,
        sessions: SessionBackend,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(url, pool)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migration)?;

        let db = Db::new(pool.clone());

        let store: Arc<dyn SessionStore> = match sessions {
            SessionBackend::Postgres => Arc::new(PgSessionStore::new(db.clone())),
            SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        };

        let pricing: Arc<dyn PricingResolver> = Arc::new(FirstSalePricing);
        let products: Arc<dyn ProductsService> = Arc::new(PgProductsService::new(db.clone()));

        Ok(Self {
            carts: Arc::new(SessionCartsService::new(
                store,
                products.clone(),
                pricing.clone(),
            )),
            orders: Arc::new(PgOrdersService::new(db.clone(), pricing)),
            products,
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            tags: Arc::new(PgTagsService::new(db.clone())),
            sales: Arc::new(PgSalesService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            profiles: Arc::new(PgProfilesService::new(db.clone())),
            health: Arc::new(PgHealthService::new(db)),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
