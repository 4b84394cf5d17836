//! Carts service.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{
    carts::{
        errors::CartsServiceError,
        records::{Cart, CartLine},
        session::{SessionCart, SessionKey},
        store::SessionStore,
    },
    pricing::PricingResolver,
    products::{ProductsService, records::ProductUuid},
};

/// Carts kept in a [`SessionStore`], priced through a [`PricingResolver`] on every read.
#[derive(Clone)]
pub struct SessionCartsService {
    store: Arc<dyn SessionStore>,
    products: Arc<dyn ProductsService>,
    pricing: Arc<dyn PricingResolver>,
}

impl SessionCartsService {
    #[must_use]
    pub fn new(
        store: Arc<dyn SessionStore>,
        products: Arc<dyn ProductsService>,
        pricing: Arc<dyn PricingResolver>,
    ) -> Self {
        Self {
            store,
            products,
            pricing,
        }
    }

    async fn load(&self, session: &SessionKey) -> Result<SessionCart, CartsServiceError> {
        Ok(self.store.get(session).await?.unwrap_or_default())
    }

    async fn save(&self, session: &SessionKey, cart: &SessionCart) -> Result<(), CartsServiceError> {
        if cart.is_modified() {
            self.store.set(session, cart).await?;
        }

        Ok(())
    }

    async fn price(&self, cart: &SessionCart) -> Result<Cart, CartsServiceError> {
        if cart.is_empty() {
            return Ok(Cart::default());
        }

        let products = self.products.get_products(cart.products().collect()).await?;

        let mut lines = Vec::with_capacity(products.len());
        let mut total_price = Decimal::ZERO;

        for product in products {
            let Some(count) = cart.quantity(product.uuid) else {
                continue;
            };

            let price = self.pricing.effective_price(&product);
            let line_total = price * Decimal::from(count);

            total_price += line_total;

            lines.push(CartLine {
                product,
                count,
                price,
                total_price: line_total,
            });
        }

        Ok(Cart {
            lines,
            total_price,
            length: cart.length(),
        })
    }
}

impl std::fmt::Debug for SessionCartsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCartsService").finish_non_exhaustive()
    }
}

#[async_trait]
impl CartsService for SessionCartsService {
    async fn get_cart(&self, session: &SessionKey) -> Result<Cart, CartsServiceError> {
        let cart = self.load(session).await?;

        self.price(&cart).await
    }

    #[tracing::instrument(name = "carts.service.add_item", skip(self, session), err)]
    async fn add_item(
        &self,
        session: &SessionKey,
        product: ProductUuid,
        count: u32,
    ) -> Result<Cart, CartsServiceError> {
        if count == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        self.products.get_product(product).await?;

        let mut cart = self.load(session).await?;

        cart.add(product, count)?;

        self.save(session, &cart).await?;

        debug!(quantity = cart.quantity(product), "added cart item");

        self.price(&cart).await
    }

    #[tracing::instrument(name = "carts.service.remove_item", skip(self, session), err)]
    async fn remove_item(
        &self,
        session: &SessionKey,
        product: ProductUuid,
        count: Option<u32>,
    ) -> Result<(), CartsServiceError> {
        let mut cart = self.load(session).await?;

        match count {
            Some(count) => cart.decrement(product, count),
            None => cart.remove(product),
        }

        self.save(session, &cart).await
    }

    async fn clear_cart(&self, session: &SessionKey) -> Result<(), CartsServiceError> {
        let mut cart = self.load(session).await?;

        cart.clear();

        self.save(session, &cart).await
    }

    async fn purge_idle_sessions(&self, idle_for: Duration) -> Result<u64, CartsServiceError> {
        let purged = self.store.purge_idle(idle_for).await?;

        if purged > 0 {
            info!(purged, idle_secs = idle_for.as_secs(), "purged idle sessions");
        }

        Ok(purged)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Current cart contents, priced now.
    async fn get_cart(&self, session: &SessionKey) -> Result<Cart, CartsServiceError>;

    /// Add `count` units of `product` and return the updated cart.
    async fn add_item(
        &self,
        session: &SessionKey,
        product: ProductUuid,
        count: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Decrement by `count`, or drop the entry entirely when no count is given.
    async fn remove_item(
        &self,
        session: &SessionKey,
        product: ProductUuid,
        count: Option<u32>,
    ) -> Result<(), CartsServiceError>;

    async fn clear_cart(&self, session: &SessionKey) -> Result<(), CartsServiceError>;

    /// Forget carts whose session has not been written for longer than `idle_for`.
    async fn purge_idle_sessions(&self, idle_for: Duration) -> Result<u64, CartsServiceError>;
}
