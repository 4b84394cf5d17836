//! Effective price resolution.
//!
//! Which sale applies to a product is decided once, by the
//! `product_first_sales` view the catalog queries join: the oldest sale by
//! uuid, whatever its dates. Records arrive here with that sale price already
//! attached, so resolving a price never touches storage.

use mockall::automock;
use rust_decimal::Decimal;

use crate::domain::products::records::ProductRecord;

/// The price a product sells at: its sale price when one exists, else the list price.
#[must_use]
pub fn resolve_price(list_price: Decimal, sale_price: Option<Decimal>) -> Decimal {
    sale_price.unwrap_or(list_price)
}

#[automock]
pub trait PricingResolver: Send + Sync {
    /// Current unit price of `product`.
    fn effective_price(&self, product: &ProductRecord) -> Decimal;
}

/// Prices products from the sale loaded alongside them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSalePricing;

impl PricingResolver for FirstSalePricing {
    fn effective_price(&self, product: &ProductRecord) -> Decimal {
        product.listed_price()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            products::{ProductsService, data::NewProduct},
            sales::{SalesService, data::NewSale},
        },
        test::{TestContext, helpers::product_record},
    };

    use super::*;

    #[test]
    fn sale_price_wins_over_list_price() {
        assert_eq!(
            resolve_price(Decimal::new(10_000, 2), Some(Decimal::new(8_000, 2))),
            Decimal::new(8_000, 2)
        );
    }

    #[test]
    fn list_price_applies_without_sale() {
        assert_eq!(
            resolve_price(Decimal::new(5_000, 2), None),
            Decimal::new(5_000, 2)
        );
    }

    #[test]
    fn loaded_sale_price_is_used() {
        let mut product = product_record("Phone", Decimal::new(10_000, 2));

        assert_eq!(FirstSalePricing.effective_price(&product), Decimal::new(10_000, 2));

        product.sale_price = Some(Decimal::new(8_000, 2));

        assert_eq!(FirstSalePricing.effective_price(&product), Decimal::new(8_000, 2));
    }

    #[tokio::test]
    async fn oldest_sale_prices_reloaded_products() -> TestResult {
        let ctx = TestContext::new().await;

        let product = ctx
            .products
            .create_product(NewProduct::active("Phone", Decimal::new(10_000, 2)))
            .await?;

        assert_eq!(FirstSalePricing.effective_price(&product), Decimal::new(10_000, 2));

        ctx.sales
            .create_sale(NewSale::for_product(product.uuid, Decimal::new(8_000, 2)))
            .await?;
        ctx.sales
            .create_sale(NewSale::for_product(product.uuid, Decimal::new(6_000, 2)))
            .await?;

        let reloaded = ctx.products.get_product(product.uuid).await?;

        assert_eq!(FirstSalePricing.effective_price(&reloaded), Decimal::new(8_000, 2));

        Ok(())
    }
}
