//! App Router

use salvo::Router;

use crate::{
    auth, carts, categories, orders, products, profile, reviews, sales, sessions, tags,
};

/// Every `/api` route.
pub(crate) fn app_router() -> Router {
    Router::with_path("api")
        .push(Router::with_path("catalog").get(products::catalog::handler))
        .push(
            Router::with_path("products")
                .push(Router::with_path("popular").get(products::popular::handler))
                .push(Router::with_path("limited").get(products::limited::handler)),
        )
        .push(Router::with_path("banners").get(products::banners::handler))
        .push(
            Router::with_path("product/{product}")
                .get(products::get::handler)
                .push(
                    Router::with_path("reviews")
                        .hoop(auth::middleware::handler)
                        .post(reviews::create::handler),
                ),
        )
        .push(Router::with_path("categories").get(categories::index::handler))
        .push(Router::with_path("tags").get(tags::index::handler))
        .push(Router::with_path("sales").get(sales::index::handler))
        .push(
            Router::with_path("cart")
                .hoop(sessions::middleware::handler)
                .get(carts::get::handler)
                .post(carts::create::handler)
                .delete(carts::delete::handler),
        )
        .push(
            Router::with_path("orders")
                .hoop(auth::middleware::handler)
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .patch(orders::update::handler),
                ),
        )
        .push(
            Router::with_path("profile")
                .hoop(auth::middleware::handler)
                .get(profile::get::handler)
                .post(profile::update::handler),
        )
}
