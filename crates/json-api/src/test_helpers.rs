//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use marketplace_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        carts::{MockCartsService, session::SessionKey},
        categories::MockCategoriesService,
        orders::MockOrdersService,
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
        profiles::MockProfilesService,
        reviews::MockReviewsService,
        sales::MockSalesService,
        tags::MockTagsService,
        users::{MockUsersService, records::UserUuid},
    },
    health::MockHealthService,
};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_SESSION: &str = "test-session";

/// One mock per service. Mocks without expectations fail on any call.
#[derive(Default)]
pub(crate) struct MockServices {
    pub(crate) products: MockProductsService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) tags: MockTagsService,
    pub(crate) sales: MockSalesService,
    pub(crate) reviews: MockReviewsService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
    pub(crate) users: MockUsersService,
    pub(crate) profiles: MockProfilesService,
    pub(crate) auth: MockAuthService,
    pub(crate) health: MockHealthService,
}

pub(crate) fn state(services: MockServices) -> Arc<State> {
    State::shared(
        AppContext {
            products: Arc::new(services.products),
            categories: Arc::new(services.categories),
            tags: Arc::new(services.tags),
            sales: Arc::new(services.sales),
            reviews: Arc::new(services.reviews),
            carts: Arc::new(services.carts),
            orders: Arc::new(services.orders),
            users: Arc::new(services.users),
            profiles: Arc::new(services.profiles),
            auth: Arc::new(services.auth),
            health: Arc::new(services.health),
        },
        "sessionid",
    )
}

pub(crate) fn test_session() -> SessionKey {
    SessionKey::parse(TEST_SESSION).unwrap_or_else(SessionKey::generate)
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_session(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_session_key(test_session());
    ctrl.call_next(req, depot, res).await;
}

/// A service with state only, for anonymous endpoints.
pub(crate) fn public_service(services: MockServices, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state(services))).push(route))
}

/// A service whose requests are authenticated as [`TEST_USER_UUID`].
pub(crate) fn user_service(services: MockServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(services)))
            .hoop(inject_user)
            .push(route),
    )
}

/// A service whose requests carry the [`TEST_SESSION`] key.
pub(crate) fn session_service(services: MockServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state(services)))
            .hoop(inject_session)
            .push(route),
    )
}

pub(crate) fn make_product(title: &str, price: Decimal) -> ProductRecord {
    ProductRecord {
        uuid: ProductUuid::new(),
        category_uuid: None,
        title: title.to_string(),
        description: format!("{title} description"),
        full_description: String::new(),
        price,
        sale_price: None,
        count: 3,
        free_delivery: true,
        limited_edition: false,
        rating: Decimal::new(45, 1),
        active: true,
        reviews_count: 0,
        created_at: Timestamp::UNIX_EPOCH,
        images: Vec::new(),
        tags: Vec::new(),
        specifications: Vec::new(),
    }
}
