//! Session cookie middleware.
//!
//! Resolves the visitor's session key from the session cookie, issuing a new
//! key (and cookie) when the request has none or an unusable one.

use std::sync::Arc;

use marketplace_app::domain::carts::session::SessionKey;
use salvo::{http::cookie::Cookie, prelude::*};
use tracing::debug;

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let cookie_name = match depot.obtain::<Arc<State>>() {
        Ok(state) => state.session_cookie.clone(),
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let existing = req
        .cookie(&cookie_name)
        .and_then(|cookie| SessionKey::parse(cookie.value()));

    let session = if let Some(session) = existing {
        session
    } else {
        let session = SessionKey::generate();

        debug!(session = %session, "issuing new session");

        res.add_cookie(
            Cookie::build((cookie_name, session.as_str().to_owned()))
                .http_only(true)
                .path("/")
                .build(),
        );

        session
    };

    depot.insert_session_key(session);

    ctrl.call_next(req, depot, res).await;
}
