//! State

use std::sync::Arc;

use marketplace_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Name of the cookie carrying the session key.
    pub(crate) session_cookie: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, session_cookie: impl Into<String>) -> Self {
        Self {
            app,
            session_cookie: session_cookie.into(),
        }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, session_cookie: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(app, session_cookie))
    }
}
