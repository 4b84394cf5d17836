//! Session stores.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{query, query_scalar, types::Json};
use tokio::sync::RwLock;

use crate::{
    database::Db,
    domain::carts::{
        errors::SessionStoreError,
        session::{SessionCart, SessionKey},
    },
};

const GET_SESSION_CART_SQL: &str = include_str!("sql/get_session_cart.sql");
const UPSERT_SESSION_CART_SQL: &str = include_str!("sql/upsert_session_cart.sql");
const DELETE_SESSION_SQL: &str = include_str!("sql/delete_session.sql");
const DELETE_IDLE_SESSIONS_SQL: &str = include_str!("sql/delete_idle_sessions.sql");

/// Key-value storage for session carts. Writes are last-write-wins.
///
/// Sessions live until deleted or purged; nothing expires on its own. A session
/// counts as idle from its last write, reads do not refresh it.
#[automock]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &SessionKey) -> Result<Option<SessionCart>, SessionStoreError>;

    async fn set(&self, key: &SessionKey, cart: &SessionCart) -> Result<(), SessionStoreError>;

    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError>;

    /// Drop sessions not written to for longer than `idle_for`, returning how
    /// many went.
    async fn purge_idle(&self, idle_for: Duration) -> Result<u64, SessionStoreError>;
}

#[derive(Debug)]
struct StoredSession {
    cart: SessionCart,
    written_at: Instant,
}

/// Process-local session store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<FxHashMap<SessionKey, StoredSession>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &SessionKey) -> Result<Option<SessionCart>, SessionStoreError> {
        let sessions = self.sessions.read().await;

        Ok(sessions.get(key).map(|stored| stored.cart.clone()))
    }

    async fn set(&self, key: &SessionKey, cart: &SessionCart) -> Result<(), SessionStoreError> {
        let stored = StoredSession {
            cart: cart.saved_copy(),
            written_at: Instant::now(),
        };

        self.sessions.write().await.insert(key.clone(), stored);

        Ok(())
    }

    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(key);

        Ok(())
    }

    async fn purge_idle(&self, idle_for: Duration) -> Result<u64, SessionStoreError> {
        // Nothing can be older than the process clock allows.
        let Some(cutoff) = Instant::now().checked_sub(idle_for) else {
            return Ok(0);
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_, stored| stored.written_at >= cutoff);

        Ok(u64::try_from(before.saturating_sub(sessions.len())).unwrap_or(u64::MAX))
    }
}

/// Session store backed by the `sessions` table.
#[derive(Debug, Clone)]
pub struct PgSessionStore {
    db: Db,
}

impl PgSessionStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn get(&self, key: &SessionKey) -> Result<Option<SessionCart>, SessionStoreError> {
        let cart: Option<Json<SessionCart>> = query_scalar(GET_SESSION_CART_SQL)
            .bind(key.as_str())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(cart.map(|Json(cart)| cart))
    }

    #[tracing::instrument(name = "carts.store.set", skip(self, key, cart), err)]
    async fn set(&self, key: &SessionKey, cart: &SessionCart) -> Result<(), SessionStoreError> {
        query(UPSERT_SESSION_CART_SQL)
            .bind(key.as_str())
            .bind(Json(cart))
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    async fn delete(&self, key: &SessionKey) -> Result<(), SessionStoreError> {
        query(DELETE_SESSION_SQL)
            .bind(key.as_str())
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "carts.store.purge_idle", skip(self), err)]
    async fn purge_idle(&self, idle_for: Duration) -> Result<u64, SessionStoreError> {
        let result = query(DELETE_IDLE_SESSIONS_SQL)
            .bind(idle_for)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected())
    }
}
