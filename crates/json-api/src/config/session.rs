//! Session Config

use std::time::Duration;

use clap::{Args, ValueEnum};
use marketplace_app::context::SessionBackend;

/// Session store selection.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SessionBackendKind {
    /// `sessions` table in the application database.
    Postgres,

    /// Process memory; carts are lost on restart.
    Memory,
}

impl From<SessionBackendKind> for SessionBackend {
    fn from(kind: SessionBackendKind) -> Self {
        match kind {
            SessionBackendKind::Postgres => Self::Postgres,
            SessionBackendKind::Memory => Self::Memory,
        }
    }
}

/// Session settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Where session carts are stored (postgres, memory)
    #[arg(long, env = "SESSION_BACKEND", value_enum, default_value_t = SessionBackendKind::Postgres)]
    pub session_backend: SessionBackendKind,

    /// Cookie carrying the session key
    #[arg(long, env = "SESSION_COOKIE_NAME", default_value = "sessionid")]
    pub session_cookie_name: String,

    /// Hours without a cart write after which a session is purged
    #[arg(
        long,
        env = "SESSION_IDLE_TIMEOUT_HOURS",
        default_value_t = 336,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub session_idle_timeout_hours: u64,

    /// Minutes between idle session purges
    #[arg(
        long,
        env = "SESSION_PURGE_INTERVAL_MINUTES",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub session_purge_interval_minutes: u64,
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_hours.saturating_mul(3_600))
    }

    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.session_purge_interval_minutes.saturating_mul(60))
    }
}
