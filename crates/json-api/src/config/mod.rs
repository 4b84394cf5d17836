//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig, logging::LoggingConfig, observability::ObservabilityConfig,
    server::ServerRuntimeConfig, session::SessionConfig,
};

pub(crate) mod db;
pub(crate) mod logging;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod session;

/// Marketplace JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "marketplace-json", about = "Marketplace JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session cart settings.
    #[command(flatten)]
    pub session: SessionConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use marketplace_app::database::PoolSettings;

    use super::*;
    use crate::config::{logging::LogFormat, session::SessionBackendKind};

    #[test]
    fn defaults_apply_when_only_the_database_is_given() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "marketplace-json",
            "--database-url",
            "postgres://localhost/marketplace",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert!(matches!(config.logging.log_format, LogFormat::Compact));
        assert!(!config.observability.otel_enabled);
        assert!(matches!(
            config.session.session_backend,
            SessionBackendKind::Postgres
        ));
        assert_eq!(config.session.session_cookie_name, "sessionid");
        assert_eq!(config.database.pool_settings(), PoolSettings::default());
        assert_eq!(config.session.idle_timeout(), Duration::from_secs(14 * 24 * 3_600));
        assert_eq!(config.session.purge_interval(), Duration::from_secs(3_600));

        Ok(())
    }

    #[test]
    fn pool_and_logging_flags_are_parsed() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "marketplace-json",
            "--database-url",
            "postgres://localhost/marketplace",
            "--database-max-connections",
            "32",
            "--database-acquire-timeout-ms",
            "250",
            "--log-format",
            "json",
        ])?;

        let pool = config.database.pool_settings();

        assert_eq!(pool.max_connections, 32);
        assert_eq!(pool.acquire_timeout, Duration::from_millis(250));
        assert_eq!(config.logging.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn empty_pools_are_rejected() {
        let parsed = ServerConfig::try_parse_from([
            "marketplace-json",
            "--database-url",
            "postgres://localhost/marketplace",
            "--database-max-connections",
            "0",
        ]);

        assert!(parsed.is_err(), "a pool without connections must be rejected");
    }

    #[test]
    fn session_expiry_flags_are_parsed() -> Result<(), clap::Error> {
        let config = ServerConfig::try_parse_from([
            "marketplace-json",
            "--database-url",
            "postgres://localhost/marketplace",
            "--session-idle-timeout-hours",
            "2",
            "--session-purge-interval-minutes",
            "5",
        ])?;

        assert_eq!(config.session.idle_timeout(), Duration::from_secs(7_200));
        assert_eq!(config.session.purge_interval(), Duration::from_secs(300));

        Ok(())
    }
}
