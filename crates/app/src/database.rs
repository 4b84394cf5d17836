//! Database connection management

use std::time::Duration;

use sqlx::{
    Error, PgPool, Postgres, Transaction,
    error::{DatabaseError, ErrorKind},
    migrate::MigrateError,
    postgres::PgPoolOptions,
};

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// The transaction rolls back when dropped without an explicit commit.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, Error> {
        self.pool.begin().await
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, Error> {
    connect_with(database_url, PoolSettings::default()).await
}

/// Connection pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,

    /// How long a caller waits for a free connection before failing.
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Connect to `PostgreSQL` with an explicitly sized pool.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(database_url: &str, settings: PoolSettings) -> Result<PgPool, Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await
}

/// Apply the workspace migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// SQLSTATE raised when a value does not fit its `NUMERIC` column.
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// How a storage error should surface to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SqlErrorClass {
    NotFound,
    AlreadyExists,
    InvalidReference,
    MissingRequiredData,
    InvalidData,
    Other,
}

pub(crate) fn classify(error: &Error) -> SqlErrorClass {
    if matches!(error, Error::RowNotFound) {
        return SqlErrorClass::NotFound;
    }

    let Some(database_error) = error.as_database_error() else {
        return SqlErrorClass::Other;
    };

    if DatabaseError::code(database_error).as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE) {
        return SqlErrorClass::InvalidData;
    }

    match DatabaseError::kind(database_error) {
        ErrorKind::UniqueViolation => SqlErrorClass::AlreadyExists,
        ErrorKind::ForeignKeyViolation => SqlErrorClass::InvalidReference,
        ErrorKind::NotNullViolation => SqlErrorClass::MissingRequiredData,
        ErrorKind::CheckViolation => SqlErrorClass::InvalidData,
        _ => SqlErrorClass::Other,
    }
}

/// Generates `From<sqlx::Error>` for a service error enum exposing the usual
/// `NotFound`/`AlreadyExists`/`InvalidReference`/`MissingRequiredData`/
/// `InvalidData`/`Sql` variants.
macro_rules! impl_from_sqlx_error {
    ($error:ty) => {
        impl From<::sqlx::Error> for $error {
            fn from(error: ::sqlx::Error) -> Self {
                use $crate::database::SqlErrorClass;

                match $crate::database::classify(&error) {
                    SqlErrorClass::NotFound => Self::NotFound,
                    SqlErrorClass::AlreadyExists => Self::AlreadyExists,
                    SqlErrorClass::InvalidReference => Self::InvalidReference,
                    SqlErrorClass::MissingRequiredData => Self::MissingRequiredData,
                    SqlErrorClass::InvalidData => Self::InvalidData,
                    SqlErrorClass::Other => Self::Sql(error),
                }
            }
        }
    };
}

pub(crate) use impl_from_sqlx_error;

#[cfg(test)]
mod tests {
    use std::{borrow::Cow, error::Error as StdError};

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("database error {code}")]
    struct CodedError {
        code: &'static str,
    }

    impl DatabaseError for CodedError {
        fn message(&self) -> &str {
            self.code
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                "23505" => ErrorKind::UniqueViolation,
                "23503" => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn database_error(code: &'static str) -> Error {
        Error::Database(Box::new(CodedError { code }))
    }

    #[test]
    fn numeric_overflow_is_classified_as_invalid_data() {
        assert_eq!(
            classify(&database_error("22003")),
            SqlErrorClass::InvalidData
        );
    }

    #[test]
    fn constraint_violations_follow_their_kind() {
        assert_eq!(
            classify(&database_error("23505")),
            SqlErrorClass::AlreadyExists
        );
        assert_eq!(
            classify(&database_error("23503")),
            SqlErrorClass::InvalidReference
        );
        assert_eq!(
            classify(&database_error("XX000")),
            SqlErrorClass::Other
        );
    }

    #[test]
    fn row_not_found_is_classified_as_not_found() {
        assert_eq!(classify(&Error::RowNotFound), SqlErrorClass::NotFound);
    }

    #[test]
    fn pool_errors_are_classified_as_other() {
        assert_eq!(classify(&Error::PoolTimedOut), SqlErrorClass::Other);
    }
}
