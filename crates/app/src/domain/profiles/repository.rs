//! Profiles Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    profiles::{
        data::ProfileUpdate,
        records::{ProfileRecord, ProfileUuid},
    },
    users::records::UserUuid,
};

const CREATE_PROFILE_SQL: &str = include_str!("sql/create_profile.sql");
const GET_PROFILE_SQL: &str = include_str!("sql/get_profile.sql");
const UPSERT_PROFILE_SQL: &str = include_str!("sql/upsert_profile.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProfilesRepository;

impl PgProfilesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        details: &ProfileUpdate,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_PROFILE_SQL)
            .bind(Uuid::now_v7())
            .bind(user.into_uuid())
            .bind(&details.full_name)
            .bind(&details.email)
            .bind(&details.phone)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<_, ProfileRecord>(GET_PROFILE_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Create the profile if missing, then overwrite its contact details.
    #[tracing::instrument(
        name = "profiles.repository.upsert_profile",
        skip(self, tx, details),
        fields(user_uuid = %user),
        err
    )]
    pub(crate) async fn upsert_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        details: &ProfileUpdate,
    ) -> Result<ProfileRecord, sqlx::Error> {
        query_as::<_, ProfileRecord>(UPSERT_PROFILE_SQL)
            .bind(Uuid::now_v7())
            .bind(user.into_uuid())
            .bind(&details.full_name)
            .bind(&details.email)
            .bind(&details.phone)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProfileRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProfileUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            full_name: row.try_get("full_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
        })
    }
}
