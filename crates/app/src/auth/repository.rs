//! Auth repository.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    auth::models::{Credentials, SessionRecord, SessionUuid},
    database::try_get_enum,
    domain::users::records::{Role, UserRecord, UserUuid},
};

const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const FIND_CREDENTIALS_BY_EMAIL_SQL: &str = include_str!("sql/find_credentials_by_email.sql");
const FIND_CREDENTIALS_BY_UUID_SQL: &str = include_str!("sql/find_credentials_by_uuid.sql");
const UPDATE_PASSWORD_HASH_SQL: &str = include_str!("sql/update_password_hash.sql");
const ADMIN_EXISTS_SQL: &str = include_str!("sql/admin_exists.sql");
const LOCK_ADMIN_BOOTSTRAP_SQL: &str = include_str!("sql/lock_admin_bootstrap.sql");
const CREATE_SESSION_SQL: &str = include_str!("sql/create_session.sql");
const FIND_SESSION_SQL: &str = include_str!("sql/find_session.sql");
const ROTATE_SESSION_SQL: &str = include_str!("sql/rotate_session.sql");
const REVOKE_SESSION_SQL: &str = include_str!("sql/revoke_session.sql");
const REVOKE_OTHER_SESSIONS_SQL: &str = include_str!("sql/revoke_other_sessions.sql");

/// New user row, with the password already hashed.
#[derive(Debug)]
pub(crate) struct NewUserRow<'a> {
    pub uuid: UserUuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub phone: Option<&'a str>,
}

/// Hashes and expiry times for one side of a session write.
#[derive(Debug)]
pub(crate) struct SessionHashes {
    pub access_hash: String,
    pub refresh_hash: String,
    pub access_expires_at: Timestamp,
    pub refresh_expires_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAuthRepository;

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: NewUserRow<'_>,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.name)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.role.as_str())
            .bind(user.phone)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials_by_email(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<Credentials>, sqlx::Error> {
        query_as::<Postgres, Credentials>(FIND_CREDENTIALS_BY_EMAIL_SQL)
            .bind(email)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_credentials_by_uuid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Credentials, sqlx::Error> {
        query_as::<Postgres, Credentials>(FIND_CREDENTIALS_BY_UUID_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_password_hash(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PASSWORD_HASH_SQL)
            .bind(user.into_uuid())
            .bind(password_hash)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn admin_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(ADMIN_EXISTS_SQL)
            .fetch_one(&mut **tx)
            .await
    }

    /// Serialise admin bootstrap attempts for the rest of the transaction.
    pub(crate) async fn lock_admin_bootstrap(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<(), sqlx::Error> {
        query(LOCK_ADMIN_BOOTSTRAP_SQL).execute(&mut **tx).await?;

        Ok(())
    }

    pub(crate) async fn create_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        user: UserUuid,
        hashes: &SessionHashes,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(user.into_uuid())
            .bind(&hashes.access_hash)
            .bind(&hashes.refresh_hash)
            .bind(SqlxTimestamp::from(hashes.access_expires_at))
            .bind(SqlxTimestamp::from(hashes.refresh_expires_at))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<Option<SessionRecord>, sqlx::Error> {
        query_as::<Postgres, SessionRecord>(FIND_SESSION_SQL)
            .bind(session.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Swap both secrets, but only if the presented refresh hash is still current.
    pub(crate) async fn rotate_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
        presented_refresh_hash: &str,
        hashes: &SessionHashes,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ROTATE_SESSION_SQL)
            .bind(session.into_uuid())
            .bind(presented_refresh_hash)
            .bind(&hashes.access_hash)
            .bind(&hashes.refresh_hash)
            .bind(SqlxTimestamp::from(hashes.access_expires_at))
            .bind(SqlxTimestamp::from(hashes.refresh_expires_at))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn revoke_session(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: SessionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_SESSION_SQL)
            .bind(session.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn revoke_other_sessions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        keep: SessionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_OTHER_SESSIONS_SQL)
            .bind(user.into_uuid())
            .bind(keep.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Credentials {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user: UserRecord::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for SessionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: SessionUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            role: try_get_enum(row, "role")?,
            user_is_active: row.try_get("user_is_active")?,
            access_hash: row.try_get("access_hash")?,
            refresh_hash: row.try_get("refresh_hash")?,
            access_expires_at: row
                .try_get::<SqlxTimestamp, _>("access_expires_at")?
                .to_jiff(),
            refresh_expires_at: row
                .try_get::<SqlxTimestamp, _>("refresh_expires_at")?
                .to_jiff(),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
