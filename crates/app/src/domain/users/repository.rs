//! Users Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::{
    database::try_get_enum,
    domain::users::{
        data::{ProfileUpdate, UserUpdate},
        records::{Role, UserRecord, UserUuid},
    },
};

const LIST_USERS_SQL: &str = include_str!("sql/list_users.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const UPDATE_PROFILE_SQL: &str = include_str!("sql/update_profile.sql");
const SET_USER_ACTIVE_SQL: &str = include_str!("sql/set_user_active.sql");
const SET_USER_ROLE_SQL: &str = include_str!("sql/set_user_role.sql");
const DELETE_USER_SQL: &str = include_str!("sql/delete_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgUsersRepository;

impl PgUsersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_users(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        role: Option<Role>,
    ) -> Result<Vec<UserRecord>, sqlx::Error> {
        query_as::<Postgres, UserRecord>(LIST_USERS_SQL)
            .bind(role.map(Role::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: &UserUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_USER_SQL)
            .bind(user.into_uuid())
            .bind(&update.name)
            .bind(update.phone.as_deref())
            .bind(update.is_email_verified)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_profile(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        update: &ProfileUpdate,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(UPDATE_PROFILE_SQL)
            .bind(user.into_uuid())
            .bind(&update.name)
            .bind(update.phone.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        is_active: bool,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_USER_ACTIVE_SQL)
            .bind(user.into_uuid())
            .bind(is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_role(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        role: Role,
    ) -> Result<UserRecord, sqlx::Error> {
        query_as::<Postgres, UserRecord>(SET_USER_ROLE_SQL)
            .bind(user.into_uuid())
            .bind(role.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_USER_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role: try_get_enum(row, "role")?,
            phone: row.try_get("phone")?,
            is_active: row.try_get("is_active")?,
            is_email_verified: row.try_get("is_email_verified")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
