//! Database connection management

use std::{error::Error as StdError, str::FromStr};

use sqlx::{
    PgPool, Postgres, Row, Transaction,
    migrate::{MigrateError, Migrator},
    postgres::{PgPoolOptions, PgRow},
};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

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
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
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
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Apply any pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

/// Read a `BIGINT` money column as minor units.
pub(crate) fn try_get_amount(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let amount: i64 = row.try_get(column)?;

    u64::try_from(amount).map_err(|source| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    })
}

/// Read an `INTEGER` count column that must not be negative.
pub(crate) fn try_get_count(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let count: i32 = row.try_get(column)?;

    u32::try_from(count).map_err(|source| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    })
}

/// Read a `TEXT` column holding an enum value.
pub(crate) fn try_get_enum<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let value: String = row.try_get(column)?;

    value.parse().map_err(|source| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    })
}

/// Largest amount a `BIGINT` money column holds, in minor units.
pub const MAX_AMOUNT: u64 = i64::MAX.unsigned_abs();

/// Largest quantity an `INTEGER` column holds.
pub const MAX_COUNT: u32 = i32::MAX.unsigned_abs();

/// Convert minor units to a `BIGINT` bind value.
///
/// Out of range values fail as [`sqlx::Error::Encode`], which services
/// report as invalid data.
pub(crate) fn amount_to_i64(column: &str, amount: u64) -> sqlx::Result<i64> {
    i64::try_from(amount)
        .map_err(|source| sqlx::Error::Encode(format!("{column} out of range: {source}").into()))
}

/// Convert a quantity to an `INTEGER` bind value.
pub(crate) fn count_to_i32(column: &str, count: u32) -> sqlx::Result<i32> {
    i32::try_from(count)
        .map_err(|source| sqlx::Error::Encode(format!("{column} out of range: {source}").into()))
}

/// Read a `BIGINT` aggregate such as `count(*)`.
pub(crate) fn try_get_tally(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let tally: i64 = row.try_get(column)?;

    u64::try_from(tally).map_err(|source| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    })
}
