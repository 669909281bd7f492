use crate::domain::{Fields, ListQuery, Record, ResourceSpec};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub mod sqlite;

/// Previous value of a record's file column, `None` when the resource has no
/// file slot or the column was empty.
pub type FileRef = Option<String>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A UNIQUE constraint rejected the write.
    #[error("unique constraint violated")]
    Conflict,

    #[error("foreign key constraint violated")]
    InvalidReference,

    #[error("column {0} is not writable")]
    UnknownColumn(String),

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return StoreError::Conflict;
            }
            if db.is_foreign_key_violation() {
                return StoreError::InvalidReference;
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// shared between request handlers, sqlx::Pool is thread safe
// sql is generated from the static ResourceSpec, values are always bound
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn insert(&self, spec: &ResourceSpec, fields: &Fields, now: DateTime<Utc>)
    -> StoreResult<i64>;

    /// `Some(previous file ref)` when the row exists.
    async fn file_ref(&self, spec: &ResourceSpec, id: i64) -> StoreResult<Option<FileRef>>;

    /// Writes only the columns present in `fields` plus `updated_at`. Returns the
    /// file ref the row held before the write, `None` when no row matched.
    async fn update(
        &self,
        spec: &ResourceSpec,
        id: i64,
        fields: &Fields,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<FileRef>>;

    /// Removes the row and hands back its file ref, `None` when no row matched.
    async fn delete(&self, spec: &ResourceSpec, id: i64) -> StoreResult<Option<FileRef>>;

    async fn get(&self, spec: &ResourceSpec, id: i64) -> StoreResult<Option<Record>>;
    async fn first(&self, spec: &ResourceSpec) -> StoreResult<Option<Record>>;
    async fn list(&self, spec: &ResourceSpec, query: &ListQuery) -> StoreResult<Vec<Record>>;

    /// `counter = counter + 1` on rows where `key_column = key`. False when nothing matched.
    async fn increment(
        &self,
        spec: &ResourceSpec,
        counter: &str,
        key_column: &str,
        key: &str,
    ) -> StoreResult<bool>;

    async fn ping(&self) -> StoreResult<()>;
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub id: i64,
    pub password_hash: String,
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_credentials(&self, email: &str) -> StoreResult<Option<Credentials>>;
}
