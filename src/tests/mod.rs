mod unit_local_blob_store;
mod unit_resource_model;
mod unit_sqlite_store;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

// fresh in-memory database with the schema applied
// one connection only, every new connection to sqlite::memory: is a new empty database
pub async fn setup_test_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn insert_category(pool: &Pool<Sqlite>, table: &str, name: &str) -> i64 {
    let sql = format!("INSERT INTO {table} (category) VALUES (?) RETURNING id");
    sqlx::query_scalar::<_, i64>(&sql)
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Should insert category")
}
