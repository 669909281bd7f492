use crate::database::{
    CredentialStore, Credentials, FileRef, ResourceStore, StoreError, StoreResult,
};
use crate::domain::{ColumnKind, FieldValue, Fields, ListQuery, Record, ResourceSpec, SortOrder};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

fn bind_value<'q>(query: SqliteQuery<'q>, value: &FieldValue) -> SqliteQuery<'q> {
    match value {
        FieldValue::Null => query.bind(None::<String>),
        FieldValue::Integer(v) => query.bind(*v),
        FieldValue::Text(v) => query.bind(v.clone()),
    }
}

// every key must name a writable column, otherwise it never reaches the sql
fn writable_columns<'a>(spec: &ResourceSpec, fields: &'a Fields) -> StoreResult<Vec<&'a str>> {
    fields
        .keys()
        .map(|name| match spec.column(name) {
            Some(column) if column.writable() => Ok(name.as_str()),
            _ => Err(StoreError::UnknownColumn(name.clone())),
        })
        .collect()
}

fn known_column<'a>(spec: &ResourceSpec, name: &'a str) -> StoreResult<&'a str> {
    match spec.column(name) {
        Some(_) => Ok(name),
        None => Err(StoreError::UnknownColumn(name.to_string())),
    }
}

// `NULL` keeps the statement shape the same for resources without a file slot
fn file_expr(spec: &ResourceSpec) -> String {
    match spec.file_column() {
        Some(column) => format!("\"{column}\""),
        None => "NULL".to_string(),
    }
}

fn select_sql(spec: &ResourceSpec) -> String {
    let mut columns = vec!["t.id AS id".to_string()];
    columns.extend(
        spec.readable_columns()
            .map(|c| format!("t.\"{0}\" AS \"{0}\"", c.name)),
    );
    columns.push("t.created_at AS created_at".to_string());
    columns.push("t.updated_at AS updated_at".to_string());

    let mut joins = String::new();
    for (i, join) in spec.joins.iter().enumerate() {
        columns.push(format!("j{i}.\"{}\" AS \"{}\"", join.display, join.alias));
        joins.push_str(&format!(
            " LEFT JOIN \"{}\" j{i} ON j{i}.id = t.\"{}\"",
            join.table, join.column
        ));
    }

    format!(
        "SELECT {} FROM \"{}\" t{}",
        columns.join(", "),
        spec.table,
        joins
    )
}

fn order_sql(spec: &ResourceSpec) -> &'static str {
    match spec.order_by {
        SortOrder::IdAsc => " ORDER BY t.id ASC",
        SortOrder::NewestFirst => " ORDER BY t.created_at DESC, t.id DESC",
    }
}

fn decode_record(spec: &ResourceSpec, row: &SqliteRow) -> Result<Record, sqlx::Error> {
    let mut fields = Fields::new();

    for column in spec.readable_columns() {
        let value: FieldValue = match column.kind {
            ColumnKind::Text => row.try_get::<Option<String>, _>(column.name)?.into(),
            ColumnKind::Integer => row.try_get::<Option<i64>, _>(column.name)?.into(),
        };
        fields.insert(column.name.to_string(), value);
    }

    for join in spec.joins {
        let value: FieldValue = row.try_get::<Option<String>, _>(join.alias)?.into();
        fields.insert(join.alias.to_string(), value);
    }

    Ok(Record {
        id: row.try_get("id")?,
        fields,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl ResourceStore for SqliteStore {
    async fn insert(
        &self,
        spec: &ResourceSpec,
        fields: &Fields,
        now: DateTime<Utc>,
    ) -> StoreResult<i64> {
        let names = writable_columns(spec, fields)?;

        let mut columns: Vec<String> = names.iter().map(|n| format!("\"{n}\"")).collect();
        columns.push("created_at".to_string());
        columns.push("updated_at".to_string());
        let placeholders = vec!["?"; columns.len()].join(", ");

        let sql = format!(
            "INSERT INTO \"{}\" ({}) VALUES ({}) RETURNING id",
            spec.table,
            columns.join(", "),
            placeholders
        );

        let mut query = sqlx::query(&sql);
        for value in fields.values() {
            query = bind_value(query, value);
        }
        let row = query.bind(now).bind(now).fetch_one(&self.pool).await?;

        Ok(row.try_get::<i64, _>("id")?)
    }

    async fn file_ref(&self, spec: &ResourceSpec, id: i64) -> StoreResult<Option<FileRef>> {
        let sql = format!(
            "SELECT {} AS file_ref FROM \"{}\" WHERE id = ?",
            file_expr(spec),
            spec.table
        );

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.try_get::<Option<String>, _>("file_ref")?)),
            None => Ok(None),
        }
    }

    async fn update(
        &self,
        spec: &ResourceSpec,
        id: i64,
        fields: &Fields,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<FileRef>> {
        let names = writable_columns(spec, fields)?;

        let mut tx = self.pool.begin().await?;

        let select = format!(
            "SELECT {} AS file_ref FROM \"{}\" WHERE id = ?",
            file_expr(spec),
            spec.table
        );
        let previous = match sqlx::query(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        {
            Some(row) => row.try_get::<Option<String>, _>("file_ref")?,
            None => return Ok(None),
        };

        let mut assignments: Vec<String> = names.iter().map(|n| format!("\"{n}\" = ?")).collect();
        assignments.push("updated_at = ?".to_string());

        let sql = format!(
            "UPDATE \"{}\" SET {} WHERE id = ?",
            spec.table,
            assignments.join(", ")
        );

        let mut query = sqlx::query(&sql);
        for value in fields.values() {
            query = bind_value(query, value);
        }
        query.bind(now).bind(id).execute(&mut *tx).await?;

        tx.commit().await?;

        Ok(Some(previous))
    }

    async fn delete(&self, spec: &ResourceSpec, id: i64) -> StoreResult<Option<FileRef>> {
        let sql = format!(
            "DELETE FROM \"{}\" WHERE id = ? RETURNING {} AS file_ref",
            spec.table,
            file_expr(spec)
        );

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.try_get::<Option<String>, _>("file_ref")?)),
            None => Ok(None),
        }
    }

    async fn get(&self, spec: &ResourceSpec, id: i64) -> StoreResult<Option<Record>> {
        let sql = format!("{} WHERE t.id = ?", select_sql(spec));

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(decode_record(spec, &row)?)),
            None => Ok(None),
        }
    }

    async fn first(&self, spec: &ResourceSpec) -> StoreResult<Option<Record>> {
        let sql = format!("{} ORDER BY t.id ASC LIMIT 1", select_sql(spec));

        let row = sqlx::query(&sql).fetch_optional(&self.pool).await?;

        match row {
            Some(row) => Ok(Some(decode_record(spec, &row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, spec: &ResourceSpec, query: &ListQuery) -> StoreResult<Vec<Record>> {
        let mut sql = select_sql(spec);

        let excluded: &[String] = match &query.exclude {
            Some((column, values)) if !values.is_empty() => {
                let column = known_column(spec, column)?;
                let placeholders = vec!["?"; values.len()].join(", ");
                sql.push_str(&format!(" WHERE t.\"{column}\" NOT IN ({placeholders})"));
                values.as_slice()
            }
            _ => &[],
        };
        sql.push_str(order_sql(spec));

        let mut statement = sqlx::query(&sql);
        for value in excluded {
            statement = statement.bind(value.clone());
        }

        let rows = statement.fetch_all(&self.pool).await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(decode_record(spec, &row)?);
        }

        Ok(records)
    }

    async fn increment(
        &self,
        spec: &ResourceSpec,
        counter: &str,
        key_column: &str,
        key: &str,
    ) -> StoreResult<bool> {
        let counter = known_column(spec, counter)?;
        let key_column = known_column(spec, key_column)?;

        let sql = format!(
            "UPDATE \"{}\" SET \"{counter}\" = \"{counter}\" + 1 WHERE \"{key_column}\" = ?",
            spec.table
        );

        let result = sqlx::query(&sql).bind(key).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for SqliteStore {
    async fn find_credentials(&self, email: &str) -> StoreResult<Option<Credentials>> {
        let row = sqlx::query("SELECT id, password FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(Credentials {
                id: row.try_get("id")?,
                password_hash: row.try_get("password")?,
            })),
            None => Ok(None),
        }
    }
}
