//! sqlx-backed query executor for MySQL.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use schemasnap_core::{QueryError, QueryExecutor, Row};
use serde_json::Value;
use sqlx::mysql::{MySqlArguments, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column as _, Row as _};
use tracing::debug;

/// [`QueryExecutor`] over a `sqlx` MySQL connection pool.
pub struct SqlxExecutor {
    pool: MySqlPool,
}

impl SqlxExecutor {
    /// Connect a pool of up to `max_connections` connections to `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl QueryExecutor for SqlxExecutor {
    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>, QueryError> {
        let mut query = sqlx::query(sql);
        for param in &params {
            query = bind_value(query, param);
        }

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| QueryError::with_source("catalog query failed", e))?;

        Ok(rows.iter().map(decode_row).collect())
    }
}

fn bind_value<'q>(
    query: sqlx::query::Query<'q, sqlx::MySql, MySqlArguments>,
    value: &'q Value,
) -> sqlx::query::Query<'q, sqlx::MySql, MySqlArguments> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(b) => query.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                query.bind(i)
            } else if let Some(u) = n.as_u64() {
                query.bind(u)
            } else {
                query.bind(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => query.bind(s.as_str()),
        // Arrays and objects have no MySQL binding; send their JSON text.
        other => query.bind(other.to_string()),
    }
}

/// Convert one driver row into the pipeline's name-to-value map, keeping
/// result-column order and names exactly as the server labels them.
fn decode_row(row: &MySqlRow) -> Row {
    row.columns()
        .iter()
        .map(|column| (column.name().to_string(), decode_value(row, column.ordinal())))
        .collect()
}

/// Decode one cell by trying progressively looser types.
///
/// Catalog result sets are strings and integers almost everywhere, with
/// datetimes in `SHOW PROCEDURE STATUS` and the odd binary-collated text
/// column that only decodes as bytes.
fn decode_value(row: &MySqlRow, index: usize) -> Value {
    if let Ok(value) = row.try_get::<Option<String>, _>(index) {
        return value.map(Value::String).unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<i64>, _>(index) {
        return value.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<u64>, _>(index) {
        return value.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<f64>, _>(index) {
        return value.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<bool>, _>(index) {
        return value.map(Value::Bool).unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<DateTime<Utc>>, _>(index) {
        return value
            .map(|v| Value::String(v.to_rfc3339()))
            .unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<NaiveDateTime>, _>(index) {
        return value
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<NaiveDate>, _>(index) {
        return value
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<NaiveTime>, _>(index) {
        return value
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null);
    }
    if let Ok(value) = row.try_get::<Option<Vec<u8>>, _>(index) {
        return value
            .map(|v| Value::String(String::from_utf8_lossy(&v).into_owned()))
            .unwrap_or(Value::Null);
    }

    debug!("could not decode result column {index}; substituting null");
    Value::Null
}
