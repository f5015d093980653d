//! The query execution seam between the pipeline and a database driver.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::QueryError;
use crate::types::Row;

/// Executes raw catalog queries against one database connection or pool.
///
/// The renderer issues every query through this trait; connection lifecycle
/// and pooling belong to the implementation. Implementations must:
///
/// - bind `params` positionally (the pipeline only ever binds strings, but
///   the full [`Value`] range should be supported),
/// - return rows as ordered name-to-value maps with result-column names
///   exactly as the server labels them (the pipeline does its own casing),
/// - surface any execution fault as a [`QueryError`], keeping the driver
///   error as the source.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run one statement with positional bind parameters and collect all of
    /// its rows.
    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>, QueryError>;
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for &T {
    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>, QueryError> {
        (**self).query(sql, params).await
    }
}

#[async_trait]
impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>, QueryError> {
        (**self).query(sql, params).await
    }
}
