//! Raw metadata fetches: the fixed catalog queries run through an executor.
//!
//! Results come back as plain name lists and raw row sets; normalization is
//! the renderers' job.

use serde_json::Value;
use tracing::debug;

use crate::catalog::{self, ObjectKind};
use crate::error::RenderError;
use crate::executor::QueryExecutor;
use crate::types::Row;

/// Runs catalog queries for one database through a borrowed executor.
pub struct MetadataFetcher<'a, E> {
    executor: &'a E,
    database: &'a str,
}

impl<'a, E: QueryExecutor> MetadataFetcher<'a, E> {
    pub fn new(executor: &'a E, database: &'a str) -> Self {
        Self { executor, database }
    }

    /// Object names of one kind, in the order the catalog listed them.
    ///
    /// That order is preserved downstream but is not canonical; it can
    /// differ between servers and runs.
    pub async fn list_object_names(&self, kind: ObjectKind) -> Result<Vec<String>, RenderError> {
        let sql = catalog::list_objects(kind, self.database);
        debug!("executing catalog query: {sql}");
        let rows = self.executor.query(&sql, Vec::new()).await?;
        rows.iter()
            .map(|row| required_name(row, catalog::NAME_ALIAS, "object listing"))
            .collect()
    }

    /// Raw `SHOW COLUMNS` rows for one object, in catalog order.
    pub async fn list_columns(&self, object: &str) -> Result<Vec<Row>, RenderError> {
        let sql = catalog::describe_columns(object);
        debug!("executing catalog query: {sql}");
        Ok(self.executor.query(&sql, Vec::new()).await?)
    }

    /// Stored procedure names of the database, in catalog order.
    pub async fn list_procedure_names(&self) -> Result<Vec<String>, RenderError> {
        debug!("executing catalog query: {}", catalog::LIST_PROCEDURES);
        let rows = self
            .executor
            .query(catalog::LIST_PROCEDURES, vec![bind(self.database)])
            .await?;
        rows.iter()
            .map(|row| required_name(row, catalog::PROCEDURE_NAME_COLUMN, "procedure listing"))
            .collect()
    }

    /// Every routine parameter of the database, raw, in one round trip.
    pub async fn list_parameters(&self) -> Result<Vec<Row>, RenderError> {
        debug!("executing catalog query: {}", catalog::LIST_PARAMETERS);
        Ok(self
            .executor
            .query(catalog::LIST_PARAMETERS, vec![bind(self.database)])
            .await?)
    }
}

/// Resolve the connection's active database.
///
/// Fails with [`RenderError::NoActiveDatabase`] when the session has no
/// schema selected (`SELECT DATABASE()` returns NULL).
pub async fn current_database<E: QueryExecutor>(executor: &E) -> Result<String, RenderError> {
    debug!("executing catalog query: {}", catalog::CURRENT_DATABASE);
    let rows = executor.query(catalog::CURRENT_DATABASE, Vec::new()).await?;
    let Some(row) = rows.first() else {
        return Err(RenderError::NoActiveDatabase);
    };
    match get_ci(row, catalog::DATABASE_ALIAS) {
        Some(Value::String(name)) => Ok(name.clone()),
        Some(Value::Null) | None => Err(RenderError::NoActiveDatabase),
        Some(_) => Err(RenderError::MissingAttribute {
            attribute: catalog::DATABASE_ALIAS,
            context: "current database",
        }),
    }
}

fn bind(value: &str) -> Value {
    Value::String(value.to_string())
}

/// Case-insensitive row lookup; exact match wins when both exist.
fn get_ci<'r>(row: &'r Row, key: &str) -> Option<&'r Value> {
    row.get(key).or_else(|| {
        row.iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(key).then_some(v))
    })
}

fn required_name(
    row: &Row,
    attribute: &'static str,
    context: &'static str,
) -> Result<String, RenderError> {
    match get_ci(row, attribute) {
        Some(Value::String(name)) => Ok(name.clone()),
        _ => Err(RenderError::MissingAttribute { attribute, context }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(entries: &[(&str, Value)]) -> Row {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_get_ci_prefers_exact_match() {
        let row = row(&[("name", json!("lower")), ("Name", json!("upper"))]);
        assert_eq!(get_ci(&row, "name"), Some(&json!("lower")));
    }

    #[test]
    fn test_get_ci_falls_back_to_case_insensitive() {
        let row = row(&[("NAME", json!("shouty"))]);
        assert_eq!(get_ci(&row, "name"), Some(&json!("shouty")));
        assert_eq!(get_ci(&row, "missing"), None);
    }

    #[test]
    fn test_required_name_extracts_string() {
        let row = row(&[("tname", json!("users"))]);
        assert_eq!(
            required_name(&row, "tname", "object listing").unwrap(),
            "users"
        );
    }

    #[test]
    fn test_required_name_rejects_null_and_absent() {
        let null_row = row(&[("tname", Value::Null)]);
        assert!(required_name(&null_row, "tname", "object listing").is_err());

        let empty = Row::new();
        let err = required_name(&empty, "tname", "object listing").unwrap_err();
        assert!(matches!(
            err,
            RenderError::MissingAttribute {
                attribute: "tname",
                context: "object listing",
            }
        ));
    }
}
