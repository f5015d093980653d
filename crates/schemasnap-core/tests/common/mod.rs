//! Shared test fixtures: a scripted query executor and catalog row builders.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use schemasnap_core::{QueryError, QueryExecutor, Row};
use serde_json::{json, Value};

#[derive(Debug)]
enum Response {
    Rows(Vec<Row>),
    Fail(String),
}

/// Executor scripted with canned responses per SQL string.
///
/// Records every call and tracks how many queries are pending at once so
/// tests can observe the fan-out bound. Each query yields a few times before
/// resolving, which lets concurrent fetches overlap deterministically on a
/// single-threaded runtime.
#[derive(Debug, Default)]
pub struct MockExecutor {
    responses: HashMap<String, Response>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `sql` to resolve with `rows`.
    pub fn on(mut self, sql: impl Into<String>, rows: Vec<Row>) -> Self {
        self.responses.insert(sql.into(), Response::Rows(rows));
        self
    }

    /// Script `sql` to fail with a query error.
    pub fn fail_on(mut self, sql: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .insert(sql.into(), Response::Fail(message.into()));
        self
    }

    /// Every `(sql, params)` pair seen, in call order.
    pub fn calls(&self) -> Vec<(String, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls whose SQL contains `needle`.
    pub fn calls_matching(&self, needle: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(sql, _)| sql.contains(needle))
            .count()
    }

    /// Highest number of concurrently pending queries observed.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryExecutor for MockExecutor {
    async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<Row>, QueryError> {
        self.calls.lock().unwrap().push((sql.to_string(), params));

        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(in_flight, Ordering::SeqCst);
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.responses.get(sql) {
            Some(Response::Rows(rows)) => Ok(rows.clone()),
            Some(Response::Fail(message)) => Err(QueryError::new(message.clone())),
            None => Err(QueryError::new(format!("unscripted query: {sql}"))),
        }
    }
}

/// Build a row from `(name, value)` pairs.
pub fn row(entries: &[(&str, Value)]) -> Row {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// A full `SHOW COLUMNS` row with MySQL's result casing.
pub fn column_row(field: &str, raw_type: &str, key: &str) -> Row {
    row(&[
        ("Field", json!(field)),
        ("Type", json!(raw_type)),
        ("Null", json!(if key == "PRI" { "NO" } else { "YES" })),
        ("Key", json!(key)),
        ("Default", Value::Null),
        ("Extra", json!("")),
    ])
}

/// An object listing row, as produced by the `tname` alias.
pub fn name_row(name: &str) -> Row {
    row(&[("tname", json!(name))])
}

/// A `SHOW PROCEDURE STATUS` row.
pub fn procedure_row(db: &str, name: &str) -> Row {
    row(&[
        ("Db", json!(db)),
        ("Name", json!(name)),
        ("Type", json!("PROCEDURE")),
    ])
}

/// An `information_schema.parameters` row with MySQL's upper snake casing.
/// An empty `mode` stands for NULL, as on a function's return value row.
pub fn parameter_row(specific: &str, name: Value, position: u32, mode: &str, dtd: &str) -> Row {
    row(&[
        ("SPECIFIC_NAME", json!(specific)),
        ("ORDINAL_POSITION", json!(position)),
        (
            "PARAMETER_MODE",
            if mode.is_empty() { Value::Null } else { json!(mode) },
        ),
        ("PARAMETER_NAME", name),
        ("DTD_IDENTIFIER", json!(dtd)),
    ])
}
