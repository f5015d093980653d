//! Schema assembly: object model rendering, stored procedure rendering, and
//! the top-level [`SchemaRenderer`].

use futures::stream::{self, StreamExt, TryStreamExt};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::warn;

use crate::catalog::ObjectKind;
use crate::error::RenderError;
use crate::executor::QueryExecutor;
use crate::fetch::{self, MetadataFetcher};
use crate::normalize;
use crate::types::{DatabaseSchema, Row, StoredProcedure, StoredProcedureParameter, Table};

/// Default bound on concurrent per-object column fetches.
///
/// Size the bound to the connection pool backing the executor; a bound above
/// the pool capacity just queues inside the pool instead.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

const SPECIFIC_NAME_ATTR: &str = "specificName";
const PARAMETER_NAME_ATTR: &str = "parameterName";

/// Renders a database's catalog into a [`DatabaseSchema`] snapshot.
///
/// The database name is fixed at construction, either explicitly or by
/// resolving the connection's active schema once. Each call to
/// [`render_schema`](Self::render_schema) re-fetches fresh catalog state;
/// nothing is cached across calls.
///
/// ```no_run
/// # use schemasnap_core::{QueryExecutor, SchemaRenderer};
/// # async fn demo(executor: impl QueryExecutor) -> Result<(), schemasnap_core::RenderError> {
/// let renderer = SchemaRenderer::for_current_database(executor)
///     .await?
///     .max_concurrent_fetches(4);
/// let schema = renderer.render_schema().await?;
/// println!("{} tables", schema.tables.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SchemaRenderer<E> {
    executor: E,
    database: String,
    max_concurrent_fetches: usize,
}

impl<E: QueryExecutor> SchemaRenderer<E> {
    /// Renderer for an explicitly named database. Issues no queries.
    pub fn with_database(executor: E, database: impl Into<String>) -> Self {
        Self {
            executor,
            database: database.into(),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    /// Renderer for the connection's active database, resolved here exactly
    /// once via `SELECT DATABASE()`.
    pub async fn for_current_database(executor: E) -> Result<Self, RenderError> {
        let database = fetch::current_database(&executor).await?;
        Ok(Self::with_database(executor, database))
    }

    /// Cap the number of in-flight column fetches. Clamped to at least 1.
    pub fn max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    /// The database this renderer reads from.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Render one fresh snapshot of the database.
    ///
    /// All-or-nothing: the first failure aborts the whole render and no
    /// partial document is returned.
    pub async fn render_schema(&self) -> Result<DatabaseSchema, RenderError> {
        let tables = self.render_objects(ObjectKind::Table).await?;
        let views = self.render_objects(ObjectKind::View).await?;
        let stored_procedures = self.render_stored_procedures().await?;
        Ok(DatabaseSchema {
            tables,
            views,
            stored_procedures,
        })
    }

    /// Fetch and normalize the columns of every object of one kind.
    ///
    /// Column fetches run concurrently up to the configured bound. The
    /// buffered stream keeps the listing's name order in the result map no
    /// matter which fetches finish first, and the first failure cancels the
    /// remainder.
    async fn render_objects(
        &self,
        kind: ObjectKind,
    ) -> Result<IndexMap<String, Table>, RenderError> {
        let fetcher = MetadataFetcher::new(&self.executor, &self.database);
        let names = fetcher.list_object_names(kind).await?;

        let fetcher = &fetcher;
        let fetches = names.into_iter().map(|name| async move {
            let rows = fetcher.list_columns(&name).await?;
            let table = normalize_table(rows)?;
            Ok::<_, RenderError>((name, table))
        });

        stream::iter(fetches)
            .buffered(self.max_concurrent_fetches)
            .try_collect()
            .await
    }

    /// Fetch procedures and their parameters, grouping parameters by owning
    /// procedure.
    ///
    /// Parameters arrive in one batched round trip for the whole database.
    /// Every listed procedure gets an entry even with zero parameters.
    async fn render_stored_procedures(
        &self,
    ) -> Result<IndexMap<String, StoredProcedure>, RenderError> {
        let fetcher = MetadataFetcher::new(&self.executor, &self.database);
        let names = fetcher.list_procedure_names().await?;
        let rows = fetcher.list_parameters().await?;

        let mut procedures: IndexMap<String, StoredProcedure> = names
            .into_iter()
            .map(|name| (name.clone(), StoredProcedure::named(name)))
            .collect();

        for row in rows {
            link_parameter(&mut procedures, row)?;
        }

        Ok(procedures)
    }
}

/// Normalize one object's raw rows into a column dictionary, assigning
/// `index` by fetch order.
fn normalize_table(rows: Vec<Row>) -> Result<Table, RenderError> {
    let mut table = Table::new();
    for (index, row) in rows.into_iter().enumerate() {
        let column = normalize::normalize_column(row, index)?;
        table.insert(column.field.clone(), column);
    }
    Ok(table)
}

/// Attach one raw parameter row to its owning procedure.
///
/// Two row classes are skipped with a warning instead of failing: rows whose
/// routine is absent from the procedure listing (stored functions appear in
/// the parameters catalog but not in `SHOW PROCEDURE STATUS`), and rows with
/// a NULL parameter name (a function's return value, ordinal 0). A row that
/// lacks either linking column outright is a shape error and fails the
/// render.
fn link_parameter(
    procedures: &mut IndexMap<String, StoredProcedure>,
    row: Row,
) -> Result<(), RenderError> {
    let mut attrs = normalize::camelcase_keys(row);

    let Some(specific_name) = take_link(&mut attrs, SPECIFIC_NAME_ATTR)? else {
        warn!("parameter row with a NULL routine identifier skipped");
        return Ok(());
    };
    let Some(parameter_name) = take_link(&mut attrs, PARAMETER_NAME_ATTR)? else {
        warn!("return value row for routine `{specific_name}` skipped");
        return Ok(());
    };

    let Some(procedure) = procedures.get_mut(&specific_name) else {
        warn!(
            "parameter `{parameter_name}` references `{specific_name}`, \
             which is not a listed procedure; skipping"
        );
        return Ok(());
    };

    let parameter = StoredProcedureParameter {
        specific_name,
        parameter_name: parameter_name.clone(),
        raw: attrs,
    };
    if procedure
        .parameters
        .insert(parameter_name.clone(), parameter)
        .is_some()
    {
        warn!(
            "duplicate parameter `{parameter_name}` for procedure `{}` replaced",
            procedure.name
        );
    }
    Ok(())
}

/// Extract a linking attribute. Absent or non-string is a shape error; an
/// explicit NULL is `None`, letting the caller skip the row.
fn take_link(attrs: &mut Row, attribute: &'static str) -> Result<Option<String>, RenderError> {
    match attrs.shift_remove(attribute) {
        Some(Value::String(name)) => Ok(Some(name)),
        Some(Value::Null) => Ok(None),
        _ => Err(RenderError::MissingAttribute {
            attribute,
            context: "procedure parameter",
        }),
    }
}
