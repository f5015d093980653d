//! Schema document types.
//!
//! Everything here is a read-only snapshot: the renderer builds a fresh
//! document on every call and nothing is mutated after assembly. All maps are
//! [`IndexMap`]s because insertion order is part of the document: it records
//! the order in which the catalog returned objects, columns, and parameters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One raw catalog row: result-column name to value, in result-set order.
///
/// Keys carry whatever casing the server used (`Field`, `SPECIFIC_NAME`,
/// `tname`); normalization happens downstream.
pub type Row = IndexMap<String, Value>;

/// A table's (or view's) columns, keyed by column field name in fetch order.
pub type Table = IndexMap<String, Column>;

/// Normalized description of a single column.
///
/// The typed fields are the computed ones; every other attribute of the raw
/// catalog row passes through unchanged in `raw` under its lower-cased key
/// (`null`, `key`, `default`, `extra` for MySQL) and is flattened into the
/// same JSON object on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name, case as returned by the catalog.
    pub field: String,
    /// Base type name with any parenthesized suffix stripped
    /// (`varchar(255)` becomes `varchar`).
    #[serde(rename = "type")]
    pub column_type: String,
    /// Every digit of the raw type string, concatenated in order and parsed
    /// as an integer; 0 when the type carries no digits.
    pub length: u64,
    /// Whether the catalog's key indicator equals the primary-key marker
    /// exactly.
    pub is_primary: bool,
    /// Position of the column within its object's fetch, starting at 0.
    pub index: usize,
    #[serde(flatten)]
    pub raw: IndexMap<String, Value>,
}

/// One stored procedure parameter.
///
/// The linking attributes are typed; the rest of the catalog row is preserved
/// in `raw` under lowerCamelCased keys and flattened on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProcedureParameter {
    /// Catalog identifier of the owning routine.
    pub specific_name: String,
    pub parameter_name: String,
    #[serde(flatten)]
    pub raw: IndexMap<String, Value>,
}

/// A stored procedure and its parameters, keyed by parameter name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProcedure {
    pub name: String,
    pub parameters: IndexMap<String, StoredProcedureParameter>,
}

impl StoredProcedure {
    /// A procedure entry with an empty parameter set, as seeded from the
    /// procedure listing.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: IndexMap::new(),
        }
    }
}

/// The rendered snapshot of one database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSchema {
    /// Base tables, keyed by table name.
    pub tables: IndexMap<String, Table>,
    /// Views, keyed by view name. Same column shape as tables.
    pub views: IndexMap<String, Table>,
    /// Stored procedures, keyed by procedure name.
    pub stored_procedures: IndexMap<String, StoredProcedure>,
}

impl DatabaseSchema {
    /// Total number of objects across tables, views, and procedures.
    pub fn object_count(&self) -> usize {
        self.tables.len() + self.views.len() + self.stored_procedures.len()
    }

    /// True when the snapshot holds no objects at all.
    pub fn is_empty(&self) -> bool {
        self.object_count() == 0
    }
}
