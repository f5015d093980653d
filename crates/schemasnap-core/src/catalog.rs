//! Catalog query construction for MySQL's metadata tables.
//!
//! The pipeline runs a fixed set of five queries; this module owns their text
//! and the result-column aliases the fetcher reads back. Nothing here touches
//! a connection.

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;

/// Result-column alias carrying object names in the listing query.
pub const NAME_ALIAS: &str = "tname";

/// Result-column alias carrying the active database name.
pub const DATABASE_ALIAS: &str = "db";

/// Result column of `SHOW PROCEDURE STATUS` carrying the procedure name.
pub const PROCEDURE_NAME_COLUMN: &str = "Name";

/// Resolves the connection's active schema.
pub const CURRENT_DATABASE: &str = "SELECT DATABASE() as db";

/// Lists stored procedures of one schema; the schema name is bound.
pub const LIST_PROCEDURES: &str = "SHOW PROCEDURE STATUS WHERE Db = ?";

/// Lists every routine parameter of one schema in a single round trip; the
/// schema name is bound.
pub const LIST_PARAMETERS: &str =
    "SELECT * FROM information_schema.parameters WHERE specific_schema = ?";

/// The two kinds of objects listable from `information_schema.TABLES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Table,
    View,
}

impl ObjectKind {
    /// The `TABLE_TYPE` discriminator the catalog stores for this kind.
    pub fn marker(self) -> &'static str {
        match self {
            ObjectKind::Table => "BASE TABLE",
            ObjectKind::View => "VIEW",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Table => write!(f, "table"),
            ObjectKind::View => write!(f, "view"),
        }
    }
}

impl FromStr for ObjectKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(ObjectKind::Table),
            "view" => Ok(ObjectKind::View),
            other => Err(RenderError::UnrecognizedObjectKind(other.to_string())),
        }
    }
}

/// Name-listing query for one object kind.
///
/// The database name is interpolated, not bound: `SHOW`-era metadata queries
/// predate placeholders here and the name is assumed to be trusted,
/// operator-supplied input. Never feed end-user input through this.
pub fn list_objects(kind: ObjectKind, database: &str) -> String {
    format!(
        "SELECT table_name AS {NAME_ALIAS} FROM information_schema.TABLES \
         WHERE table_schema = '{database}' AND TABLE_TYPE = '{marker}'",
        marker = kind.marker()
    )
}

/// `SHOW COLUMNS` for one object.
///
/// The object name comes straight from the catalog's own listing, but is
/// still backtick-quoted so reserved-word table names round-trip.
pub fn describe_columns(object: &str) -> String {
    format!("SHOW COLUMNS FROM {}", quote_identifier(object))
}

/// Backtick-quote an identifier, doubling any embedded backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
