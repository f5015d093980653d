//! Deterministic ordering for schema documents.
//!
//! The renderer preserves catalog order, which can differ between servers and
//! even between runs. `--sort` trades that fidelity for diff-friendly output.

use schemasnap_core::DatabaseSchema;

/// Re-insert every map layer of the document in lexicographic key order:
/// tables, views, each object's columns, procedures, and each procedure's
/// parameters.
///
/// Column `index` values are left alone: they record fetch order, which is
/// part of the snapshot.
pub fn sort_schema(mut schema: DatabaseSchema) -> DatabaseSchema {
    schema.tables.sort_keys();
    for columns in schema.tables.values_mut() {
        columns.sort_keys();
    }

    schema.views.sort_keys();
    for columns in schema.views.values_mut() {
        columns.sort_keys();
    }

    schema.stored_procedures.sort_keys();
    for procedure in schema.stored_procedures.values_mut() {
        procedure.parameters.sort_keys();
    }

    schema
}
