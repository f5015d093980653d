//! JSON output formatting.

use schemasnap_core::DatabaseSchema;

/// Format the schema document as JSON.
///
/// If `compact` is true, outputs minified JSON without whitespace.
pub fn format_json(schema: &DatabaseSchema, compact: bool) -> String {
    if compact {
        serde_json::to_string(schema).expect("serialization cannot fail")
    } else {
        serde_json::to_string_pretty(schema).expect("serialization cannot fail")
    }
}
