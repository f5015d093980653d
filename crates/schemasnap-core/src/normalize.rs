//! Pure row transformations: key casing, type decomposition, column shaping.
//!
//! Nothing in this module performs I/O. The renderers feed raw [`Row`]s in
//! and get canonical entities back.

use heck::ToLowerCamelCase;
use serde_json::Value;

use crate::error::RenderError;
use crate::types::{Column, Row};

/// Value of the `SHOW COLUMNS` key field that marks a primary key column.
pub const PRIMARY_KEY_MARKER: &str = "PRI";

const FIELD_ATTR: &str = "field";
const TYPE_ATTR: &str = "type";
const KEY_ATTR: &str = "key";

/// Lower-case every key of a raw row, preserving entry order.
pub fn lowercase_keys(row: Row) -> Row {
    row.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect()
}

/// lowerCamelCase every key of a raw row, preserving entry order.
///
/// This is the casing convention for parameter records, whose catalog keys
/// arrive as `SPECIFIC_NAME`-style upper snake case.
pub fn camelcase_keys(row: Row) -> Row {
    row.into_iter()
        .map(|(k, v)| (k.to_lower_camel_case(), v))
        .collect()
}

/// Concatenate every digit of `raw_type` in original order and read the
/// result as an integer; 0 when there are no digits.
///
/// This reproduces size extraction for the common single-number types
/// (`varchar(255)` is 255, `int(11)` is 11) and intentionally also folds
/// multi-number suffixes together (`decimal(10,2)` is 102). Accumulation
/// saturates rather than overflowing on absurd inputs.
pub fn extract_length(raw_type: &str) -> u64 {
    raw_type
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(u64::from(digit))
        })
}

/// The base type name: everything before the first `(`, or the whole string
/// when there is no parenthesized suffix.
pub fn strip_length(raw_type: &str) -> &str {
    match raw_type.split_once('(') {
        Some((base, _)) => base,
        None => raw_type,
    }
}

/// Normalize one raw column row into a [`Column`].
///
/// Keys are matched case-insensitively by lower-casing the whole row first.
/// The `field` and `type` attributes are required; their absence means the
/// catalog's row shape drifted and the render must fail loudly. Every other
/// attribute passes through untouched under its lower-cased key. `index` is
/// the column's position within its object's fetch.
pub fn normalize_column(row: Row, index: usize) -> Result<Column, RenderError> {
    let mut attrs = lowercase_keys(row);

    let field = take_name(&mut attrs, FIELD_ATTR)?;
    let raw_type = take_name(&mut attrs, TYPE_ATTR)?;

    let is_primary = attrs
        .get(KEY_ATTR)
        .and_then(Value::as_str)
        .is_some_and(|key| key == PRIMARY_KEY_MARKER);

    Ok(Column {
        field,
        column_type: strip_length(&raw_type).to_string(),
        length: extract_length(&raw_type),
        is_primary,
        index,
        raw: attrs,
    })
}

fn take_name(attrs: &mut Row, attribute: &'static str) -> Result<String, RenderError> {
    match attrs.shift_remove(attribute) {
        Some(Value::String(name)) => Ok(name),
        _ => Err(RenderError::MissingAttribute {
            attribute,
            context: "column",
        }),
    }
}
