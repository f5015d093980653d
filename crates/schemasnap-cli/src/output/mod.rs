//! Output formatting modules.

pub mod json;
pub mod sort;
pub mod table;

pub use json::format_json;
pub use sort::sort_schema;
pub use table::format_table;
