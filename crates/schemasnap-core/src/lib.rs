pub mod catalog;
pub mod error;
pub mod executor;
pub mod fetch;
pub mod normalize;
pub mod render;
pub mod types;

// Re-export the main types and entry points
pub use catalog::ObjectKind;
pub use error::{QueryError, RenderError};
pub use executor::QueryExecutor;
pub use fetch::MetadataFetcher;
pub use render::{SchemaRenderer, DEFAULT_MAX_CONCURRENT_FETCHES};

// Re-export the document model explicitly
pub use types::{
    Column,
    DatabaseSchema,
    Row,
    StoredProcedure,
    StoredProcedureParameter,
    Table,
};
