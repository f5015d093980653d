//! SchemaSnap CLI library.
//!
//! This module exposes internal types for testing purposes.
//! The main entry point is the `schemasnap` binary.

pub mod cli;
pub mod executor;
pub mod output;

// Re-export commonly used types
pub use cli::Args;
