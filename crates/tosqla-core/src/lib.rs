//! Core contracts and helpers for tosqla.
//!
//! This crate defines the schema snapshot types a reflector hands to the
//! translator, the native type classification, and validation helpers shared
//! by the translator and the CLI.

pub mod error;
pub mod schema;
pub mod snapshot;
pub mod types;
pub mod validation;

pub use error::{Error, Result};
pub use schema::{Column, DatabaseSchema, Index, Table, TableOptions};
pub use snapshot::{check_snapshot_json, parse_snapshot, schema_json_schema};
pub use types::{
    BlobKind, CharKind, ColumnType, FloatKind, IntegerKind, NativeType, TextKind,
};
pub use validation::validate_schema;

/// Current schema contract version for `schema.json` snapshots.
pub const SCHEMA_VERSION: &str = "0.1";

/// The only engine whose type vocabulary is supported.
pub const ENGINE: &str = "mysql";
