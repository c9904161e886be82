//! Schema-translation engine for tosqla.
//!
//! Turns reflected MySQL table schemas into normalized records a renderer can
//! print as SQLAlchemy declarative models: maps native column types, dedups
//! enum and set types across a run, folds single-column indexes into column
//! flags, and derives backup tables with a surrogate key.

pub mod backup;
pub mod context;
pub mod errors;
pub mod model;
pub mod naming;
pub mod reconcile;
pub mod registry;
pub mod translate;
pub mod typemap;

pub use backup::{
    BACKUP_INDEX_NAME, DEFAULT_BACKUP_KEY, DEFAULT_BACKUP_POSTFIX, backup_table, backup_tables,
};
pub use context::{GenerationContext, Imports};
pub use errors::{Result, TranslateError};
pub use model::{ColumnRecord, SemanticType, TableRecord, TypeDefinition, ValueType};
pub use naming::{field_identifier, is_module_symbol, model_identifier};
pub use reconcile::IndexReconciler;
pub use registry::{Registration, TypeRegistry};
pub use translate::{TranslateOptions, Translator};
pub use typemap::{CORE_SYMBOLS, DIALECT_SYMBOLS, MappedType, ON_UPDATE_TIMESTAMP, map_column};
