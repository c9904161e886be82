//! Type mapping from MySQL native types to SQLAlchemy type expressions.

use tosqla_core::{CharKind, Column, NativeType, Table, TextKind};

use crate::context::Imports;
use crate::errors::{Result, TranslateError};
use crate::model::{TypeDefinition, ValueType, quote};
use crate::naming::field_identifier;
use crate::registry::TypeRegistry;

/// Every symbol a translated table can import from `sqlalchemy`.
pub const CORE_SYMBOLS: &[&str] = &[
    "BINARY", "CHAR", "DECIMAL", "Date", "DateTime", "Enum", "Float", "Index", "Integer", "JSON",
    "NCHAR", "NVARCHAR", "String", "TIMESTAMP", "Text", "YEAR", "text",
];

/// Every symbol [`map_column`] can import from `sqlalchemy.dialects.mysql`.
pub const DIALECT_SYMBOLS: &[&str] = &[
    "BLOB", "CHAR", "DOUBLE", "LONGBLOB", "LONGTEXT", "MEDIUMBLOB", "MEDIUMTEXT", "NCHAR",
    "NVARCHAR", "SET", "TEXT", "TINYTEXT", "VARCHAR",
];

/// Server default attached to `TIMESTAMP` columns.
pub const ON_UPDATE_TIMESTAMP: &str = r#"text("CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP")"#;

/// Result of mapping one column's native type.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedType {
    pub expr: String,
    pub value_type: ValueType,
    pub server_default: Option<String>,
    pub imports: Imports,
    /// Enum/set definition this column introduced to the run.
    pub introduced: Option<(String, TypeDefinition)>,
    pub native: NativeType,
}

/// Map a column of `table` to its target type.
///
/// Enum and set types are resolved through `registry`. An unsupported native
/// type is fatal and names the offending `table.column`.
pub fn map_column(
    table: &Table,
    column: &Column,
    registry: &mut TypeRegistry,
) -> Result<MappedType> {
    let native = column.column_type.native();
    let table_charset = table.options.charset.as_deref();
    let mut imports = Imports::default();
    let mut server_default = None;
    let mut introduced = None;

    let (expr, value_type) = match &native {
        NativeType::Double => {
            imports.add_dialect("DOUBLE");
            ("DOUBLE".to_string(), ValueType::Float)
        }
        NativeType::Float(_) => {
            imports.add_core("Float");
            ("Float".to_string(), ValueType::Float)
        }
        NativeType::Integer(_) => {
            imports.add_core("Integer");
            ("Integer".to_string(), ValueType::Int)
        }
        NativeType::Decimal { precision, scale } => {
            imports.add_core("DECIMAL");
            (format!("DECIMAL({precision},{scale})"), ValueType::Float)
        }
        NativeType::Timestamp => {
            imports.add_core("TIMESTAMP");
            imports.add_core("text");
            server_default = Some(ON_UPDATE_TIMESTAMP.to_string());
            ("TIMESTAMP".to_string(), ValueType::DateTime)
        }
        NativeType::DateTime => {
            imports.add_core("DateTime");
            ("DateTime".to_string(), ValueType::DateTime)
        }
        NativeType::Date => {
            imports.add_core("Date");
            ("Date".to_string(), ValueType::Date)
        }
        NativeType::Set(values) => {
            let registration = registry.register_set(&field_identifier(&column.name), values);
            imports.add_dialect("SET");
            introduced = registration
                .introduced
                .map(|definition| (registration.name.clone(), definition));
            (registration.name, ValueType::Str)
        }
        NativeType::Enum(values) => {
            let registration = registry.register_enum(&field_identifier(&column.name), values);
            imports.add_core("Enum");
            introduced = registration
                .introduced
                .map(|definition| (registration.name.clone(), definition));
            (registration.name, ValueType::Str)
        }
        NativeType::Text { kind, charset, .. } => {
            let name = kind.name();
            let expr = match charset {
                Some(charset) if Some(charset.as_str()) != table_charset => {
                    imports.add_dialect(name);
                    format!("{name}(charset={})", quote(charset))
                }
                Some(_) => {
                    imports.add_dialect(name);
                    name.to_string()
                }
                None if *kind == TextKind::Text => {
                    imports.add_core("Text");
                    "Text".to_string()
                }
                None => {
                    imports.add_dialect(name);
                    name.to_string()
                }
            };
            (expr, ValueType::Str)
        }
        NativeType::Char {
            kind,
            length,
            charset,
        } => {
            let expr = match charset {
                Some(charset) if Some(charset.as_str()) != table_charset => {
                    imports.add_dialect(kind.name());
                    format!("{}({length}, charset={})", kind.name(), quote(charset))
                }
                _ => {
                    let name = if *kind == CharKind::VarChar {
                        "String"
                    } else {
                        kind.name()
                    };
                    imports.add_core(name);
                    format!("{name}({length})")
                }
            };
            (expr, ValueType::Str)
        }
        NativeType::Blob { kind, .. } => {
            imports.add_dialect(kind.name());
            (kind.name().to_string(), ValueType::Bytes)
        }
        NativeType::Binary { length } => {
            imports.add_core("BINARY");
            (format!("BINARY({length})"), ValueType::Bytes)
        }
        NativeType::Json => {
            imports.add_core("JSON");
            ("JSON".to_string(), ValueType::Str)
        }
        NativeType::Year => {
            imports.add_core("YEAR");
            ("YEAR(4)".to_string(), ValueType::Int)
        }
        NativeType::Other(name) => {
            return Err(TranslateError::UnsupportedType {
                table: table.name.clone(),
                column: column.name.clone(),
                native: name.clone(),
            });
        }
    };

    if let Some(statement) = value_type.import() {
        imports.add_value(statement);
    }

    Ok(MappedType {
        expr,
        value_type,
        server_default,
        imports,
        introduced,
        native,
    })
}
