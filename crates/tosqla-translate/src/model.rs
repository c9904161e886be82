use std::fmt;

use serde::Serialize;

use tosqla_core::{Index, TableOptions};

/// Logical value domain of a column in application code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Int,
    Float,
    Str,
    Bytes,
    DateTime,
    Date,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Str => "str",
            ValueType::Bytes => "bytes",
            ValueType::DateTime => "datetime",
            ValueType::Date => "date",
        }
    }

    /// Import statement the annotation needs, if any.
    pub fn import(self) -> Option<&'static str> {
        match self {
            ValueType::DateTime => Some("from datetime import datetime"),
            ValueType::Date => Some("from datetime import date"),
            _ => None,
        }
    }
}

/// A value type, optionally wrapped as nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SemanticType {
    pub base: ValueType,
    pub optional: bool,
}

impl SemanticType {
    pub fn new(base: ValueType, optional: bool) -> Self {
        Self { base, optional }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "{} | None", self.base.as_str())
        } else {
            f.write_str(self.base.as_str())
        }
    }
}

/// Module-level enumeration or multi-value set type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum TypeDefinition {
    Enum(Vec<String>),
    Set(Vec<String>),
}

impl TypeDefinition {
    pub fn values(&self) -> &[String] {
        match self {
            TypeDefinition::Enum(values) | TypeDefinition::Set(values) => values,
        }
    }
}

impl fmt::Display for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constructor = match self {
            TypeDefinition::Enum(_) => "Enum",
            TypeDefinition::Set(_) => "SET",
        };
        let args = self
            .values()
            .iter()
            .map(|value| quote(value))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{constructor}({args})")
    }
}

/// Double-quoted Python string literal.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(ch);
            }
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

/// Normalized column ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRecord {
    /// Physical column name.
    pub name: String,
    /// Target type expression, e.g. `String(64)` or `enum_status`.
    pub type_expr: String,
    pub semantic_type: SemanticType,
    /// Native category name, e.g. `VARCHAR`.
    pub native_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    pub server_default: Option<String>,
    pub index: bool,
    pub unique: bool,
    /// Python attribute name.
    pub field_name: String,
    pub max_length: Option<u32>,
}

/// Normalized table ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRecord {
    /// Model class name.
    pub model: String,
    /// Physical table name.
    pub name: String,
    pub columns: Vec<ColumnRecord>,
    /// Enum/set definitions first introduced by this table.
    pub type_definitions: Vec<(String, TypeDefinition)>,
    /// Storage options, including the table charset.
    pub options: TableOptions,
    /// Multi-column indexes not folded into column flags.
    pub indexes: Vec<Index>,
    pub is_abstract: bool,
    pub with_tablename: bool,
}

impl TableRecord {
    pub fn charset(&self) -> Option<&str> {
        self.options.charset.as_deref()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnRecord> {
        self.columns.iter().find(|column| column.name == name)
    }
}
