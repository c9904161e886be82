use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default precision MySQL applies to `DECIMAL` without arguments.
pub const DEFAULT_DECIMAL_PRECISION: u32 = 10;

/// Raw MySQL type metadata for a column, as read from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnType {
    /// Lower-case catalog type name (e.g. `varchar`, `mediumtext`).
    pub data_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    /// Column-level character set, when one is declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    /// Permitted values of `enum` and `set` columns, in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl ColumnType {
    pub fn new(data_type: impl Into<String>) -> Self {
        Self {
            data_type: data_type.into(),
            length: None,
            precision: None,
            scale: None,
            charset: None,
            values: Vec::new(),
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Classify the descriptor into one of the supported native categories.
    pub fn native(&self) -> NativeType {
        let data_type = self.data_type.trim().to_ascii_lowercase();
        match data_type.as_str() {
            "double" | "double precision" => NativeType::Double,
            "float" => NativeType::Float(FloatKind::Float),
            "real" => NativeType::Float(FloatKind::Real),
            "tinyint" => NativeType::Integer(IntegerKind::TinyInt),
            "smallint" => NativeType::Integer(IntegerKind::SmallInt),
            "mediumint" => NativeType::Integer(IntegerKind::MediumInt),
            "int" | "integer" => NativeType::Integer(IntegerKind::Int),
            "bigint" => NativeType::Integer(IntegerKind::BigInt),
            "decimal" | "numeric" | "dec" | "fixed" => NativeType::Decimal {
                precision: self.precision.unwrap_or(DEFAULT_DECIMAL_PRECISION),
                scale: self.scale.unwrap_or(0),
            },
            "timestamp" => NativeType::Timestamp,
            "datetime" => NativeType::DateTime,
            "date" => NativeType::Date,
            "set" => NativeType::Set(self.values.clone()),
            "enum" => NativeType::Enum(self.values.clone()),
            "text" => self.text(TextKind::Text),
            "tinytext" => self.text(TextKind::TinyText),
            "mediumtext" => self.text(TextKind::MediumText),
            "longtext" => self.text(TextKind::LongText),
            "char" => self.char(CharKind::Char),
            "varchar" => self.char(CharKind::VarChar),
            "nchar" => self.char(CharKind::NChar),
            "nvarchar" => self.char(CharKind::NVarChar),
            "blob" => self.blob(BlobKind::Blob),
            "mediumblob" => self.blob(BlobKind::MediumBlob),
            "longblob" => self.blob(BlobKind::LongBlob),
            "binary" => NativeType::Binary {
                length: self.length.unwrap_or(1),
            },
            "json" => NativeType::Json,
            "year" => NativeType::Year,
            _ => NativeType::Other(data_type.to_ascii_uppercase()),
        }
    }

    fn text(&self, kind: TextKind) -> NativeType {
        NativeType::Text {
            kind,
            length: self.length,
            charset: self.charset.clone(),
        }
    }

    fn char(&self, kind: CharKind) -> NativeType {
        NativeType::Char {
            kind,
            // CHAR without a length is CHAR(1) in MySQL.
            length: self.length.unwrap_or(1),
            charset: self.charset.clone(),
        }
    }

    fn blob(&self, kind: BlobKind) -> NativeType {
        NativeType::Blob {
            kind,
            length: self.length,
        }
    }
}

/// Closed set of native type categories understood by the translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeType {
    Double,
    Float(FloatKind),
    Integer(IntegerKind),
    Decimal { precision: u32, scale: u32 },
    Timestamp,
    DateTime,
    Date,
    /// Multi-valued `SET`; values keep their declared order.
    Set(Vec<String>),
    Enum(Vec<String>),
    Text {
        kind: TextKind,
        length: Option<u32>,
        charset: Option<String>,
    },
    Char {
        kind: CharKind,
        length: u32,
        charset: Option<String>,
    },
    Blob {
        kind: BlobKind,
        length: Option<u32>,
    },
    Binary { length: u32 },
    Json,
    Year,
    /// Any catalog type outside the supported vocabulary.
    Other(String),
}

impl NativeType {
    /// Upper-case dialect name of the category (e.g. `VARCHAR`).
    pub fn name(&self) -> &str {
        match self {
            NativeType::Double => "DOUBLE",
            NativeType::Float(kind) => kind.name(),
            NativeType::Integer(kind) => kind.name(),
            NativeType::Decimal { .. } => "DECIMAL",
            NativeType::Timestamp => "TIMESTAMP",
            NativeType::DateTime => "DATETIME",
            NativeType::Date => "DATE",
            NativeType::Set(_) => "SET",
            NativeType::Enum(_) => "ENUM",
            NativeType::Text { kind, .. } => kind.name(),
            NativeType::Char { kind, .. } => kind.name(),
            NativeType::Blob { kind, .. } => kind.name(),
            NativeType::Binary { .. } => "BINARY",
            NativeType::Json => "JSON",
            NativeType::Year => "YEAR",
            NativeType::Other(name) => name,
        }
    }

    /// Maximum length carried by the length-bearing families.
    ///
    /// Enums and sets report their longest permitted value, in characters.
    pub fn max_length(&self) -> Option<u32> {
        match self {
            NativeType::Text { length, .. } | NativeType::Blob { length, .. } => *length,
            NativeType::Char { length, .. } | NativeType::Binary { length } => Some(*length),
            NativeType::Enum(values) | NativeType::Set(values) => values
                .iter()
                .map(|value| u32::try_from(value.chars().count()).unwrap_or(u32::MAX))
                .max(),
            _ => None,
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeType::Decimal { precision, scale } => write!(f, "DECIMAL({precision},{scale})"),
            NativeType::Char { kind, length, .. } => write!(f, "{}({length})", kind.name()),
            NativeType::Binary { length } => write!(f, "BINARY({length})"),
            NativeType::Set(values) | NativeType::Enum(values) => {
                write!(f, "{}({})", self.name(), values.join(","))
            }
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatKind {
    Float,
    Real,
}

impl FloatKind {
    pub fn name(self) -> &'static str {
        match self {
            FloatKind::Float => "FLOAT",
            FloatKind::Real => "REAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerKind {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
}

impl IntegerKind {
    pub fn name(self) -> &'static str {
        match self {
            IntegerKind::TinyInt => "TINYINT",
            IntegerKind::SmallInt => "SMALLINT",
            IntegerKind::MediumInt => "MEDIUMINT",
            IntegerKind::Int => "INTEGER",
            IntegerKind::BigInt => "BIGINT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    Text,
    TinyText,
    MediumText,
    LongText,
}

impl TextKind {
    pub fn name(self) -> &'static str {
        match self {
            TextKind::Text => "TEXT",
            TextKind::TinyText => "TINYTEXT",
            TextKind::MediumText => "MEDIUMTEXT",
            TextKind::LongText => "LONGTEXT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharKind {
    Char,
    VarChar,
    NChar,
    NVarChar,
}

impl CharKind {
    pub fn name(self) -> &'static str {
        match self {
            CharKind::Char => "CHAR",
            CharKind::VarChar => "VARCHAR",
            CharKind::NChar => "NCHAR",
            CharKind::NVarChar => "NVARCHAR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobKind {
    Blob,
    MediumBlob,
    LongBlob,
}

impl BlobKind {
    pub fn name(self) -> &'static str {
        match self {
            BlobKind::Blob => "BLOB",
            BlobKind::MediumBlob => "MEDIUMBLOB",
            BlobKind::LongBlob => "LONGBLOB",
        }
    }
}
