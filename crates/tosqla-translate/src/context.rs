use std::collections::BTreeSet;

use serde::Serialize;

use crate::registry::TypeRegistry;

/// Symbols a rendered module has to import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Imports {
    /// Core type-system symbols (`from sqlalchemy import ...`).
    pub core: BTreeSet<String>,
    /// Dialect-only symbols (`from sqlalchemy.dialects.mysql import ...`).
    pub dialect: BTreeSet<String>,
    /// Import statements needed by value annotations.
    pub values: BTreeSet<String>,
}

impl Imports {
    pub fn add_core(&mut self, symbol: &str) {
        self.core.insert(symbol.to_string());
    }

    pub fn add_dialect(&mut self, symbol: &str) {
        self.dialect.insert(symbol.to_string());
    }

    pub fn add_value(&mut self, statement: &str) {
        self.values.insert(statement.to_string());
    }

    pub fn merge(&mut self, other: Imports) {
        self.core.extend(other.core);
        self.dialect.extend(other.dialect);
        self.values.extend(other.values);
    }

    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.dialect.is_empty() && self.values.is_empty()
    }
}

/// State shared by every table of one generation run.
///
/// Create one per run and drop it when the run ends; after a failed
/// translation the context must not be reused.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    imports: Imports,
    registry: TypeRegistry,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn imports(&self) -> &Imports {
        &self.imports
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    pub(crate) fn merge_imports(&mut self, imports: Imports) {
        self.imports.merge(imports);
    }
}
