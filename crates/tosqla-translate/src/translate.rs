use tracing::{debug, info, warn};

use tosqla_core::Table;

use crate::context::{GenerationContext, Imports};
use crate::errors::Result;
use crate::model::{ColumnRecord, SemanticType, TableRecord};
use crate::naming::{field_identifier, model_identifier};
use crate::reconcile::IndexReconciler;
use crate::typemap::map_column;

/// Per-run switches copied onto every table record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Mark generated models abstract.
    pub abstract_models: bool,
    /// Emit `__tablename__` on generated models.
    pub with_tablename: bool,
}

/// Entry point for turning table schemas into renderable records.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    options: TranslateOptions,
}

impl Translator {
    pub fn new(options: TranslateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> TranslateOptions {
        self.options
    }

    /// Translate tables in the given order, sharing `ctx` across all of them.
    ///
    /// Stops at the first unsupported column type; the context is then only
    /// good for dropping.
    pub fn translate_tables(
        &self,
        tables: &[Table],
        ctx: &mut GenerationContext,
    ) -> Result<Vec<TableRecord>> {
        let records = tables
            .iter()
            .map(|table| self.translate_table(table, ctx))
            .collect::<Result<Vec<_>>>()?;

        info!(
            tables = records.len(),
            type_definitions = ctx.registry().len(),
            core_imports = ctx.imports().core.len(),
            dialect_imports = ctx.imports().dialect.len(),
            "translation finished"
        );

        Ok(records)
    }

    /// Translate one table, accumulating its imports into `ctx`.
    pub fn translate_table(
        &self,
        table: &Table,
        ctx: &mut GenerationContext,
    ) -> Result<TableRecord> {
        debug!(table = %table.name, columns = table.columns.len(), "translating table");

        let mut imports = Imports::default();
        let mut type_definitions = Vec::new();
        let mut reconciler = IndexReconciler::new(&table.indexes);
        let mut columns = Vec::with_capacity(table.columns.len());

        for column in &table.columns {
            let mapped = map_column(table, column, ctx.registry_mut())?;
            imports.merge(mapped.imports);
            type_definitions.extend(mapped.introduced);

            let mut record = ColumnRecord {
                name: column.name.clone(),
                type_expr: mapped.expr,
                semantic_type: SemanticType::new(mapped.value_type, column.is_nullable),
                native_type: mapped.native.name().to_string(),
                nullable: column.is_nullable,
                primary_key: column.is_primary_key,
                server_default: mapped.server_default,
                index: column.is_indexed,
                unique: column.is_unique,
                field_name: field_identifier(&column.name),
                max_length: mapped.native.max_length(),
            };
            reconciler.reconcile(&mut record);

            debug!(
                table = %table.name,
                column = %record.name,
                native = %record.native_type,
                target = %record.type_expr,
                "mapped column"
            );
            columns.push(record);
        }

        let indexes = reconciler.remaining();
        for index in &indexes {
            if let Some(column) = index.single_column() {
                warn!(
                    table = %table.name,
                    index = %index.name,
                    column = %column,
                    "single-column index left over after reconciliation"
                );
            }
        }
        if !indexes.is_empty() {
            imports.add_core("Index");
        }

        ctx.merge_imports(imports);

        Ok(TableRecord {
            model: model_identifier(&table.name),
            name: table.name.clone(),
            columns,
            type_definitions,
            options: table.options.clone(),
            indexes,
            is_abstract: self.options.abstract_models,
            with_tablename: self.options.with_tablename,
        })
    }
}
